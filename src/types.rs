use std::borrow::Cow;

use serde::Deserialize;
use serde_json::Value;

/// Placeholder rendered for any host field that is missing or `null`.
pub(crate) const PLACEHOLDER: &str = "N/A";

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct HostEntry {
    #[serde(default)]
    pub(crate) host: Host,
}

/// Host record as exported. Values are kept untyped so an odd field in one
/// host doesn't reject the whole export.
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Host {
    pub(crate) host_id: Option<Value>,
    pub(crate) mac_address: Option<Value>,
    pub(crate) ip_v4_address: Option<Value>,
    pub(crate) ip_v4_subnet: Option<Value>,
    pub(crate) ip_v6_address: Option<Value>,
    pub(crate) mdns_name: Option<Value>,
    pub(crate) user_name: Option<Value>,
}

impl Host {
    /// Label/value pairs in presentation order.
    pub(crate) fn fields(&self) -> [(&'static str, Cow<'_, str>); 7] {
        [
            ("Host ID", display(&self.host_id)),
            ("MAC Address", display(&self.mac_address)),
            ("IPv4 Address", display(&self.ip_v4_address)),
            ("IPv4 Subnet", display(&self.ip_v4_subnet)),
            ("IPv6 Address", display(&self.ip_v6_address)),
            ("MDNS Name", display(&self.mdns_name)),
            ("User Name", display(&self.user_name)),
        ]
    }
}

fn display(value: &Option<Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(PLACEHOLDER),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{HostEntry, PLACEHOLDER};

    #[test]
    fn missing_host_key_defaults_to_empty_host() -> Result<(), serde_json::Error> {
        let entry: HostEntry = serde_json::from_str(r#"{"other": 1}"#)?;
        assert_eq!(entry, HostEntry::default());
        Ok(())
    }

    #[test]
    fn null_and_missing_fields_render_placeholder() -> Result<(), serde_json::Error> {
        let entry: HostEntry = serde_json::from_str(
            r#"{"host": {"host_id": "h-1", "mac_address": null, "vendor": "ignored"}}"#,
        )?;

        let fields = entry.host.fields();
        assert_eq!(fields[0].0, "Host ID");
        assert_eq!(fields[0].1, "h-1");
        assert_eq!(fields[1].0, "MAC Address");
        assert_eq!(fields[1].1, PLACEHOLDER);
        assert!(fields[2..].iter().all(|(_, value)| value == PLACEHOLDER));
        Ok(())
    }

    #[test]
    fn non_string_fields_render_as_json() -> Result<(), serde_json::Error> {
        let entry: HostEntry = serde_json::from_str(
            r#"{"host": {"host_id": 17, "ip_v4_address": false, "user_name": ["a", "b"]}}"#,
        )?;

        let fields = entry.host.fields();
        assert_eq!(fields[0].1, "17");
        assert_eq!(fields[2].1, "false");
        assert_eq!(fields[6].1, r#"["a","b"]"#);
        Ok(())
    }
}
