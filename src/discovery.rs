use std::fs;
use std::path::Path;

use log::{debug, info};
use serde_json::Value;

use crate::error::ParserError;
use crate::types::HostEntry;

const DETAIL_KEY: &str = "Detail";
const HOST_LIST_KEY: &str = "host_list";

/// Read the whole discovery export into memory.
pub(crate) fn read_discovery(path: &Path) -> Result<String, ParserError> {
    let data = fs::read_to_string(path).map_err(|source| ParserError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {path:?}", data.len());

    Ok(data)
}

/// Decode a discovery export and return its `Detail.host_list` sequence.
pub(crate) fn parse_host_list(path: &Path, data: &str) -> Result<Vec<HostEntry>, ParserError> {
    let mut document: Value = serde_json::from_str(data).map_err(|source| ParserError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Successfully read JSON file: {path:?}");

    let detail = document
        .get_mut(DETAIL_KEY)
        .ok_or_else(|| ParserError::Structure(format!("missing '{DETAIL_KEY}'")))?;

    let host_list = detail.get_mut(HOST_LIST_KEY).map(Value::take).ok_or_else(|| {
        ParserError::Structure(format!("missing '{DETAIL_KEY}.{HOST_LIST_KEY}'"))
    })?;

    if !host_list.is_array() {
        return Err(ParserError::Structure(format!(
            "'{HOST_LIST_KEY}' must be a list"
        )));
    }

    let hosts: Vec<HostEntry> = serde_json::from_value(host_list)
        .map_err(|err| ParserError::Structure(format!("malformed host entry: {err}")))?;
    debug!("Loaded {} host entries", hosts.len());

    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use crate::discovery::{parse_host_list, read_discovery};
    use crate::error::ParserError;
    use crate::inventory::count_valid_ips;

    const PATH: &str = "discovery.json";

    #[test]
    fn parse_sample_discovery() -> Result<(), anyhow::Error> {
        let path = Path::new("testdata/discovery.json");
        let data = read_discovery(path)?;

        let hosts = parse_host_list(path, &data)?;

        assert_eq!(hosts.len(), 4);
        assert_eq!(hosts[0].host.host_id, Some(json!("host-001")));
        assert_eq!(hosts[0].host.ip_v4_address, Some(json!("192.168.1.100")));
        assert_eq!(hosts[3].host.ip_v4_address, None);

        Ok(())
    }

    #[test]
    fn parse_empty_host_list() -> Result<(), anyhow::Error> {
        let hosts = parse_host_list(Path::new(PATH), r#"{"Detail": {"host_list": []}}"#)?;
        assert!(hosts.is_empty());
        Ok(())
    }

    #[test]
    fn parse_keeps_host_with_non_string_field() -> Result<(), anyhow::Error> {
        let hosts = parse_host_list(
            Path::new(PATH),
            r#"{"Detail":{"host_list":[{"host":{"host_id":17,"ip_v4_address":"10.0.0.1"}}]}}"#,
        )?;

        assert_eq!(hosts.len(), 1);
        assert_eq!(hosts[0].host.host_id, Some(json!(17)));
        assert_eq!(count_valid_ips(&hosts), 1);
        Ok(())
    }

    #[test]
    fn read_fails_due_to_missing_path() {
        let err = read_discovery(Path::new("<missing>.json")).unwrap_err();
        assert!(matches!(err, ParserError::Io { .. }));
        assert!(err.to_string().contains("No such file or directory"));
    }

    #[test]
    fn parse_fails_due_to_invalid_json() {
        let err = parse_host_list(Path::new(PATH), "{\"Detail\": ").unwrap_err();
        assert!(matches!(err, ParserError::Parse { .. }));
    }

    #[test]
    fn parse_fails_due_to_missing_detail() {
        let err = parse_host_list(Path::new(PATH), r#"{"Summary": {}}"#).unwrap_err();
        assert!(matches!(err, ParserError::Structure(ref msg) if msg == "missing 'Detail'"));
    }

    #[test]
    fn parse_fails_due_to_missing_host_list() {
        let err = parse_host_list(Path::new(PATH), r#"{"Detail": {"hosts": []}}"#).unwrap_err();
        assert!(
            matches!(err, ParserError::Structure(ref msg) if msg == "missing 'Detail.host_list'")
        );
    }

    #[test]
    fn parse_fails_when_host_list_is_not_a_list() {
        let err =
            parse_host_list(Path::new(PATH), r#"{"Detail": {"host_list": {"host": {}}}}"#)
                .unwrap_err();
        assert!(matches!(err, ParserError::Structure(ref msg) if msg.contains("must be a list")));
    }

    #[test]
    fn parse_fails_on_non_object_host() {
        let err = parse_host_list(
            Path::new(PATH),
            r#"{"Detail": {"host_list": [{"host": "10.0.0.1"}]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParserError::Structure(..)));
    }
}
