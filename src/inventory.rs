use std::io::Write;
use std::net::Ipv4Addr;

use log::{debug, warn};
use serde_json::Value;

use crate::types::HostEntry;

/// Whether `candidate` is a strict dotted-quad IPv4 literal.
///
/// Relies on the standard library parser, which rejects leading zeros,
/// surrounding whitespace and the shorthand forms accepted by `inet_aton`.
pub(crate) fn is_valid_ipv4(candidate: Option<&str>) -> bool {
    candidate.is_some_and(|addr| addr.parse::<Ipv4Addr>().is_ok())
}

/// Number of hosts whose `ip_v4_address` is a string holding a valid address.
pub(crate) fn count_valid_ips(hosts: &[HostEntry]) -> usize {
    hosts
        .iter()
        .filter_map(|entry| entry.host.ip_v4_address.as_ref())
        .filter(|value| match value {
            Value::Null => false,
            Value::String(addr) if addr.is_empty() => false,
            Value::String(addr) => {
                let valid = is_valid_ipv4(Some(addr.as_str()));
                if valid {
                    debug!("Valid IPv4 address: {addr}");
                } else {
                    warn!("Invalid IPv4 address: {addr:?}");
                }
                valid
            }
            other => {
                warn!("Invalid IPv4 address: {other}");
                false
            }
        })
        .count()
}

/// Print one block per host, numbered from 1, each preceded by a blank line.
pub(crate) fn write_hosts<W: Write>(out: &mut W, hosts: &[HostEntry]) -> std::io::Result<()> {
    for (index, entry) in hosts.iter().enumerate().map(|(i, e)| (i + 1, e)) {
        writeln!(out)?;
        writeln!(out, "Host {index}:")?;
        for (label, value) in entry.host.fields() {
            writeln!(out, "  {label}: {value}")?;
        }
        debug!(
            "Processed host {index}: host_id={:?}, ip_v4={:?}",
            entry.host.host_id, entry.host.ip_v4_address
        );
    }

    Ok(())
}

pub(crate) fn write_total<W: Write>(out: &mut W, valid_ip_count: usize) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Total Valid IPv4 Address(es): {valid_ip_count}")
}
