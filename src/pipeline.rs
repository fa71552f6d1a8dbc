use std::io::Write;

use log::{info, warn};

use crate::args::Settings;
use crate::discovery::{parse_host_list, read_discovery};
use crate::error::ParserError;
use crate::inventory::{count_valid_ips, write_hosts, write_total};
use crate::sensitive::SensitiveDataPolicy;

/// Read, screen and parse the discovery export, then print the host
/// inventory followed by the total of valid IPv4 addresses.
///
/// Returns the number of valid IPv4 addresses.
pub(crate) fn run<W: Write>(
    settings: &Settings,
    policy: &dyn SensitiveDataPolicy,
    out: &mut W,
) -> Result<usize, ParserError> {
    let path = settings.input.as_path();
    info!("Starting parsing of JSON file: {path:?}");

    let data = read_discovery(path)?;

    if let Some(rule) = policy.scan(&data) {
        warn!("Potential sensitive data found in {path:?}");
        return Err(ParserError::SensitiveData {
            path: path.to_path_buf(),
            rule,
        });
    }

    let hosts = parse_host_list(path, &data)?;

    let valid_ip_count = count_valid_ips(&hosts);

    let io_err = |source: std::io::Error| ParserError::Io {
        path: "<stdout>".into(),
        source,
    };
    write_hosts(out, &hosts).map_err(io_err)?;
    write_total(out, valid_ip_count).map_err(io_err)?;
    out.flush().map_err(io_err)?;

    info!("Parsing completed: {valid_ip_count} valid IPv4 addresses found");

    Ok(valid_ip_count)
}
