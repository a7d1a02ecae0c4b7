//! Test fixtures and naming helpers.

use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_DOCKER_SOCKET: &str = "/var/run/docker.sock";

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Database name unique to this process and call, safe to use unquoted.
#[must_use]
pub fn unique_database_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let pid = std::process::id();
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("gatehouse_test_{pid}_{nanos}_{sequence}")
}

/// Whether a container runtime is reachable, honouring `DOCKER_HOST`.
#[must_use]
pub fn docker_available() -> bool {
    docker_reachable(std::env::var("DOCKER_HOST").ok().as_deref())
}

fn docker_reachable(host: Option<&str>) -> bool {
    match host.map(str::trim).filter(|host| !host.is_empty()) {
        Some(host) => host
            .strip_prefix("unix://")
            .is_none_or(|socket| Path::new(socket).exists()),
        None => {
            Path::new(DEFAULT_DOCKER_SOCKET).exists()
                || Command::new("docker")
                    .arg("info")
                    .output()
                    .is_ok_and(|output| output.status.success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docker_host_socket_must_exist() {
        assert!(!docker_reachable(Some("unix:///definitely/missing.sock")));
        assert!(docker_reachable(Some("tcp://127.0.0.1:2375")));
    }

    #[test]
    fn blank_docker_host_falls_back_to_default_probe() {
        assert_eq!(docker_reachable(Some("  ")), docker_reachable(None));
    }

    #[test]
    fn names_are_unique_and_identifier_safe() {
        let first = unique_database_name();
        let second = unique_database_name();
        assert_ne!(first, second);
        assert!(
            first
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        );
        assert!(first.len() < 64);
    }
}
