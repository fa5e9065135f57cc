//! Server configuration from environment variables

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::Serialize;

/// Which task store backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    File,
    Memory,
}

impl StorageKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Some(Self::File),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub addr: SocketAddr,
    pub storage: StorageKind,
    pub seed_demo: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".taskdesk-data"),
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8081),
            storage: StorageKind::File,
            seed_demo: false,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source. Unparseable values fall back
    /// to the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_dir = lookup("TASKDESK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let host = match lookup("TASKDESK_HOST") {
            Some(raw) => raw.trim().parse::<IpAddr>().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid TASKDESK_HOST {:?}", raw);
                defaults.addr.ip()
            }),
            None => defaults.addr.ip(),
        };
        let port = match lookup("TASKDESK_PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid TASKDESK_PORT {:?}", raw);
                defaults.addr.port()
            }),
            None => defaults.addr.port(),
        };

        let storage = match lookup("TASKDESK_STORAGE") {
            Some(raw) => StorageKind::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring invalid TASKDESK_STORAGE {:?}", raw);
                defaults.storage
            }),
            None => defaults.storage,
        };

        let seed_demo = lookup("TASKDESK_SEED_DEMO")
            .and_then(|raw| parse_flag(&raw))
            .unwrap_or(defaults.seed_demo);

        Self {
            data_dir,
            addr: SocketAddr::new(host, port),
            storage,
            seed_demo,
        }
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = config_from(&[]);
        assert_eq!(config.addr.port(), 8081);
        assert_eq!(config.storage, StorageKind::File);
        assert!(!config.seed_demo);
        assert_eq!(config.tasks_path(), PathBuf::from(".taskdesk-data/tasks.json"));
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("TASKDESK_DATA_DIR", "/tmp/td"),
            ("TASKDESK_HOST", "127.0.0.1"),
            ("TASKDESK_PORT", "9000"),
            ("TASKDESK_STORAGE", "Memory"),
            ("TASKDESK_SEED_DEMO", "yes"),
        ]);
        assert_eq!(config.addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.storage, StorageKind::Memory);
        assert!(config.seed_demo);
        assert_eq!(config.tasks_path(), PathBuf::from("/tmp/td/tasks.json"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("TASKDESK_PORT", "eighty"),
            ("TASKDESK_STORAGE", "postgres"),
            ("TASKDESK_SEED_DEMO", "maybe"),
        ]);
        assert_eq!(config.addr.port(), 8081);
        assert_eq!(config.storage, StorageKind::File);
        assert!(!config.seed_demo);
    }
}
