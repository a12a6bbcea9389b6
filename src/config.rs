use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::poller::DEFAULT_POLL_INTERVAL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TEAM_OWNERS_FILE: &str = "data/team_owners.json";
const MIN_POLL_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub spreadsheet_id: String,
    pub service_account_key: String,
    pub scoring_cache: bool,
    pub poll_interval: Duration,
    pub team_owners_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a socket address")?;
        let poll_secs = env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL.as_secs())
            .max(MIN_POLL_SECS);

        Ok(Self {
            bind_addr,
            spreadsheet_id: required("SPREADSHEET_ID")?,
            service_account_key: required("GOOGLE_SERVICE_ACCOUNT_KEY")?,
            scoring_cache: env::var("SCORING_CACHE")
                .ok()
                .and_then(|val| parse_bool(&val))
                .unwrap_or(true),
            poll_interval: Duration::from_secs(poll_secs),
            team_owners_file: env::var("TEAM_OWNERS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_TEAM_OWNERS_FILE)),
        })
    }
}

fn required(name: &str) -> Result<String> {
    let value = env::var(name).with_context(|| format!("{name} must be set"))?;
    if value.trim().is_empty() {
        return Err(anyhow::anyhow!("{name} is set but empty"));
    }
    Ok(value)
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

pub fn load_team_owner_labels(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read team owners file {}", path.display()))?;
    serde_json::from_str(&raw).context("team owners file must be a JSON array of strings")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bools_accept_common_spellings() {
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn owner_labels_load_from_json_file() {
        let path = env::temp_dir().join(format!("kbl_owners_{}.json", std::process::id()));
        fs::write(&path, r#"["Super Strikers (Alex)", "Night Owls (Priya)"]"#).unwrap();
        let labels = load_team_owner_labels(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(labels, vec!["Super Strikers (Alex)", "Night Owls (Priya)"]);
    }

    #[test]
    fn missing_owner_file_is_an_error() {
        let path = env::temp_dir().join("kbl_owners_does_not_exist.json");
        assert!(load_team_owner_labels(&path).is_err());
    }
}
