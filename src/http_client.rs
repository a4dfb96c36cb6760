use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 120;
const USER_AGENT: &str = concat!("ffstat_terminal/", env!("CARGO_PKG_VERSION"));

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared client for stats requests. `STATS_TIMEOUT_SECS` is read once, on first use.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let secs = timeout_secs_from(env::var("STATS_TIMEOUT_SECS").ok().as_deref());
        Client::builder()
            .timeout(Duration::from_secs(secs))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build http client")
    })
}

/// Unset or unparsable values fall back to the default; the rest clamp to 1..=120.
pub fn timeout_secs_from(raw: Option<&str>) -> u64 {
    raw.and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
        .clamp(1, MAX_TIMEOUT_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_defaults_and_clamps() {
        assert_eq!(timeout_secs_from(None), 10);
        assert_eq!(timeout_secs_from(Some("abc")), 10);
        assert_eq!(timeout_secs_from(Some(" 25 ")), 25);
        assert_eq!(timeout_secs_from(Some("0")), 1);
        assert_eq!(timeout_secs_from(Some("9000")), 120);
    }
}
