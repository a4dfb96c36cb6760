use anyhow::{Context, Result, anyhow};

use crate::http_client::http_client;
use crate::stats::PlayerStatRecord;

pub const DEFAULT_STATS_URL: &str = "http://localhost:5000/api/statistics";

pub fn fetch_player_stats(url: &str) -> Result<Vec<PlayerStatRecord>> {
    let client = http_client()?;

    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {}: {}", status, body.trim()));
    }
    parse_player_stats_json(&body)
}

pub fn parse_player_stats_json(raw: &str) -> Result<Vec<PlayerStatRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).with_context(|| {
        // The stats backend answers database failures with a plain-text 200.
        format!("invalid statistics json: {}", snippet(trimmed))
    })
}

fn snippet(raw: &str) -> String {
    const MAX_CHARS: usize = 80;
    let mut out: String = raw.chars().take(MAX_CHARS).collect();
    if raw.chars().count() > MAX_CHARS {
        out.push_str("...");
    }
    out
}
