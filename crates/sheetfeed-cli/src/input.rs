use anyhow::{Context, Result};
use std::io::{Read, stdin};

use crate::config::Config;

/// Where CSV text comes from: a path, an `http(s)` URL, or stdin when neither is given
pub fn read_source(input: Option<&str>) -> Result<String> {
    match input {
        Some(s) if is_url(s) => fetch(s),
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
        }
        None => {
            let mut buf = String::new();
            stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

pub fn read_feed(config: &Config, name: &str) -> Result<String> {
    let location = config.feed(name)?;
    tracing::debug!(feed = name, location, "resolved feed");
    read_source(Some(location))
}

fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn fetch(url: &str) -> Result<String> {
    tracing::info!(url, "fetching");
    let body = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.text())
        .with_context(|| format!("failed to load {}", url))?;
    tracing::debug!(bytes = body.len(), "fetched");
    Ok(body)
}
