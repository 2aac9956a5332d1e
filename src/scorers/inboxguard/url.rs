//! URL extraction and red-flag detection, plus the standalone
//! `analyze_url` operation for when a caller submits a bare URL instead of
//! a full message body. Mirrors `_extract_urls`, `_url_flags`, and
//! `analyze_url` in `backend/risk_engine/inboxguard.py`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::scorers::build_risk_response;
use crate::types::{RecommendedAction, RiskResponse};

const URL_SHORTENERS: &[&str] = &["bit.ly", "tinyurl.com", "t.co", "goo.gl", "ow.ly"];

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("valid URL pattern"));
static IPV4_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\d+\.\d+\.\d+").expect("valid IPv4 pattern"));

pub fn extract_urls(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn domain_of(raw_url: &str) -> String {
    url::Url::parse(raw_url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_default()
}

/// Heuristic red flags for a single URL. Mirrors the original's ordered
/// rule checks exactly, including the "no domain" short-circuit.
pub fn url_flags(raw_url: &str) -> Vec<String> {
    let mut flags = Vec::new();
    let domain = domain_of(raw_url);

    if domain.is_empty() {
        return vec!["No domain found".to_string()];
    }
    if URL_SHORTENERS.contains(&domain.as_str()) {
        flags.push("URL shortener used".to_string());
    }
    if IPV4_PATTERN.is_match(&domain) {
        flags.push("IP address used in URL".to_string());
    }
    if domain.matches('-').count() >= 2 {
        flags.push("Multiple hyphens in domain".to_string());
    }
    if domain.matches('.').count() >= 3 {
        flags.push("Long subdomain chain".to_string());
    }
    let lower_url = raw_url.to_lowercase();
    if ["login", "verify", "secure", "account", "update"]
        .iter()
        .any(|kw| lower_url.contains(kw))
    {
        flags.push("Contains sensitive action keywords".to_string());
    }
    if domain.contains("xn--") {
        flags.push("Punycode domain detected".to_string());
    }
    let tld = domain.rsplit('.').next().unwrap_or_default();
    if tld.len() > 3 {
        flags.push("Unusual TLD length".to_string());
    }
    flags
}

/// Evidence for a bare-URL submission (no surrounding message).
pub fn analyze_url(raw_url: &str) -> RiskResponse {
    let mut flags = url_flags(raw_url);
    let score = 15 * flags.len() as i32;
    if flags.is_empty() {
        flags = vec!["No obvious URL red flags detected.".to_string()];
    }

    let domain = domain_of(raw_url);

    let recommended_actions = vec![
        RecommendedAction::new(
            "manual",
            "Open manually",
            "Type the known URL into your browser instead of clicking.",
        ),
        RecommendedAction::new(
            "verify-sender",
            "Verify the sender",
            "Confirm the message with the organization using an official contact method.",
        ),
    ];

    let looks_like_spoof = flags
        .iter()
        .any(|f| f.contains("Punycode") || f.contains("hyphens"));

    let mut metadata = HashMap::new();
    metadata.insert("domain".to_string(), json!(domain));
    metadata.insert("looks_like_spoof".to_string(), json!(looks_like_spoof));
    metadata.insert("url_red_flags".to_string(), json!(flags));

    build_risk_response(
        score,
        flags,
        "Avoid clicking. Validate the URL through official channels.",
        recommended_actions,
        None,
        metadata,
    )
}
