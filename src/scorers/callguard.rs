//! CallGuard: scores a live phone call from a list of detected signals.
//!
//! Weight table, safe-script copy, and the highest-signal tie-break all
//! mirror `backend/risk_engine/callguard.py::assess` exactly.

use std::collections::HashMap;

use serde_json::json;

use crate::scorers::build_risk_response;
use crate::types::{RecommendedAction, RiskResponse, SafeScript};

fn signal_weight(signal: &str) -> i32 {
    match signal {
        "urgency" => 10,
        "bank_impersonation" => 25,
        "government_impersonation" => 25,
        "tech_support" => 20,
        "remote_access_request" => 30,
        "verification_code_request" => 35,
        "gift_cards" => 30,
        "crypto_payment" => 30,
        "threats_or_arrest" => 25,
        "too_good_to_be_true" => 15,
        "asks_to_keep_secret" => 15,
        "caller_id_mismatch" => 20,
        _ => 0,
    }
}

fn safe_script_for(signal: &str) -> Option<SafeScript> {
    match signal {
        "bank_impersonation" => Some(SafeScript::new(
            "I will call the bank back using the number on my card.",
            "I don't share information on inbound calls. I'll reach out directly.",
        )),
        "government_impersonation" => Some(SafeScript::new(
            "I don't handle legal matters over the phone. I will contact the agency directly.",
            "Please send official mail. I won't continue this call.",
        )),
        "tech_support" => Some(SafeScript::new(
            "I don't grant remote access. I'll contact support using the official site.",
            "No remote access. I'm ending the call now.",
        )),
        "verification_code_request" => Some(SafeScript::new(
            "I never share verification codes.",
            "Without that, I can't proceed. Goodbye.",
        )),
        "gift_cards" => Some(SafeScript::new(
            "I don't pay with gift cards.",
            "That payment method isn't acceptable. I'm ending this call.",
        )),
        _ => None,
    }
}

/// Evidence consumed by CallGuard: a list of signal identifiers detected by
/// upstream transcription/NLU, e.g. `["bank_impersonation", "urgency"]`.
pub fn assess(signals: &[String]) -> RiskResponse {
    let mut score = 0i32;
    let mut reasons = Vec::new();
    let mut highest_signal: Option<&str> = None;

    // Discard empty or whitespace-only signals before matching.
    let signals: Vec<&str> = signals
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    for &signal in &signals {
        let weight = signal_weight(signal);
        if weight != 0 {
            score += weight;
            reasons.push(format!("Signal detected: {}", signal.replace('_', " ")));
        }
        // Ties go to the last-seen signal at the maximum weight.
        let beats_current = match highest_signal {
            None => true,
            Some(current) => weight >= signal_weight(current),
        };
        if beats_current {
            highest_signal = Some(signal);
        }
    }

    let recommended_actions = vec![
        RecommendedAction::new(
            "pause-call",
            "Pause and verify",
            "Take a breath, avoid sharing info, and verify the caller independently.",
        ),
        RecommendedAction::new(
            "hang-up",
            "Hang up if pressured",
            "If they demand urgency or secrecy, end the call and call back using a trusted number.",
        ),
    ];

    let safe_script = highest_signal.and_then(safe_script_for);
    let next_action =
        "Verify the caller using an official phone number before sharing anything.";

    let signals_processed: Vec<&str> = signals
        .iter()
        .copied()
        .filter(|s| signal_weight(s) != 0)
        .collect();

    let mut metadata = HashMap::new();
    metadata.insert(
        "primary_signal".to_string(),
        json!(highest_signal.unwrap_or("none")),
    );
    metadata.insert("assessment_method".to_string(), json!("rule_based"));
    metadata.insert("signals_count".to_string(), json!(signals.len()));
    metadata.insert("signals_processed".to_string(), json!(signals_processed));

    if reasons.is_empty() {
        reasons.push("No high-risk signals detected.".to_string());
    }

    build_risk_response(
        score,
        reasons,
        next_action,
        recommended_actions,
        safe_script,
        metadata,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_signals_is_low_risk_with_default_reason() {
        let response = assess(&signals(&[]));
        assert_eq!(response.score, 0);
        assert_eq!(response.reasons, vec!["No high-risk signals detected."]);
        assert!(response.safe_script.is_none());
        assert_eq!(response.metadata["primary_signal"], json!("none"));
    }

    #[test]
    fn bank_impersonation_plus_urgency_accumulates_and_picks_highest() {
        let response = assess(&signals(&["urgency", "bank_impersonation"]));
        assert_eq!(response.score, 35);
        assert_eq!(response.reasons.len(), 2);
        assert_eq!(response.metadata["primary_signal"], json!("bank_impersonation"));
        assert!(response.safe_script.is_some());
    }

    #[test]
    fn verification_code_request_alone_crosses_high_threshold() {
        let response = assess(&signals(&["verification_code_request"]));
        assert_eq!(response.score, 35);
        assert!(matches!(response.level, crate::types::RiskLevel::Medium));
    }

    #[test]
    fn unknown_signal_contributes_no_weight_but_can_still_be_highest() {
        let response = assess(&signals(&["made_up_signal"]));
        assert_eq!(response.score, 0);
        assert_eq!(response.metadata["primary_signal"], json!("made_up_signal"));
        assert_eq!(response.reasons, vec!["No high-risk signals detected."]);
    }

    #[test]
    fn whitespace_only_signals_are_discarded_before_matching() {
        let response = assess(&signals(&["  ", "", "urgency", "\t"]));
        assert_eq!(response.score, 10);
        assert_eq!(response.metadata["signals_count"], json!(1));
        assert_eq!(response.metadata["primary_signal"], json!("urgency"));
    }

    #[test]
    fn last_signal_wins_ties() {
        // gift_cards and crypto_payment share weight 30; last one seen wins.
        let response = assess(&signals(&["gift_cards", "crypto_payment"]));
        assert_eq!(response.metadata["primary_signal"], json!("crypto_payment"));
    }

    #[test]
    fn three_strong_signals_reach_high_risk_with_otp_as_primary() {
        let response = assess(&signals(&[
            "verification_code_request",
            "remote_access_request",
            "bank_impersonation",
        ]));
        assert_eq!(response.score, 90);
        assert!(matches!(response.level, crate::types::RiskLevel::High));
        assert_eq!(response.reasons.len(), 3);
        assert_eq!(
            response.metadata["primary_signal"],
            json!("verification_code_request")
        );
        assert!(response.safe_script.is_some());
    }

    #[test]
    fn metadata_reports_supplemental_diagnostics() {
        let response = assess(&signals(&["urgency", "made_up_signal"]));
        assert_eq!(response.metadata["assessment_method"], json!("rule_based"));
        assert_eq!(response.metadata["signals_count"], json!(2));
        assert_eq!(response.metadata["signals_processed"], json!(["urgency"]));
    }
}
