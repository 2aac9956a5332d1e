//! IdentityWatch: scores a set of boolean identity-theft indicators.
//!
//! The weight table's declaration order drives the reason order and must
//! be preserved, mirroring `backend/risk_engine/identitywatch.py::assess`.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::json;

use crate::scorers::build_risk_response;
use crate::types::{RecommendedAction, RiskResponse, SafeScript};

/// Ordered (name, weight) pairs. Order here is the order reasons appear in.
const SIGNAL_WEIGHTS: &[(&str, i32)] = &[
    ("password_reset_unknown", 25),
    ("account_opened", 40),
    ("suspicious_inquiry", 40),
    ("reused_passwords", 15),
    ("clicked_suspicious_link", 20),
    ("ssn_requested_unexpectedly", 25),
];

#[derive(Debug, Default, Deserialize)]
pub struct IdentityWatchEvidence {
    #[serde(default)]
    pub password_reset_unknown: bool,
    #[serde(default)]
    pub account_opened: bool,
    #[serde(default)]
    pub suspicious_inquiry: bool,
    #[serde(default)]
    pub reused_passwords: bool,
    #[serde(default)]
    pub clicked_suspicious_link: bool,
    #[serde(default)]
    pub ssn_requested_unexpectedly: bool,
}

impl IdentityWatchEvidence {
    fn get(&self, key: &str) -> bool {
        match key {
            "password_reset_unknown" => self.password_reset_unknown,
            "account_opened" => self.account_opened,
            "suspicious_inquiry" => self.suspicious_inquiry,
            "reused_passwords" => self.reused_passwords,
            "clicked_suspicious_link" => self.clicked_suspicious_link,
            "ssn_requested_unexpectedly" => self.ssn_requested_unexpectedly,
            _ => false,
        }
    }
}

pub fn assess(evidence: &IdentityWatchEvidence) -> RiskResponse {
    let mut score = 0i32;
    let mut reasons = Vec::new();

    for (key, weight) in SIGNAL_WEIGHTS {
        if evidence.get(key) {
            score += weight;
            reasons.push(key.replace('_', " "));
        }
    }

    let recommended_actions = vec![
        RecommendedAction::new(
            "freeze-credit",
            "Freeze your credit",
            "Place a free credit freeze with the major bureaus.",
        ),
        RecommendedAction::new(
            "enable-2fa",
            "Enable 2FA",
            "Turn on multi-factor authentication for key accounts.",
        ),
        RecommendedAction::new(
            "change-passwords",
            "Change passwords",
            "Update passwords on critical accounts and use a manager.",
        ),
        RecommendedAction::new(
            "check-credit",
            "Check your credit report",
            "Review recent inquiries and accounts you don't recognize.",
        ),
    ];

    let safe_script = Some(SafeScript::new(
        "I'm calling to report potential fraud and request next steps.",
        "Please note this as suspected identity misuse and escalate if needed.",
    ));

    let mut metadata = HashMap::new();
    metadata.insert(
        "suggested_freeze_steps".to_string(),
        json!([
            "Freeze credit with Equifax, Experian, and TransUnion.",
            "Create a PIN for lifting the freeze later.",
        ]),
    );
    metadata.insert(
        "suggested_password_steps".to_string(),
        json!([
            "Change passwords starting with email and banking.",
            "Enable passkeys or authenticator apps where possible.",
        ]),
    );
    metadata.insert(
        "monitoring_steps".to_string(),
        json!([
            "Set alerts for new credit inquiries.",
            "Review bank statements weekly for unusual activity.",
        ]),
    );

    if reasons.is_empty() {
        reasons.push("No high-risk identity signals selected.".to_string());
    }

    build_risk_response(
        score,
        reasons,
        "Start with a credit freeze and password reset if any suspicion remains.",
        recommended_actions,
        safe_script,
        metadata,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_signals_is_low_risk() {
        let response = assess(&IdentityWatchEvidence::default());
        assert_eq!(response.score, 0);
        assert_eq!(
            response.reasons,
            vec!["No high-risk identity signals selected."]
        );
    }

    #[test]
    fn reason_order_follows_weight_table_declaration_order() {
        let evidence = IdentityWatchEvidence {
            ssn_requested_unexpectedly: true,
            account_opened: true,
            password_reset_unknown: true,
            ..Default::default()
        };
        let response = assess(&evidence);
        assert_eq!(
            response.reasons,
            vec!["password reset unknown", "account opened", "ssn requested unexpectedly"]
        );
        assert_eq!(response.score, 25 + 40 + 25);
    }

    #[test]
    fn account_opened_and_suspicious_inquiry_alone_reach_high() {
        let evidence = IdentityWatchEvidence {
            account_opened: true,
            suspicious_inquiry: true,
            ..Default::default()
        };
        let response = assess(&evidence);
        assert_eq!(response.score, 80);
        assert!(matches!(response.level, crate::types::RiskLevel::High));
    }
}
