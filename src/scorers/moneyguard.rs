//! MoneyGuard: scores a payment/transfer request for scam indicators.
//!
//! Mirrors `backend/risk_engine/moneyguard.py::assess` and `safe_steps`.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use crate::scorers::build_risk_response;
use crate::types::{RecommendedAction, RiskResponse, SafeScript};

fn payment_weight(method: &str) -> i32 {
    match method {
        "gift_card" => 40,
        "crypto" => 35,
        "wire" => 25,
        _ => 0,
    }
}

fn impersonation_weight(kind: &str) -> i32 {
    match kind {
        "bank" => 15,
        "government" => 15,
        "tech_support" => 15,
        _ => 0,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MoneyGuardFlags {
    #[serde(default)]
    pub asked_for_verification_code: bool,
    #[serde(default)]
    pub asked_for_remote_access: bool,
    #[serde(default)]
    pub asked_to_keep_secret: bool,
    #[serde(default)]
    pub urgency_present: bool,
    /// Free-text impersonation label, e.g. `"bank"`, `"government"`,
    /// `"tech_support"`, or unset/unknown. Unrecognized values fall through
    /// to a zero-weight contribution rather than an error.
    #[serde(default)]
    pub impersonation_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MoneyGuardEvidence {
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Negative or non-numeric amounts are treated as zero for scoring
    /// purposes rather than rejected -- scorers never raise on bad input.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default)]
    pub did_they_contact_you_first: bool,
    #[serde(default)]
    pub flags: MoneyGuardFlags,
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|n| *n > 0.0)
        .unwrap_or(0.0))
}

pub fn assess(evidence: &MoneyGuardEvidence) -> RiskResponse {
    let mut score = 0i32;
    let mut reasons = Vec::new();

    let payment_method = evidence
        .payment_method
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let method_weight = payment_weight(&payment_method);
    if method_weight != 0 {
        score += method_weight;
        reasons.push(format!(
            "High-risk payment method: {}",
            payment_method.replace('_', " ")
        ));
    }

    if evidence.did_they_contact_you_first && evidence.amount > 500.0 {
        score += 15;
        reasons.push("They contacted you first and the amount is large.".to_string());
    }

    if evidence.flags.asked_for_verification_code {
        score += 35;
        reasons.push("They asked for a verification code.".to_string());
    }
    if evidence.flags.asked_for_remote_access {
        score += 30;
        reasons.push("They asked for remote access.".to_string());
    }
    if evidence.flags.asked_to_keep_secret {
        score += 20;
        reasons.push("They asked you to keep it secret.".to_string());
    }
    if evidence.flags.urgency_present {
        score += 15;
        reasons.push("They created urgency or pressure.".to_string());
    }

    let impersonation = evidence
        .flags
        .impersonation_type
        .as_deref()
        .unwrap_or("none")
        .to_lowercase();
    let impersonation_weight = impersonation_weight(&impersonation);
    if impersonation_weight != 0 {
        score += impersonation_weight;
        reasons.push(format!(
            "Possible {} impersonation.",
            impersonation.replace('_', " ")
        ));
    }

    let recommended_actions = vec![
        RecommendedAction::new(
            "pause-payment",
            "Pause payment",
            "Stop and verify the request using a trusted channel.",
        ),
        RecommendedAction::new(
            "call-bank",
            "Call your bank",
            "Use the number on your card to confirm if this request is legitimate.",
        ),
        RecommendedAction::new(
            "no-otp",
            "Never share verification codes",
            "Banks and legitimate services will not ask for OTP codes or remote access.",
        ),
    ];

    let safe_script = Some(SafeScript::new(
        "I need to verify this request independently before sending any money.",
        "I won't proceed without verification. I'll follow up after I confirm.",
    ));

    let next_action = "Verify the recipient using a trusted number or in-person contact.";

    let mut metadata: HashMap<String, Value> = HashMap::new();
    metadata.insert("amount".to_string(), json!(evidence.amount));
    metadata.insert("payment_method".to_string(), json!(payment_method));
    metadata.insert("impersonation_type".to_string(), json!(impersonation));

    if reasons.is_empty() {
        reasons.push("No high-risk indicators detected.".to_string());
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

/// The fixed consumer-facing checklist and scripts, independent of any
/// particular session's evidence.
pub fn safe_steps() -> Value {
    json!({
        "checklist": [
            {"id": "pause", "title": "Pause the payment", "detail": "Give yourself time to verify the request."},
            {"id": "verify", "title": "Verify independently", "detail": "Use an official number or app to confirm the request."},
            {"id": "invoice", "title": "Ask for documentation", "detail": "Request a written invoice and validate the business directly."},
        ],
        "scripts": [
            {"id": "delay", "title": "Delay script", "detail": "I need to verify this request first. I'll follow up shortly."},
            {"id": "no-otp", "title": "No OTP script", "detail": "I don't share verification codes with anyone."},
        ],
    })
}
