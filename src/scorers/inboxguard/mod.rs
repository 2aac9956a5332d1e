//! InboxGuard: scores a text message/email and, separately, a bare URL.
//!
//! Term sets and scoring mirror `backend/risk_engine/inboxguard.py`. The
//! base six term sets (urgency/payment/otp/impersonation + attachment +
//! URL red flags) come straight from spec.md; the seven additional
//! scam-pattern term sets (grandparent, romance, lottery, investment,
//! charity, contractor, medicare) are carried over from the original
//! implementation, which the distilled spec dropped.

mod terms;
pub mod url;

use std::collections::HashMap;

use serde_json::json;

use crate::scorers::build_risk_response;
use crate::types::{RecommendedAction, RiskResponse};
use url::extract_urls;

/// Evidence for a text-channel message: the raw body and the channel it
/// arrived on (`"sms"`, `"email"`, etc.), echoed back in metadata.
pub struct TextEvidence<'a> {
    pub text: &'a str,
    pub channel: &'a str,
}

pub fn analyze_text(evidence: &TextEvidence<'_>) -> RiskResponse {
    let mut score = 0i32;
    let mut reasons = Vec::new();
    let lower = evidence.text.to_lowercase();

    if terms::URGENCY.iter().any(|t| lower.contains(t)) {
        score += 20;
        reasons.push("Urgency language detected".to_string());
    }
    if terms::PAYMENT.iter().any(|t| lower.contains(t)) {
        score += 20;
        reasons.push("Payment request detected".to_string());
    }
    if terms::OTP.iter().any(|t| lower.contains(t)) {
        score += 25;
        reasons.push("Verification code request detected".to_string());
    }
    if lower.contains("attachment") {
        score += 10;
        reasons.push("Attachment mentioned".to_string());
    }
    let entities: Vec<&'static str> = terms::IMPERSONATION
        .iter()
        .copied()
        .filter(|t| lower.contains(t))
        .collect();
    if !entities.is_empty() {
        score += 20;
        reasons.push("Impersonation terms detected".to_string());
    }

    if terms::GRANDPARENT_SCAM.iter().any(|t| lower.contains(t)) {
        score += 25;
        reasons.push("Grandparent/Family Emergency scam indicators detected".to_string());
    }
    if terms::ROMANCE_SCAM.iter().any(|t| lower.contains(t)) {
        score += 23;
        reasons.push("Romance scam indicators detected".to_string());
    }
    if terms::LOTTERY_SCAM.iter().any(|t| lower.contains(t)) {
        score += 28;
        reasons.push("Lottery/Sweepstakes scam indicators detected".to_string());
    }
    if terms::INVESTMENT_SCAM.iter().any(|t| lower.contains(t)) {
        score += 25;
        reasons.push("Investment scam indicators detected".to_string());
    }
    if terms::CHARITY_SCAM.iter().any(|t| lower.contains(t)) {
        score += 20;
        reasons.push("Charity scam indicators detected".to_string());
    }
    if terms::CONTRACTOR_SCAM.iter().any(|t| lower.contains(t)) {
        score += 22;
        reasons.push("Contractor scam indicators detected".to_string());
    }
    if terms::MEDICARE_SCAM.iter().any(|t| lower.contains(t)) {
        score += 24;
        reasons.push("Medicare scam indicators detected".to_string());
    }

    let extracted_urls = extract_urls(evidence.text);
    let mut url_flags = Vec::new();
    for u in &extracted_urls {
        url_flags.extend(url::url_flags(u));
    }
    if !url_flags.is_empty() {
        score += 15;
        reasons.push("Suspicious URLs detected".to_string());
    }

    let recommended_actions = vec![
        RecommendedAction::new(
            "dont-click",
            "Do not click",
            "Avoid clicking links or opening attachments in the message.",
        ),
        RecommendedAction::new(
            "official-app",
            "Open the official app/site",
            "Navigate to the service using a trusted app or bookmarked site.",
        ),
        RecommendedAction::new(
            "report",
            "Report as junk",
            "Use your carrier or email provider reporting tools.",
        ),
    ];

    let mut metadata = HashMap::new();
    metadata.insert("extracted_urls".to_string(), json!(extracted_urls));
    metadata.insert("detected_entities".to_string(), json!(entities));
    metadata.insert("red_flags".to_string(), json!(reasons));
    metadata.insert("channel".to_string(), json!(evidence.channel));

    if reasons.is_empty() {
        reasons.push("No obvious red flags detected.".to_string());
    }

    build_risk_response(
        score,
        reasons,
        "Avoid responding until you verify the sender through official channels.",
        recommended_actions,
        None,
        metadata,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_text_has_no_red_flags() {
        let response = analyze_text(&TextEvidence {
            text: "Hey, are we still on for lunch tomorrow?",
            channel: "sms",
        });
        assert_eq!(response.score, 0);
        assert_eq!(response.reasons, vec!["No obvious red flags detected."]);
    }

    #[test]
    fn urgency_plus_otp_accumulates() {
        let response = analyze_text(&TextEvidence {
            text: "URGENT: verify your account immediately with this code",
            channel: "email",
        });
        assert!(response.score >= 45);
        assert!(response.reasons.contains(&"Urgency language detected".to_string()));
        assert!(response
            .reasons
            .contains(&"Verification code request detected".to_string()));
    }

    #[test]
    fn grandparent_scam_terms_detected() {
        let response = analyze_text(&TextEvidence {
            text: "Your grandson is in jail and needs bail money wired today",
            channel: "sms",
        });
        assert!(response
            .reasons
            .iter()
            .any(|r| r.contains("Grandparent")));
    }

    #[test]
    fn embedded_shortened_url_adds_suspicious_url_reason() {
        let response = analyze_text(&TextEvidence {
            text: "Please verify here: https://bit.ly/abc123",
            channel: "email",
        });
        assert!(response.reasons.contains(&"Suspicious URLs detected".to_string()));
        let urls = response.metadata["extracted_urls"].as_array().unwrap();
        assert_eq!(urls.len(), 1);
    }

    #[test]
    fn channel_is_echoed_in_metadata() {
        let response = analyze_text(&TextEvidence {
            text: "hi",
            channel: "whatsapp",
        });
        assert_eq!(response.metadata["channel"], json!("whatsapp"));
    }
}
