//! Property-style coverage across the four Scorers, per spec.md §8's
//! universal properties (bounded score, monotonicity, unknown-signal
//! neutrality, determinism) and its literal end-to-end scenarios.

use guardian_risk_engine::scorers::inboxguard::{self, url as inbox_url, TextEvidence};
use guardian_risk_engine::scorers::{callguard, identitywatch, moneyguard};
use guardian_risk_engine::types::RiskLevel;

#[test]
fn every_scorer_clamps_into_0_100_and_has_nonempty_output() {
    let callguard_max = callguard::assess(&[
        "verification_code_request".to_string(),
        "remote_access_request".to_string(),
        "bank_impersonation".to_string(),
        "government_impersonation".to_string(),
        "threats_or_arrest".to_string(),
        "gift_cards".to_string(),
        "crypto_payment".to_string(),
    ]);
    assert!(callguard_max.score <= 100);
    assert!(!callguard_max.reasons.is_empty());
    assert!(callguard_max.recommended_actions.len() >= 2);

    let money_max = moneyguard::assess(&moneyguard::MoneyGuardEvidence {
        payment_method: Some("gift_card".to_string()),
        amount: 800.0,
        did_they_contact_you_first: true,
        flags: moneyguard::MoneyGuardFlags {
            asked_for_verification_code: true,
            asked_for_remote_access: true,
            asked_to_keep_secret: true,
            urgency_present: true,
            impersonation_type: Some("bank".to_string()),
        },
    });
    assert_eq!(money_max.score, 100);
    assert!(matches!(money_max.level, RiskLevel::High));
}

#[test]
fn callguard_score_is_monotonic_under_fresh_known_signals() {
    let base = callguard::assess(&["urgency".to_string()]);
    let with_more = callguard::assess(&[
        "urgency".to_string(),
        "bank_impersonation".to_string(),
    ]);
    assert!(with_more.score >= base.score);
}

#[test]
fn identitywatch_score_is_monotonic_under_fresh_known_signals() {
    let base = identitywatch::assess(&identitywatch::IdentityWatchEvidence {
        reused_passwords: true,
        ..Default::default()
    });
    let with_more = identitywatch::assess(&identitywatch::IdentityWatchEvidence {
        reused_passwords: true,
        account_opened: true,
        ..Default::default()
    });
    assert!(with_more.score >= base.score);
}

#[test]
fn unknown_signals_do_not_change_callguard_score() {
    let without = callguard::assess(&["urgency".to_string()]);
    let with_unknown = callguard::assess(&["urgency".to_string(), "not_a_real_signal".to_string()]);
    assert_eq!(without.score, with_unknown.score);
}

#[test]
fn assessment_is_deterministic_across_repeated_calls() {
    let a = callguard::assess(&["bank_impersonation".to_string()]);
    let b = callguard::assess(&["bank_impersonation".to_string()]);
    assert_eq!(a.score, b.score);
    assert_eq!(a.reasons, b.reasons);
}

#[test]
fn score_boundaries_map_to_expected_levels() {
    assert!(matches!(RiskLevel::from_score(34), RiskLevel::Low));
    assert!(matches!(RiskLevel::from_score(35), RiskLevel::Medium));
    assert!(matches!(RiskLevel::from_score(69), RiskLevel::Medium));
    assert!(matches!(RiskLevel::from_score(70), RiskLevel::High));
}

#[test]
fn inboxguard_text_scenario_final_notice_phishing() {
    let response = inboxguard::analyze_text(&TextEvidence {
        text: "Final notice: verify your account immediately at https://bit.ly/fake-login",
        channel: "sms",
    });
    assert!(response.score >= 60);
    assert!(response.reasons.contains(&"Urgency language detected".to_string()));
    assert!(response
        .reasons
        .contains(&"Verification code request detected".to_string()));
    let urls = response.metadata["extracted_urls"].as_array().unwrap();
    assert!(urls
        .iter()
        .any(|u| u.as_str().unwrap().contains("bit.ly")));
}

#[test]
fn inboxguard_url_scenario_punycode_spoof() {
    let response = inbox_url::analyze_url("http://xn--paypa1-login.example.com/verify");
    assert!(response.score >= 15);
    assert!(response.reasons.contains(&"Punycode domain detected".to_string()));
    assert_eq!(response.metadata["looks_like_spoof"], serde_json::json!(true));
}

#[test]
fn identitywatch_scenario_account_opened_and_suspicious_inquiry() {
    let response = identitywatch::assess(&identitywatch::IdentityWatchEvidence {
        account_opened: true,
        suspicious_inquiry: true,
        ..Default::default()
    });
    assert_eq!(response.score, 80);
    assert!(matches!(response.level, RiskLevel::High));
    assert_eq!(response.reasons.len(), 2);
}
