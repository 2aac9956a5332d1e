//! Shared scoring framework used by all four Scorers.
//!
//! Each Scorer is a pure function: evidence in, `RiskResponse` out. This
//! module holds the clamp -> level -> response assembly pipeline common to
//! all of them, mirroring `backend/risk_engine/base.py`.

pub mod callguard;
pub mod identitywatch;
pub mod inboxguard;
pub mod moneyguard;

use std::collections::HashMap;

use serde_json::Value;

use crate::types::{RecommendedAction, RiskLevel, RiskResponse, SafeScript};

pub fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}

/// Builds the final `RiskResponse` from a raw (unclamped) score and the
/// pieces a Scorer has already assembled.
pub fn build_risk_response(
    raw_score: i32,
    reasons: Vec<String>,
    next_action: impl Into<String>,
    recommended_actions: Vec<RecommendedAction>,
    safe_script: Option<SafeScript>,
    metadata: HashMap<String, Value>,
) -> RiskResponse {
    let score = clamp_score(raw_score);
    RiskResponse {
        score,
        level: RiskLevel::from_score(score),
        reasons,
        next_action: next_action.into(),
        recommended_actions,
        safe_script,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_score_bounds_to_0_100() {
        assert_eq!(clamp_score(-20), 0);
        assert_eq!(clamp_score(150), 100);
        assert_eq!(clamp_score(42), 42);
    }

    #[test]
    fn risk_level_thresholds_match_base_py() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(34), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(35), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }
}
