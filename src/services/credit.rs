use std::collections::HashMap;

use parking_lot::Mutex;

pub const INITIAL_SCORE: f64 = 80.0;
pub const MAX_SCORE: f64 = 100.0;
pub const MIN_SCORE: f64 = 0.0;
const SUCCESS_BONUS: f64 = 0.5;
const FAILURE_PENALTY: f64 = 2.0;

/// Buyer reputation in [0, 100], moved by payment outcomes.
#[derive(Debug, Default)]
pub struct CreditSystem {
    scores: Mutex<HashMap<String, f64>>,
}

impl CreditSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adjust_for_payment(&self, user_id: &str, success: bool) -> f64 {
        let mut scores = self.scores.lock();
        let score = scores.entry(user_id.to_string()).or_insert(INITIAL_SCORE);
        *score = if success {
            (*score + SUCCESS_BONUS).min(MAX_SCORE)
        } else {
            (*score - FAILURE_PENALTY).max(MIN_SCORE)
        };
        *score
    }

    pub fn score(&self, user_id: &str) -> f64 {
        *self
            .scores
            .lock()
            .entry(user_id.to_string())
            .or_insert(INITIAL_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_initial_score() {
        assert_eq!(CreditSystem::new().score("u_1"), INITIAL_SCORE);
    }

    #[test]
    fn success_raises_and_caps() {
        let credit = CreditSystem::new();
        assert_eq!(credit.adjust_for_payment("u_1", true), 80.5);
        for _ in 0..100 {
            credit.adjust_for_payment("u_1", true);
        }
        assert_eq!(credit.score("u_1"), MAX_SCORE);
    }

    #[test]
    fn failure_lowers_and_floors() {
        let credit = CreditSystem::new();
        assert_eq!(credit.adjust_for_payment("u_1", false), 78.0);
        for _ in 0..100 {
            credit.adjust_for_payment("u_1", false);
        }
        assert_eq!(credit.score("u_1"), MIN_SCORE);
    }
}
