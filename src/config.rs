// config.rs
use std::env;

use crate::errors::{AppError, Result};

/// Upper bound for `BARGAIN_EXPIRY_MINUTES` (one year).
const MAX_BARGAIN_EXPIRY_MINUTES: i64 = 525_600;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Used when a pay request does not name its own probability.
    pub payment_success_rate: f64,
    pub bargain_expiry_minutes: i64,
    pub rng_seed: Option<u64>,
    pub admin_phone: String,
    pub admin_password: String,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            payment_success_rate: 0.95,
            bargain_expiry_minutes: 60,
            rng_seed: None,
            admin_phone: "000000".to_string(),
            admin_password: "admin123".to_string(),
            seed_demo_data: false,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment (after `.env`).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let port = match lookup("PORT") {
            Some(v) => v.trim().parse::<u16>()?,
            None => defaults.port,
        };

        let payment_success_rate = match lookup("PAYMENT_SUCCESS_RATE") {
            Some(v) => v.trim().parse::<f64>()?,
            None => defaults.payment_success_rate,
        };
        if !(0.0..=1.0).contains(&payment_success_rate) {
            return Err(AppError::configuration(format!(
                "PAYMENT_SUCCESS_RATE must be within [0, 1], got {}",
                payment_success_rate
            )));
        }

        let bargain_expiry_minutes = match lookup("BARGAIN_EXPIRY_MINUTES") {
            Some(v) => v.trim().parse::<i64>()?,
            None => defaults.bargain_expiry_minutes,
        };
        if !(1..=MAX_BARGAIN_EXPIRY_MINUTES).contains(&bargain_expiry_minutes) {
            return Err(AppError::configuration(format!(
                "BARGAIN_EXPIRY_MINUTES must be within [1, {}], got {}",
                MAX_BARGAIN_EXPIRY_MINUTES, bargain_expiry_minutes
            )));
        }

        let rng_seed = match lookup("RNG_SEED") {
            Some(v) if !v.trim().is_empty() => Some(v.trim().parse::<u64>()?),
            _ => None,
        };

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(v) => parse_bool(&v)?,
            None => defaults.seed_demo_data,
        };

        Ok(AppConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            payment_success_rate,
            bargain_expiry_minutes,
            rng_seed,
            admin_phone: lookup("ADMIN_PHONE").unwrap_or(defaults.admin_phone),
            admin_password: lookup("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            seed_demo_data,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::configuration(format!("not a boolean: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = from_pairs(&[]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.payment_success_rate, 0.95);
        assert_eq!(cfg.bargain_expiry_minutes, 60);
        assert_eq!(cfg.rng_seed, None);
        assert_eq!(cfg.admin_phone, "000000");
        assert!(!cfg.seed_demo_data);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_overrides() {
        let cfg = from_pairs(&[
            ("PORT", "8080"),
            ("PAYMENT_SUCCESS_RATE", "0.5"),
            ("RNG_SEED", "42"),
            ("SEED_DEMO_DATA", "true"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.payment_success_rate, 0.5);
        assert_eq!(cfg.rng_seed, Some(42));
        assert!(cfg.seed_demo_data);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(from_pairs(&[("PORT", "http")]), Err(AppError::ConfigurationError(_))));
        assert!(matches!(
            from_pairs(&[("PAYMENT_SUCCESS_RATE", "1.5")]),
            Err(AppError::ConfigurationError(_))
        ));
        for minutes in ["0", "-5", "525601", "9223372036854775807"] {
            assert!(matches!(
                from_pairs(&[("BARGAIN_EXPIRY_MINUTES", minutes)]),
                Err(AppError::ConfigurationError(_))
            ));
        }
        assert!(matches!(
            from_pairs(&[("SEED_DEMO_DATA", "maybe")]),
            Err(AppError::ConfigurationError(_))
        ));
    }
}
