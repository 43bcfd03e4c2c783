use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use crate::errors::{AppError, Result};
use crate::models::bargain::Bargain;
use crate::models::gen_id;
use crate::services::dice::Dice;
use crate::services::notification::NotificationService;
use crate::store::Store;

const MIN_CUT_PCT: f64 = 0.005;
const MAX_CUT_PCT: f64 = 0.05;
const PER_PARTICIPANT_BONUS: f64 = 0.002;
const CUT_PCT_CAP: f64 = 0.15;

/// Result of one join: how much came off and the session afterwards.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub cut_cents: i64,
    pub bargain: Bargain,
}

#[derive(Clone)]
pub struct BargainService {
    store: Arc<Store>,
    notification: NotificationService,
    dice: Arc<Dice>,
}

impl BargainService {
    pub fn new(store: Arc<Store>, notification: NotificationService, dice: Arc<Dice>) -> Self {
        Self {
            store,
            notification,
            dice,
        }
    }

    pub fn start(&self, requester_id: &str, product_id: &str, expiry_minutes: i64) -> Result<Bargain> {
        let product = self
            .store
            .get_product(product_id)
            .ok_or_else(|| AppError::not_found("product", product_id))?;
        if !product.allow_bargain {
            return Err(AppError::NotBargainable(product_id.to_string()));
        }

        let expires_at = Duration::try_minutes(expiry_minutes)
            .and_then(|d| Utc::now().checked_add_signed(d))
            .ok_or_else(|| {
                AppError::invalid_data(format!("expiry_minutes out of range: {}", expiry_minutes))
            })?;

        let bargain = Bargain {
            id: gen_id("b_"),
            product_id: product_id.to_string(),
            requester_id: requester_id.to_string(),
            original_price_cents: product.price_cents,
            current_price_cents: product.price_cents,
            participants: BTreeSet::new(),
            expires_at,
            closed: false,
        };
        self.store.add_bargain(bargain.clone());

        info!(bargain_id = %bargain.id, product_id, requester_id, "bargain started");
        self.notification
            .push(requester_id, format!("started bargain for {}", product.title));
        Ok(bargain)
    }

    /// Cut the price once. Every call cuts, including repeat calls by a user
    /// who already joined; the participant set only dedupes the stored id.
    /// Expiry is not checked.
    pub fn join(&self, bargain_id: &str, user_id: &str) -> Result<JoinOutcome> {
        let outcome = self.store.write(|t| -> Result<JoinOutcome> {
            let b = t
                .bargains
                .get_mut(bargain_id)
                .ok_or_else(|| AppError::not_found("bargain", bargain_id))?;
            if b.closed {
                return Err(AppError::Closed(bargain_id.to_string()));
            }
            let cut = calculate_cut(&self.dice, b.original_price_cents, b.participants.len());
            b.participants.insert(user_id.to_string());
            b.current_price_cents = (b.current_price_cents - cut).max(0);
            Ok(JoinOutcome {
                cut_cents: cut,
                bargain: b.clone(),
            })
        })?;

        info!(
            bargain_id,
            user_id,
            cut_cents = outcome.cut_cents,
            current_price_cents = outcome.bargain.current_price_cents,
            "bargain joined"
        );
        self.notification
            .push(user_id, format!("you cut {} cents", outcome.cut_cents));
        Ok(outcome)
    }

    /// Manually close a session; later joins fail with `Closed`.
    pub fn close(&self, bargain_id: &str) -> Result<Bargain> {
        self.store.write(|t| -> Result<Bargain> {
            let b = t
                .bargains
                .get_mut(bargain_id)
                .ok_or_else(|| AppError::not_found("bargain", bargain_id))?;
            b.closed = true;
            Ok(b.clone())
        })
    }

    pub fn get_bargain(&self, bargain_id: &str) -> Option<Bargain> {
        self.store.get_bargain(bargain_id)
    }
}

/// `floor(base * pct)` with pct drawn from [0.5%, 5%], plus 0.2% per existing
/// participant, capped at 15%. Never less than one cent.
fn calculate_cut(dice: &Dice, original_price_cents: i64, participants: usize) -> i64 {
    let base = original_price_cents.max(1);
    let pct = (dice.uniform(MIN_CUT_PCT, MAX_CUT_PCT)
        + PER_PARTICIPANT_BONUS * participants as f64)
        .min(CUT_PCT_CAP);
    let cut = (base as f64 * pct).floor() as i64;
    cut.max(1)
}
