use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::models::gen_id;
use crate::models::order::Order;
use crate::models::payment::{Payment, PaymentStatus, DEFAULT_PROVIDER};
use crate::services::dice::Dice;
use crate::services::notification::NotificationService;
use crate::store::Store;

/// Simulated gateway: every attempt resolves to success with the requested
/// probability, otherwise to failure. There is no retry.
#[derive(Clone)]
pub struct PaymentGateway {
    store: Arc<Store>,
    notification: NotificationService,
    dice: Arc<Dice>,
}

impl PaymentGateway {
    pub fn new(store: Arc<Store>, notification: NotificationService, dice: Arc<Dice>) -> Self {
        Self {
            store,
            notification,
            dice,
        }
    }

    pub fn create_payment(&self, order: &Order) -> Payment {
        let now = Utc::now();
        let payment = Payment {
            id: gen_id("pay_"),
            order_id: order.id.clone(),
            amount_cents: order.total_cents,
            provider: DEFAULT_PROVIDER.to_string(),
            status: PaymentStatus::Init,
            created_at: now,
            updated_at: now,
        };
        self.store.add_payment(payment.clone());
        payment
    }

    /// Resolve an `init` payment. Resolved payments are returned unchanged.
    pub fn process_payment(&self, payment: &Payment, buyer_id: &str, success_probability: f64) -> Payment {
        if payment.status != PaymentStatus::Init {
            return payment.clone();
        }

        let status = if self.dice.chance(success_probability) {
            PaymentStatus::Success
        } else {
            PaymentStatus::Failed
        };

        let resolved = self.store.write(|t| {
            let row = t
                .payments
                .entry(payment.id.clone())
                .or_insert_with(|| payment.clone());
            row.status = status;
            row.updated_at = Utc::now();
            row.clone()
        });

        match status {
            PaymentStatus::Success => {
                info!(payment_id = %resolved.id, order_id = %resolved.order_id, amount_cents = resolved.amount_cents, "payment succeeded");
                self.notification
                    .push_payment_success(buyer_id, &resolved.order_id, &resolved.id);
            }
            _ => {
                warn!(payment_id = %resolved.id, order_id = %resolved.order_id, "payment failed");
                self.notification
                    .push_payment_failure(buyer_id, &resolved.order_id, &resolved.id);
            }
        }

        resolved
    }

    pub fn get_payment(&self, payment_id: &str) -> Option<Payment> {
        self.store.get_payment(payment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::OrderStatus;

    fn gateway() -> (PaymentGateway, Arc<Store>) {
        let store = Arc::new(Store::new());
        let gw = PaymentGateway::new(
            store.clone(),
            NotificationService::new(store.clone()),
            Arc::new(Dice::seeded(5)),
        );
        (gw, store)
    }

    fn order() -> Order {
        let now = Utc::now();
        Order {
            id: "o_1".into(),
            buyer_id: "u_1".into(),
            merchant_id: "m_1".into(),
            items: vec![],
            total_cents: 1500,
            status: OrderStatus::Created,
            created_at: now,
            updated_at: now,
            payment_id: None,
        }
    }

    #[test]
    fn new_payment_starts_in_init() {
        let (gw, _) = gateway();
        let p = gw.create_payment(&order());
        assert_eq!(p.status, PaymentStatus::Init);
        assert_eq!(p.amount_cents, 1500);
        assert_eq!(gw.get_payment(&p.id).unwrap(), p);
    }

    #[test]
    fn resolves_and_notifies_buyer() {
        let (gw, store) = gateway();
        let ok = gw.process_payment(&gw.create_payment(&order()), "u_1", 1.0);
        let failed = gw.process_payment(&gw.create_payment(&order()), "u_1", 0.0);

        assert_eq!(ok.status, PaymentStatus::Success);
        assert_eq!(failed.status, PaymentStatus::Failed);
        assert_eq!(gw.get_payment(&failed.id).unwrap().status, PaymentStatus::Failed);

        let notes = store.notifications_for("u_1");
        assert_eq!(notes.len(), 2);
        assert!(notes[0].message.starts_with("Payment succeeded"));
        assert!(notes[1].message.starts_with("Payment failed"));
    }

    #[test]
    fn resolved_payment_is_returned_unchanged() {
        let (gw, _) = gateway();
        let ok = gw.process_payment(&gw.create_payment(&order()), "u_1", 1.0);
        let again = gw.process_payment(&ok, "u_1", 0.0);
        assert_eq!(again, ok);
    }
}
