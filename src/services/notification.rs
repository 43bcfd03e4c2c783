use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::models::notification::Notification;
use crate::store::Store;

#[derive(Clone)]
pub struct NotificationService {
    store: Arc<Store>,
}

impl NotificationService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn push(&self, user_id: &str, message: impl Into<String>) {
        let message = message.into();
        debug!(user_id, %message, "notification");
        self.store.add_notification(Notification {
            user_id: user_id.to_string(),
            message,
            created_at: Utc::now(),
        });
    }

    pub fn push_payment_success(&self, buyer_id: &str, order_id: &str, payment_id: &str) {
        self.push(
            buyer_id,
            format!("Payment succeeded: order {}, payment {}", order_id, payment_id),
        );
    }

    pub fn push_payment_failure(&self, buyer_id: &str, order_id: &str, payment_id: &str) {
        self.push(
            buyer_id,
            format!("Payment failed: order {}, payment {}", order_id, payment_id),
        );
    }

    /// Notifications for `user_id`, oldest first.
    pub fn for_user(&self, user_id: &str) -> Vec<Notification> {
        self.store.notifications_for(user_id)
    }

    pub fn total(&self) -> usize {
        self.store.counts().notifications
    }
}
