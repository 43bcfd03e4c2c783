use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::errors::{AppError, Result};
use crate::models::gen_id;
use crate::models::order::{Order, OrderItem, OrderStatus};
use crate::models::payment::Payment;
use crate::services::credit::CreditSystem;
use crate::services::payment::PaymentGateway;
use crate::services::recommend::RecommendationEngine;
use crate::store::Store;

/// Checkout and payment. One order holds items from a single merchant.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<Store>,
    payment_gateway: PaymentGateway,
    credit: Arc<CreditSystem>,
    recommend: Arc<RecommendationEngine>,
    paying: Arc<Mutex<HashSet<String>>>,
}

/// Marks an order as having a payment attempt in flight; released on drop.
struct PayingClaim<'a> {
    paying: &'a Mutex<HashSet<String>>,
    order_id: String,
}

impl<'a> PayingClaim<'a> {
    fn acquire(paying: &'a Mutex<HashSet<String>>, order_id: &str) -> Option<Self> {
        if !paying.lock().insert(order_id.to_string()) {
            return None;
        }
        Some(PayingClaim {
            paying,
            order_id: order_id.to_string(),
        })
    }
}

impl Drop for PayingClaim<'_> {
    fn drop(&mut self) {
        self.paying.lock().remove(&self.order_id);
    }
}

impl OrderService {
    pub fn new(
        store: Arc<Store>,
        payment_gateway: PaymentGateway,
        credit: Arc<CreditSystem>,
        recommend: Arc<RecommendationEngine>,
    ) -> Self {
        Self {
            store,
            payment_gateway,
            credit,
            recommend,
            paying: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Validate stock and merchant for every line, then record the order at
    /// current prices. Stock is not touched until payment succeeds.
    pub fn create_order(&self, buyer_id: &str, items: &[(String, i64)]) -> Result<Order> {
        if buyer_id.is_empty() {
            return Err(AppError::invalid_data("buyer_id cannot be empty"));
        }
        if items.is_empty() {
            return Err(AppError::invalid_data("order needs at least one item"));
        }
        if let Some((pid, _)) = items.iter().find(|(_, qty)| *qty <= 0) {
            return Err(AppError::invalid_data(format!(
                "quantity for {} must be positive",
                pid
            )));
        }

        let order = self.store.write(|t| -> Result<Order> {
            let mut total: i64 = 0;
            let mut merchant_id: Option<String> = None;
            let mut lines = Vec::with_capacity(items.len());

            for (pid, qty) in items {
                let p = t
                    .product(pid)
                    .ok_or_else(|| AppError::not_found("product", pid))?;
                if p.stock < *qty {
                    return Err(AppError::InsufficientStock {
                        product_id: pid.clone(),
                        requested: *qty,
                        available: p.stock,
                    });
                }
                let expected = merchant_id.get_or_insert_with(|| p.merchant_id.clone());
                if *expected != p.merchant_id {
                    return Err(AppError::MixedMerchant);
                }
                total = p
                    .price_cents
                    .checked_mul(*qty)
                    .and_then(|v| total.checked_add(v))
                    .ok_or_else(|| AppError::invalid_data("order total overflows"))?;
                lines.push(OrderItem {
                    product_id: pid.clone(),
                    quantity: *qty,
                });
            }

            let now = Utc::now();
            let order = Order {
                id: gen_id("o_"),
                buyer_id: buyer_id.to_string(),
                merchant_id: merchant_id.unwrap_or_default(),
                items: lines,
                total_cents: total,
                status: OrderStatus::Created,
                created_at: now,
                updated_at: now,
                payment_id: None,
            };
            t.orders.push(order.clone());
            Ok(order)
        })?;

        // Counts as a view for recommendations even though nothing is bought yet.
        for item in &order.items {
            self.recommend.record_view(buyer_id, &item.product_id);
        }

        info!(order_id = %order.id, buyer_id, total_cents = order.total_cents, "order created");
        Ok(order)
    }

    /// Attempt payment once. On success the order becomes `paid`, stock drops
    /// (floored at zero) and sold rises by each quantity. On failure nothing
    /// but the buyer's credit changes and the order stays `created`.
    ///
    /// Only one attempt per order runs at a time; a second concurrent call
    /// fails with `InvalidState` before any payment record is created.
    pub fn pay_order(&self, order_id: &str, success_probability: f64) -> Result<Payment> {
        if !(0.0..=1.0).contains(&success_probability) {
            return Err(AppError::invalid_data(
                "success_probability must be within [0, 1]",
            ));
        }

        let _claim = PayingClaim::acquire(&self.paying, order_id).ok_or_else(|| {
            AppError::InvalidState(format!("order {} has a payment in progress", order_id))
        })?;

        let order = self
            .store
            .get_order(order_id)
            .ok_or_else(|| AppError::not_found("order", order_id))?;
        if order.status != OrderStatus::Created {
            return Err(AppError::InvalidState(format!(
                "order {} is {}, expected created",
                order.id,
                order.status.as_str()
            )));
        }

        let payment = self.payment_gateway.create_payment(&order);
        let processed =
            self.payment_gateway
                .process_payment(&payment, &order.buyer_id, success_probability);

        if !processed.is_success() {
            let score = self.credit.adjust_for_payment(&order.buyer_id, false);
            debug!(buyer_id = %order.buyer_id, score, "credit lowered");
            return Ok(processed);
        }

        self.store.write(|t| -> Result<()> {
            let row = t
                .order_mut(order_id)
                .ok_or_else(|| AppError::not_found("order", order_id))?;
            row.mark_paid(&processed.id);

            for item in &order.items {
                if let Some(p) = t.product_mut(&item.product_id) {
                    p.stock = p.stock.saturating_sub(item.quantity).max(0);
                    p.sold = p.sold.saturating_add(item.quantity as u64);
                }
            }
            Ok(())
        })?;

        for item in &order.items {
            self.recommend.append_history(&order.buyer_id, &item.product_id);
        }
        let score = self.credit.adjust_for_payment(&order.buyer_id, true);
        info!(order_id, payment_id = %processed.id, score, "order paid");

        Ok(processed)
    }

    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.store.get_order(order_id)
    }

    pub fn orders_for_buyer(&self, buyer_id: &str) -> Vec<Order> {
        self.store.orders_for_buyer(buyer_id)
    }
}
