use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub merchant_id: String,
    pub items: Vec<OrderItem>,
    // Fixed at creation; later price changes do not re-price the order.
    pub total_cents: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub payment_id: Option<String>,
}

impl Order {
    pub fn mark_paid(&mut self, payment_id: &str) {
        self.payment_id = Some(payment_id.to_string());
        self.status = OrderStatus::Paid;
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "buyer_id cannot be empty"))]
    pub buyer_id: String,
    #[validate(length(min = 1, message = "order needs at least one item"))]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PayOrderRequest {
    #[serde(default)]
    pub success_probability: Option<f64>,
}
