use super::money::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    OnHold,
    Completed,
    Active,
    Cancelled,
    Expired,
    Failed,
    Refunded,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Completed => "completed",
            OrderStatus::Active => "active",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Expired => "expired",
            OrderStatus::Failed => "failed",
            OrderStatus::Refunded => "refunded",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Succeeded,
    Pending,
    Failed,
    Refunded,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Single,
    Recurring,
    Trial,
}

/// One ledger entry recording a payment outcome for an order.
///
/// Records are immutable once appended to an order's transaction log.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub amount: Price,
    pub source_description: String,
    pub status: TransactionStatus,
    pub payment_gateway: String,
    pub payment_type: PaymentType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct OrderNote {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// The access plan an order was placed against.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct AccessPlan {
    pub id: u64,
    pub title: String,
    /// Plans authored as free never produce a receipt.
    pub is_free: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Student {
    pub id: u64,
    pub email: String,
}

/// A coupon already applied upstream. Prices on the order reflect it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Coupon {
    pub code: String,
}

/// An order owned by the store.
///
/// The gateway identity fields (`payment_gateway` and the three gateway ids)
/// only change together through [`Order::switch_gateway`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub id: u64,
    pub status: OrderStatus,
    payment_gateway: String,
    gateway_customer_id: Option<String>,
    gateway_source_id: Option<String>,
    gateway_subscription_id: Option<String>,
    pub initial_price: Price,
    pub total_price: Price,
    transactions: Vec<TransactionRecord>,
    notes: Vec<OrderNote>,
}

impl Order {
    pub fn new(id: u64, payment_gateway: &str, initial_price: Price, total_price: Price) -> Self {
        Self {
            id,
            status: OrderStatus::Pending,
            payment_gateway: payment_gateway.to_string(),
            gateway_customer_id: None,
            gateway_source_id: None,
            gateway_subscription_id: None,
            initial_price,
            total_price,
            transactions: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn payment_gateway(&self) -> &str {
        &self.payment_gateway
    }

    pub fn gateway_customer_id(&self) -> Option<&str> {
        self.gateway_customer_id.as_deref()
    }

    pub fn gateway_source_id(&self) -> Option<&str> {
        self.gateway_source_id.as_deref()
    }

    pub fn gateway_subscription_id(&self) -> Option<&str> {
        self.gateway_subscription_id.as_deref()
    }

    /// Attaches gateway-side identifiers issued by the current gateway.
    pub fn set_gateway_ids(
        &mut self,
        customer: Option<String>,
        source: Option<String>,
        subscription: Option<String>,
    ) {
        self.gateway_customer_id = customer;
        self.gateway_source_id = source;
        self.gateway_subscription_id = subscription;
    }

    /// Points the order at a new gateway and drops the previous gateway's ids.
    ///
    /// Returns the previous gateway id.
    pub fn switch_gateway(&mut self, gateway: &str) -> String {
        self.gateway_customer_id = None;
        self.gateway_source_id = None;
        self.gateway_subscription_id = None;
        std::mem::replace(&mut self.payment_gateway, gateway.to_string())
    }

    pub fn record_transaction(&mut self, record: TransactionRecord) {
        self.transactions.push(record);
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn add_note(&mut self, text: impl Into<String>) {
        self.notes.push(OrderNote {
            text: text.into(),
            created_at: Utc::now(),
        });
    }

    pub fn notes(&self) -> &[OrderNote] {
        &self.notes
    }

    pub fn view_link(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.id)
    }
}
