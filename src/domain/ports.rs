use super::events::CheckoutEvent;
use super::order::Order;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn store(&self, order: Order) -> Result<()>;
    async fn get(&self, order_id: u64) -> Result<Option<Order>>;
    async fn get_all(&self) -> Result<Vec<Order>>;
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: CheckoutEvent) -> Result<()>;
}

/// The checkout form a submission attempt drives.
///
/// Everything except `submit` is presentation state; `submit` performs the
/// real submission that bypasses validation.
#[async_trait]
pub trait CheckoutForm: Send + Sync {
    async fn start_processing(&self);
    async fn stop_processing(&self);
    async fn clear_errors(&self);
    async fn add_error(&self, message: &str);
    async fn focus_errors(&self);
    async fn submit(&self) -> Result<()>;
}

pub type OrderStoreBox = Box<dyn OrderStore>;
pub type EventSinkBox = Box<dyn EventSink>;
pub type CheckoutFormBox = Box<dyn CheckoutForm>;
pub type OrderStoreFactory = Box<dyn Fn() -> OrderStoreBox + Send + Sync>;
