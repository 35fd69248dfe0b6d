use super::events::CheckoutEvent;
use super::order::{AccessPlan, Coupon, Order, OrderStatus, Student};
use super::ports::EventSink;
use crate::error::Result;
use async_trait::async_trait;

/// Client-side handle for a payment gateway on the checkout form.
///
/// Gateways come from independent extensions; only those that expose a
/// binding get bound.
pub trait CheckoutGateway: Send + Sync {
    fn id(&self) -> &str;

    fn has_binding(&self) -> bool {
        false
    }

    fn bind(&self) -> Result<()> {
        Ok(())
    }

    /// Whether the gateway's own checkout fields currently validate.
    fn fields_valid(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GatewaySupports {
    pub checkout_fields: bool,
    pub refunds: bool,
    pub single_payments: bool,
    pub recurring_payments: bool,
    pub test_mode: bool,
}

/// How the pending order was left. `Redirect` ends the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOrderOutcome {
    Completed,
    Redirect(String),
}

/// Server-side gateway contract. Every gateway must honor the same order
/// state outcomes even if it settles payment differently.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn id(&self) -> &str;
    fn admin_title(&self) -> &str;
    fn supports(&self) -> GatewaySupports;
    fn is_enabled(&self) -> bool;

    async fn handle_pending_order(
        &self,
        order: &mut Order,
        plan: &AccessPlan,
        student: &Student,
        coupon: Option<&Coupon>,
        events: &dyn EventSink,
    ) -> Result<PendingOrderOutcome>;

    async fn handle_recurring_transaction(
        &self,
        order: &mut Order,
        events: &dyn EventSink,
    ) -> Result<()>;

    /// Returns `false` when the order already used this gateway.
    async fn handle_payment_source_switch(&self, order: &mut Order) -> Result<bool>;

    async fn complete_transaction(
        &self,
        order: &mut Order,
        events: &dyn EventSink,
    ) -> Result<PendingOrderOutcome> {
        order.status = OrderStatus::Completed;
        events
            .emit(CheckoutEvent::OrderCompleted { order_id: order.id })
            .await?;
        Ok(PendingOrderOutcome::Completed)
    }
}

pub type PaymentGatewayRef = std::sync::Arc<dyn PaymentGateway>;
