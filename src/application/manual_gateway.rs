use crate::config::ManualGatewayConfig;
use crate::domain::events::CheckoutEvent;
use crate::domain::gateway::{GatewaySupports, PaymentGateway, PendingOrderOutcome};
use crate::domain::money::Price;
use crate::domain::order::{
    AccessPlan, Coupon, Order, OrderStatus, PaymentType, Student, TransactionRecord,
    TransactionStatus,
};
use crate::domain::ports::EventSink;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

pub const MANUAL_GATEWAY_ID: &str = "manual";

/// Gateway for offline payments (checks, bank transfers). Also settles any
/// order that ends up costing nothing.
pub struct ManualGateway {
    config: ManualGatewayConfig,
}

impl ManualGateway {
    pub fn new(config: ManualGatewayConfig) -> Self {
        Self { config }
    }

    /// Instructions to show on the order page while payment is outstanding.
    pub fn payment_instructions(&self, order: &Order) -> Option<&str> {
        let outstanding = matches!(order.status, OrderStatus::Pending | OrderStatus::OnHold);
        if order.payment_gateway() == self.id() && outstanding {
            self.config
                .payment_instructions
                .as_deref()
                .filter(|text| !text.trim().is_empty())
        } else {
            None
        }
    }

    fn free_transaction() -> TransactionRecord {
        TransactionRecord {
            transaction_id: Uuid::new_v4().simple().to_string(),
            amount: Price::ZERO,
            source_description: "Free".to_string(),
            status: TransactionStatus::Succeeded,
            payment_gateway: MANUAL_GATEWAY_ID.to_string(),
            payment_type: PaymentType::Single,
            created_at: Utc::now(),
        }
    }
}

impl Default for ManualGateway {
    fn default() -> Self {
        Self::new(ManualGatewayConfig::default())
    }
}

#[async_trait]
impl PaymentGateway for ManualGateway {
    fn id(&self) -> &str {
        MANUAL_GATEWAY_ID
    }

    fn admin_title(&self) -> &str {
        "Manual"
    }

    fn supports(&self) -> GatewaySupports {
        GatewaySupports {
            checkout_fields: false,
            refunds: false,
            single_payments: true,
            recurring_payments: true,
            test_mode: false,
        }
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    async fn handle_pending_order(
        &self,
        order: &mut Order,
        plan: &AccessPlan,
        student: &Student,
        coupon: Option<&Coupon>,
        events: &dyn EventSink,
    ) -> Result<PendingOrderOutcome> {
        if order.initial_price.is_zero() {
            // A priced plan reduced to nothing (trial, coupon) still gets a receipt.
            if !plan.is_free {
                order.record_transaction(Self::free_transaction());
            }
            tracing::info!(
                order = order.id,
                plan = plan.id,
                student = student.id,
                coupon = coupon.map(|c| c.code.as_str()),
                "free order settled"
            );
            return self.complete_transaction(order, events).await;
        }

        events
            .emit(CheckoutEvent::PaymentDue {
                order_id: order.id,
                gateway_id: self.id().to_string(),
            })
            .await?;
        events
            .emit(CheckoutEvent::PendingOrderComplete { order_id: order.id })
            .await?;

        let link = order.view_link(&self.config.order_view_base);
        tracing::info!(order = order.id, amount = %order.initial_price, "manual payment due");
        Ok(PendingOrderOutcome::Redirect(link))
    }

    async fn handle_recurring_transaction(
        &self,
        order: &mut Order,
        events: &dyn EventSink,
    ) -> Result<()> {
        if order.total_price.is_zero() {
            tracing::debug!(order = order.id, "zero-total recurring order, nothing due");
            return Ok(());
        }

        order.status = OrderStatus::OnHold;
        events
            .emit(CheckoutEvent::PaymentDue {
                order_id: order.id,
                gateway_id: self.id().to_string(),
            })
            .await
    }

    async fn handle_payment_source_switch(&self, order: &mut Order) -> Result<bool> {
        if order.payment_gateway() == self.id() {
            return Ok(false);
        }

        let previous = order.switch_gateway(self.id());
        order.add_note(format!(
            "Payment method switched from \"{}\" to \"{}\"",
            previous,
            self.admin_title()
        ));
        Ok(true)
    }
}
