use serde::Serialize;

/// Events published for external subscribers (notifications, receipts, UI hooks).
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum CheckoutEvent {
    /// The coupon or gateway sections of the checkout were re-rendered.
    CheckoutRefreshed,
    GatewaySelected { gateway_id: String },
    /// An offline payment is owed on the order.
    PaymentDue { order_id: u64, gateway_id: String },
    PendingOrderComplete { order_id: u64 },
    /// The order reached `completed`; receipts hang off this.
    OrderCompleted { order_id: u64 },
}
