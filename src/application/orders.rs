use super::manual_gateway::MANUAL_GATEWAY_ID;
use crate::domain::command::{OrderCommand, OrderCommandType};
use crate::domain::gateway::{PaymentGatewayRef, PendingOrderOutcome};
use crate::domain::order::{AccessPlan, Coupon, Order, OrderStatus, Student};
use crate::domain::ports::{EventSinkBox, OrderStoreBox};
use crate::error::{CheckoutError, Result};
use std::collections::HashMap;

/// Server-side order pipeline.
///
/// Loads the order, hands it to the gateway it is assigned to and persists
/// whatever state the gateway left it in. Operations on one order are
/// expected to be serialized by the caller.
pub struct OrderService {
    order_store: OrderStoreBox,
    events: EventSinkBox,
    gateways: HashMap<String, PaymentGatewayRef>,
}

impl OrderService {
    /// Creates a service with no gateways registered.
    ///
    /// # Arguments
    ///
    /// * `order_store` - Where orders are loaded from and persisted to.
    /// * `events` - Sink for the events gateways emit while handling orders.
    pub fn new(order_store: OrderStoreBox, events: EventSinkBox) -> Self {
        Self {
            order_store,
            events,
            gateways: HashMap::new(),
        }
    }

    /// Builder form of [`OrderService::register_gateway`].
    pub fn with_gateway(mut self, gateway: PaymentGatewayRef) -> Self {
        self.register_gateway(gateway);
        self
    }

    /// Registers a gateway under its id, replacing any gateway with the same id.
    pub fn register_gateway(&mut self, gateway: PaymentGatewayRef) {
        self.gateways.insert(gateway.id().to_string(), gateway);
    }

    fn gateway(&self, id: &str) -> Result<&PaymentGatewayRef> {
        self.gateways
            .get(id)
            .ok_or_else(|| CheckoutError::UnknownGateway(id.to_string()))
    }

    async fn load(&self, order_id: u64) -> Result<Order> {
        self.order_store
            .get(order_id)
            .await?
            .ok_or(CheckoutError::OrderNotFound(order_id))
    }

    /// Stores a new order as-is. The gateway is only resolved when it is handled.
    pub async fn create_order(&self, order: Order) -> Result<()> {
        tracing::debug!(order = order.id, gateway = order.payment_gateway(), "order created");
        self.order_store.store(order).await
    }

    pub async fn handle_pending_order(
        &self,
        order_id: u64,
        plan: &AccessPlan,
        student: &Student,
        coupon: Option<&Coupon>,
    ) -> Result<PendingOrderOutcome> {
        let mut order = self.load(order_id).await?;
        if order.status != OrderStatus::Pending {
            return Err(CheckoutError::InvalidState {
                order: order_id,
                status: order.status.to_string(),
                expected: OrderStatus::Pending.to_string(),
            });
        }

        let gateway = self.gateway(order.payment_gateway())?;
        if !gateway.is_enabled() {
            return Err(CheckoutError::ValidationError(format!(
                "Payment gateway {} is disabled",
                gateway.id()
            )));
        }

        let outcome = gateway
            .handle_pending_order(&mut order, plan, student, coupon, self.events.as_ref())
            .await?;
        self.order_store.store(order).await?;
        Ok(outcome)
    }

    /// Runs a scheduled billing cycle and returns the resulting status.
    pub async fn handle_recurring_transaction(&self, order_id: u64) -> Result<OrderStatus> {
        let mut order = self.load(order_id).await?;
        let gateway = self.gateway(order.payment_gateway())?;

        gateway
            .handle_recurring_transaction(&mut order, self.events.as_ref())
            .await?;
        let status = order.status;
        self.order_store.store(order).await?;
        Ok(status)
    }

    /// Moves the order to `gateway_id`. Returns `false` if it already used it.
    pub async fn switch_payment_source(&self, order_id: u64, gateway_id: &str) -> Result<bool> {
        let mut order = self.load(order_id).await?;
        let gateway = self.gateway(gateway_id)?;

        let switched = gateway.handle_payment_source_switch(&mut order).await?;
        if switched {
            tracing::info!(order = order_id, gateway = gateway_id, "payment source switched");
            self.order_store.store(order).await?;
        }
        Ok(switched)
    }

    /// Applies one row of an order batch.
    pub async fn process_command(&self, command: OrderCommand) -> Result<()> {
        match command.r#type {
            OrderCommandType::Pending => {
                if self.order_store.get(command.order).await?.is_none() {
                    let initial = command.initial.ok_or_else(|| {
                        CheckoutError::ValidationError(
                            "Pending order missing initial price".to_string(),
                        )
                    })?;
                    let total = command.total.unwrap_or(initial);
                    let gateway = command
                        .gateway
                        .as_deref()
                        .unwrap_or(MANUAL_GATEWAY_ID);
                    self.create_order(Order::new(command.order, gateway, initial, total))
                        .await?;
                }

                let plan = AccessPlan {
                    id: command.order,
                    title: String::new(),
                    is_free: command.plan_free.unwrap_or(false),
                };
                let student = Student {
                    id: command.student.unwrap_or_default(),
                    email: String::new(),
                };
                let coupon = command.coupon.map(|code| Coupon { code });

                let outcome = self
                    .handle_pending_order(command.order, &plan, &student, coupon.as_ref())
                    .await?;
                if let PendingOrderOutcome::Redirect(link) = outcome {
                    tracing::info!(order = command.order, %link, "redirecting to order");
                }
            }
            OrderCommandType::Recurring => {
                self.handle_recurring_transaction(command.order).await?;
            }
            OrderCommandType::Switch => {
                let gateway = command.gateway.ok_or_else(|| {
                    CheckoutError::ValidationError("Switch missing gateway".to_string())
                })?;
                self.switch_payment_source(command.order, &gateway).await?;
            }
        }
        Ok(())
    }

    /// Consumes the service and returns every order, ordered by id.
    pub async fn into_results(self) -> Result<Vec<Order>> {
        let mut orders = self.order_store.get_all().await?;
        orders.sort_by_key(|order| order.id);
        Ok(orders)
    }
}
