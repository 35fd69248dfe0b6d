use crate::domain::events::CheckoutEvent;
use crate::domain::order::Order;
use crate::domain::ports::{CheckoutForm, EventSink, OrderStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for orders.
///
/// Uses `Arc<RwLock<HashMap<u64, Order>>>`; clones share the same orders.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<u64, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn store(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order);
        Ok(())
    }

    async fn get(&self, order_id: u64) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&order_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.values().cloned().collect())
    }
}

/// Keeps every emitted event in emission order.
#[derive(Default, Clone)]
pub struct InMemoryEventLog {
    events: Arc<RwLock<Vec<CheckoutEvent>>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<CheckoutEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EventSink for InMemoryEventLog {
    async fn emit(&self, event: CheckoutEvent) -> Result<()> {
        tracing::debug!(?event, "event emitted");
        self.events.write().await.push(event);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    StartProcessing,
    StopProcessing,
    ClearErrors,
    AddError(String),
    FocusErrors,
    Submit,
}

#[derive(Default)]
struct FormState {
    actions: Vec<FormAction>,
    errors: Vec<String>,
    processing: bool,
}

/// A headless checkout form that records what was done to it.
#[derive(Default, Clone)]
pub struct RecordingForm {
    state: Arc<RwLock<FormState>>,
}

impl RecordingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn actions(&self) -> Vec<FormAction> {
        self.state.read().await.actions.clone()
    }

    /// Errors currently on display.
    pub async fn errors(&self) -> Vec<String> {
        self.state.read().await.errors.clone()
    }

    pub async fn is_processing(&self) -> bool {
        self.state.read().await.processing
    }

    /// How many times the form was submitted for real.
    pub async fn submissions(&self) -> usize {
        self.state
            .read()
            .await
            .actions
            .iter()
            .filter(|action| **action == FormAction::Submit)
            .count()
    }
}

#[async_trait]
impl CheckoutForm for RecordingForm {
    async fn start_processing(&self) {
        let mut state = self.state.write().await;
        state.processing = true;
        state.actions.push(FormAction::StartProcessing);
    }

    async fn stop_processing(&self) {
        let mut state = self.state.write().await;
        state.processing = false;
        state.actions.push(FormAction::StopProcessing);
    }

    async fn clear_errors(&self) {
        let mut state = self.state.write().await;
        state.errors.clear();
        state.actions.push(FormAction::ClearErrors);
    }

    async fn add_error(&self, message: &str) {
        let mut state = self.state.write().await;
        state.errors.push(message.to_string());
        state.actions.push(FormAction::AddError(message.to_string()));
    }

    async fn focus_errors(&self) {
        self.state.write().await.actions.push(FormAction::FocusErrors);
    }

    async fn submit(&self) -> Result<()> {
        self.state.write().await.actions.push(FormAction::Submit);
        Ok(())
    }
}
