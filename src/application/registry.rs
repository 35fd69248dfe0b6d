use crate::domain::gateway::CheckoutGateway;
use crate::domain::validation::ValidatorEntry;
use std::sync::Arc;

/// Before-submit checks registered by extensions, in registration order.
#[derive(Default, Clone)]
pub struct ValidatorRegistry {
    entries: Vec<ValidatorEntry>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check. Entries without a handler are dropped rather than
    /// failing the caller. Duplicates are kept and run once per registration.
    pub fn register(&mut self, entry: ValidatorEntry) -> bool {
        if entry.handler.is_none() {
            tracing::debug!("ignoring before-submit registration without a handler");
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Snapshot of the registered checks.
    pub fn entries(&self) -> Vec<ValidatorEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Default, Clone)]
pub struct GatewayRegistry {
    gateways: Vec<Arc<dyn CheckoutGateway>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_gateway(&mut self, gateway: Arc<dyn CheckoutGateway>) {
        self.gateways.push(gateway);
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn CheckoutGateway>> {
        self.gateways.iter().find(|g| g.id() == id)
    }

    /// Binds every gateway that exposes a binding and returns how many bound.
    /// A gateway whose binding fails is logged and skipped.
    pub fn bind_all(&self) -> usize {
        let mut bound = 0;
        for gateway in self.gateways.iter().filter(|g| g.has_binding()) {
            match gateway.bind() {
                Ok(()) => bound += 1,
                Err(e) => {
                    tracing::warn!(gateway = gateway.id(), "failed to bind gateway: {e}");
                }
            }
        }
        bound
    }

    pub fn len(&self) -> usize {
        self.gateways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
    }
}
