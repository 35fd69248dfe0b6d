use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// What a before-submit check reported back.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ValidationReport {
    Passed,
    /// A user-displayable failure message.
    Failed(String),
    /// Counted as finished, but neither approves nor rejects.
    Inconclusive,
}

impl From<Value> for ValidationReport {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(true) => ValidationReport::Passed,
            Value::String(message) => ValidationReport::Failed(message),
            _ => ValidationReport::Inconclusive,
        }
    }
}

impl From<bool> for ValidationReport {
    fn from(value: bool) -> Self {
        Value::Bool(value).into()
    }
}

impl From<&str> for ValidationReport {
    fn from(message: &str) -> Self {
        ValidationReport::Failed(message.to_string())
    }
}

impl From<String> for ValidationReport {
    fn from(message: String) -> Self {
        ValidationReport::Failed(message)
    }
}

/// Completion callback handed to a check. Consumed on use, so a check can
/// report at most once.
#[derive(Debug)]
pub struct Reporter {
    index: usize,
    tx: UnboundedSender<(usize, ValidationReport)>,
}

impl Reporter {
    pub(crate) fn new(index: usize, tx: UnboundedSender<(usize, ValidationReport)>) -> Self {
        Self { index, tx }
    }

    pub fn report(self, report: impl Into<ValidationReport>) {
        if self.tx.send((self.index, report.into())).is_err() {
            tracing::debug!(
                validator = self.index,
                "late validation report ignored, attempt already resolved"
            );
        }
    }
}

/// A before-submit check. Must eventually call `reporter.report(..)` exactly once.
#[async_trait]
pub trait ValidatorHandler: Send + Sync {
    async fn validate(&self, payload: Option<Value>, reporter: Reporter);
}

/// Adapts a plain closure into a [`ValidatorHandler`].
///
/// The closure runs synchronously; asynchronous checks spawn their own work
/// and move the reporter into it.
pub struct FnValidator<F>(pub F);

#[async_trait]
impl<F> ValidatorHandler for FnValidator<F>
where
    F: Fn(Option<Value>, Reporter) + Send + Sync,
{
    async fn validate(&self, payload: Option<Value>, reporter: Reporter) {
        (self.0)(payload, reporter);
    }
}

pub type ValidatorHandlerRef = Arc<dyn ValidatorHandler>;

/// A registration request from an extension.
#[derive(Clone, Default)]
pub struct ValidatorEntry {
    pub payload: Option<Value>,
    pub handler: Option<ValidatorHandlerRef>,
}

impl ValidatorEntry {
    pub fn new(handler: ValidatorHandlerRef) -> Self {
        Self {
            payload: None,
            handler: Some(handler),
        }
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Option<Value>, Reporter) + Send + Sync + 'static,
    {
        Self::new(Arc::new(FnValidator(f)))
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}
