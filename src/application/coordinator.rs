use super::registry::{GatewayRegistry, ValidatorRegistry};
use crate::config::CheckoutConfig;
use crate::domain::events::CheckoutEvent;
use crate::domain::gateway::CheckoutGateway;
use crate::domain::ports::{CheckoutFormBox, EventSinkBox};
use crate::domain::validation::{Reporter, ValidationReport, ValidatorEntry};
use crate::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionState {
    Idle,
    Running,
    Succeeded,
    Failed,
    TimedOut,
}

/// Running tally of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SubmissionAttempt {
    /// Checks registered when the attempt started.
    pub total: usize,
    pub finished: usize,
    pub succeeded: usize,
    /// Failure messages in completion order.
    pub errors: Vec<String>,
    pub elapsed_ticks: u64,
}

impl SubmissionAttempt {
    fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    fn record(&mut self, report: ValidationReport) {
        self.finished += 1;
        match report {
            ValidationReport::Passed => self.succeeded += 1,
            ValidationReport::Failed(message) => self.errors.push(message),
            ValidationReport::Inconclusive => {}
        }
    }

    /// The terminal state once every check has finished, if there is one.
    ///
    /// All finished with no errors but not all passed has no verdict; the
    /// attempt keeps running until the deadline.
    fn verdict(&self) -> Option<SubmissionState> {
        if self.finished < self.total {
            None
        } else if self.succeeded == self.total {
            Some(SubmissionState::Succeeded)
        } else if !self.errors.is_empty() {
            Some(SubmissionState::Failed)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub state: SubmissionState,
    #[serde(flatten)]
    pub attempt: SubmissionAttempt,
}

/// Drives checkout submissions for one checkout session.
///
/// Owns the session's check and gateway registries. Submitting takes
/// `&mut self`, so only one attempt can be running at a time and nothing can
/// register against the session while it runs.
pub struct SubmissionCoordinator {
    config: CheckoutConfig,
    validators: ValidatorRegistry,
    gateways: GatewayRegistry,
    form: CheckoutFormBox,
    events: EventSinkBox,
    state: SubmissionState,
    gateways_bound: bool,
}

impl SubmissionCoordinator {
    /// Creates a coordinator for one checkout session with empty registries.
    ///
    /// # Arguments
    ///
    /// * `config` - Tick interval, tick budget and timeout message.
    /// * `form` - The form an attempt drives and finally submits.
    /// * `events` - Sink for checkout events.
    pub fn new(config: CheckoutConfig, form: CheckoutFormBox, events: EventSinkBox) -> Self {
        Self {
            config,
            validators: ValidatorRegistry::new(),
            gateways: GatewayRegistry::new(),
            form,
            events,
            state: SubmissionState::Idle,
            gateways_bound: false,
        }
    }

    /// State of the most recent attempt, `Idle` before the first one.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Registers a before-submit check. Returns `false` if the entry has no handler.
    pub fn add_before_submit_event(&mut self, entry: ValidatorEntry) -> bool {
        self.validators.register(entry)
    }

    /// Adds a gateway to be bound on the next `init` or `refresh`.
    pub fn add_gateway(&mut self, gateway: Arc<dyn CheckoutGateway>) {
        self.gateways.add_gateway(gateway);
    }

    /// Checks registered so far, in registration order.
    pub fn validators(&self) -> &ValidatorRegistry {
        &self.validators
    }

    /// Gateways registered so far.
    pub fn gateways(&self) -> &GatewayRegistry {
        &self.gateways
    }

    /// Binds the registered gateways once and announces the checkout.
    pub async fn init(&mut self) -> Result<()> {
        if !self.gateways_bound {
            let bound = self.gateways.bind_all();
            tracing::debug!(bound, "checkout gateways bound");
            self.gateways_bound = true;
        }
        self.events.emit(CheckoutEvent::CheckoutRefreshed).await
    }

    /// Re-binds gateways after the coupon or gateway sections were replaced.
    pub async fn refresh(&mut self) -> Result<()> {
        self.gateways.bind_all();
        self.gateways_bound = true;
        self.events.emit(CheckoutEvent::CheckoutRefreshed).await
    }

    /// Announces a gateway selection and returns whether submitting is
    /// allowed with it.
    pub async fn select_gateway(&self, gateway_id: &str) -> Result<bool> {
        let submit_enabled = self
            .gateways
            .get(gateway_id)
            .is_none_or(|gateway| gateway.fields_valid());
        self.events
            .emit(CheckoutEvent::GatewaySelected {
                gateway_id: gateway_id.to_string(),
            })
            .await?;
        Ok(submit_enabled)
    }

    /// Runs every registered check and submits the form for real when all pass.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome> {
        self.state = SubmissionState::Running;
        self.form.start_processing().await;
        self.form.clear_errors().await;

        let entries = self.validators.entries();
        let mut attempt = SubmissionAttempt::new(entries.len());
        let started = Instant::now();

        let state = if entries.is_empty() {
            SubmissionState::Succeeded
        } else {
            self.run_checks(entries, &mut attempt).await
        };

        attempt.elapsed_ticks = if state == SubmissionState::TimedOut {
            self.config.max_ticks
        } else {
            let ticks = started.elapsed().as_millis() / self.config.poll_interval().as_millis();
            u64::try_from(ticks).unwrap_or(u64::MAX)
        };
        self.state = state;

        match state {
            SubmissionState::Succeeded => {
                tracing::info!(total = attempt.total, "all before-submit checks passed");
                if let Err(e) = self.form.submit().await {
                    tracing::warn!("checkout submission failed: {e}");
                    self.state = SubmissionState::Idle;
                    self.form.stop_processing().await;
                    return Err(e);
                }
            }
            SubmissionState::Failed => {
                tracing::info!(
                    errors = attempt.errors.len(),
                    "checkout stopped by failed checks"
                );
                for message in &attempt.errors {
                    self.form.add_error(message).await;
                }
                self.form.focus_errors().await;
                self.form.stop_processing().await;
            }
            SubmissionState::TimedOut => {
                tracing::warn!(
                    total = attempt.total,
                    finished = attempt.finished,
                    succeeded = attempt.succeeded,
                    "before-submit checks timed out"
                );
                if let Some(message) = &self.config.timeout_message {
                    self.form.add_error(message).await;
                    self.form.focus_errors().await;
                }
                self.form.stop_processing().await;
            }
            SubmissionState::Idle | SubmissionState::Running => {}
        }

        Ok(SubmissionOutcome { state, attempt })
    }

    async fn run_checks(
        &self,
        entries: Vec<ValidatorEntry>,
        attempt: &mut SubmissionAttempt,
    ) -> SubmissionState {
        let (tx, mut rx) = mpsc::unbounded_channel();

        for (index, entry) in entries.into_iter().enumerate() {
            let Some(handler) = entry.handler else {
                continue;
            };
            let reporter = Reporter::new(index, tx.clone());
            let payload = entry.payload;
            tokio::spawn(async move {
                handler.validate(payload, reporter).await;
            });
        }
        drop(tx);

        let deadline = sleep(self.config.deadline());
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                biased;
                () = &mut deadline => return SubmissionState::TimedOut,
                received = rx.recv() => {
                    let Some((index, report)) = received else {
                        break;
                    };
                    tracing::trace!(validator = index, ?report, "before-submit check finished");
                    attempt.record(report);
                    if let Some(state) = attempt.verdict() {
                        return state;
                    }
                }
            }
        }

        // Every reporter is gone; only the deadline can end the attempt.
        deadline.await;
        SubmissionState::TimedOut
    }
}
