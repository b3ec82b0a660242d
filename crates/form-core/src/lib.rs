use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use client_sdk::{OptimizerClient, SubmitError};
use common::{FormInput, IoPriority, OptimizationResult, SpeedRequirement, TaskType};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

mod view;

pub use view::{FormView, NO_RECOMMENDATIONS, ResultView, SettingRow, labels};

/// Anything able to carry one form snapshot to the optimizer and back.
pub trait OptimizerTransport: Send + Sync {
    fn submit(
        &self,
        input: &FormInput,
    ) -> impl Future<Output = Result<OptimizationResult, SubmitError>> + Send;
}

impl OptimizerTransport for OptimizerClient {
    fn submit(
        &self,
        input: &FormInput,
    ) -> impl Future<Output = Result<OptimizationResult, SubmitError>> + Send {
        OptimizerClient::submit(self, input)
    }
}

/// One edit of one input control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldChange {
    DataSize(String),
    ReadWriteRatio(String),
    TaskType(TaskType),
    SpeedRequirement(SpeedRequirement),
    CacheUsage(bool),
    IoPriority(IoPriority),
}

impl FieldChange {
    pub fn apply(self, input: &mut FormInput) {
        match self {
            Self::DataSize(value) => input.data_size = value,
            Self::ReadWriteRatio(value) => input.read_write_ratio = value,
            Self::TaskType(value) => input.task_type = value,
            Self::SpeedRequirement(value) => input.speed_requirement = value,
            Self::CacheUsage(value) => input.cache_usage = value,
            Self::IoPriority(value) => input.io_priority = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestLifecycle {
    Idle,
    Loading,
    Succeeded(OptimizationResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Succeeded(OptimizationResult),
    Failed(String),
}

#[derive(Debug, Default)]
struct FormState {
    input: FormInput,
    loading: bool,
    outcome: Option<Outcome>,
}

/// View-model of the submission form: field state plus the request lifecycle.
///
/// State is only locked for synchronous reads and writes, never across the
/// network call, so a second submit may start while the first is in flight.
/// Their completions race and the last one to settle wins.
pub struct SubmissionForm<T> {
    transport: T,
    state: Mutex<FormState>,
}

impl<T: OptimizerTransport> SubmissionForm<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Mutex::new(FormState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn input(&self) -> FormInput {
        self.state().input.clone()
    }

    pub fn update(&self, change: FieldChange) {
        change.apply(&mut self.state().input);
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn lifecycle(&self) -> RequestLifecycle {
        let state = self.state();
        if state.loading {
            return RequestLifecycle::Loading;
        }

        match &state.outcome {
            None => RequestLifecycle::Idle,
            Some(Outcome::Succeeded(result)) => RequestLifecycle::Succeeded(result.clone()),
            Some(Outcome::Failed(message)) => RequestLifecycle::Failed(message.clone()),
        }
    }

    pub fn view(&self) -> FormView {
        let state = self.state();
        let (result, error) = match &state.outcome {
            None => (None, None),
            Some(Outcome::Succeeded(result)) => (Some(ResultView::from_result(result)), None),
            Some(Outcome::Failed(message)) => (None, Some(message.clone())),
        };

        FormView {
            input: state.input.clone(),
            loading: state.loading,
            result,
            error,
        }
    }

    /// Sends the current fields and records the outcome.
    ///
    /// Failures never escape: transport, status and decode errors all end up
    /// as the failed message shown by the form.
    pub async fn submit(&self) -> RequestLifecycle {
        let input = {
            let mut state = self.state();
            state.loading = true;
            if matches!(state.outcome, Some(Outcome::Failed(_))) {
                state.outcome = None;
            }
            state.input.clone()
        };
        let _loading = LoadingGuard { state: &self.state };

        let outcome = match self.transport.submit(&input).await {
            Ok(result) => {
                info!(predicted_iops = result.predicted_iops, "optimization request succeeded");
                Outcome::Succeeded(result)
            }
            Err(err) => {
                warn!(error = %err, "optimization request failed");
                Outcome::Failed(err.to_string())
            }
        };

        self.state().outcome = Some(outcome.clone());

        match outcome {
            Outcome::Succeeded(result) => RequestLifecycle::Succeeded(result),
            Outcome::Failed(message) => RequestLifecycle::Failed(message),
        }
    }
}

/// Clears the loading flag when dropped, whichever way submit exits.
struct LoadingGuard<'a> {
    state: &'a Mutex<FormState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .loading = false;
    }
}
