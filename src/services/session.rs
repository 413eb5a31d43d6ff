use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::models::sentiment_types::{AnalysisResult, DistributionEntry};
use crate::models::session_types::{AnalysisMode, SelectedFile, SessionView};
use crate::services::busy::BusyFlag;
use crate::services::distribution;
use crate::services::orchestrator::RequestOrchestrator;
use crate::services::presenter;
use crate::services::sentiment_api::{HttpSentimentService, SentimentService};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Which analysis tab is active, plus the inputs for each tab.
///
/// Switching modes never clears the other mode's inputs.
#[derive(Debug, Clone)]
pub struct ModeStateMachine {
    mode: AnalysisMode,
    review_text: String,
    selected_file: Option<SelectedFile>,
    busy: BusyFlag,
}

impl ModeStateMachine {
    pub fn new(busy: BusyFlag) -> Self {
        Self {
            mode: AnalysisMode::default(),
            review_text: String::new(),
            selected_file: None,
            busy,
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// Allowed while busy; the in-flight request keeps running.
    pub fn set_mode(&mut self, mode: AnalysisMode) {
        self.mode = mode;
    }

    pub fn review_text(&self) -> &str {
        &self.review_text
    }

    pub fn set_review_text(&mut self, text: impl Into<String>) {
        self.review_text = text.into();
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
    }

    pub fn clear_file(&mut self) {
        self.selected_file = None;
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn can_submit_single(&self) -> bool {
        self.mode == AnalysisMode::Single && !self.review_text.trim().is_empty() && !self.is_busy()
    }

    pub fn can_submit_bulk(&self) -> bool {
        self.mode == AnalysisMode::Bulk && self.selected_file.is_some() && !self.is_busy()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// The new result is now displayed.
    Completed,
    /// The submit predicate was false; nothing was sent.
    Rejected,
    /// The request failed; the previous result is still displayed.
    Failed(String),
    /// The response arrived for a superseded submission and was dropped.
    Discarded,
}

struct SessionState {
    modes: ModeStateMachine,
    result: AnalysisResult,
    distribution: Vec<DistributionEntry>,
}

/// Owns everything one analysis window needs: mode state, the displayed
/// result and the orchestrator. Clones share the same session.
#[derive(Clone)]
pub struct AnalysisSession {
    state: Arc<Mutex<SessionState>>,
    orchestrator: RequestOrchestrator,
    generation: Arc<AtomicU64>,
    discard_stale: bool,
}

impl AnalysisSession {
    pub fn new(service: Arc<dyn SentimentService>, config: &ServiceConfig) -> Self {
        let busy = BusyFlag::new();
        Self {
            state: Arc::new(Mutex::new(SessionState {
                modes: ModeStateMachine::new(busy.clone()),
                result: AnalysisResult::Empty,
                distribution: Vec::new(),
            })),
            orchestrator: RequestOrchestrator::new(service, busy),
            generation: Arc::new(AtomicU64::new(0)),
            discard_stale: config.discard_stale_responses,
        }
    }

    pub fn from_config(config: ServiceConfig) -> Result<Self, ServiceError> {
        let service = HttpSentimentService::new(config.clone())?;
        Ok(Self::new(Arc::new(service), &config))
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_mode(&self, mode: AnalysisMode) {
        let mut state = self.lock();
        if state.modes.mode() != mode {
            // Anything still in flight now belongs to the previous tab.
            self.generation.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(?mode, busy = state.modes.is_busy(), "analysis mode switched");
        }
        state.modes.set_mode(mode);
    }

    pub fn set_review_text(&self, text: impl Into<String>) {
        self.lock().modes.set_review_text(text);
    }

    pub fn select_file(&self, file: SelectedFile) {
        tracing::debug!(file = %file.name, bytes = file.bytes.len(), "csv file selected");
        self.lock().modes.select_file(file);
    }

    pub fn clear_file(&self) {
        self.lock().modes.clear_file();
    }

    pub fn is_busy(&self) -> bool {
        self.orchestrator.busy().is_busy()
    }

    pub fn mode(&self) -> AnalysisMode {
        self.lock().modes.mode()
    }

    pub fn result(&self) -> AnalysisResult {
        self.lock().result.clone()
    }

    pub fn distribution(&self) -> Vec<DistributionEntry> {
        self.lock().distribution.clone()
    }

    pub async fn submit_single(&self) -> SubmissionStatus {
        // The busy flag and the ticket are taken together under the state
        // lock, so a submission that is turned away never advances the
        // generation.
        let (review, busy, ticket) = {
            let state = self.lock();
            if !state.modes.can_submit_single() {
                return SubmissionStatus::Rejected;
            }
            let Ok(busy) = self.orchestrator.acquire() else {
                return SubmissionStatus::Rejected;
            };
            (state.modes.review_text().to_string(), busy, self.next_ticket())
        };

        let outcome = self.orchestrator.run_single(busy, &review).await;
        self.settle(ticket, outcome.map(AnalysisResult::Single))
    }

    pub async fn submit_bulk(&self) -> SubmissionStatus {
        let (file, busy, ticket) = {
            let state = self.lock();
            if !state.modes.can_submit_bulk() {
                return SubmissionStatus::Rejected;
            }
            let Some(file) = state.modes.selected_file().cloned() else {
                return SubmissionStatus::Rejected;
            };
            let Ok(busy) = self.orchestrator.acquire() else {
                return SubmissionStatus::Rejected;
            };
            (file, busy, self.next_ticket())
        };

        let outcome = self.orchestrator.run_bulk(busy, &file).await;
        self.settle(ticket, outcome.map(AnalysisResult::Bulk))
    }

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn settle(&self, ticket: u64, outcome: Result<AnalysisResult, ServiceError>) -> SubmissionStatus {
        let result = match outcome {
            Ok(result) => result,
            // Already logged by the orchestrator; the displayed result stays.
            Err(e) => return SubmissionStatus::Failed(e.to_string()),
        };

        let distribution = result.as_bulk().map(distribution::aggregate).unwrap_or_default();

        let mut state = self.lock();
        if self.discard_stale && self.generation.load(Ordering::SeqCst) != ticket {
            tracing::info!(ticket, "dropping response from a superseded submission");
            return SubmissionStatus::Discarded;
        }
        state.result = result;
        state.distribution = distribution;
        SubmissionStatus::Completed
    }

    pub fn view(&self) -> SessionView {
        let state = self.lock();
        let modes = &state.modes;

        let (result_card, item_cards, chart) = match &state.result {
            AnalysisResult::Single(outcome) => (Some(presenter::result_card(&outcome.result)), Vec::new(), None),
            AnalysisResult::Bulk(items) => (
                None,
                items.iter().map(presenter::result_card).collect(),
                Some(presenter::chart_data(&state.distribution)),
            ),
            AnalysisResult::Empty => (None, Vec::new(), None),
        };

        SessionView {
            mode: modes.mode(),
            review_text: modes.review_text().to_string(),
            selected_file: modes.selected_file().map(|f| f.name.clone()),
            busy: modes.is_busy(),
            can_submit_single: modes.can_submit_single(),
            can_submit_bulk: modes.can_submit_bulk(),
            result: state.result.clone(),
            distribution: state.distribution.clone(),
            result_card,
            item_cards,
            chart,
        }
    }
}
