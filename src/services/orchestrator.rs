use crate::error::ServiceError;
use crate::models::sentiment_types::{BulkAnalysisOutcome, SingleAnalysisOutcome};
use crate::models::session_types::SelectedFile;
use crate::services::busy::{BusyFlag, BusyGuard};
use crate::services::sentiment_api::SentimentService;
use std::sync::Arc;

/// Runs the service calls behind each submit action and holds the busy flag
/// for as long as a call chain is in flight.
#[derive(Clone)]
pub struct RequestOrchestrator {
    service: Arc<dyn SentimentService>,
    busy: BusyFlag,
}

impl RequestOrchestrator {
    pub fn new(service: Arc<dyn SentimentService>, busy: BusyFlag) -> Self {
        Self { service, busy }
    }

    pub fn busy(&self) -> &BusyFlag {
        &self.busy
    }

    /// Marks the orchestrator busy. Fails if another call chain holds it.
    pub fn acquire(&self) -> Result<BusyGuard, ServiceError> {
        self.busy.try_acquire().ok_or(ServiceError::InFlight)
    }

    /// Classify, then ask for an explanation of the verdict that came back.
    ///
    /// A classify failure fails the whole operation and no explanation is
    /// requested. An explain failure only leaves `explanation` empty.
    pub async fn submit_single(&self, review: &str) -> Result<SingleAnalysisOutcome, ServiceError> {
        let busy = self.acquire()?;
        self.run_single(busy, review).await
    }

    /// Same as [`submit_single`](Self::submit_single) with the busy flag
    /// already taken. The guard is released when the chain finishes.
    pub async fn run_single(
        &self,
        _busy: BusyGuard,
        review: &str,
    ) -> Result<SingleAnalysisOutcome, ServiceError> {
        tracing::info!(chars = review.chars().count(), "submitting single review");

        let classified = match self.service.classify(review).await {
            Ok(response) => response.into_item(review),
            Err(e) => {
                tracing::error!(error = %e, "sentiment classification failed");
                return Err(e);
            }
        };
        tracing::debug!(
            sentiment = %classified.sentiment,
            polarity = classified.polarity,
            "review classified"
        );

        let explanation = match self.service.explain(review, &classified.sentiment).await {
            Ok(Some(text)) => Some(text),
            Ok(None) => {
                tracing::debug!("explanation service returned no explanation");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "explanation unavailable, keeping classification");
                None
            }
        };

        Ok(SingleAnalysisOutcome {
            result: classified,
            explanation,
        })
    }

    /// Upload the whole file in one call. Items come back in server order.
    pub async fn submit_bulk(&self, file: &SelectedFile) -> Result<BulkAnalysisOutcome, ServiceError> {
        let busy = self.acquire()?;
        self.run_bulk(busy, file).await
    }

    pub async fn run_bulk(
        &self,
        _busy: BusyGuard,
        file: &SelectedFile,
    ) -> Result<BulkAnalysisOutcome, ServiceError> {
        tracing::info!(file = %file.name, bytes = file.bytes.len(), "submitting bulk file");

        match self.service.classify_bulk(file).await {
            Ok(items) => {
                tracing::debug!(items = items.len(), "bulk file classified");
                Ok(items)
            }
            Err(e) => {
                tracing::error!(error = %e, file = %file.name, "bulk sentiment classification failed");
                Err(e)
            }
        }
    }
}
