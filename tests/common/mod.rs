#![allow(dead_code)]

use async_trait::async_trait;
use sentiment_lens_lib::models::sentiment_types::ClassifyResponse;
use sentiment_lens_lib::services::busy::BusyFlag;
use sentiment_lens_lib::services::sentiment_api::SentimentService;
use sentiment_lens_lib::{ClassifiedItem, SelectedFile, SentimentLabel, ServiceError};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Clone, Debug)]
pub enum ExplainReply {
    Text(&'static str),
    Missing,
    Fail,
}

/// In-memory stand-in for the sentiment service. Every call is recorded, and
/// classify calls can be held open until the test releases them.
pub struct ScriptedService {
    classify: Option<(SentimentLabel, f64)>,
    explain: ExplainReply,
    bulk: Option<Vec<ClassifiedItem>>,
    pub calls: Mutex<Vec<String>>,
    pub busy_during_calls: Mutex<Vec<bool>>,
    observed: Option<BusyFlag>,
    gate: Option<Gate>,
}

#[derive(Clone, Default)]
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self {
            classify: Some((SentimentLabel::Positive, 0.87)),
            explain: ExplainReply::Text("Enthusiastic wording."),
            bulk: Some(Vec::new()),
            calls: Mutex::new(Vec::new()),
            busy_during_calls: Mutex::new(Vec::new()),
            observed: None,
            gate: None,
        }
    }

    pub fn classify_with(mut self, label: &str, polarity: f64) -> Self {
        self.classify = Some((SentimentLabel::from(label), polarity));
        self
    }

    pub fn classify_fails(mut self) -> Self {
        self.classify = None;
        self
    }

    pub fn explain_with(mut self, reply: ExplainReply) -> Self {
        self.explain = reply;
        self
    }

    pub fn bulk_with(mut self, items: Vec<ClassifiedItem>) -> Self {
        self.bulk = Some(items);
        self
    }

    pub fn bulk_fails(mut self) -> Self {
        self.bulk = None;
        self
    }

    pub fn observing(mut self, busy: BusyFlag) -> Self {
        self.observed = Some(busy);
        self
    }

    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn busy_observations(&self) -> Vec<bool> {
        self.busy_during_calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
        if let Some(busy) = &self.observed {
            self.busy_during_calls.lock().unwrap().push(busy.is_busy());
        }
    }

    async fn wait_for_release(&self) {
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
    }
}

fn failure() -> ServiceError {
    ServiceError::Status {
        status: 503,
        body: "model offline".to_string(),
    }
}

#[async_trait]
impl SentimentService for ScriptedService {
    async fn classify(&self, review: &str) -> Result<ClassifyResponse, ServiceError> {
        self.record(format!("classify:{}", review));
        self.wait_for_release().await;
        match &self.classify {
            Some((label, polarity)) => Ok(serde_json::from_value(serde_json::json!({
                "sentiment": label,
                "polarity": polarity,
            }))?),
            None => Err(failure()),
        }
    }

    async fn explain(
        &self,
        review: &str,
        sentiment: &SentimentLabel,
    ) -> Result<Option<String>, ServiceError> {
        self.record(format!("explain:{}|{}", review, sentiment));
        match &self.explain {
            ExplainReply::Text(text) => Ok(Some(text.to_string())),
            ExplainReply::Missing => Ok(None),
            ExplainReply::Fail => Err(failure()),
        }
    }

    async fn classify_bulk(&self, file: &SelectedFile) -> Result<Vec<ClassifiedItem>, ServiceError> {
        self.record(format!("bulk:{}", file.name));
        self.wait_for_release().await;
        self.bulk.clone().ok_or_else(failure)
    }
}

pub fn item(review: &str, label: &str, polarity: f64) -> ClassifiedItem {
    ClassifiedItem {
        review: review.to_string(),
        sentiment: SentimentLabel::from(label),
        polarity,
    }
}

pub fn csv_file() -> SelectedFile {
    SelectedFile::new("reviews.csv", b"review\nGreat\nAwful\n".to_vec())
}
