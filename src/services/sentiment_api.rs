use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::models::sentiment_types::{
    ClassifiedItem, ClassifyResponse, ExplainRequest, ExplainResponse, SentimentLabel,
};
use crate::models::session_types::SelectedFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

pub const CLASSIFY_PATH: &str = "/api/sentiment";
pub const EXPLAIN_PATH: &str = "/api/explain";
pub const BULK_CLASSIFY_PATH: &str = "/api/bulk_sentiment";

/// The external classification and explanation service.
#[async_trait]
pub trait SentimentService: Send + Sync {
    async fn classify(&self, review: &str) -> Result<ClassifyResponse, ServiceError>;

    /// `Ok(None)` when the service answered without an explanation.
    async fn explain(
        &self,
        review: &str,
        sentiment: &SentimentLabel,
    ) -> Result<Option<String>, ServiceError>;

    async fn classify_bulk(&self, file: &SelectedFile) -> Result<Vec<ClassifiedItem>, ServiceError>;
}

#[derive(Clone)]
pub struct HttpSentimentService {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpSentimentService {
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ServiceError::Transport)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl SentimentService for HttpSentimentService {
    async fn classify(&self, review: &str) -> Result<ClassifyResponse, ServiceError> {
        let form = Form::new().text("review", review.to_string());
        let response = self
            .client
            .post(self.config.endpoint(CLASSIFY_PATH))
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }

    async fn explain(
        &self,
        review: &str,
        sentiment: &SentimentLabel,
    ) -> Result<Option<String>, ServiceError> {
        let response = self
            .client
            .post(self.config.endpoint(EXPLAIN_PATH))
            .json(&ExplainRequest { review, sentiment })
            .send()
            .await?;
        let body: ExplainResponse = read_json(response).await?;
        Ok(body.explanation)
    }

    async fn classify_bulk(&self, file: &SelectedFile) -> Result<Vec<ClassifiedItem>, ServiceError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str("text/csv")?;
        let form = Form::new().part("file", part);
        let response = self
            .client
            .post(self.config.endpoint(BULK_CLASSIFY_PATH))
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
