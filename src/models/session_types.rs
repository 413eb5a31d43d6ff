use super::sentiment_types::{AnalysisResult, DistributionEntry};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Single,
    Bulk,
}

/// A CSV chosen for bulk analysis, held in memory until it is replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads the whole file into memory, named after its last path component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    pub review: String,
    pub label: String,
    pub tone: Tone,
    pub emoji: &'static str,
    pub confidence: f64,
    pub confidence_display: String,
    pub bar_width_percent: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: usize,
    pub percentage: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    NoData { message: &'static str },
    Pie { slices: Vec<ChartSlice>, total: usize },
}

/// Read-only snapshot handed to the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub mode: AnalysisMode,
    pub review_text: String,
    pub selected_file: Option<String>,
    pub busy: bool,
    pub can_submit_single: bool,
    pub can_submit_bulk: bool,
    pub result: AnalysisResult,
    pub distribution: Vec<DistributionEntry>,
    pub result_card: Option<ResultCard>,
    pub item_cards: Vec<ResultCard>,
    pub chart: Option<ChartData>,
}
