use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Verdict assigned by the classifier. Labels outside the known three are kept
/// verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl SentimentLabel {
    pub fn as_str(&self) -> &str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Other(raw) => raw,
        }
    }
}

impl From<String> for SentimentLabel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Positive" => SentimentLabel::Positive,
            "Negative" => SentimentLabel::Negative,
            "Neutral" => SentimentLabel::Neutral,
            _ => SentimentLabel::Other(raw),
        }
    }
}

impl From<&str> for SentimentLabel {
    fn from(raw: &str) -> Self {
        SentimentLabel::from(raw.to_string())
    }
}

impl From<SentimentLabel> for String {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub review: String,
    pub sentiment: SentimentLabel,
    /// Signed intensity in [-1, 1]; its magnitude is the displayed confidence.
    #[serde(deserialize_with = "deserialize_polarity")]
    pub polarity: f64,
}

impl ClassifiedItem {
    pub fn confidence(&self) -> f64 {
        self.polarity.abs()
    }
}

/// Body of a single classify call. The review text is not echoed back.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyResponse {
    pub sentiment: SentimentLabel,
    #[serde(deserialize_with = "deserialize_polarity")]
    pub polarity: f64,
}

impl ClassifyResponse {
    pub fn into_item(self, review: impl Into<String>) -> ClassifiedItem {
        ClassifiedItem {
            review: review.into(),
            sentiment: self.sentiment,
            polarity: self.polarity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainRequest<'a> {
    pub review: &'a str,
    pub sentiment: &'a SentimentLabel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainResponse {
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleAnalysisOutcome {
    pub result: ClassifiedItem,
    pub explanation: Option<String>,
}

pub type BulkAnalysisOutcome = Vec<ClassifiedItem>;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum AnalysisResult {
    #[default]
    Empty,
    Single(SingleAnalysisOutcome),
    Bulk(BulkAnalysisOutcome),
}

impl AnalysisResult {
    pub fn as_bulk(&self) -> Option<&[ClassifiedItem]> {
        match self {
            AnalysisResult::Bulk(items) => Some(items),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    pub label: SentimentLabel,
    pub count: usize,
    pub percentage_of_total: f64,
}

// The upstream service has been seen sending polarity both as a number and as
// a numeric string.
fn deserialize_polarity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Polarity {
        Number(f64),
        Text(String),
    }

    match Polarity::deserialize(deserializer)? {
        Polarity::Number(value) => Ok(value),
        Polarity::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("polarity is not numeric: {:?}", text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_labels_are_kept_verbatim() {
        let label: SentimentLabel = serde_json::from_str("\"positive\"").unwrap();
        assert_eq!(label, SentimentLabel::Other("positive".to_string()));
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"positive\"");
    }

    #[test]
    fn polarity_accepts_numeric_strings() {
        let item: ClassifiedItem =
            serde_json::from_str(r#"{"review":"meh","sentiment":"Negative","polarity":"-0.25"}"#).unwrap();
        assert_eq!(item.sentiment, SentimentLabel::Negative);
        assert_eq!(item.polarity, -0.25);
        assert_eq!(item.confidence(), 0.25);

        let err = serde_json::from_str::<ClassifiedItem>(
            r#"{"review":"meh","sentiment":"Negative","polarity":"very"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn analysis_result_is_tagged() {
        let bulk = AnalysisResult::Bulk(vec![]);
        let json = serde_json::to_value(&bulk).unwrap();
        assert_eq!(json["kind"], "bulk");
        assert!(bulk.as_bulk().is_some());
        assert_eq!(serde_json::to_value(AnalysisResult::Empty).unwrap()["kind"], "empty");
    }

    #[test]
    fn missing_explanation_is_absent() {
        let body: ExplainResponse = serde_json::from_str("{}").unwrap();
        assert!(body.explanation.is_none());
        let body: ExplainResponse = serde_json::from_str(r#"{"explanation":null}"#).unwrap();
        assert!(body.explanation.is_none());
    }
}
