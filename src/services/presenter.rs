use crate::models::sentiment_types::{ClassifiedItem, DistributionEntry, SentimentLabel};
use crate::models::session_types::{ChartData, ChartSlice, ResultCard, Tone};

pub const NO_DATA_MESSAGE: &str = "No data available";
const FALLBACK_COLOR: &str = "#9333ea";

pub fn label_color(label: &SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "#10b981",
        SentimentLabel::Negative => "#ef4444",
        SentimentLabel::Neutral => "#6b7280",
        SentimentLabel::Other(_) => FALLBACK_COLOR,
    }
}

// Unrecognized labels render like Neutral.
pub fn tone(label: &SentimentLabel) -> Tone {
    match label {
        SentimentLabel::Positive => Tone::Positive,
        SentimentLabel::Negative => Tone::Negative,
        _ => Tone::Neutral,
    }
}

pub fn emoji(label: &SentimentLabel) -> &'static str {
    match tone(label) {
        Tone::Positive => "😊",
        Tone::Negative => "😞",
        Tone::Neutral => "😐",
    }
}

pub fn chart_data(entries: &[DistributionEntry]) -> ChartData {
    if entries.is_empty() {
        return ChartData::NoData {
            message: NO_DATA_MESSAGE,
        };
    }

    let slices = entries
        .iter()
        .map(|entry| ChartSlice {
            name: entry.label.to_string(),
            value: entry.count,
            percentage: entry.percentage_of_total,
            color: label_color(&entry.label),
        })
        .collect::<Vec<_>>();
    let total = slices.iter().map(|s| s.value).sum();

    ChartData::Pie { slices, total }
}

pub fn result_card(item: &ClassifiedItem) -> ResultCard {
    let confidence = item.confidence();
    ResultCard {
        review: item.review.clone(),
        label: item.sentiment.to_string(),
        tone: tone(&item.sentiment),
        emoji: emoji(&item.sentiment),
        confidence,
        confidence_display: format!("{:.2}", confidence),
        bar_width_percent: confidence * 100.0,
    }
}
