use crate::models::sentiment_types::{ClassifiedItem, DistributionEntry};

/// Groups classified items by their raw label, in the order each label first
/// appears. Percentages are rounded per group to one decimal and are not
/// reconciled to sum to exactly 100.
pub fn aggregate(items: &[ClassifiedItem]) -> Vec<DistributionEntry> {
    let total = items.len();
    if total == 0 {
        return Vec::new();
    }

    // (label, count) in first-occurrence order. The number of distinct labels
    // is tiny, so a linear scan beats hashing.
    let mut groups: Vec<(&ClassifiedItem, usize)> = Vec::new();
    for item in items {
        match groups
            .iter_mut()
            .find(|(first, _)| first.sentiment.as_str() == item.sentiment.as_str())
        {
            Some((_, count)) => *count += 1,
            None => groups.push((item, 1)),
        }
    }

    groups
        .into_iter()
        .map(|(first, count)| DistributionEntry {
            label: first.sentiment.clone(),
            count,
            percentage_of_total: percentage(count, total),
        })
        .collect()
}

fn percentage(count: usize, total: usize) -> f64 {
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sentiment_types::SentimentLabel;

    fn items(labels: &[&str]) -> Vec<ClassifiedItem> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| ClassifiedItem {
                review: format!("review {}", i),
                sentiment: SentimentLabel::from(*label),
                polarity: 0.5,
            })
            .collect()
    }

    fn summary(entries: &[DistributionEntry]) -> Vec<(String, usize, f64)> {
        entries
            .iter()
            .map(|e| (e.label.to_string(), e.count, e.percentage_of_total))
            .collect()
    }

    #[test]
    fn empty_input_produces_no_entries() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn groups_follow_first_occurrence_order() {
        let entries = aggregate(&items(&["Neutral", "Positive", "Positive", "Negative"]));
        let order: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(order, vec!["Neutral", "Positive", "Negative"]);
    }

    #[test]
    fn counts_sum_to_total_and_groups_match_distinct_labels() {
        let input = items(&[
            "Positive", "Negative", "Positive", "Mixed", "Neutral", "Mixed", "Positive",
        ]);
        let entries = aggregate(&input);
        assert_eq!(entries.iter().map(|e| e.count).sum::<usize>(), input.len());
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e.count >= 1));
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        let entries = aggregate(&items(&["Positive", "Positive", "Negative"]));
        assert_eq!(
            summary(&entries),
            vec![
                ("Positive".to_string(), 2, 66.7),
                ("Negative".to_string(), 1, 33.3),
            ]
        );
    }

    #[test]
    fn rounding_drift_is_not_reconciled() {
        let entries = aggregate(&items(&["A", "B", "C"]));
        let sum: f64 = entries.iter().map(|e| e.percentage_of_total).sum();
        assert!(entries.iter().all(|e| e.percentage_of_total == 33.3));
        assert!((sum - 99.9).abs() < 1e-9);
    }

    #[test]
    fn ten_item_batch() {
        let mut labels = vec!["Positive"; 6];
        labels.extend(["Negative"; 3]);
        labels.push("Neutral");
        let entries = aggregate(&items(&labels));
        assert_eq!(
            summary(&entries),
            vec![
                ("Positive".to_string(), 6, 60.0),
                ("Negative".to_string(), 3, 30.0),
                ("Neutral".to_string(), 1, 10.0),
            ]
        );
    }

    #[test]
    fn labels_are_case_and_whitespace_sensitive() {
        let entries = aggregate(&items(&["Positive", "positive", "Positive ", "Positive"]));
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].count, 2);
        assert_eq!(entries[1].label, SentimentLabel::Other("positive".to_string()));
        assert_eq!(entries[2].label, SentimentLabel::Other("Positive ".to_string()));
    }
}
