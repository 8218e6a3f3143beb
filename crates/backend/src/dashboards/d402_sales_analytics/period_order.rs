use super::aggregator::{Bucket, Buckets};
use super::error::AnalyticsError;

/// How chronological order is recovered for aggregated buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodOrdering {
    /// Sort by the canonical period key
    Canonical,
    /// Sort by `(year, first integer)` parsed back out of the label.
    /// Week buckets of different months in the same year are not ordered
    /// chronologically in this mode.
    Label,
}

impl PeriodOrdering {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodOrdering::Canonical => "canonical",
            PeriodOrdering::Label => "label",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AnalyticsError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "canonical" => Ok(PeriodOrdering::Canonical),
            "label" => Ok(PeriodOrdering::Label),
            _ => Err(AnalyticsError::UnknownOrdering(value.to_string())),
        }
    }
}

/// Chronologically ascending buckets; equal keys keep first-seen order
pub fn order(buckets: Buckets, ordering: PeriodOrdering) -> Vec<Bucket> {
    let mut sorted = buckets.into_vec();
    match ordering {
        PeriodOrdering::Canonical => sorted.sort_by_key(|b| b.key),
        PeriodOrdering::Label => sorted.sort_by_key(|b| {
            let label = b.period_label.as_str();
            (year_of(label), index_of(label))
        }),
    }
    sorted
}

/// First run of at least four digits, truncated to four
fn year_of(label: &str) -> u32 {
    digit_runs(label)
        .find(|run| run.len() >= 4)
        .and_then(|run| run[..4].parse().ok())
        .unwrap_or(0)
}

/// First standalone integer of the label
fn index_of(label: &str) -> u32 {
    digit_runs(label)
        .next()
        .and_then(|run| run.parse().ok())
        .unwrap_or(0)
}

fn digit_runs(label: &str) -> impl Iterator<Item = &str> {
    label
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
}
