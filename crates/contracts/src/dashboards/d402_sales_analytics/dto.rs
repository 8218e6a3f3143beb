use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Limits offered by the dashboard for top-N charts
pub const LIMIT_CHOICES: [usize; 3] = [3, 5, 10];

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Time-bucketing resolution of the revenue trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Week,
        Granularity::Month,
        Granularity::Quarter,
        Granularity::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }

    /// Case-insensitive lookup, `None` for anything unrecognized
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric used to rank entities and compute their shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMetric {
    Quantity,
    Revenue,
}

impl RankingMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMetric::Quantity => "quantity",
            RankingMetric::Revenue => "revenue",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "quantity" => Some(RankingMetric::Quantity),
            "revenue" => Some(RankingMetric::Revenue),
            _ => None,
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// Timestamp exactly as delivered by the API: epoch milliseconds or an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    EpochMillis(i64),
    Text(String),
}

impl fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawTimestamp::EpochMillis(ms) => write!(f, "{}", ms),
            RawTimestamp::Text(s) => f.write_str(s),
        }
    }
}

/// One completed transaction line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleEvent {
    pub timestamp: RawTimestamp,
    pub revenue: f64,
    pub quantity: i64,
    pub profit: f64,
    pub order_quantity: i64,
}

/// Brand, category or product revenue summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub name: String,
    pub revenue: f64,
    pub quantity: i64,
}

impl EntitySummary {
    /// Read-only view over the selected metric
    pub fn project(&self, metric: RankingMetric) -> RankedEntity {
        let value = match metric {
            RankingMetric::Quantity => self.quantity as f64,
            RankingMetric::Revenue => self.revenue,
        };
        RankedEntity {
            name: self.name.clone(),
            metric: value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub name: String,
    pub metric: f64,
}

impl RankedEntity {
    pub fn new(name: impl Into<String>, metric: f64) -> Self {
        Self {
            name: name.into(),
            metric,
        }
    }
}

/// Market share of one entity, `value` is a percentage with one decimal ("42.3")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEntry {
    pub name: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Chart output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
}

/// One data array, aligned by index with `ChartSeries::labels`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

// ---------------------------------------------------------------------------
// API request / response
// ---------------------------------------------------------------------------

/// POST /api/d402/sales_analytics
///
/// Every option is optional; missing values fall back to the server defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesAnalyticsRequest {
    /// Identity of the dataset, enables server-side memoization when set
    #[serde(default)]
    pub dataset_version: Option<String>,
    #[serde(default)]
    pub granularity: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub worst_performing: Option<bool>,
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub events: Vec<SaleEvent>,
    #[serde(default)]
    pub brands: Vec<EntitySummary>,
    #[serde(default)]
    pub categories: Vec<EntitySummary>,
    #[serde(default)]
    pub products: Vec<EntitySummary>,
}

/// Aggregated metrics of one period, in chronological position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBucket {
    pub period_label: String,
    /// First calendar day of the period
    pub period_start: NaiveDate,
    pub revenue: f64,
    pub quantity: i64,
    pub profit: f64,
    pub order_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTotals {
    pub revenue: f64,
    pub profit: f64,
    pub quantity: i64,
    pub order_quantity: i64,
    pub average_order_value: f64,
    /// Abbreviated strings ("1.5K", "2.5M")
    pub revenue_display: String,
    pub profit_display: String,
    pub average_order_value_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesAnalyticsResponse {
    pub granularity: Granularity,
    pub metric: RankingMetric,
    pub limit: usize,
    pub worst_performing: bool,
    pub periods: Vec<PeriodBucket>,
    pub trend: ChartSeries,
    pub totals: SalesTotals,
    pub brand_share: Vec<ShareEntry>,
    pub category_share: Vec<ShareEntry>,
    /// Doughnut series over the same entities as `brand_share`
    pub brand_chart: ChartSeries,
    pub category_chart: ChartSeries,
    pub top_products: ChartSeries,
}

/// GET /api/d402/defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsDefaults {
    pub granularity: Granularity,
    pub limit: usize,
    pub worst_performing: bool,
    pub metric: RankingMetric,
    pub limit_choices: Vec<usize>,
}
