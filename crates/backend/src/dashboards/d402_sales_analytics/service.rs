use contracts::dashboards::d402_sales_analytics::{
    AnalyticsDefaults, ChartDataset, ChartKind, ChartSeries, EntitySummary, Granularity,
    RankedEntity, RankingMetric, SalesAnalyticsRequest, SalesAnalyticsResponse, SalesTotals,
    LIMIT_CHOICES,
};
use once_cell::sync::OnceCell;

use super::aggregator::{aggregate, Bucket};
use super::cache::{AnalyticsCache, CacheKey};
use super::error::AnalyticsError;
use super::market_share::shares;
use super::period_order::order;
use super::settings::AnalyticsSettings;
use super::top_n::top_n;
use crate::shared::format::format_compact_currency;
use crate::system::initialization::{chart_runtime, ChartRuntime};

static SETTINGS: OnceCell<AnalyticsSettings> = OnceCell::new();
static CACHE: OnceCell<AnalyticsCache> = OnceCell::new();

/// Install validated settings and the response cache; first call wins
pub fn configure(settings: AnalyticsSettings) {
    let capacity = settings.cache_capacity;
    if SETTINGS.set(settings).is_err() {
        tracing::warn!("D402: analytics settings already configured, ignoring");
        return;
    }
    let _ = CACHE.set(AnalyticsCache::new(capacity));
    tracing::info!("D402: analytics configured, cache capacity {}", capacity);
}

fn settings() -> AnalyticsSettings {
    SETTINGS.get().cloned().unwrap_or_default()
}

/// Request options after applying configured defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOptions {
    pub granularity: Granularity,
    pub limit: usize,
    pub worst_performing: bool,
    pub metric: RankingMetric,
}

impl ResolvedOptions {
    pub fn resolve(
        request: &SalesAnalyticsRequest,
        settings: &AnalyticsSettings,
    ) -> Result<Self, AnalyticsError> {
        let granularity = match request.granularity.as_deref() {
            Some(raw) => Granularity::parse(raw)
                .ok_or_else(|| AnalyticsError::UnknownGranularity(raw.to_string()))?,
            None => settings.granularity,
        };
        let metric = match request.metric.as_deref() {
            Some(raw) => RankingMetric::parse(raw)
                .ok_or_else(|| AnalyticsError::UnknownMetric(raw.to_string()))?,
            None => settings.metric,
        };
        let limit = request.limit.unwrap_or(settings.limit);
        if limit == 0 {
            return Err(AnalyticsError::InvalidLimit(limit));
        }

        Ok(Self {
            granularity,
            limit,
            worst_performing: request.worst_performing.unwrap_or(settings.worst_performing),
            metric,
        })
    }
}

/// Defaults shown by the dashboard before the user changes anything
pub fn defaults() -> AnalyticsDefaults {
    let settings = settings();
    AnalyticsDefaults {
        granularity: settings.granularity,
        limit: settings.limit,
        worst_performing: settings.worst_performing,
        metric: settings.metric,
        limit_choices: LIMIT_CHOICES.to_vec(),
    }
}

/// Compute the analytics response, memoized when the request names its dataset version
pub fn get_sales_analytics(
    request: &SalesAnalyticsRequest,
) -> Result<SalesAnalyticsResponse, AnalyticsError> {
    let settings = settings();
    let runtime = chart_runtime()?;
    let options = ResolvedOptions::resolve(request, &settings)?;

    match (request.dataset_version.as_ref(), CACHE.get()) {
        (Some(version), Some(cache)) => {
            let key = CacheKey {
                dataset_version: version.clone(),
                granularity: options.granularity,
                limit: options.limit,
                worst_performing: options.worst_performing,
                metric: options.metric,
                ordering: settings.ordering,
                offset_seconds: settings.offset.local_minus_utc(),
            };
            let response = cache.get_or_try_insert_with(key, || {
                build(request, &options, &settings, runtime)
            })?;
            Ok(response.as_ref().clone())
        }
        _ => build(request, &options, &settings, runtime),
    }
}

/// Pure composition: aggregate, order, then derive every chart-ready value
pub fn build(
    request: &SalesAnalyticsRequest,
    options: &ResolvedOptions,
    settings: &AnalyticsSettings,
    runtime: &ChartRuntime,
) -> Result<SalesAnalyticsResponse, AnalyticsError> {
    runtime.ensure_supports(ChartKind::Line)?;
    runtime.ensure_supports(ChartKind::Bar)?;
    runtime.ensure_supports(ChartKind::Doughnut)?;

    let buckets = aggregate(&request.events, options.granularity, settings.offset)?;
    let periods = order(buckets, settings.ordering);

    let brands = project(&request.brands, options.metric);
    let categories = project(&request.categories, options.metric);
    let products = project(&request.products, options.metric);
    let ranked = top_n(&products, options.limit, options.worst_performing);
    let totals = totals(&periods)?;

    Ok(SalesAnalyticsResponse {
        granularity: options.granularity,
        metric: options.metric,
        limit: options.limit,
        worst_performing: options.worst_performing,
        trend: trend_series(&periods),
        totals,
        periods: periods.iter().map(Bucket::to_dto).collect(),
        brand_share: shares(&brands),
        category_share: shares(&categories),
        brand_chart: entity_series(ChartKind::Doughnut, &brands, options.metric),
        category_chart: entity_series(ChartKind::Doughnut, &categories, options.metric),
        top_products: entity_series(ChartKind::Bar, &ranked, options.metric),
    })
}

/// Single-dataset series over named entities, one slice or bar per entity
fn entity_series(kind: ChartKind, entities: &[RankedEntity], metric: RankingMetric) -> ChartSeries {
    ChartSeries {
        kind,
        labels: entities.iter().map(|e| e.name.clone()).collect(),
        datasets: vec![ChartDataset {
            label: metric.as_str().to_string(),
            data: entities.iter().map(|e| e.metric).collect(),
        }],
    }
}

fn project(entities: &[EntitySummary], metric: RankingMetric) -> Vec<RankedEntity> {
    entities.iter().map(|e| e.project(metric)).collect()
}

fn trend_series(periods: &[Bucket]) -> ChartSeries {
    let dataset = |label: &str, value: fn(&Bucket) -> f64| ChartDataset {
        label: label.to_string(),
        data: periods.iter().map(value).collect(),
    };

    ChartSeries {
        kind: ChartKind::Line,
        labels: periods.iter().map(|b| b.period_label.clone()).collect(),
        datasets: vec![
            dataset("revenue", |b| b.revenue),
            dataset("profit", |b| b.profit),
            dataset("quantity", |b| b.quantity as f64),
            dataset("order_quantity", |b| b.order_quantity as f64),
        ],
    }
}

fn checked_total(
    periods: &[Bucket],
    metric: &'static str,
    value: fn(&Bucket) -> i64,
) -> Result<i64, AnalyticsError> {
    periods
        .iter()
        .try_fold(0i64, |acc, b| acc.checked_add(value(b)))
        .ok_or(AnalyticsError::TotalOverflow(metric))
}

fn totals(periods: &[Bucket]) -> Result<SalesTotals, AnalyticsError> {
    let revenue: f64 = periods.iter().map(|b| b.revenue).sum();
    let profit: f64 = periods.iter().map(|b| b.profit).sum();
    let quantity = checked_total(periods, "quantity", |b| b.quantity)?;
    let order_quantity = checked_total(periods, "order_quantity", |b| b.order_quantity)?;
    let average_order_value = if order_quantity > 0 {
        revenue / order_quantity as f64
    } else {
        0.0
    };

    Ok(SalesTotals {
        revenue,
        profit,
        quantity,
        order_quantity,
        average_order_value,
        revenue_display: format_compact_currency(revenue),
        profit_display: format_compact_currency(profit),
        average_order_value_display: format_compact_currency(average_order_value),
    })
}
