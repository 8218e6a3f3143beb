use chrono::{FixedOffset, Offset, Utc};
use contracts::dashboards::d402_sales_analytics::{Granularity, RankingMetric};

use super::error::AnalyticsError;
use super::period_order::PeriodOrdering;
use super::timestamp::reporting_offset;
use crate::shared::config::AnalyticsConfig;

/// Validated analytics configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSettings {
    pub granularity: Granularity,
    pub limit: usize,
    pub worst_performing: bool,
    pub metric: RankingMetric,
    pub ordering: PeriodOrdering,
    pub offset: FixedOffset,
    pub cache_capacity: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            granularity: Granularity::Month,
            limit: 5,
            worst_performing: false,
            metric: RankingMetric::Revenue,
            ordering: PeriodOrdering::Canonical,
            offset: Utc.fix(),
            cache_capacity: 64,
        }
    }
}

impl AnalyticsSettings {
    /// Validates raw config values with the same parsers used for requests
    pub fn from_config(config: &AnalyticsConfig) -> Result<Self, AnalyticsError> {
        let granularity = Granularity::parse(&config.default_granularity)
            .ok_or_else(|| AnalyticsError::UnknownGranularity(config.default_granularity.clone()))?;
        let metric = RankingMetric::parse(&config.default_metric)
            .ok_or_else(|| AnalyticsError::UnknownMetric(config.default_metric.clone()))?;
        if config.default_limit == 0 {
            return Err(AnalyticsError::InvalidLimit(0));
        }
        let offset = reporting_offset(config.utc_offset_hours)
            .ok_or(AnalyticsError::InvalidUtcOffset(config.utc_offset_hours))?;

        Ok(Self {
            granularity,
            limit: config.default_limit,
            worst_performing: config.worst_performing,
            metric,
            ordering: PeriodOrdering::parse(&config.period_ordering)?,
            offset,
            cache_capacity: config.cache_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_resolves_to_defaults() {
        let settings = AnalyticsSettings::from_config(&AnalyticsConfig::default()).unwrap();
        assert_eq!(settings, AnalyticsSettings::default());
    }

    #[test]
    fn test_invalid_config_values() {
        let config = AnalyticsConfig {
            default_granularity: "decade".to_string(),
            ..AnalyticsConfig::default()
        };
        assert_eq!(
            AnalyticsSettings::from_config(&config),
            Err(AnalyticsError::UnknownGranularity("decade".to_string()))
        );

        let config = AnalyticsConfig {
            default_limit: 0,
            ..AnalyticsConfig::default()
        };
        assert_eq!(
            AnalyticsSettings::from_config(&config),
            Err(AnalyticsError::InvalidLimit(0))
        );

        let config = AnalyticsConfig {
            utc_offset_hours: 30,
            ..AnalyticsConfig::default()
        };
        assert_eq!(
            AnalyticsSettings::from_config(&config),
            Err(AnalyticsError::InvalidUtcOffset(30))
        );
    }
}
