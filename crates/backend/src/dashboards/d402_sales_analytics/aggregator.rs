use chrono::{Datelike, FixedOffset, NaiveDate};
use contracts::dashboards::d402_sales_analytics::{Granularity, PeriodBucket, SaleEvent};
use std::collections::HashMap;

use super::error::AnalyticsError;
use super::timestamp;

/// Canonical, purely numeric identity of a period.
///
/// Only keys of the same granularity are ever compared with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    Week { year: i32, month: u32, week: u32 },
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Year { year: i32 },
}

impl PeriodKey {
    pub fn for_date(date: NaiveDate, granularity: Granularity) -> Self {
        let year = date.year();
        let month = date.month();
        match granularity {
            Granularity::Week => PeriodKey::Week {
                year,
                month,
                week: week_of_month(date),
            },
            Granularity::Month => PeriodKey::Month { year, month },
            Granularity::Quarter => PeriodKey::Quarter {
                year,
                quarter: date.month0() / 3 + 1,
            },
            Granularity::Year => PeriodKey::Year { year },
        }
    }

    /// Display label, kept byte-compatible with stored reports
    pub fn label(&self) -> String {
        match *self {
            PeriodKey::Week { year, month, week } => {
                format!("Week {} - Month {}/{}", week, month, year)
            }
            PeriodKey::Month { year, month } => format!("Month {}/{}", month, year),
            PeriodKey::Quarter { year, quarter } => format!("Quarter {}/{}", quarter, year),
            PeriodKey::Year { year } => format!("Year {}", year),
        }
    }

    /// First calendar day covered by the period
    pub fn start_date(&self) -> Option<NaiveDate> {
        match *self {
            PeriodKey::Week { year, month, week } => {
                let jan1 = jan1_weekday(year)?;
                let first_day = ((week as i64 - 1) * 7 - jan1 as i64 + 1).max(1) as u32;
                NaiveDate::from_ymd_opt(year, month, first_day)
            }
            PeriodKey::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1),
            PeriodKey::Quarter { year, quarter } => {
                NaiveDate::from_ymd_opt(year, (quarter - 1) * 3 + 1, 1)
            }
            PeriodKey::Year { year } => NaiveDate::from_ymd_opt(year, 1, 1),
        }
    }
}

/// `ceil((day_of_month + weekday_of_jan_1) / 7)`, weekdays counted from Sunday = 0
fn week_of_month(date: NaiveDate) -> u32 {
    let offset = jan1_weekday(date.year()).unwrap_or(0);
    (date.day() + offset).div_ceil(7)
}

fn jan1_weekday(year: i32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(|d| d.weekday().num_days_from_sunday())
}

/// Accumulator for one period's summed metrics
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub key: PeriodKey,
    pub period_label: String,
    pub period_start: NaiveDate,
    pub revenue: f64,
    pub quantity: i64,
    pub profit: f64,
    pub order_quantity: i64,
}

impl Bucket {
    fn empty(key: PeriodKey, fallback_start: NaiveDate) -> Self {
        Self {
            key,
            period_label: key.label(),
            period_start: key.start_date().unwrap_or(fallback_start),
            revenue: 0.0,
            quantity: 0,
            profit: 0.0,
            order_quantity: 0,
        }
    }

    /// Adds the event's metrics; on integer overflow returns the metric name and leaves the bucket unchanged
    fn add(&mut self, event: &SaleEvent) -> Result<(), &'static str> {
        let quantity = self.quantity.checked_add(event.quantity).ok_or("quantity")?;
        let order_quantity = self
            .order_quantity
            .checked_add(event.order_quantity)
            .ok_or("order_quantity")?;

        self.revenue += event.revenue;
        self.quantity = quantity;
        self.profit += event.profit;
        self.order_quantity = order_quantity;
        Ok(())
    }

    pub fn to_dto(&self) -> PeriodBucket {
        PeriodBucket {
            period_label: self.period_label.clone(),
            period_start: self.period_start,
            revenue: self.revenue,
            quantity: self.quantity,
            profit: self.profit,
            order_quantity: self.order_quantity,
        }
    }
}

/// Buckets keyed by period label, iterated in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets {
    entries: Vec<Bucket>,
    index: HashMap<String, usize>,
}

impl Buckets {
    pub fn get(&self, label: &str) -> Option<&Bucket> {
        self.index.get(label).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Bucket> {
        self.entries
    }

    fn entry(&mut self, key: PeriodKey, fallback_start: NaiveDate) -> &mut Bucket {
        let next = self.entries.len();
        let i = *self.index.entry(key.label()).or_insert(next);
        if i == next {
            self.entries.push(Bucket::empty(key, fallback_start));
        }
        &mut self.entries[i]
    }
}

/// Group sale events into labeled periods and sum their metrics.
///
/// One unparsable timestamp or overflowing integer metric rejects the whole call.
pub fn aggregate(
    events: &[SaleEvent],
    granularity: Granularity,
    offset: FixedOffset,
) -> Result<Buckets, AnalyticsError> {
    let mut buckets = Buckets::default();

    for (index, event) in events.iter().enumerate() {
        let local = timestamp::to_local(&event.timestamp, offset).map_err(|reason| {
            AnalyticsError::InvalidTimestamp {
                index,
                value: event.timestamp.to_string(),
                reason,
            }
        })?;
        let date = local.date();
        buckets
            .entry(PeriodKey::for_date(date, granularity), date)
            .add(event)
            .map_err(|metric| AnalyticsError::MetricOverflow { index, metric })?;
    }

    tracing::debug!(
        "Aggregated {} events into {} {} buckets",
        events.len(),
        buckets.len(),
        granularity
    );

    Ok(buckets)
}
