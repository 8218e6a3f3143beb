use contracts::dashboards::d402_sales_analytics::ChartKind;
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;

use crate::dashboards::d402_sales_analytics::error::AnalyticsError;

/// Building blocks the chart consumer has to register before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChartComponent {
    CategoryScale,
    LinearScale,
    BarElement,
    LineElement,
    PointElement,
    ArcElement,
    Title,
    Tooltip,
    Legend,
}

const ALL_COMPONENTS: [ChartComponent; 9] = [
    ChartComponent::CategoryScale,
    ChartComponent::LinearScale,
    ChartComponent::BarElement,
    ChartComponent::LineElement,
    ChartComponent::PointElement,
    ChartComponent::ArcElement,
    ChartComponent::Title,
    ChartComponent::Tooltip,
    ChartComponent::Legend,
];

fn required_components(kind: ChartKind) -> &'static [ChartComponent] {
    match kind {
        ChartKind::Bar => &[
            ChartComponent::CategoryScale,
            ChartComponent::LinearScale,
            ChartComponent::BarElement,
        ],
        ChartKind::Line => &[
            ChartComponent::CategoryScale,
            ChartComponent::LinearScale,
            ChartComponent::LineElement,
            ChartComponent::PointElement,
        ],
        ChartKind::Doughnut => &[ChartComponent::ArcElement],
    }
}

/// Set of registered chart components
#[derive(Debug, Clone, Default)]
pub struct ChartRuntime {
    components: BTreeSet<ChartComponent>,
}

impl ChartRuntime {
    pub fn with_all_components() -> Self {
        Self {
            components: ALL_COMPONENTS.into_iter().collect(),
        }
    }

    pub fn is_registered(&self, component: ChartComponent) -> bool {
        self.components.contains(&component)
    }

    /// Fails unless every component needed for `kind` has been registered
    pub fn ensure_supports(&self, kind: ChartKind) -> Result<(), AnalyticsError> {
        if required_components(kind)
            .iter()
            .all(|c| self.is_registered(*c))
        {
            Ok(())
        } else {
            Err(AnalyticsError::ChartRuntimeNotInitialized)
        }
    }
}

static CHART_RUNTIME: OnceCell<ChartRuntime> = OnceCell::new();

/// Register all chart components once per process.
///
/// Must be called by `main` before any analytics are served; later calls are no-ops.
pub fn initialize_chart_runtime() -> &'static ChartRuntime {
    if let Some(runtime) = CHART_RUNTIME.get() {
        tracing::warn!("Chart runtime already initialized, skipping");
        return runtime;
    }
    CHART_RUNTIME.get_or_init(|| {
        let runtime = ChartRuntime::with_all_components();
        tracing::info!(
            "Chart runtime initialized with {} components",
            runtime.components.len()
        );
        runtime
    })
}

pub fn chart_runtime() -> Result<&'static ChartRuntime, AnalyticsError> {
    CHART_RUNTIME
        .get()
        .ok_or(AnalyticsError::ChartRuntimeNotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_runtime_supports_nothing() {
        let runtime = ChartRuntime::default();
        for kind in [ChartKind::Bar, ChartKind::Line, ChartKind::Doughnut] {
            assert_eq!(
                runtime.ensure_supports(kind),
                Err(AnalyticsError::ChartRuntimeNotInitialized)
            );
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let first = initialize_chart_runtime() as *const ChartRuntime;
        let second = initialize_chart_runtime() as *const ChartRuntime;
        assert_eq!(first, second);
        assert!(chart_runtime().is_ok());
        assert!(chart_runtime().unwrap().ensure_supports(ChartKind::Line).is_ok());
    }
}
