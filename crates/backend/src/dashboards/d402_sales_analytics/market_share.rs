use contracts::dashboards::d402_sales_analytics::{RankedEntity, ShareEntry};

use crate::shared::format::round_to_tenth;

/// Percentage share of each entity's metric in the total, input order preserved.
///
/// A zero total yields "0.0" for everyone. Rounded values are not
/// renormalized, so they may miss 100 by up to 0.1 per entity.
pub fn shares(entities: &[RankedEntity]) -> Vec<ShareEntry> {
    let total: f64 = entities.iter().map(|e| e.metric).sum();

    entities
        .iter()
        .map(|entity| {
            let percent = if total == 0.0 || !total.is_finite() {
                0.0
            } else {
                round_to_tenth(entity.metric / total * 100.0)
            };
            ShareEntry {
                name: entity.name.clone(),
                value: format!("{:.1}", percent),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, value: &str) -> ShareEntry {
        ShareEntry {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_simple_shares() {
        let entities = vec![RankedEntity::new("a", 30.0), RankedEntity::new("b", 70.0)];
        assert_eq!(shares(&entities), vec![entry("a", "30.0"), entry("b", "70.0")]);
    }

    #[test]
    fn test_zero_total() {
        let entities = vec![RankedEntity::new("a", 0.0), RankedEntity::new("b", 0.0)];
        assert_eq!(shares(&entities), vec![entry("a", "0.0"), entry("b", "0.0")]);
    }

    #[test]
    fn test_empty() {
        assert!(shares(&[]).is_empty());
    }

    #[test]
    fn test_rounding_tolerance() {
        let entities = vec![
            RankedEntity::new("a", 1.0),
            RankedEntity::new("b", 1.0),
            RankedEntity::new("c", 1.0),
        ];
        let result = shares(&entities);
        assert!(result.iter().all(|e| e.value == "33.3"));

        let sum: f64 = result.iter().map(|e| e.value.parse::<f64>().unwrap()).sum();
        assert!((sum - 100.0).abs() <= 0.1 * entities.len() as f64);
    }

    #[test]
    fn test_order_preserved() {
        let entities = vec![
            RankedEntity::new("small", 1.0),
            RankedEntity::new("big", 3.0),
        ];
        let names: Vec<_> = shares(&entities).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["small", "big"]);
    }
}
