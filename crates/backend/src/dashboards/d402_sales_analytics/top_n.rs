use contracts::dashboards::d402_sales_analytics::RankedEntity;

/// Best performing first, or worst performing first when `ascending` is set.
///
/// The sort is stable: equal metrics keep their input order. Lists shorter
/// than `n` are returned whole.
pub fn top_n(entities: &[RankedEntity], n: usize, ascending: bool) -> Vec<RankedEntity> {
    let mut ranked = entities.to_vec();
    if ascending {
        ranked.sort_by(|a, b| a.metric.total_cmp(&b.metric));
    } else {
        ranked.sort_by(|a, b| b.metric.total_cmp(&a.metric));
    }
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<RankedEntity> {
        vec![
            RankedEntity::new("a", 100.0),
            RankedEntity::new("b", 100.0),
            RankedEntity::new("c", 50.0),
            RankedEntity::new("d", 200.0),
            RankedEntity::new("e", 10.0),
        ]
    }

    fn names(entities: &[RankedEntity]) -> Vec<&str> {
        entities.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_best_performing_is_stable() {
        let result = top_n(&products(), 3, false);
        assert_eq!(names(&result), vec!["d", "a", "b"]);
    }

    #[test]
    fn test_worst_performing() {
        let result = top_n(&products(), 3, true);
        assert_eq!(names(&result), vec!["e", "c", "a"]);
    }

    #[test]
    fn test_limit_larger_than_list() {
        let result = top_n(&products(), 10, false);
        assert_eq!(names(&result), vec!["d", "a", "b", "c", "e"]);
    }

    #[test]
    fn test_input_untouched() {
        let input = products();
        let _ = top_n(&input, 2, false);
        assert_eq!(input, products());
    }
}
