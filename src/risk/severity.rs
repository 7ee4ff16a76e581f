//! Global severity resolution.

use super::horizon::Horizons;
use super::level::RiskLevel;

/// Worst level among `levels`; `Optimal` when empty.
pub fn worst_of<I>(levels: I) -> RiskLevel
where
    I: IntoIterator<Item = RiskLevel>,
{
    levels.into_iter().fold(RiskLevel::Optimal, RiskLevel::max)
}

/// Worst level across every variable and every horizon.
///
/// One critical reading anywhere makes the whole assessment critical.
pub fn resolve_global_risk(horizons: &Horizons) -> RiskLevel {
    worst_of(horizons.levels())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::aggregate_horizons;

    #[test]
    fn test_worst_of_empty_is_optimal() {
        assert_eq!(worst_of(std::iter::empty()), RiskLevel::Optimal);
    }

    #[test]
    fn test_worst_of_is_order_independent() {
        let levels = [
            RiskLevel::Warning,
            RiskLevel::Optimal,
            RiskLevel::Danger,
            RiskLevel::Warning,
        ];
        let mut reversed = levels;
        reversed.reverse();
        assert_eq!(worst_of(levels), RiskLevel::Danger);
        assert_eq!(worst_of(reversed), RiskLevel::Danger);
    }

    #[test]
    fn test_single_critical_dominates() {
        for index in 0..12 {
            let mut values = [30.5, 55.0, 0.002, 0.005].repeat(3);
            values[index] = match index % 4 {
                0 => 40.0,
                1 => 95.0,
                _ => 3.0,
            };
            let horizons = aggregate_horizons(&values, 21);
            assert!(horizons.is_ok());
            if let Ok(horizons) = horizons {
                assert_eq!(
                    resolve_global_risk(&horizons),
                    RiskLevel::Critical,
                    "index {index}"
                );
            }
        }
    }

    #[test]
    fn test_global_is_never_absent_from_parts() {
        let values = [31.5, 55.0, 0.012, 0.005].repeat(3);
        let horizons = aggregate_horizons(&values, 21);
        assert!(horizons.is_ok());
        if let Ok(horizons) = horizons {
            let global = resolve_global_risk(&horizons);
            assert_eq!(global, RiskLevel::Warning);
            assert!(horizons.levels().any(|level| level == global));
            assert!(horizons.levels().all(|level| level <= global));
        }
    }
}
