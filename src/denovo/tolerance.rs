use super::DenovoParams;

/// Inclusive band of sizes treated as consistent with one parental allele.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceInterval {
    pub low: f64,
    pub high: f64,
}

impl ToleranceInterval {
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Build the tolerance interval around one allele. The proportional band
/// collapses for small alleles, so the absolute floor takes over whenever it
/// is wider. Lower bounds may go negative and are left as-is.
pub fn tolerance_interval(allele: f64, params: &DenovoParams) -> ToleranceInterval {
    if allele * params.wiggle < params.min_wiggle {
        ToleranceInterval {
            low: allele - params.min_wiggle,
            high: allele + params.min_wiggle,
        }
    } else {
        ToleranceInterval {
            low: allele * (1.0 - params.wiggle),
            high: allele * (1.0 + params.wiggle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(wiggle: f64, min_wiggle: f64) -> DenovoParams {
        DenovoParams::new(350.0, wiggle, min_wiggle, 150.0, false, false).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_proportional_interval() {
        let interval = tolerance_interval(100.0, &params(0.1, 1.0));
        assert_close(interval.low, 90.0);
        assert_close(interval.high, 110.0);
    }

    #[test]
    fn test_floor_takes_over_for_small_alleles() {
        let interval = tolerance_interval(0.0, &params(0.1, 1.0));
        assert_eq!(interval, ToleranceInterval { low: -1.0, high: 1.0 });

        let interval = tolerance_interval(10.0, &params(0.1, 5.0));
        assert_eq!(interval, ToleranceInterval { low: 5.0, high: 15.0 });
    }

    #[test]
    fn test_boundary_half_width_equals_floor() {
        // allele * wiggle == min_wiggle lands in the proportional branch,
        // where the half-width equals the floor anyway
        let interval = tolerance_interval(100.0, &params(0.1, 10.0));
        assert_close(interval.low, 90.0);
        assert_close(interval.high, 110.0);
    }

    #[test]
    fn test_negative_lower_bound_is_not_clamped() {
        let interval = tolerance_interval(2.0, &params(0.1, 10.0));
        assert_eq!(interval, ToleranceInterval { low: -8.0, high: 12.0 });
    }

    #[test]
    fn test_interval_is_symmetric_about_the_allele() {
        for allele in [0.0, 5.0, 50.0, 500.0] {
            let interval = tolerance_interval(allele, &params(0.2, 10.0));
            assert_close(allele - interval.low, interval.high - allele);
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let interval = ToleranceInterval { low: 90.0, high: 110.0 };
        assert!(interval.contains(90.0));
        assert!(interval.contains(110.0));
        assert!(interval.contains(100.0));
        assert!(!interval.contains(89.999));
        assert!(!interval.contains(110.001));
    }
}
