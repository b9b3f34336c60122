use super::{tolerance_interval, DenovoParams};

/// Decide whether one child allele is consistent with either of a parent's
/// standardized alleles. Below the detection ceiling the test is interval
/// membership; at or above it the assay cannot distinguish exact sizes, so a
/// saturated child allele matches any parent whose tolerance window also
/// reaches the ceiling.
pub fn matches_parent(parent: (f64, f64), kid_allele: f64, params: &DenovoParams) -> bool {
    let range1 = tolerance_interval(parent.0, params);
    let range2 = tolerance_interval(parent.1, params);

    if kid_allele < params.cutoff {
        range1.contains(kid_allele) || range2.contains(kid_allele)
    } else {
        range1.high >= params.cutoff || range2.high >= params.cutoff
    }
}
