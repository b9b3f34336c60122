/// The two size calls of one family member at one locus. `None` encodes an
/// allele the genotyper could not measure; positions are never reordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllelePair {
    pub allele1: Option<f64>,
    pub allele2: Option<f64>,
}

impl AllelePair {
    pub fn new(allele1: Option<f64>, allele2: Option<f64>) -> Self {
        AllelePair { allele1, allele2 }
    }

    pub fn is_missing(&self) -> bool {
        self.allele1.is_none() && self.allele2.is_none()
    }

    /// Standardize the pair against the detection ceiling. A lone measured
    /// allele is projected onto the missing one, unless it is itself at or
    /// above the ceiling: a saturated single observation cannot be trusted
    /// to project a true value, so both alleles become the cutoff. When both
    /// alleles are measured, each is clamped to the cutoff independently.
    ///
    /// Callers must short-circuit pairs with both alleles missing before
    /// standardizing (see `classify`).
    pub fn standardize(&self, cutoff: f64) -> (f64, f64) {
        match (self.allele1, self.allele2) {
            (Some(allele1), None) => {
                if allele1 >= cutoff {
                    (cutoff, cutoff)
                } else {
                    (allele1, allele1)
                }
            }
            (None, Some(allele2)) => {
                if allele2 >= cutoff {
                    (cutoff, cutoff)
                } else {
                    (allele2, allele2)
                }
            }
            (Some(allele1), Some(allele2)) => (allele1.min(cutoff), allele2.min(cutoff)),
            (None, None) => panic!("Can't standardize a pair with both alleles missing"),
        }
    }

    /// Substitute each missing allele with the member's own measured one,
    /// without applying the ceiling. Used for the difference diagnostics,
    /// which compare raw sizes. Same precondition as `standardize`.
    pub fn fill_missing(&self) -> (f64, f64) {
        match (self.allele1, self.allele2) {
            (Some(allele1), None) => (allele1, allele1),
            (None, Some(allele2)) => (allele2, allele2),
            (Some(allele1), Some(allele2)) => (allele1, allele2),
            (None, None) => panic!("Can't fill a pair with both alleles missing"),
        }
    }
}
