mod allele;
mod classify;
mod matcher;
mod tolerance;

pub use allele::AllelePair;
pub use classify::{classify, AlleleDiffs, Classification, MendelianStatus, TrioAlleles};
pub use matcher::matches_parent;
pub use tolerance::{tolerance_interval, ToleranceInterval};

use crate::utils::Result;

/// Immutable per-run configuration of the trio classifier. Validated once at
/// setup and then shared by reference; no component re-checks it per locus.
#[derive(Debug, Clone)]
pub struct DenovoParams {
    /// Detection ceiling for allele sizes; larger calls saturate to this value.
    pub cutoff: f64,
    /// Proportional tolerance around a parental allele.
    pub wiggle: f64,
    /// Minimum tolerance half-width, taking over for small alleles.
    pub min_wiggle: f64,
    /// Minimum size excess over both parents to flag a novel amplification.
    pub ampsize: f64,
    /// Report amplifications for double Mendelian violations.
    pub dmv_amps: bool,
    /// Compute per-allele difference diagnostics.
    pub allele_diffs: bool,
}

impl DenovoParams {
    pub fn new(
        cutoff: f64,
        wiggle: f64,
        min_wiggle: f64,
        ampsize: f64,
        dmv_amps: bool,
        allele_diffs: bool,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&wiggle) {
            return Err(format!(
                "Wiggle proportion must be a value between 0 and 1, got: {}",
                wiggle
            ));
        }
        if min_wiggle < 0.0 {
            return Err(format!(
                "Minimum wiggle must be non-negative, got: {}",
                min_wiggle
            ));
        }
        Ok(DenovoParams {
            cutoff,
            wiggle,
            min_wiggle,
            ampsize,
            dmv_amps,
            allele_diffs,
        })
    }
}
