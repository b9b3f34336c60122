use super::{matches_parent, AllelePair, DenovoParams};
use arrayvec::ArrayVec;
use std::fmt;

/// Genotypes of one family at one locus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrioAlleles {
    pub mom: AllelePair,
    pub dad: AllelePair,
    pub kid: AllelePair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MendelianStatus {
    Missing,
    FullMatch,
    Mv,
    DoubleMv,
}

impl MendelianStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MendelianStatus::Missing => "Missing alleles, ignore",
            MendelianStatus::FullMatch => "Full match",
            MendelianStatus::Mv => "MV",
            MendelianStatus::DoubleMv => "Double MV, likely error",
        }
    }
}

impl fmt::Display for MendelianStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed distances from each child allele to its closest parental allele,
/// with the matching relative differences. Percents are NaN when the
/// denominator degenerates to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlleleDiffs {
    pub allele1: f64,
    pub allele2: f64,
    pub percent1: f64,
    pub percent2: f64,
}

/// Outcome of one trio-locus evaluation. The shape is fixed: `diffs` is
/// `None` whenever diagnostics are disabled or do not apply to the status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub status: MendelianStatus,
    pub novel_amp: bool,
    pub diffs: Option<AlleleDiffs>,
}

/// The four single-allele match outcomes between the child and its parents.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MatchPattern {
    kid1_mom: bool,
    kid1_dad: bool,
    kid2_mom: bool,
    kid2_dad: bool,
}

impl MatchPattern {
    /// Every combination of the four outcomes, spelled out. A full match
    /// needs one cross-assignment pairing the child alleles with opposite
    /// parents; no match at all is a double violation; anything in between
    /// is a single violation.
    fn status(&self) -> MendelianStatus {
        use MendelianStatus::*;
        match (self.kid1_mom, self.kid1_dad, self.kid2_mom, self.kid2_dad) {
            (false, false, false, false) => DoubleMv,
            (false, false, false, true) => Mv,
            (false, false, true, false) => Mv,
            (false, false, true, true) => Mv,
            (false, true, false, false) => Mv,
            (false, true, false, true) => Mv,
            (false, true, true, false) => FullMatch,
            (false, true, true, true) => FullMatch,
            (true, false, false, false) => Mv,
            (true, false, false, true) => FullMatch,
            (true, false, true, false) => Mv,
            (true, false, true, true) => FullMatch,
            (true, true, false, false) => Mv,
            (true, true, false, true) => FullMatch,
            (true, true, true, false) => FullMatch,
            (true, true, true, true) => FullMatch,
        }
    }
}

/// Classify one trio locus. A pure function of its inputs: the same alleles
/// and parameters always produce the same result.
pub fn classify(trio: &TrioAlleles, params: &DenovoParams) -> Classification {
    // A member with neither allele measured ends the evaluation before any
    // standardization happens
    if trio.kid.is_missing() || trio.mom.is_missing() || trio.dad.is_missing() {
        return Classification {
            status: MendelianStatus::Missing,
            novel_amp: false,
            diffs: None,
        };
    }

    let kid = trio.kid.standardize(params.cutoff);
    let mom = trio.mom.standardize(params.cutoff);
    let dad = trio.dad.standardize(params.cutoff);

    let pattern = MatchPattern {
        kid1_mom: matches_parent(mom, kid.0, params),
        kid1_dad: matches_parent(dad, kid.0, params),
        kid2_mom: matches_parent(mom, kid.1, params),
        kid2_dad: matches_parent(dad, kid.1, params),
    };

    let status = pattern.status();
    let novel_amp = match status {
        MendelianStatus::FullMatch => false,
        MendelianStatus::Mv => is_amplified(kid, mom, dad, params.ampsize),
        MendelianStatus::DoubleMv => params.dmv_amps && is_amplified(kid, mom, dad, params.ampsize),
        MendelianStatus::Missing => unreachable!("missing trios short-circuit above"),
    };

    let diffs = if params.allele_diffs
        && matches!(status, MendelianStatus::Mv | MendelianStatus::DoubleMv)
    {
        Some(allele_diffs(trio))
    } else {
        None
    };

    Classification {
        status,
        novel_amp,
        diffs,
    }
}

/// A novel amplification requires the child's larger standardized allele to
/// exceed BOTH parents' larger alleles by at least `ampsize`; a one-sided
/// excess does not qualify.
fn is_amplified(kid: (f64, f64), mom: (f64, f64), dad: (f64, f64), ampsize: f64) -> bool {
    let comparison = |pair: (f64, f64)| pair.0.max(pair.1);
    let kid_comp = comparison(kid);
    kid_comp - comparison(dad) >= ampsize && kid_comp - comparison(mom) >= ampsize
}

/// Closest value in `candidates` to `value`; the first candidate wins ties.
fn closest(candidates: &[f64], value: f64) -> f64 {
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if (candidate - value).abs() < (best - value).abs() {
            best = candidate;
        }
    }
    best
}

/// Difference diagnostics operate on the raw self-filled sizes, not the
/// standardized ones. The parent owning the value closest to the child's
/// second allele claims that allele; the first allele is then diffed against
/// the opposite parent, preserving the cross-assignment pairing.
fn allele_diffs(trio: &TrioAlleles) -> AlleleDiffs {
    let kid = trio.kid.fill_missing();
    let mom = trio.mom.fill_missing();
    let dad = trio.dad.fill_missing();

    let candidates: ArrayVec<f64, 4> = [mom.0, mom.1, dad.0, dad.1].into_iter().collect();
    let mut owner_index = 0;
    for (index, candidate) in candidates.iter().enumerate().skip(1) {
        if (candidate - kid.1).abs() < (candidates[owner_index] - kid.1).abs() {
            owner_index = index;
        }
    }

    let mom_owns_allele2 = owner_index < 2;
    let (allele1_parent, allele2_parent) = if mom_owns_allele2 {
        ([dad.0, dad.1], [mom.0, mom.1])
    } else {
        ([mom.0, mom.1], [dad.0, dad.1])
    };

    let allele1 = kid.0 - closest(&allele1_parent, kid.0);
    let allele2 = kid.1 - closest(&allele2_parent, kid.1);

    AlleleDiffs {
        allele1,
        allele2,
        percent1: percent_diff(kid.0, allele1),
        percent2: percent_diff(kid.1, allele2),
    }
}

fn percent_diff(allele: f64, diff: f64) -> f64 {
    let denominator = allele - diff;
    if denominator != 0.0 {
        diff / denominator.abs()
    } else {
        f64::NAN
    }
}
