use super::OutlierRecord;
use crate::denovo::{AllelePair, Classification, TrioAlleles};
use std::collections::HashMap;

/// One member's genotype call at one locus, in base pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberCall {
    pub depth: Option<f64>,
    pub alleles: AllelePair,
}

impl MemberCall {
    fn new(record: &OutlierRecord) -> Self {
        MemberCall {
            depth: record.depth,
            alleles: record.alleles_bp(),
        }
    }
}

/// The merged kid/mom/dad view of one locus.
#[derive(Debug, Clone, PartialEq)]
pub struct TrioLocus {
    pub locus: String,
    pub kid: MemberCall,
    pub mom: MemberCall,
    pub dad: MemberCall,
}

impl TrioLocus {
    /// Loci where any member's depth is unmeasured or below the threshold
    /// must never reach the classifier.
    pub fn passes_depth(&self, min_depth: f64) -> bool {
        [&self.kid, &self.mom, &self.dad]
            .iter()
            .all(|member| member.depth.is_some_and(|depth| depth >= min_depth))
    }

    pub fn trio_alleles(&self) -> TrioAlleles {
        TrioAlleles {
            mom: self.mom.alleles,
            dad: self.dad.alleles,
            kid: self.kid.alleles,
        }
    }
}

/// Outcome of one trio locus after depth gating.
#[derive(Debug, Clone, PartialEq)]
pub enum LocusCall {
    Classified(Classification),
    UnderDepthFilter,
}

/// Inner-join the three members' rows per locus, preserving the kid's row
/// order. Loci absent from either parent's calls are dropped.
pub fn build_trio_loci(
    records: &[OutlierRecord],
    kid: &str,
    mom: &str,
    dad: &str,
) -> Vec<TrioLocus> {
    let by_locus = |sample: &str| -> HashMap<&str, &OutlierRecord> {
        records
            .iter()
            .filter(|record| record.sample == sample)
            .map(|record| (record.locus.as_str(), record))
            .collect()
    };
    let mom_rows = by_locus(mom);
    let dad_rows = by_locus(dad);

    records
        .iter()
        .filter(|record| record.sample == kid)
        .filter_map(|kid_row| {
            let mom_row = mom_rows.get(kid_row.locus.as_str())?;
            let dad_row = dad_rows.get(kid_row.locus.as_str())?;
            Some(TrioLocus {
                locus: kid_row.locus.clone(),
                kid: MemberCall::new(kid_row),
                mom: MemberCall::new(mom_row),
                dad: MemberCall::new(dad_row),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sample: &str, locus: &str, depth: Option<f64>) -> OutlierRecord {
        OutlierRecord {
            locus: locus.to_string(),
            sample: sample.to_string(),
            repeat_unit: "AG".to_string(),
            depth,
            allele1_est: Some(10.0),
            allele2_est: Some(20.0),
        }
    }

    #[test]
    fn test_join_preserves_kid_row_order_and_drops_unmatched_loci() {
        let records = vec![
            record("kid1", "locusB", Some(30.0)),
            record("kid1", "locusA", Some(30.0)),
            record("kid1", "locusC", Some(30.0)),
            record("mom1", "locusA", Some(30.0)),
            record("mom1", "locusB", Some(30.0)),
            record("dad1", "locusB", Some(30.0)),
            record("dad1", "locusA", Some(30.0)),
            record("dad1", "locusC", Some(30.0)),
        ];
        let loci = build_trio_loci(&records, "kid1", "mom1", "dad1");
        let ids: Vec<&str> = loci.iter().map(|l| l.locus.as_str()).collect();
        // locusC is missing from mom and drops out of the join
        assert_eq!(ids, vec!["locusB", "locusA"]);
    }

    #[test]
    fn test_join_converts_estimates_to_base_pairs() {
        let records = vec![
            record("kid1", "locusA", Some(30.0)),
            record("mom1", "locusA", Some(30.0)),
            record("dad1", "locusA", Some(30.0)),
        ];
        let loci = build_trio_loci(&records, "kid1", "mom1", "dad1");
        assert_eq!(loci[0].kid.alleles, AllelePair::new(Some(20.0), Some(40.0)));
    }

    #[test]
    fn test_depth_gate() {
        let records = vec![
            record("kid1", "locusA", Some(30.0)),
            record("mom1", "locusA", Some(30.0)),
            record("dad1", "locusA", Some(30.0)),
        ];
        let locus = &build_trio_loci(&records, "kid1", "mom1", "dad1")[0];
        assert!(locus.passes_depth(15.0));
        assert!(locus.passes_depth(30.0));
        assert!(!locus.passes_depth(30.5));
    }

    #[test]
    fn test_depth_gate_fails_on_missing_depth() {
        let records = vec![
            record("kid1", "locusA", Some(30.0)),
            record("mom1", "locusA", None),
            record("dad1", "locusA", Some(30.0)),
        ];
        let locus = &build_trio_loci(&records, "kid1", "mom1", "dad1")[0];
        assert!(!locus.passes_depth(15.0));
    }
}
