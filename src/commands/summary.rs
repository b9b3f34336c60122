use crate::cli::SummaryArgs;
use crate::utils::{open_table_reader, Result};
use itertools::Itertools;
use std::collections::HashMap;
use std::io::BufRead;

#[derive(Debug, Default, PartialEq)]
struct SampleCounts {
    statuses: HashMap<String, usize>,
    amps: usize,
}

pub fn summary(args: SummaryArgs) -> Result<()> {
    let reader = open_table_reader(&args.results_path)?;
    let counts = count_results(reader)
        .map_err(|e| format!("{}: {}", args.results_path.display(), e))?;

    for (sample, counts) in counts.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        // most frequent status first, ties by name
        let statuses = counts
            .statuses
            .iter()
            .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
            .map(|(status, count)| format!("{}={}", status, count))
            .join(", ");
        log::info!("{}: {}", sample, statuses);
        log::info!("{}: novel amplifications={}", sample, counts.amps);
    }

    Ok(())
}

/// Recompute the per-sample status and amplification counts from a results
/// file written by the call subcommand. Fields are tab-separated; status
/// labels contain spaces.
fn count_results<R: BufRead>(reader: R) -> Result<HashMap<String, SampleCounts>> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .ok_or_else(|| "Results file is empty".to_string())?
        .map_err(|e| format!("Error reading results header: {}", e))?;

    let names: Vec<&str> = header.split('\t').collect();
    let find = |name: &str| {
        names
            .iter()
            .position(|n| *n == name)
            .ok_or_else(|| format!("Column '{}' missing from results header", name))
    };
    let sample_col = find("sample")?;
    let status_col = find("mendelianstatus")?;
    let amp_col = find("novel_amp")?;

    let mut counts: HashMap<String, SampleCounts> = HashMap::new();
    for (index, line) in lines.enumerate() {
        let line_number = index + 2;
        let line = line.map_err(|e| format!("Error reading line {}: {}", line_number, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let get = |position: usize| {
            fields.get(position).copied().ok_or_else(|| {
                format!(
                    "Expected at least {} fields at line {}, found {}",
                    position + 1,
                    line_number,
                    fields.len()
                )
            })
        };

        let entry = counts.entry(get(sample_col)?.to_string()).or_default();
        *entry.statuses.entry(get(status_col)?.to_string()).or_default() += 1;
        if get(amp_col)? == "true" {
            entry.amps += 1;
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_results() {
        let data = "\
locus\tsample\tmendelianstatus\tnovel_amp\n\
chr1-100\tkid1\tFull match\tfalse\n\
chr2-200\tkid1\tMV\ttrue\n\
chr3-300\tkid1\tFull match\tfalse\n\
chr1-100\tkid2\tDouble MV, likely error\tfalse\n";
        let counts = count_results(std::io::Cursor::new(data)).unwrap();
        assert_eq!(counts.len(), 2);

        let kid1 = &counts["kid1"];
        assert_eq!(kid1.statuses["Full match"], 2);
        assert_eq!(kid1.statuses["MV"], 1);
        assert_eq!(kid1.amps, 1);

        let kid2 = &counts["kid2"];
        assert_eq!(kid2.statuses["Double MV, likely error"], 1);
        assert_eq!(kid2.amps, 0);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let data = "locus\tsample\tnovel_amp\n";
        assert!(count_results(std::io::Cursor::new(data)).is_err());
    }

    #[test]
    fn test_empty_results_are_an_error() {
        assert!(count_results(std::io::Cursor::new("")).is_err());
    }
}
