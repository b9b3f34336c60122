use crate::denovo::AllelePair;
use crate::utils::Result;
use std::io::BufRead;

/// One row of the genotyper outlier table.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierRecord {
    pub locus: String,
    pub sample: String,
    pub repeat_unit: String,
    pub depth: Option<f64>,
    pub allele1_est: Option<f64>,
    pub allele2_est: Option<f64>,
}

impl OutlierRecord {
    /// Allele sizes in base pairs. The genotyper estimates sizes in repeat
    /// units, so each estimate is scaled by its own record's motif length.
    pub fn alleles_bp(&self) -> AllelePair {
        let motif_len = self.repeat_unit.len() as f64;
        AllelePair::new(
            self.allele1_est.map(|a| a * motif_len),
            self.allele2_est.map(|a| a * motif_len),
        )
    }
}

/// Positions of the required columns, resolved from the header by name so
/// that tables with extra or reordered columns keep working.
struct ColumnIndex {
    locus: usize,
    sample: usize,
    repeat_unit: usize,
    depth: usize,
    allele1_est: usize,
    allele2_est: usize,
}

impl ColumnIndex {
    fn from_header(header: &str) -> Result<Self> {
        let names: Vec<&str> = header.split_whitespace().collect();
        let find = |name: &str| {
            names
                .iter()
                .position(|n| *n == name)
                .ok_or_else(|| format!("Column '{}' missing from outlier table header", name))
        };
        Ok(ColumnIndex {
            locus: find("locus")?,
            sample: find("sample")?,
            repeat_unit: find("repeatunit")?,
            depth: find("depth")?,
            allele1_est: find("allele1_est")?,
            allele2_est: find("allele2_est")?,
        })
    }
}

fn parse_value(field: &str, line_number: usize) -> Result<Option<f64>> {
    match field {
        "NaN" | "nan" | "NA" | "." => Ok(None),
        _ => field.parse::<f64>().map(Some).map_err(|_| {
            format!(
                "Invalid numeric value '{}' at outlier table line {}",
                field,
                line_number
            )
        }),
    }
}

pub fn read_outlier_table<R: BufRead>(reader: R) -> Result<Vec<OutlierRecord>> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .ok_or_else(|| "Outlier table is empty".to_string())?
        .map_err(|e| format!("Error reading outlier table header: {}", e))?;
    let columns = ColumnIndex::from_header(&header)?;

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        let line_number = index + 2; // header occupies line 1
        let line =
            line.map_err(|e| format!("Error reading line {}: {}", line_number, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let get = |position: usize| {
            fields.get(position).copied().ok_or_else(|| {
                format!(
                    "Expected at least {} fields at outlier table line {}, found {}",
                    position + 1,
                    line_number,
                    fields.len()
                )
            })
        };

        records.push(OutlierRecord {
            locus: get(columns.locus)?.to_string(),
            sample: get(columns.sample)?.to_string(),
            repeat_unit: get(columns.repeat_unit)?.to_string(),
            depth: parse_value(get(columns.depth)?, line_number)?,
            allele1_est: parse_value(get(columns.allele1_est)?, line_number)?,
            allele2_est: parse_value(get(columns.allele2_est)?, line_number)?,
        });
    }

    Ok(records)
}
