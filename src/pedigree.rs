use crate::utils::Result;
use std::{fs, io::BufRead, path::Path};

/// One row of a PED file. Parent ids of "0" mean the parent is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct PedSample {
    pub family_id: String,
    pub sample_id: String,
    pub paternal_id: Option<String>,
    pub maternal_id: Option<String>,
    pub phenotype: String,
}

/// A child with both parents genotyped, plus the mutation label implicated
/// by the parental phenotype columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Trio {
    pub kid: String,
    pub mom: String,
    pub dad: String,
    pub mutation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pedigree {
    samples: Vec<PedSample>,
}

impl Pedigree {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file =
            fs::File::open(path).map_err(|e| format!("File {}: {}", path.display(), e))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        const EXPECTED_FIELD_COUNT: usize = 6;
        let mut samples = Vec::new();

        for (line_number, line) in reader.lines().enumerate() {
            let line =
                line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < EXPECTED_FIELD_COUNT {
                return Err(format!(
                    "Expected {} fields in the format 'family sample father mother sex phenotype' at line {}, found {}",
                    EXPECTED_FIELD_COUNT,
                    line_number + 1,
                    fields.len()
                ));
            }

            let parent_id = |id: &str| match id {
                "0" => None,
                _ => Some(id.to_string()),
            };
            samples.push(PedSample {
                family_id: fields[0].to_string(),
                sample_id: fields[1].to_string(),
                paternal_id: parent_id(fields[2]),
                maternal_id: parent_id(fields[3]),
                phenotype: fields[5].to_string(),
            });
        }

        Ok(Pedigree { samples })
    }

    pub fn get(&self, sample_id: &str) -> Option<&PedSample> {
        self.samples.iter().find(|s| s.sample_id == sample_id)
    }

    /// Samples whose parent ids both resolve to pedigree records form trios.
    /// The mutation label is the mother's phenotype when set, else the
    /// father's, else "0".
    pub fn trios(&self) -> Vec<Trio> {
        let mut trios = Vec::new();
        for sample in &self.samples {
            let (dad_id, mom_id) = match (&sample.paternal_id, &sample.maternal_id) {
                (Some(dad_id), Some(mom_id)) => (dad_id, mom_id),
                _ => continue,
            };
            let (dad, mom) = match (self.get(dad_id), self.get(mom_id)) {
                (Some(dad), Some(mom)) => (dad, mom),
                _ => {
                    log::warn!(
                        "Skipping {}: parent records missing from pedigree",
                        sample.sample_id
                    );
                    continue;
                }
            };

            let mutation = if mom.phenotype != "0" {
                mom.phenotype.clone()
            } else if dad.phenotype != "0" {
                dad.phenotype.clone()
            } else {
                "0".to_string()
            };

            trios.push(Trio {
                kid: sample.sample_id.clone(),
                mom: mom.sample_id.clone(),
                dad: dad.sample_id.clone(),
                mutation,
            });
        }
        trios
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pedigree(data: &str) -> Pedigree {
        Pedigree::from_reader(std::io::Cursor::new(data)).unwrap()
    }

    #[test]
    fn test_trio_discovery() {
        let ped = pedigree(
            "\
fam1 dad1 0 0 1 0\n\
fam1 mom1 0 0 2 2\n\
fam1 kid1 dad1 mom1 1 0\n",
        );
        let trios = ped.trios();
        assert_eq!(trios.len(), 1);
        assert_eq!(
            trios[0],
            Trio {
                kid: "kid1".to_string(),
                mom: "mom1".to_string(),
                dad: "dad1".to_string(),
                mutation: "2".to_string(),
            }
        );
    }

    #[test]
    fn test_samples_without_both_parents_are_not_trios() {
        let ped = pedigree(
            "\
fam1 dad1 0 0 1 0\n\
fam1 kid1 dad1 0 1 0\n\
fam1 kid2 0 mom9 1 0\n",
        );
        assert!(ped.trios().is_empty());
    }

    #[test]
    fn test_parents_must_resolve_to_pedigree_records() {
        let ped = pedigree("fam1 kid1 dad1 mom1 1 0\n");
        assert!(ped.trios().is_empty());
    }

    #[test]
    fn test_mutation_prefers_mom_then_dad() {
        let ped = pedigree(
            "\
fam1 dad1 0 0 1 HD\n\
fam1 mom1 0 0 2 SCA1\n\
fam1 kid1 dad1 mom1 1 0\n\
fam2 dad2 0 0 1 HD\n\
fam2 mom2 0 0 2 0\n\
fam2 kid2 dad2 mom2 1 0\n\
fam3 dad3 0 0 1 0\n\
fam3 mom3 0 0 2 0\n\
fam3 kid3 dad3 mom3 1 0\n",
        );
        let trios = ped.trios();
        assert_eq!(trios[0].mutation, "SCA1");
        assert_eq!(trios[1].mutation, "HD");
        assert_eq!(trios[2].mutation, "0");
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let ped = pedigree(
            "\
#family_id sample_id paternal_id maternal_id sex phenotype\n\
\n\
fam1 dad1 0 0 1 0\n\
fam1 mom1 0 0 2 0\n\
fam1 kid1 dad1 mom1 1 0\n",
        );
        assert_eq!(ped.trios().len(), 1);
    }

    #[test]
    fn test_incomplete_line_is_an_error() {
        let result = Pedigree::from_reader(std::io::Cursor::new("fam1 kid1 dad1\n"));
        assert!(result.is_err());
    }
}
