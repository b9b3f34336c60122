use super::TrioLocus;
use crate::denovo::Classification;
use crate::pedigree::Trio;
use crate::utils::Result;
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

/// Tab-separated results writer. The header is written on creation, so it
/// appears exactly once no matter how many trios contribute rows.
pub struct ResultWriter {
    writer: BufWriter<fs::File>,
    with_diffs: bool,
}

impl ResultWriter {
    pub fn new(path: &Path, with_diffs: bool) -> Result<Self> {
        let file =
            fs::File::create(path).map_err(|e| format!("File {}: {}", path.display(), e))?;
        let mut writer = ResultWriter {
            writer: BufWriter::new(file),
            with_diffs,
        };
        writer.write_header()?;
        Ok(writer)
    }

    fn write_header(&mut self) -> Result<()> {
        let mut columns = vec![
            "locus",
            "sample",
            "mom",
            "dad",
            "mutation",
            "allele1kid",
            "allele2kid",
            "depth_kid",
            "allele1mom",
            "allele2mom",
            "depth_mom",
            "allele1dad",
            "allele2dad",
            "depth_dad",
            "mendelianstatus",
            "novel_amp",
        ];
        if self.with_diffs {
            columns.extend(["allele1diff", "allele2diff", "percentdiff1", "percentdiff2"]);
        }
        writeln!(self.writer, "{}", columns.join("\t")).map_err(|e| e.to_string())
    }

    pub fn write_locus(
        &mut self,
        trio: &Trio,
        locus: &TrioLocus,
        classification: &Classification,
    ) -> Result<()> {
        let value = |value: Option<f64>| match value {
            Some(value) => value.to_string(),
            None => "NaN".to_string(),
        };

        let mut fields = vec![
            locus.locus.clone(),
            trio.kid.clone(),
            trio.mom.clone(),
            trio.dad.clone(),
            trio.mutation.clone(),
            value(locus.kid.alleles.allele1),
            value(locus.kid.alleles.allele2),
            value(locus.kid.depth),
            value(locus.mom.alleles.allele1),
            value(locus.mom.alleles.allele2),
            value(locus.mom.depth),
            value(locus.dad.alleles.allele1),
            value(locus.dad.alleles.allele2),
            value(locus.dad.depth),
            classification.status.to_string(),
            classification.novel_amp.to_string(),
        ];
        if self.with_diffs {
            match &classification.diffs {
                Some(diffs) => fields.extend([
                    diffs.allele1.to_string(),
                    diffs.allele2.to_string(),
                    diffs.percent1.to_string(),
                    diffs.percent2.to_string(),
                ]),
                None => fields.extend(std::iter::repeat("NaN".to_string()).take(4)),
            }
        }

        writeln!(self.writer, "{}", fields.join("\t")).map_err(|e| e.to_string())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().map_err(|e| e.to_string())
    }
}
