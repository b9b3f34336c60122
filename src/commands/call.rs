use crate::cli::CallArgs;
use crate::denovo::{classify, DenovoParams, MendelianStatus};
use crate::pedigree::{Pedigree, Trio};
use crate::table::{build_trio_loci, read_outlier_table, LocusCall, ResultWriter, TrioLocus};
use crate::utils::{open_table_reader, Result};
use crossbeam_channel::bounded;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rayon::ThreadPoolBuilder;
use std::thread;

const CHANNEL_BUFFER_SIZE: usize = 64;

pub fn call(args: CallArgs) -> Result<()> {
    let params = DenovoParams::new(
        args.allele_cutoff,
        args.wiggle,
        args.min_wiggle,
        args.ampsize,
        args.include_dmv.is_yes(),
        args.include_allele_diff.is_yes(),
    )?;

    let pedigree = Pedigree::from_path(&args.ped_path)?;
    let trios = pedigree.trios();
    if trios.is_empty() {
        return Err(format!(
            "No trios found in pedigree {}",
            args.ped_path.display()
        ));
    }
    log::info!(
        "Found {} trio(s) in {}",
        trios.len(),
        args.ped_path.display()
    );

    let records = read_outlier_table(open_table_reader(&args.outliers_path)?)
        .map_err(|e| format!("{}: {}", args.outliers_path.display(), e))?;
    log::info!(
        "Loaded {} calls from {}",
        records.len(),
        args.outliers_path.display()
    );

    let writer = ResultWriter::new(&args.output_path, params.allele_diffs)?;

    let pool = ThreadPoolBuilder::new()
        .num_threads(args.num_threads)
        .thread_name(|i| format!("strio-{}", i))
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))?;

    let (sender, receiver) = bounded::<(Trio, Vec<(TrioLocus, LocusCall)>)>(CHANNEL_BUFFER_SIZE);
    let writer_thread = thread::spawn(move || -> Result<()> {
        let mut writer = writer;
        for (trio, batch) in &receiver {
            for (locus, locus_call) in &batch {
                if let LocusCall::Classified(classification) = locus_call {
                    writer.write_locus(&trio, locus, classification)?;
                }
            }
        }
        writer.finish()
    });

    for trio in trios {
        let loci = build_trio_loci(&records, &trio.kid, &trio.mom, &trio.dad);
        log::debug!("{}: {} loci shared by all trio members", trio.kid, loci.len());

        // Depth gating happens here, outside the classifier; gated loci are
        // tagged and never evaluated
        let batch: Vec<(TrioLocus, LocusCall)> = pool.install(|| {
            loci.into_par_iter()
                .map(|locus| {
                    let locus_call = if locus.passes_depth(args.min_depth) {
                        LocusCall::Classified(classify(&locus.trio_alleles(), &params))
                    } else {
                        LocusCall::UnderDepthFilter
                    };
                    (locus, locus_call)
                })
                .collect()
        });

        log_trio_summary(&trio, &batch);

        sender
            .send((trio, batch))
            .map_err(|e| format!("Failed to send results to writer thread: {}", e))?;
    }

    drop(sender);
    writer_thread.join().expect("Writer thread panicked")?;

    Ok(())
}

fn log_trio_summary(trio: &Trio, batch: &[(TrioLocus, LocusCall)]) {
    let count_status = |status: MendelianStatus| {
        batch
            .iter()
            .filter(|(_, call)| {
                matches!(call, LocusCall::Classified(c) if c.status == status)
            })
            .count()
    };
    let num_amps = batch
        .iter()
        .filter(|(_, call)| matches!(call, LocusCall::Classified(c) if c.novel_amp))
        .count();
    let num_gated = batch
        .iter()
        .filter(|(_, call)| matches!(call, LocusCall::UnderDepthFilter))
        .count();

    log::info!(
        "{}: full match={}, MV={}, double MV={}, missing={}, novel amplifications={}",
        trio.kid,
        count_status(MendelianStatus::FullMatch),
        count_status(MendelianStatus::Mv),
        count_status(MendelianStatus::DoubleMv),
        count_status(MendelianStatus::Missing),
        num_amps
    );
    if num_gated > 0 {
        log::debug!("{}: {} loci under depth filter", trio.kid, num_gated);
    }
}
