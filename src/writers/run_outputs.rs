use anyhow::Context;
use log::{error, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::mpsc;

use crate::data_types::frequented_region::FrequentedRegion;
use crate::data_types::graph::Graph;
use crate::parsing::run_params::RunParams;
use crate::util::atomic_file::write_atomic;
use crate::writers::frs::write_frs;
use crate::writers::params::write_params;
use crate::writers::path_frs::write_path_frs;
use crate::writers::subpaths::write_subpaths;
use crate::writers::svm::write_svm;

pub const PARAMS_SUFFIX: &str = "params.txt";
pub const FRS_SUFFIX: &str = "frs.txt";
pub const SUBPATHS_SUFFIX: &str = "subpaths.txt";
pub const PATH_FRS_SUFFIX: &str = "pathfrs.txt";
pub const SVM_SUFFIX: &str = "svm.txt";

/// Builds `<prefix>.<suffix>`
pub fn output_filename(prefix: &str, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}.{suffix}"))
}

type FillFn<'a> = Box<dyn FnOnce(&mut BufWriter<File>) -> anyhow::Result<()> + Send + 'a>;

/// One writer job per output file
fn output_jobs<'a>(prefix: &str, params: &'a RunParams, regions: &'a [&'a FrequentedRegion], graph: &'a Graph) -> Vec<(PathBuf, FillFn<'a>)> {
    let params_job: FillFn<'a> = Box::new(move |w: &mut BufWriter<File>| write_params(w, params));
    let frs_job: FillFn<'a> = Box::new(move |w: &mut BufWriter<File>| write_frs(w, regions, &graph.labels()));
    let subpaths_job: FillFn<'a> = Box::new(move |w: &mut BufWriter<File>| write_subpaths(w, regions));
    let path_frs_job: FillFn<'a> = Box::new(move |w: &mut BufWriter<File>| write_path_frs(w, regions, graph.paths()));
    let svm_job: FillFn<'a> = Box::new(move |w: &mut BufWriter<File>| write_svm(w, regions, graph.paths()));
    vec![
        (output_filename(prefix, PARAMS_SUFFIX), params_job),
        (output_filename(prefix, FRS_SUFFIX), frs_job),
        (output_filename(prefix, SUBPATHS_SUFFIX), subpaths_job),
        (output_filename(prefix, PATH_FRS_SUFFIX), path_frs_job),
        (output_filename(prefix, SVM_SUFFIX), svm_job),
    ]
}

/// Writes every output file of a run, each on its own thread.
/// Each file is written atomically, so a failure never leaves a partial file behind.
/// If any Errors occur, unaffected files will continue to write, but this function will ultimately generate an Error also.
/// # Arguments
/// * `prefix` - output prefix, files are named `<prefix>.<suffix>`
/// * `params` - the run parameters
/// * `regions` - the accepted regions, in output order
/// * `graph` - the graph the regions were found in
pub fn write_run_outputs(prefix: &str, params: &RunParams, regions: &[&FrequentedRegion], graph: &Graph) -> anyhow::Result<()> {
    let jobs = output_jobs(prefix, params, regions, graph);

    // create a receiver in case any of the sub-threads have Errors
    let (arc_tx, rx) = mpsc::channel();
    rayon::scope(|s| {
        for (filename, fill) in jobs.into_iter() {
            let tx = arc_tx.clone();
            s.spawn(move |_| {
                let result = write_atomic(&filename, fill)
                    .with_context(|| format!("Error while writing {filename:?}:"));
                match result {
                    Ok(()) => info!("Wrote {filename:?}"),
                    Err(e) => {
                        if let Err(send_error) = tx.send(e) {
                            error!("Error while reporting failure for {filename:?}: {send_error}");
                        }
                    }
                }
            });
        }
    });

    // drop this so rx closes
    std::mem::drop(arc_tx);

    // check if anything had an error
    let mut result = Ok(());
    for e in rx {
        error!("Error while writing files: {e:#}");
        result = Err(e);
    }
    result
}

/// Single threaded version of the above function.
/// Stops at the first failure; files already written are kept.
pub fn single_write_run_outputs(prefix: &str, params: &RunParams, regions: &[&FrequentedRegion], graph: &Graph) -> anyhow::Result<()> {
    for (filename, fill) in output_jobs(prefix, params, regions, graph).into_iter() {
        write_atomic(&filename, fill)
            .with_context(|| format!("Error while writing {filename:?}:"))?;
        info!("Wrote {filename:?}");
    }
    Ok(())
}
