use log::{LevelFilter, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use frfinder::cli::core::{Commands, get_cli};
use frfinder::cli::find::{FindSettings, check_find_settings};
use frfinder::cli::postprocess::{PostprocessSettings, check_postprocess_settings};
use frfinder::data_types::frequented_region::FrequentedRegion;
use frfinder::data_types::graph::Graph;
use frfinder::fr_finder::{FinderConfigBuilder, FrFinder, SearchStrategy};
use frfinder::parsing::path_labels::load_path_labels;
use frfinder::parsing::run_params::{GraphSource, RunParams, load_run_params};
use frfinder::parsing::subpaths::load_subpaths;
use frfinder::writers::frs::write_frs;
use frfinder::writers::run_outputs::{output_filename, single_write_run_outputs, write_run_outputs, PARAMS_SUFFIX, SUBPATHS_SUFFIX};

/// Sets up logging with the requested verbosity
fn init_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

/// Sets up the number of threads for rayon
fn init_threads(threads: usize) {
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
        Ok(()) => {},
        Err(e) => {
            error!("Error while building thread pool: {e}");
            std::process::exit(exitcode::OSERR);
        }
    };
}

/// Loads the graph and applies any path labels, exits on failure
fn load_labeled_graph(source: &GraphSource, genotype: Option<u32>, path_labels: Option<&Path>) -> Graph {
    let mut graph = match source.load(genotype) {
        Ok(g) => g,
        Err(e) => {
            error!("Error while loading graph: {e:#}");
            std::process::exit(exitcode::DATAERR);
        }
    };
    if graph.paths().is_empty() {
        warn!("No paths were loaded, the search will not find anything.");
    }

    if let Some(labels_fn) = path_labels {
        let labels = match load_path_labels(labels_fn) {
            Ok(l) => l,
            Err(e) => {
                error!("Error while loading path labels: {e:#}");
                std::process::exit(exitcode::DATAERR);
            }
        };
        graph.apply_labels(&labels);
        for (label, count) in graph.label_counts().iter() {
            info!("\t{label}: {count} paths");
        }
    }
    graph
}

/// Writes the run files to the prefix, or the FR table to stdout if there is no prefix
fn save_results(params: &RunParams, finder: &FrFinder, threads: usize) {
    let regions: Vec<&FrequentedRegion> = finder.accepted().collect();
    let result = if let Some(prefix) = params.output_prefix.as_ref() {
        info!("Writing {} regions to {prefix:?}...", regions.len());
        if threads > 1 {
            write_run_outputs(prefix, params, &regions, finder.graph())
        } else {
            single_write_run_outputs(prefix, params, &regions, finder.graph())
        }
    } else {
        let stdout = std::io::stdout();
        write_frs(stdout.lock(), &regions, &finder.graph().labels())
    };

    if let Err(e) = result {
        error!("Error while writing outputs: {e:#}");
        std::process::exit(exitcode::IOERR);
    }
}

fn run_find(settings: FindSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.verbosity);
    let settings = match check_find_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    init_threads(settings.threads);

    // checked in check_find_settings
    let Some(graph_source) = settings.graph.graph_source() else {
        error!("No graph input was provided");
        std::process::exit(exitcode::CONFIG);
    };
    let graph = load_labeled_graph(&graph_source, settings.graph.genotype, settings.graph.path_labels.as_deref());

    let config = match FinderConfigBuilder::default()
        .alpha(settings.alpha)
        .kappa(settings.kappa)
        .case_ctrl(settings.case_ctrl)
        .strategy(settings.strategy())
        .max_rounds(settings.max_rounds)
        .build() {
        Ok(c) => c,
        Err(e) => {
            error!("Error while building search config: {e}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    let mut finder = match FrFinder::seed(&graph, config) {
        Ok(f) => f,
        Err(e) => {
            error!("Error while seeding search: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    finder.find_regions();
    if settings.filters.is_active() {
        finder.postprocess(&settings.filters.region_filter());
    }
    finder.log_case_control_statistics();

    let params = RunParams {
        output_prefix: settings.output_prefix.clone(),
        genotype: settings.graph.genotype,
        graph_source,
        path_labels: settings.graph.path_labels.clone(),
        alpha: settings.alpha,
        kappa: settings.kappa,
        case_ctrl: settings.case_ctrl,
        min_support: settings.filters.min_support,
        min_size: settings.filters.min_size,
        min_length: settings.filters.min_length,
        date: Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        clocktime: Some(format!("{:.3}", start_time.elapsed().as_secs_f64()))
    };
    save_results(&params, &finder, settings.threads);

    info!("Accepted regions: {}", finder.num_accepted());
    info!("Process finished successfully in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_postprocess(settings: PostprocessSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.verbosity);
    let settings = match check_postprocess_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    init_threads(settings.threads);

    let params_fn = output_filename(&settings.input_prefix, PARAMS_SUFFIX);
    let prior_params = match load_run_params(&params_fn) {
        Ok(p) => p,
        Err(e) => {
            error!("Error while loading params: {e:#}");
            std::process::exit(exitcode::DATAERR);
        }
    };
    info!("Prior run: alpha={}, kappa={}, case/control={}", prior_params.alpha, prior_params.kappa, prior_params.case_ctrl);

    // command line inputs take priority over the recorded ones
    let graph_source = settings.graph.graph_source().unwrap_or_else(|| prior_params.graph_source.clone());
    let genotype = settings.graph.genotype.or(prior_params.genotype);
    let path_labels: Option<PathBuf> = settings.graph.path_labels.clone().or_else(|| prior_params.path_labels.clone());
    let graph = load_labeled_graph(&graph_source, genotype, path_labels.as_deref());

    let subpaths_fn = output_filename(&settings.input_prefix, SUBPATHS_SUFFIX);
    let regions = match load_subpaths(&subpaths_fn, &graph, prior_params.alpha, prior_params.kappa) {
        Ok(r) => r,
        Err(e) => {
            error!("Error while loading subpaths: {e:#}");
            std::process::exit(exitcode::DATAERR);
        }
    };

    let config = match prior_params.finder_config(SearchStrategy::default()) {
        Ok(c) => c,
        Err(e) => {
            error!("Error while building search config: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    let mut finder = FrFinder::from_accepted(&graph, config, regions);

    // new filters replace the recorded ones
    let filter_params = if settings.filters.is_active() {
        RunParams {
            min_support: settings.filters.min_support,
            min_size: settings.filters.min_size,
            min_length: settings.filters.min_length,
            ..prior_params.clone()
        }
    } else {
        prior_params.clone()
    };
    finder.postprocess(&filter_params.region_filter());
    finder.log_case_control_statistics();

    let params = RunParams {
        output_prefix: settings.output_prefix.clone(),
        genotype,
        graph_source,
        path_labels,
        date: Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        clocktime: Some(format!("{:.3}", start_time.elapsed().as_secs_f64())),
        ..filter_params
    };
    save_results(&params, &finder, settings.threads);

    info!("Accepted regions: {}", finder.num_accepted());
    info!("Process finished successfully in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Find(settings) => {
            run_find(*settings);
        },
        Commands::Postprocess(settings) => {
            run_postprocess(*settings);
        }
    }
}
