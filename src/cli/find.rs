use anyhow::bail;
use clap::Args;
use log::{info, warn};

use crate::cli::core::{FilterArgs, GraphInputArgs, AFTER_HELP, FULL_VERSION};
use crate::fr_finder::SearchStrategy;

#[derive(Args, Clone, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct FindSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    frfinder_version: String,

    #[clap(flatten)]
    pub graph: GraphInputArgs,

    /// Output prefix for the run files [default: FR table on stdout]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(value_name = "PREFIX")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_prefix: Option<String>,

    /// Penetrance, the minimum fraction of region nodes a supporting subpath must cover
    #[clap(required = true)]
    #[clap(short = 'a')]
    #[clap(long = "alpha")]
    #[clap(value_name = "FLOAT")]
    #[clap(help_heading = Some("Search parameters"))]
    pub alpha: f64,

    /// Maximum number of inserted bases between consecutive region nodes on a subpath
    #[clap(required = true)]
    #[clap(short = 'k')]
    #[clap(long = "kappa")]
    #[clap(value_name = "BP")]
    #[clap(help_heading = Some("Search parameters"))]
    pub kappa: usize,

    /// Ranks candidate regions by case/control imbalance instead of support
    #[clap(long = "case-ctrl")]
    #[clap(help_heading = Some("Search parameters"))]
    pub case_ctrl: bool,

    /// Stops the search after this many rounds even if it has not converged
    #[clap(long = "max-rounds")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Search parameters"))]
    pub max_rounds: Option<usize>,

    /// Runs the exhaustive search, only intended for testing on small graphs
    #[clap(long = "brute-force")]
    #[clap(conflicts_with = "serial")]
    #[clap(help_heading = Some("Search parameters"))]
    pub brute_force: bool,

    /// Runs the single-threaded search
    #[clap(long = "serial")]
    #[clap(help_heading = Some("Search parameters"))]
    pub serial: bool,

    #[clap(flatten)]
    pub filters: FilterArgs,

    /// Number of threads to use in the search
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    pub threads: usize,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl FindSettings {
    /// The search strategy selected by the flags
    pub fn strategy(&self) -> SearchStrategy {
        if self.brute_force {
            SearchStrategy::BruteForce
        } else if self.serial {
            SearchStrategy::Serial
        } else {
            SearchStrategy::Parallel
        }
    }
}

pub fn check_find_settings(mut settings: FindSettings) -> anyhow::Result<FindSettings> {
    // hard code the version in
    settings.frfinder_version = FULL_VERSION.clone();
    info!("FR Finder version: {:?}", &settings.frfinder_version);
    info!("Sub-command: find");
    info!("Inputs:");

    // check for all the required input files
    if settings.graph.graph_source().is_none() {
        bail!("One of --gfa or --json is required");
    }
    settings.graph.check()?;

    // outputs
    info!("Outputs:");
    if let Some(prefix) = settings.output_prefix.as_ref() {
        info!("\tOutput prefix: {prefix:?}");
    } else {
        info!("\tOutput prefix: None, FR table goes to stdout");
    }

    info!("Search parameters:");
    if !(settings.alpha > 0.0 && settings.alpha <= 1.0) {
        bail!("--alpha must be in (0, 1], found {}", settings.alpha);
    }
    info!("\tAlpha: {}", settings.alpha);
    info!("\tKappa: {}", settings.kappa);
    info!("\tCase/control ranking: {}", if settings.case_ctrl { "ENABLED" } else { "DISABLED" });
    if settings.case_ctrl && settings.graph.path_labels.is_none() {
        warn!("--case-ctrl was set without --path-labels, every candidate will score 0");
    }
    if let Some(max_rounds) = settings.max_rounds {
        if max_rounds == 0 {
            bail!("--max-rounds must be >0");
        }
        info!("\tMaximum rounds: {max_rounds}");
    }
    info!("\tStrategy: {}", settings.strategy());

    settings.filters.check()?;

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok(settings)
}
