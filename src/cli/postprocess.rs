use clap::Args;
use log::info;

use crate::cli::core::{check_required_filename, FilterArgs, GraphInputArgs, AFTER_HELP, FULL_VERSION};
use crate::writers::run_outputs::{output_filename, PARAMS_SUFFIX, SUBPATHS_SUFFIX};

#[derive(Args, Clone, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct PostprocessSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    frfinder_version: String,

    /// Graph inputs, these override the ones recorded in the params file
    #[clap(flatten)]
    pub graph: GraphInputArgs,

    /// Output prefix of the prior run to load
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input-prefix")]
    #[clap(value_name = "PREFIX")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_prefix: String,

    /// Output prefix for the filtered run files [default: FR table on stdout]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(value_name = "PREFIX")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_prefix: Option<String>,

    #[clap(flatten)]
    pub filters: FilterArgs,

    /// Number of threads to use
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

pub fn check_postprocess_settings(mut settings: PostprocessSettings) -> anyhow::Result<PostprocessSettings> {
    // hard code the version in
    settings.frfinder_version = FULL_VERSION.clone();
    info!("FR Finder version: {:?}", &settings.frfinder_version);
    info!("Sub-command: postprocess");
    info!("Inputs:");

    // the prior run must have written both of these
    info!("\tInput prefix: {:?}", &settings.input_prefix);
    check_required_filename(&output_filename(&settings.input_prefix, PARAMS_SUFFIX), "Params file")?;
    check_required_filename(&output_filename(&settings.input_prefix, SUBPATHS_SUFFIX), "Subpaths file")?;
    settings.graph.check()?;

    info!("Outputs:");
    if let Some(prefix) = settings.output_prefix.as_ref() {
        info!("\tOutput prefix: {prefix:?}");
    } else {
        info!("\tOutput prefix: None, FR table goes to stdout");
    }

    settings.filters.check()?;

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok(settings)
}
