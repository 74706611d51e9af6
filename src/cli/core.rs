use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use log::info;
use std::path::{Path, PathBuf};

use crate::cli::find::FindSettings;
use crate::cli::postprocess::PostprocessSettings;
use crate::fr_finder::RegionFilter;
use crate::parsing::run_params::GraphSource;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.3.1-6bb9635-dirty` - while on a dirty branch
    /// * `0.3.1-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string
    pub static ref AFTER_HELP: String = format!("Copyright (C) 2016-{}     The FR Finder authors
This program comes with ABSOLUTELY NO WARRANTY; it is intended for
research use only.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// FR Finder, mines frequented regions from the genome paths of a pangenome graph.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Runs a fresh frequented region search
    Find(Box<FindSettings>),
    /// Reloads a prior search and filters the regions without searching again
    Postprocess(Box<PostprocessSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Graph inputs shared by the subcommands
#[derive(Args, Clone, Debug, Default)]
pub struct GraphInputArgs {
    /// Graph in GFA v1 format, optionally gzipped
    #[clap(long = "gfa")]
    #[clap(value_name = "GFA")]
    #[clap(conflicts_with = "json_filename")]
    #[clap(help_heading = Some("Input/Output"))]
    pub gfa_filename: Option<PathBuf>,

    /// Graph in vg JSON format, optionally gzipped
    #[clap(long = "json")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub json_filename: Option<PathBuf>,

    /// Tab-separated path name to label file, e.g. case/ctrl labels
    #[clap(short = 'p')]
    #[clap(long = "path-labels")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub path_labels: Option<PathBuf>,

    /// Only use paths with this genotype
    #[clap(short = 'g')]
    #[clap(long = "genotype")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Input/Output"))]
    pub genotype: Option<u32>,
}

impl GraphInputArgs {
    /// The selected graph input, if any
    pub fn graph_source(&self) -> Option<GraphSource> {
        match (self.gfa_filename.as_ref(), self.json_filename.as_ref()) {
            (Some(gfa), _) => Some(GraphSource::Gfa(gfa.clone())),
            (None, Some(json)) => Some(GraphSource::VgJson(json.clone())),
            (None, None) => None
        }
    }

    /// Checks and logs the inputs that were provided
    pub fn check(&self) -> anyhow::Result<()> {
        if self.gfa_filename.is_some() && self.json_filename.is_some() {
            bail!("--gfa and --json are mutually exclusive");
        }
        check_optional_filename(self.gfa_filename.as_deref(), "GFA graph")?;
        check_optional_filename(self.json_filename.as_deref(), "JSON graph")?;
        check_optional_filename(self.path_labels.as_deref(), "Path labels")?;

        if let Some(source) = self.graph_source() {
            info!("\tGraph: {:?}", source.filename());
        }
        if let Some(path_labels) = self.path_labels.as_deref() {
            info!("\tPath labels: {path_labels:?}");
        }
        if let Some(genotype) = self.genotype {
            info!("\tGenotype filter: {genotype}");
        }
        Ok(())
    }
}

/// Post-search filters shared by the subcommands
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Minimum support of an output region
    #[clap(long = "min-support")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Filters"))]
    pub min_support: Option<usize>,

    /// Minimum number of nodes in an output region
    #[clap(long = "min-size")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Filters"))]
    pub min_size: Option<usize>,

    /// Minimum average subpath length of an output region
    #[clap(long = "min-length")]
    #[clap(value_name = "BP")]
    #[clap(help_heading = Some("Filters"))]
    pub min_length: Option<f64>,
}

impl FilterArgs {
    /// Returns true if any filter was provided
    pub fn is_active(&self) -> bool {
        self.min_support.is_some() || self.min_size.is_some() || self.min_length.is_some()
    }

    pub fn region_filter(&self) -> RegionFilter {
        RegionFilter {
            min_support: self.min_support.unwrap_or(0),
            min_size: self.min_size.unwrap_or(0),
            min_length: self.min_length.unwrap_or(0.0)
        }
    }

    /// Checks and logs the filters
    pub fn check(&self) -> anyhow::Result<()> {
        if let Some(min_length) = self.min_length {
            if !min_length.is_finite() || min_length < 0.0 {
                bail!("--min-length must be a non-negative number, found {min_length}");
            }
        }
        if self.is_active() {
            info!("Filters:");
            info!("\tMinimum support: {}", self.min_support.unwrap_or(0));
            info!("\tMinimum size: {}", self.min_size.unwrap_or(0));
            info!("\tMinimum length: {}", self.min_length.unwrap_or(0.0));
        }
        Ok(())
    }
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }

    // file exists
    Ok(())
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_optional_filename(opt_filename: Option<&Path>, label: &str) -> anyhow::Result<()> {
    if let Some(filename) = opt_filename {
        if !filename.exists() {
            bail!("{} does not exist: \"{}\"", label, filename.display());
        }
    }

    // file either was not specified OR it exists
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_find() {
        let cli = Cli::try_parse_from([
            "frfinder", "find", "--gfa", "graph.gfa", "--alpha", "0.8", "--kappa", "3", "--serial", "--min-support", "2"
        ]).unwrap();
        let Commands::Find(settings) = cli.command else {
            panic!("expected find");
        };
        assert_eq!(settings.graph.gfa_filename, Some(PathBuf::from("graph.gfa")));
        assert_eq!(settings.alpha, 0.8);
        assert_eq!(settings.kappa, 3);
        assert!(settings.serial);
        assert_eq!(settings.filters.region_filter().min_support, 2);
    }

    #[test]
    fn test_conflicts() {
        assert!(Cli::try_parse_from([
            "frfinder", "find", "--gfa", "a.gfa", "--json", "b.json", "--alpha", "1", "--kappa", "0"
        ]).is_err());
        assert!(Cli::try_parse_from([
            "frfinder", "find", "--gfa", "a.gfa", "--alpha", "1", "--kappa", "0", "--serial", "--brute-force"
        ]).is_err());
        // kappa is required
        assert!(Cli::try_parse_from(["frfinder", "find", "--gfa", "a.gfa", "--alpha", "1"]).is_err());
    }

    #[test]
    fn test_parse_postprocess() {
        let cli = Cli::try_parse_from([
            "frfinder", "postprocess", "--input-prefix", "run1", "--min-size", "3", "-o", "run1.filtered"
        ]).unwrap();
        let Commands::Postprocess(settings) = cli.command else {
            panic!("expected postprocess");
        };
        assert_eq!(settings.input_prefix, "run1");
        assert_eq!(settings.output_prefix.as_deref(), Some("run1.filtered"));
        assert!(settings.graph.graph_source().is_none());
        assert!(settings.filters.is_active());
    }
}
