use anyhow::{anyhow, bail, Context};
use indexmap::IndexMap;
use log::warn;
use std::path::{Path, PathBuf};

use crate::data_types::graph::Graph;
use crate::fr_finder::{FinderConfig, FinderConfigBuilder, RegionFilter, SearchStrategy};
use crate::parsing::gfa::load_gfa;
use crate::parsing::vg_json::load_vg_json;

/// Where the graph for a run came from
#[derive(Clone, Debug, PartialEq)]
pub enum GraphSource {
    /// GFA v1, optionally gzipped
    Gfa(PathBuf),
    /// vg JSON, optionally gzipped
    VgJson(PathBuf),
}

impl GraphSource {
    /// Loads the graph with the given genotype filter
    pub fn load(&self, genotype_filter: Option<u32>) -> anyhow::Result<Graph> {
        match self {
            GraphSource::Gfa(filename) => load_gfa(filename, genotype_filter),
            GraphSource::VgJson(filename) => load_vg_json(filename, genotype_filter)
        }
    }

    /// The params file key for this source
    pub fn key(&self) -> &'static str {
        match self {
            GraphSource::Gfa(_) => "gfafile",
            GraphSource::VgJson(_) => "jsonfile"
        }
    }

    pub fn filename(&self) -> &Path {
        match self {
            GraphSource::Gfa(filename) |
            GraphSource::VgJson(filename) => filename
        }
    }
}

/// Everything needed to reproduce or resume a run, this is the content of the params file
#[derive(Clone, Debug, PartialEq)]
pub struct RunParams {
    /// Output prefix used for the run files
    pub output_prefix: Option<String>,
    /// Genotype filter applied when loading the graph
    pub genotype: Option<u32>,
    /// The graph input
    pub graph_source: GraphSource,
    /// Optional path label file
    pub path_labels: Option<PathBuf>,
    /// Penetrance parameter
    pub alpha: f64,
    /// Maximum insertion parameter
    pub kappa: usize,
    /// Case/control ranking mode
    pub case_ctrl: bool,
    /// Minimum support filter
    pub min_support: Option<usize>,
    /// Minimum size filter
    pub min_size: Option<usize>,
    /// Minimum average length filter
    pub min_length: Option<f64>,
    /// Local time the run finished
    pub date: Option<String>,
    /// Wall clock seconds for the run
    pub clocktime: Option<String>,
}

impl RunParams {
    /// Builds the search configuration for these parameters
    /// # Arguments
    /// * `strategy` - the search strategy, which is not stored in the params file
    pub fn finder_config(&self, strategy: SearchStrategy) -> anyhow::Result<FinderConfig> {
        let config = FinderConfigBuilder::default()
            .alpha(self.alpha)
            .kappa(self.kappa)
            .case_ctrl(self.case_ctrl)
            .strategy(strategy)
            .build()?;
        Ok(config)
    }

    /// The post-processing filter, missing thresholds allow everything
    pub fn region_filter(&self) -> RegionFilter {
        RegionFilter {
            min_support: self.min_support.unwrap_or(0),
            min_size: self.min_size.unwrap_or(0),
            min_length: self.min_length.unwrap_or(0.0)
        }
    }

    /// Key/value rows in file order, absent optional values are left out
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![];
        if let Some(prefix) = self.output_prefix.as_ref() {
            rows.push(("outputprefix", prefix.clone()));
        }
        if let Some(genotype) = self.genotype {
            rows.push(("genotype", genotype.to_string()));
        }
        rows.push((self.graph_source.key(), self.graph_source.filename().to_string_lossy().to_string()));
        if let Some(path_labels) = self.path_labels.as_ref() {
            rows.push(("pathlabels", path_labels.to_string_lossy().to_string()));
        }
        rows.push(("alpha", self.alpha.to_string()));
        rows.push(("kappa", self.kappa.to_string()));
        rows.push(("casectrl", self.case_ctrl.to_string()));
        if let Some(v) = self.min_support {
            rows.push(("minsup", v.to_string()));
        }
        if let Some(v) = self.min_size {
            rows.push(("minsize", v.to_string()));
        }
        if let Some(v) = self.min_length {
            rows.push(("minlen", v.to_string()));
        }
        if let Some(date) = self.date.as_ref() {
            rows.push(("date", date.clone()));
        }
        if let Some(clocktime) = self.clocktime.as_ref() {
            rows.push(("clocktime", clocktime.clone()));
        }
        rows
    }
}

/// Loads a params file written by a prior run
/// # Arguments
/// * `filename` - the params file
/// # Errors
/// * if the file cannot be read
/// * if a value does not parse, or alpha, kappa, or the graph file is missing
pub fn load_run_params(filename: &Path) -> anyhow::Result<RunParams> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    let mut values: IndexMap<String, String> = Default::default();
    for result in csv_reader.records() {
        let row = result.with_context(|| format!("Error while reading {filename:?}"))?;
        let key = row.get(0).ok_or(anyhow!("Missing key on row: {row:?}"))?;
        let value = row.get(1).ok_or(anyhow!("Missing value for key {key:?}"))?;
        if values.insert(key.to_string(), value.to_string()).is_some() {
            bail!("Duplicate key in {filename:?}: {key}");
        }
    }

    parse_values(values).with_context(|| format!("Error while parsing {filename:?}:"))
}

fn parse_values(mut values: IndexMap<String, String>) -> anyhow::Result<RunParams> {
    let graph_source = match (values.shift_remove("gfafile"), values.shift_remove("jsonfile")) {
        (Some(gfa), None) => GraphSource::Gfa(PathBuf::from(gfa)),
        (None, Some(json)) => GraphSource::VgJson(PathBuf::from(json)),
        (Some(_), Some(_)) => bail!("Both gfafile and jsonfile are set"),
        (None, None) => bail!("Missing graph file, expected gfafile or jsonfile")
    };

    let alpha: f64 = parse_required(&mut values, "alpha")?;
    let kappa: usize = parse_required(&mut values, "kappa")?;
    let params = RunParams {
        output_prefix: values.shift_remove("outputprefix"),
        genotype: parse_optional(&mut values, "genotype")?,
        graph_source,
        path_labels: values.shift_remove("pathlabels").map(PathBuf::from),
        alpha,
        kappa,
        case_ctrl: parse_optional(&mut values, "casectrl")?.unwrap_or(false),
        min_support: parse_optional(&mut values, "minsup")?,
        min_size: parse_optional(&mut values, "minsize")?,
        min_length: parse_optional(&mut values, "minlen")?,
        date: values.shift_remove("date"),
        clocktime: values.shift_remove("clocktime")
    };

    for key in values.keys() {
        warn!("Ignoring unknown params key: {key}");
    }
    Ok(params)
}

fn parse_required<T>(values: &mut IndexMap<String, String>, key: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static
{
    parse_optional(values, key)?.ok_or(anyhow!("Missing required key: {key}"))
}

fn parse_optional<T>(values: &mut IndexMap<String, String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static
{
    match values.shift_remove(key) {
        Some(v) => {
            let parsed = v.parse::<T>()
                .with_context(|| format!("Invalid value for {key}: {v:?}"))?;
            Ok(Some(parsed))
        },
        None => Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let dir = tempfile::tempdir().unwrap();
        let filename = dir.path().join("run.params.txt");
        std::fs::write(&filename, "outputprefix\trun\ngfafile\tgraph.gfa\nalpha\t0.7\nkappa\t5\ncasectrl\ttrue\nminsup\t3\nextra\tvalue\n").unwrap();

        let params = load_run_params(&filename).unwrap();
        assert_eq!(params.output_prefix.as_deref(), Some("run"));
        assert_eq!(params.graph_source, GraphSource::Gfa(PathBuf::from("graph.gfa")));
        assert_eq!(params.alpha, 0.7);
        assert_eq!(params.kappa, 5);
        assert!(params.case_ctrl);
        assert_eq!(params.genotype, None);
        assert_eq!(params.region_filter(), RegionFilter { min_support: 3, min_size: 0, min_length: 0.0 });

        let config = params.finder_config(SearchStrategy::Serial).unwrap();
        assert_eq!(config.kappa(), 5);
        assert!(config.case_ctrl());
    }

    #[test]
    fn test_rows_skip_missing() {
        let params = RunParams {
            output_prefix: None,
            genotype: Some(1),
            graph_source: GraphSource::VgJson(PathBuf::from("g.json")),
            path_labels: None,
            alpha: 1.0,
            kappa: 0,
            case_ctrl: false,
            min_support: None,
            min_size: Some(2),
            min_length: None,
            date: None,
            clocktime: None
        };
        let keys: Vec<&str> = params.rows().iter().map(|(k, _v)| *k).collect();
        assert_eq!(keys, vec!["genotype", "jsonfile", "alpha", "kappa", "casectrl", "minsize"]);
    }

    #[test]
    fn test_bad_params() {
        let mut values: IndexMap<String, String> = Default::default();
        values.insert("gfafile".to_string(), "g.gfa".to_string());
        values.insert("alpha".to_string(), "1.0".to_string());
        // missing kappa
        assert!(parse_values(values.clone()).is_err());

        values.insert("kappa".to_string(), "-3".to_string());
        assert!(parse_values(values.clone()).is_err());

        values.insert("kappa".to_string(), "3".to_string());
        values.insert("jsonfile".to_string(), "g.json".to_string());
        assert!(parse_values(values).is_err());
    }
}
