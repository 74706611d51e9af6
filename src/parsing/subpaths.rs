use anyhow::{bail, ensure, Context};
use log::{info, warn};
use std::io::BufRead;
use std::path::Path as FilePath;

use crate::data_types::frequented_region::FrequentedRegion;
use crate::data_types::graph::Graph;
use crate::data_types::node_set::NodeSet;
use crate::data_types::path::Path;
use crate::util::json_io::open_reader;

/// Region header that is still collecting its subpath lines
struct PendingRegion {
    line_num: usize,
    nodes: NodeSet,
    support: usize,
    avg_length: f64,
    subpaths: Vec<Path>,
}

/// Loads the regions from a subpaths file written by a prior run.
/// Every subpath is resolved against the live graph, so the graph must be the one the file was written from.
/// # Arguments
/// * `filename` - the subpaths file
/// * `graph` - the graph to resolve node IDs and genomes against
/// * `alpha` - penetrance parameter of the prior run
/// * `kappa` - maximum insertion parameter of the prior run
/// # Errors
/// * if the file cannot be read
/// * if a line is malformed, names an unknown node or genome, or a region has the wrong number of subpath lines
pub fn load_subpaths(filename: &FilePath, graph: &Graph, alpha: f64, kappa: usize) -> anyhow::Result<Vec<FrequentedRegion>> {
    let reader = open_reader(filename)?;
    let regions = parse_subpaths(reader, graph, alpha, kappa)
        .with_context(|| format!("Error while parsing {filename:?}:"))?;
    info!("Loaded {} regions from {filename:?}", regions.len());
    Ok(regions)
}

/// Parses subpaths content from any buffered reader, see `load_subpaths`
pub fn parse_subpaths<R: BufRead>(reader: R, graph: &Graph, alpha: f64, kappa: usize) -> anyhow::Result<Vec<FrequentedRegion>> {
    let mut regions = vec![];
    let mut pending: Option<PendingRegion> = None;
    for (line_index, line) in reader.lines().enumerate() {
        let line_num = line_index + 1;
        let line = line.with_context(|| format!("Error while reading line {line_num}"))?;
        if line.is_empty() {
            continue;
        }

        if is_region_header(&line) {
            if let Some(region) = pending.take() {
                regions.push(finish_region(region, alpha, kappa)?);
            }
            pending = Some(parse_header(&line, line_num)?);
        } else {
            let Some(region) = pending.as_mut() else {
                bail!("line {line_num}: subpath found before any region header");
            };
            if region.subpaths.len() == region.support {
                bail!("line {line_num}: region {} declared support {} but has more subpath lines", region.nodes, region.support);
            }
            region.subpaths.push(parse_subpath(&line, line_num, graph)?);
        }
    }

    if let Some(region) = pending.take() {
        regions.push(finish_region(region, alpha, kappa)?);
    }
    Ok(regions)
}

/// Region headers have three tab separated fields, subpath lines always carry a ':' before the node list
fn is_region_header(line: &str) -> bool {
    line.split('\t').count() == 3 && !line.contains(':')
}

/// Parses `<NodeSet>\t<support>\t<avgLen>`
fn parse_header(line: &str, line_num: usize) -> anyhow::Result<PendingRegion> {
    let fields: Vec<&str> = line.split('\t').collect();
    ensure!(fields.len() == 3, "line {line_num}: region header has {} fields, expected 3", fields.len());
    let nodes: NodeSet = fields[0].parse()
        .with_context(|| format!("line {line_num}: invalid node set"))?;
    let support: usize = fields[1].parse()
        .with_context(|| format!("line {line_num}: invalid support {:?}", fields[1]))?;
    let avg_length: f64 = fields[2].parse()
        .with_context(|| format!("line {line_num}: invalid average length {:?}", fields[2]))?;
    Ok(PendingRegion {
        line_num, nodes, support, avg_length,
        subpaths: Vec::with_capacity(support)
    })
}

/// Parses `<name>.<genotype>.<label>:[ids]` and resolves it against the graph.
/// The label is taken from the graph genome, so re-labeling a run is possible.
fn parse_subpath(line: &str, line_num: usize, graph: &Graph) -> anyhow::Result<Path> {
    let Some((identifier, id_list)) = line.rsplit_once(':') else {
        bail!("line {line_num}: subpath is missing the ':' separator");
    };

    // name can contain '.', so split from the right
    let fields: Vec<&str> = identifier.rsplitn(3, '.').collect();
    ensure!(fields.len() == 3, "line {line_num}: invalid path identifier {identifier:?}");
    let (name, genotype_str) = (fields[2], fields[1]);
    let genotype: Option<u32> = if genotype_str.is_empty() {
        None
    } else {
        Some(genotype_str.parse()
            .with_context(|| format!("line {line_num}: invalid genotype {genotype_str:?}"))?)
    };

    let genome = graph.path(name, genotype)
        .with_context(|| format!("line {line_num}: unknown genome"))?;
    let ids = parse_id_list(id_list)
        .with_context(|| format!("line {line_num}: invalid node list {id_list:?}"))?;
    ensure!(!ids.is_empty(), "line {line_num}: subpath has no nodes");
    let nodes = graph.resolve_nodes(&ids)
        .with_context(|| format!("line {line_num}: unknown node"))?;

    Ok(Path::new(name.to_string(), genotype, genome.label().map(|l| l.to_string()), nodes))
}

/// Parses an ordered, possibly repeating node list, e.g. "[1,2,1]"
fn parse_id_list(value: &str) -> anyhow::Result<Vec<i64>> {
    let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) else {
        bail!("node list must be bracketed");
    };
    if inner.is_empty() {
        return Ok(vec![]);
    }
    inner.split(',')
        .map(|token| token.trim().parse::<i64>().with_context(|| format!("invalid node ID {token:?}")))
        .collect()
}

fn finish_region(region: PendingRegion, alpha: f64, kappa: usize) -> anyhow::Result<FrequentedRegion> {
    if region.subpaths.len() != region.support {
        bail!(
            "line {}: region {} declared support {} but has {} subpath lines",
            region.line_num, region.nodes, region.support, region.subpaths.len()
        );
    }

    let fr = FrequentedRegion::from_subpaths(region.nodes, region.subpaths, alpha, kappa);
    if fr.support() != region.support {
        bail!("line {}: region {} has duplicate subpath lines", region.line_num, fr.nodes());
    }
    if (fr.avg_length().round() - region.avg_length.round()).abs() > 0.5 {
        warn!(
            "line {}: region {} declared average length {} but the subpaths average {:.1}",
            region.line_num, fr.nodes(), region.avg_length, fr.avg_length()
        );
    }
    Ok(fr)
}
