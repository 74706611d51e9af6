use anyhow::{bail, Context};
use log::{debug, info};
use std::io::BufRead;
use std::path::Path;

use crate::data_types::graph::Graph;
use crate::parsing::walk_collector::WalkCollector;
use crate::util::json_io::open_reader;

/// Loads a GFA v1 file into a graph, gzipped input is detected by the ".gz" extension.
/// Segment names must be integers, they become the node IDs.
/// `P` lines become paths named after the path with no genotype; `W` lines become paths named after the sample with the haplotype index as genotype.
/// Orientation is ignored and all other record types are skipped.
/// # Arguments
/// * `filename` - the GFA file to load
/// * `genotype_filter` - if set, only paths with this genotype are kept
/// # Errors
/// * if the file cannot be opened or read
/// * if a record is malformed or a path references an undefined segment, the line number is reported
pub fn load_gfa(filename: &Path, genotype_filter: Option<u32>) -> anyhow::Result<Graph> {
    info!("Loading GFA graph from {filename:?}...");
    let reader = open_reader(filename)?;
    let graph = parse_gfa(reader, genotype_filter)
        .with_context(|| format!("Error while parsing {filename:?}:"))?;
    info!("Loaded {} nodes and {} paths.", graph.nodes().len(), graph.paths().len());
    Ok(graph)
}

/// Parses GFA content from any buffered reader, see `load_gfa`
pub fn parse_gfa<R: BufRead>(reader: R, genotype_filter: Option<u32>) -> anyhow::Result<Graph> {
    let mut collector = WalkCollector::new();
    // paths are checked after every segment is known, segments may come later in the file
    let mut pending: Vec<(usize, String, Option<u32>, Vec<i64>)> = vec![];
    for (line_index, line) in reader.lines().enumerate() {
        let line_num = line_index + 1;
        let line = line.with_context(|| format!("Error while reading line {line_num}"))?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        match fields[0] {
            "S" => {
                if fields.len() < 3 {
                    bail!("line {line_num}: S record has {} fields, expected at least 3", fields.len());
                }
                let id = parse_segment_id(fields[1], line_num)?;
                if !collector.add_node(id, fields[2].to_string()) {
                    debug!("line {line_num}: duplicate segment {id}");
                }
            },
            "P" => {
                // P <name> <segments> <overlaps>
                if fields.len() < 3 {
                    bail!("line {line_num}: P record has {} fields, expected at least 3", fields.len());
                }
                let node_ids = parse_path_segments(fields[2], line_num)?;
                pending.push((line_num, fields[1].to_string(), None, node_ids));
            },
            "W" => {
                // W <sample> <hap index> <contig> <start> <end> <walk>
                if fields.len() < 7 {
                    bail!("line {line_num}: W record has {} fields, expected at least 7", fields.len());
                }
                let genotype: u32 = fields[2].parse()
                    .with_context(|| format!("line {line_num}: invalid haplotype index {:?}", fields[2]))?;
                let node_ids = parse_walk_segments(fields[6], line_num)?;
                pending.push((line_num, fields[1].to_string(), Some(genotype), node_ids));
            },
            _ => {
                // H, L, C, and anything else carry nothing we need
            }
        }
    }

    for (line_num, name, genotype, node_ids) in pending.into_iter() {
        if let Some(missing) = node_ids.iter().find(|&&id| !collector.contains_node(id)) {
            bail!("line {line_num}: path {name:?} references undefined segment {missing}");
        }
        collector.add_walk(name, genotype, node_ids);
    }
    collector.into_graph(genotype_filter)
}

/// Segment names are our node IDs, so they must be integers
fn parse_segment_id(value: &str, line_num: usize) -> anyhow::Result<i64> {
    value.parse::<i64>()
        .with_context(|| format!("line {line_num}: segment name {value:?} is not an integer"))
}

/// Parses a P line segment list, e.g. "11+,12-,13+"
fn parse_path_segments(value: &str, line_num: usize) -> anyhow::Result<Vec<i64>> {
    value.split(',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            let name = s.strip_suffix(['+', '-'])
                .with_context(|| format!("line {line_num}: path step {s:?} is missing an orientation"))?;
            parse_segment_id(name, line_num)
        })
        .collect()
}

/// Parses a W line walk, e.g. ">11<12>13"
fn parse_walk_segments(value: &str, line_num: usize) -> anyhow::Result<Vec<i64>> {
    if !value.is_empty() && !value.starts_with(['>', '<']) {
        bail!("line {line_num}: walk {value:?} must start with an orientation");
    }
    value.split(['>', '<'])
        .filter(|s| !s.is_empty())
        .map(|s| parse_segment_id(s, line_num))
        .collect()
}
