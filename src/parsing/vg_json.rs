use anyhow::{bail, Context};
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

use crate::data_types::graph::Graph;
use crate::parsing::walk_collector::WalkCollector;
use crate::util::json_io::load_json;

/// Prefix vg uses for haplotype thread paths
const THREAD_PREFIX: &str = "_thread_";

/// vg writes IDs as strings in some versions and as numbers in others
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum JsonId {
    Number(i64),
    Text(String),
}

impl JsonId {
    fn to_id(&self) -> anyhow::Result<i64> {
        match self {
            JsonId::Number(id) => Ok(*id),
            JsonId::Text(text) => text.parse::<i64>()
                .with_context(|| format!("node ID {text:?} is not an integer"))
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonGraph {
    #[serde(default)]
    node: Vec<JsonNode>,
    #[serde(default)]
    path: Vec<JsonPath>,
}

#[derive(Debug, Deserialize)]
struct JsonNode {
    id: JsonId,
    #[serde(default)]
    sequence: String,
}

#[derive(Debug, Deserialize)]
struct JsonPath {
    name: String,
    #[serde(default)]
    mapping: Vec<JsonMapping>,
}

#[derive(Debug, Deserialize)]
struct JsonMapping {
    position: JsonPosition,
}

#[derive(Debug, Deserialize)]
struct JsonPosition {
    node_id: JsonId,
}

/// Sample name and genotype decoded from a vg path name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathName {
    pub sample: String,
    pub genotype: Option<u32>,
}

/// Decodes a vg path name.
/// Thread names look like `_thread_<sample>_<contig>_<genotype>_<n>`, they are split from the right so sample names may contain underscores.
/// Any other name is used as is with no genotype.
pub fn decode_path_name(name: &str) -> PathName {
    if let Some(body) = name.strip_prefix(THREAD_PREFIX) {
        let fields: Vec<&str> = body.rsplitn(4, '_').collect();
        if fields.len() == 4 {
            // reversed: n, genotype, contig, sample
            if let (Ok(_n), Ok(genotype)) = (fields[0].parse::<u32>(), fields[1].parse::<u32>()) {
                return PathName {
                    sample: fields[3].to_string(),
                    genotype: Some(genotype)
                };
            }
        }
        debug!("Path {name:?} looks like a thread but could not be decoded");
    }
    PathName { sample: name.to_string(), genotype: None }
}

/// Loads a vg JSON graph, gzipped input is detected by the ".gz" extension.
/// Threads of the same sample and genotype form one genome path in file order, each thread kept as its own walk.
/// # Arguments
/// * `filename` - the JSON file to load
/// * `genotype_filter` - if set, only paths with this genotype are kept
/// # Errors
/// * if the file cannot be read or deserialized
/// * if an ID is not an integer or a path references an undefined node
pub fn load_vg_json(filename: &Path, genotype_filter: Option<u32>) -> anyhow::Result<Graph> {
    info!("Loading vg JSON graph from {filename:?}...");
    let json_graph: JsonGraph = load_json(filename)?;
    let graph = build_graph(json_graph, genotype_filter)
        .with_context(|| format!("Error while building graph from {filename:?}:"))?;
    info!("Loaded {} nodes and {} paths.", graph.nodes().len(), graph.paths().len());
    Ok(graph)
}

fn build_graph(json_graph: JsonGraph, genotype_filter: Option<u32>) -> anyhow::Result<Graph> {
    let mut collector = WalkCollector::new();
    for node in json_graph.node.into_iter() {
        collector.add_node(node.id.to_id()?, node.sequence);
    }

    for path in json_graph.path.into_iter() {
        let node_ids: Vec<i64> = path.mapping.iter()
            .map(|m| m.position.node_id.to_id())
            .collect::<anyhow::Result<_>>()
            .with_context(|| format!("Error in path {:?}", path.name))?;
        if let Some(missing) = node_ids.iter().find(|&&id| !collector.contains_node(id)) {
            bail!("path {:?} references undefined node {missing}", path.name);
        }
        let decoded = decode_path_name(&path.name);
        collector.add_walk(decoded.sample, decoded.genotype, node_ids);
    }
    collector.into_graph(genotype_filter)
}
