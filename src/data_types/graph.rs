use anyhow::bail;
use indexmap::IndexMap;
use log::{debug, warn};
use rustc_hash::FxHashMap as HashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data_types::node::Node;
use crate::data_types::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("node {id} is not defined in the graph")]
    UnknownNode { id: i64 },
    #[error("path {name:?} (genotype {genotype:?}) is not defined in the graph")]
    UnknownPath { name: String, genotype: Option<u32> },
}

/// The complete pangenome graph: every node and every genome path through it.
/// This is read-only for the whole search and gets shared across worker threads.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// Node lookup by ID
    nodes: BTreeMap<i64, Arc<Node>>,
    /// All genome paths, in loader order
    paths: Vec<Path>,
    /// Lookup from (name, genotype) to the index in `paths`
    path_index: HashMap<(String, Option<u32>), usize>,
    /// If set, only paths with this genotype were kept
    genotype_filter: Option<u32>,
    /// Number of paths carrying each label
    label_counts: BTreeMap<String, usize>,
}

impl Graph {
    /// Constructor from a loaded node table and the full genome paths.
    /// # Arguments
    /// * `nodes` - the node table
    /// * `paths` - every genome path; nodes must come from `nodes`
    /// * `genotype_filter` - if set, paths with any other genotype are dropped
    /// # Errors
    /// * if two paths share the same name and genotype
    /// * if a path references a node that is not in the table
    pub fn new(nodes: BTreeMap<i64, Arc<Node>>, paths: Vec<Path>, genotype_filter: Option<u32>) -> anyhow::Result<Self> {
        let mut kept = Vec::with_capacity(paths.len());
        let mut path_index: HashMap<(String, Option<u32>), usize> = Default::default();
        for path in paths.into_iter() {
            if genotype_filter.is_some() && path.genotype() != genotype_filter {
                debug!("Skipping path {} due to genotype filter", path.identifier());
                continue;
            }

            if let Some(missing) = path.nodes().iter().find(|n| !nodes.contains_key(&n.id())) {
                return Err(GraphError::UnknownNode { id: missing.id() }.into());
            }

            let key = (path.name().to_string(), path.genotype());
            if path_index.contains_key(&key) {
                bail!("Duplicate path detected: {} (genotype {:?})", key.0, key.1);
            }
            path_index.insert(key, kept.len());
            kept.push(path);
        }

        let mut graph = Self {
            nodes,
            paths: kept,
            path_index,
            genotype_filter,
            label_counts: Default::default()
        };
        graph.tally_labels();
        Ok(graph)
    }

    /// Applies labels to every path by sample name, replacing any prior labels.
    /// Names in the label map that match no path are reported as warnings.
    /// # Arguments
    /// * `labels` - lookup from path name to label
    pub fn apply_labels(&mut self, labels: &IndexMap<String, String>) {
        let paths = std::mem::take(&mut self.paths);
        self.paths = paths.into_iter()
            .map(|p| {
                let label = labels.get(p.name()).cloned();
                p.with_label(label)
            })
            .collect();

        for name in labels.keys() {
            if !self.paths.iter().any(|p| p.name() == name) {
                warn!("Path label provided for {name:?}, but no path has that name");
            }
        }
        self.tally_labels();
    }

    /// Recounts the number of paths per label
    fn tally_labels(&mut self) {
        self.label_counts.clear();
        for path in self.paths.iter() {
            if let Some(label) = path.label() {
                *self.label_counts.entry(label.to_string()).or_insert(0) += 1;
            }
        }
    }

    /// Looks up a node by ID
    pub fn node(&self, id: i64) -> Result<&Arc<Node>, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::UnknownNode { id })
    }

    /// Resolves a list of node IDs into node handles
    /// # Errors
    /// * if any ID is not in the graph
    pub fn resolve_nodes(&self, ids: &[i64]) -> Result<Vec<Arc<Node>>, GraphError> {
        ids.iter().map(|&id| self.node(id).cloned()).collect()
    }

    /// Looks up a full genome path by name and genotype
    pub fn path(&self, name: &str, genotype: Option<u32>) -> Result<&Path, GraphError> {
        self.path_index.get(&(name.to_string(), genotype))
            .map(|&i| &self.paths[i])
            .ok_or_else(|| GraphError::UnknownPath { name: name.to_string(), genotype })
    }

    /// Number of paths labeled as case
    pub fn case_paths(&self) -> usize {
        self.paths.iter().filter(|p| p.is_case()).count()
    }

    /// Number of paths labeled as control
    pub fn control_paths(&self) -> usize {
        self.paths.iter().filter(|p| p.is_control()).count()
    }

    /// The sorted set of labels observed on paths
    pub fn labels(&self) -> Vec<&str> {
        self.label_counts.keys().map(|l| l.as_str()).collect()
    }

    // getters
    pub fn nodes(&self) -> &BTreeMap<i64, Arc<Node>> {
        &self.nodes
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn genotype_filter(&self) -> Option<u32> {
        self.genotype_filter
    }

    pub fn label_counts(&self) -> &BTreeMap<String, usize> {
        &self.label_counts
    }
}
