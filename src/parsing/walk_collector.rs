use anyhow::Context;
use indexmap::IndexMap;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data_types::graph::Graph;
use crate::data_types::node::Node;
use crate::data_types::path::Path;

/// Accumulates segments and genome walks while a graph file is read.
/// Walks that share a sample name and genotype (e.g. one per contig) become one genome path, in the order they are added.
/// Each walk stays disconnected from the others on that path, so no subpath spans two walks.
#[derive(Debug, Default)]
pub struct WalkCollector {
    /// Node lookup by ID
    nodes: BTreeMap<i64, Arc<Node>>,
    /// Walks as node IDs, grouped by (name, genotype) in first-seen order
    walks: IndexMap<(String, Option<u32>), Vec<Vec<i64>>>,
}

impl WalkCollector {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a node. If the ID is already present, the first definition is kept.
    /// Returns false if the node was a duplicate.
    pub fn add_node(&mut self, id: i64, sequence: String) -> bool {
        if let Some(existing) = self.nodes.get(&id) {
            if existing.sequence() != sequence {
                warn!("Node {id} is defined more than once with different sequences, keeping the first");
            }
            false
        } else {
            self.nodes.insert(id, Arc::new(Node::new(id, sequence)));
            true
        }
    }

    /// Adds a walk to the genome for this name and genotype
    pub fn add_walk(&mut self, name: String, genotype: Option<u32>, node_ids: Vec<i64>) {
        let walks = self.walks.entry((name, genotype)).or_default();
        if !walks.is_empty() {
            debug!("Adding walk {} with {} nodes to an existing genome", walks.len() + 1, node_ids.len());
        }
        walks.push(node_ids);
    }

    /// Returns true if the node was already added
    pub fn contains_node(&self, id: i64) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_walks(&self) -> usize {
        self.walks.len()
    }

    /// Resolves all walks and builds the graph
    /// # Arguments
    /// * `genotype_filter` - if set, only walks with this genotype are kept
    /// # Errors
    /// * if a walk references an undefined node
    pub fn into_graph(self, genotype_filter: Option<u32>) -> anyhow::Result<Graph> {
        let mut paths = Vec::with_capacity(self.walks.len());
        for ((name, genotype), walk_ids) in self.walks.into_iter() {
            let walks: Vec<Vec<Arc<Node>>> = walk_ids.iter()
                .map(|node_ids| {
                    node_ids.iter()
                        .map(|id| {
                            self.nodes.get(id)
                                .cloned()
                                .with_context(|| format!("Path {name:?} references undefined node {id}"))
                        })
                        .collect::<anyhow::Result<Vec<_>>>()
                })
                .collect::<anyhow::Result<_>>()?;
            paths.push(Path::from_walks(name, genotype, None, walks));
        }
        Graph::new(self.nodes, paths, genotype_filter)
    }
}
