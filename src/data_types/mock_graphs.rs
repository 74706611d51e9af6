/*!
Small hand-built graphs shared by the unit tests.
*/
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data_types::graph::Graph;
use crate::data_types::node::Node;
use crate::data_types::path::Path;

/// Builds a graph from a node list and a list of (name, genotype, node IDs) paths
pub fn build_graph(nodes: &[(i64, &str)], paths: &[(&str, Option<u32>, &[i64])]) -> Graph {
    let node_map: BTreeMap<i64, Arc<Node>> = nodes.iter()
        .map(|&(id, seq)| (id, Arc::new(Node::new(id, seq.to_string()))))
        .collect();
    let paths: Vec<Path> = paths.iter()
        .map(|&(name, genotype, ids)| {
            let path_nodes = ids.iter().map(|id| node_map[id].clone()).collect();
            Path::new(name.to_string(), genotype, None, path_nodes)
        })
        .collect();
    Graph::new(node_map, paths, None).unwrap()
}

/// Three nodes of 4 bp each, with two genomes that both walk 1 -> 2 -> 3
pub fn three_node_graph() -> Graph {
    build_graph(
        &[(1, "ACGT"), (2, "CCCC"), (3, "GGTT")],
        &[("p1", None, &[1, 2, 3]), ("p2", None, &[1, 2, 3])]
    )
}

/// Ten case genomes walk 1 -> 2 -> 3 and ten control genomes skip node 2 via 1 -> 3
pub fn case_control_graph() -> Graph {
    let case_route: &[i64] = &[1, 2, 3];
    let ctrl_route: &[i64] = &[1, 3];
    let names: Vec<(String, bool)> = (0..10).map(|i| (format!("case{i}"), true))
        .chain((0..10).map(|i| (format!("ctrl{i}"), false)))
        .collect();
    let paths: Vec<(&str, Option<u32>, &[i64])> = names.iter()
        .map(|(name, is_case)| (name.as_str(), Some(0), if *is_case { case_route } else { ctrl_route }))
        .collect();
    let mut graph = build_graph(&[(1, "AAAA"), (2, "CC"), (3, "GGGG")], &paths);

    let labels: IndexMap<String, String> = names.iter()
        .map(|(name, is_case)| (name.clone(), if *is_case { "case" } else { "ctrl" }.to_string()))
        .collect();
    graph.apply_labels(&labels);
    graph
}
