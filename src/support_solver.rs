/*!
# Support Solver
Identifies the subpaths of a genome path that support a node cluster.
A subpath supports a cluster when it covers at least `alpha` of the cluster nodes, and no two consecutive cluster nodes on it are separated by more than `kappa` bases of other sequence.

## Example usage
```rust
use frfinder::data_types::node::Node;
use frfinder::data_types::node_set::NodeSet;
use frfinder::data_types::path::Path;
use frfinder::support_solver::compute_support;
use std::sync::Arc;

// 1 -> 2 -> 3, where node 2 is a 3 bp insertion
let nodes: Vec<Arc<Node>> = [(1, "ACGT"), (2, "TTT"), (3, "GGCC")].into_iter()
    .map(|(id, seq)| Arc::new(Node::new(id, seq.to_string())))
    .collect();
let path = Path::new("sample".to_string(), None, None, nodes);
let cluster = NodeSet::new([1, 3]).unwrap();

// the insertion is too long for kappa = 2, so neither side covers the full cluster
let support = compute_support(&cluster, &path, 1.0, 2).unwrap();
assert!(support.is_empty());

// with kappa = 3 the insertion is tolerated and the subpath spans 1 -> 2 -> 3
let support = compute_support(&cluster, &path, 1.0, 3).unwrap();
assert_eq!(support.len(), 1);
assert_eq!(support[0].node_ids(), vec![1, 2, 3]);
```
*/
use log::trace;
use rustc_hash::FxHashSet as HashSet;

use crate::data_types::node_set::NodeSet;
use crate::data_types::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum SupportError {
    #[error("run of {run_nodes} cluster nodes on {path} passed alpha for {cluster} but produced an empty subpath")]
    EmptySubpath { path: String, cluster: String, run_nodes: usize },
    #[error("run {first}..={last} is outside of path {path}")]
    InvalidRun { path: String, first: usize, last: usize },
}

/// Minimum number of distinct cluster nodes a run needs to pass the penetrance test.
/// Includes a small tolerance so that values like 0.7 * 10 do not round up past 7.
/// # Arguments
/// * `alpha` - the penetrance fraction
/// * `cluster_size` - the number of nodes in the cluster
pub fn min_supporting_nodes(alpha: f64, cluster_size: usize) -> usize {
    let required = alpha * cluster_size as f64 - 1e-9;
    if required <= 0.0 {
        0
    } else {
        required.ceil() as usize
    }
}

/// Core support computation for a single path.
/// Returns every supporting subpath, in path order.
/// # Arguments
/// * `nodes` - the cluster we are testing
/// * `path` - the full genome path to scan
/// * `alpha` - penetrance, the minimum fraction of cluster nodes a run must cover
/// * `kappa` - maximum number of intervening off-cluster bases between consecutive cluster nodes
/// # Errors
/// * if a run passing the alpha test ends up with no nodes, which indicates a gap computation bug
pub fn compute_support(nodes: &NodeSet, path: &Path, alpha: f64, kappa: usize) -> Result<Vec<Path>, SupportError> {
    // positions along the path where we hit a cluster node
    let retained: Vec<usize> = path.nodes().iter()
        .enumerate()
        .filter_map(|(i, n)| {
            if nodes.contains(n.id()) {
                Some(i)
            } else {
                None
            }
        })
        .collect();

    if retained.is_empty() {
        return Ok(vec![]);
    }

    // split into maximal runs where each gap is <= kappa, runs never continue onto a separate walk
    let mut runs: Vec<&[usize]> = vec![];
    let mut run_start = 0;
    for w in 1..retained.len() {
        let (prev, next) = (retained[w-1], retained[w]);
        if path.crosses_break(prev, next) || path.gap(prev, next) > kappa {
            runs.push(&retained[run_start..w]);
            run_start = w;
        }
    }
    runs.push(&retained[run_start..]);

    let min_nodes = min_supporting_nodes(alpha, nodes.len());
    let mut supporting = vec![];
    for run in runs.into_iter() {
        // a looping path can hit the same node more than once, only distinct nodes count towards penetrance
        let distinct: HashSet<i64> = run.iter().map(|&i| path.nodes()[i].id()).collect();
        if distinct.len() < min_nodes {
            continue;
        }

        let (first, last) = match (run.first(), run.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => {
                return Err(SupportError::EmptySubpath {
                    path: path.identifier(), cluster: nodes.to_string(), run_nodes: distinct.len()
                });
            }
        };

        let subpath = path.subpath(first, last)
            .map_err(|_e| SupportError::InvalidRun { path: path.identifier(), first, last })?;
        if subpath.is_empty() {
            return Err(SupportError::EmptySubpath {
                path: path.identifier(), cluster: nodes.to_string(), run_nodes: distinct.len()
            });
        }
        trace!("{} supports {nodes} via {}", path.identifier(), subpath.node_id_list());
        supporting.push(subpath);
    }

    Ok(supporting)
}
