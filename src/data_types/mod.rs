/// Candidate merge of two regions with its ranking key
pub mod fr_pair;
/// A node cluster with its supporting subpaths
pub mod frequented_region;
/// The full graph: node table, genome paths, and label tallies
pub mod graph;
/// Small hand-built graphs for unit tests
#[cfg(test)]
pub mod mock_graphs;
/// A single graph node
pub mod node;
/// Sorted, de-duplicated node IDs; the identity of a region
pub mod node_set;
/// Genome paths and the subpaths cut from them
pub mod path;
