/*!
# FR Finder
Mines frequented regions from the genome paths of a pangenome graph.
A frequented region is a cluster of graph nodes that many genomes traverse, allowing some nodes to be skipped (`alpha`) and some inserted sequence in between (`kappa`).
The search is agglomerative: it starts from single nodes and repeatedly merges the best pair of regions until nothing new can be added.
*/

/// Command line interface functionality
pub mod cli;
/// Contains various shared data types
pub mod data_types;
/// Contains the round-based region search
pub mod fr_finder;
/// Tooling for parsing input files into meaningful structs / data
pub mod parsing;
/// Contains the core support computation for a cluster on a single path
pub mod support_solver;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
