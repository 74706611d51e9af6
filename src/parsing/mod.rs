/*!
# Parsing module
Contains the logic for parsing input files into meaningful structs / data.
*/
/// GFA v1 graph loader, supports S, P, and W lines
pub mod gfa;
/// Reader for the path label file
pub mod path_labels;
/// Reader for the params file written by a prior run
pub mod run_params;
/// Reader for the subpaths file written by a prior run
pub mod subpaths;
/// vg JSON graph loader
pub mod vg_json;
/// Collects genome walks from a loader and assembles them into a graph
pub mod walk_collector;
