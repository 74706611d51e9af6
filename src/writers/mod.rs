/*!
# Writers module
Contains the logic for writing the output files of a search.
All file outputs are tab-delimited and written atomically.
*/
/// Generates the FR summary table
pub mod frs;
/// Generates the params file that allows a run to be resumed
pub mod params;
/// Generates the per-path FR count matrix
pub mod path_frs;
/// Wrapper that handles the parallel writing of all outputs for a run
pub mod run_outputs;
/// Generates the subpaths file, the full record of every accepted FR
pub mod subpaths;
/// Generates the SVM-light style feature file
pub mod svm;

/// Shared tab-delimited writer setup; rows are allowed to have different lengths and are never quoted
pub fn tsv_writer<W: std::io::Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer)
}
