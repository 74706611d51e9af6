/// Writes output files all-or-nothing via a temporary file
pub mod atomic_file;
/// Fisher's exact test and odds ratio for case/control tables
pub mod fisher;
/// Helper functions for opening plain or gzipped inputs and reading JSON via serde
pub mod json_io;
/// Helper functions for generating the progress bars
pub mod progress_bar;
