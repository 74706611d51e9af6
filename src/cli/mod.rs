/*!
# CLI module
Command line interface functionality that is specific to FR Finder.
*/

/// The main CLI module that contains the top-level CLI parser and help text
pub mod core;
/// The find CLI subcommand
pub mod find;
/// The postprocess CLI subcommand
pub mod postprocess;
