/*!
# CLI module
Command line interface functionality that is specific to snpdedup.
*/

/// The main CLI module that contains the top-level CLI parser and help text
pub mod core;
/// The deduplicate CLI subcommand
pub mod deduplicate;
