/// Helper functions for read/writing JSON via serde
pub mod json_io;
/// Helper functions for generating the progress bars
pub mod progress_bar;
/// Disjoint-set forest used for graph connectivity
pub mod union_find;
