pub mod filter;

pub use filter::{filter_document, filter_graph, FilteredGraph};
