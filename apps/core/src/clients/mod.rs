//! HTTP implementations of the collaborator traits.

pub mod line;
pub mod search;

pub use line::LineClient;
pub use search::HttpSearchClient;
