pub mod catalog;
pub mod resolver;

pub use catalog::StyleCatalog;
pub use resolver::{CandidateSource, StyleResolver};
