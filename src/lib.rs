pub mod errors;
pub mod matching;
pub mod models;
pub mod utils;

pub use errors::{DedupeError, DedupeResult};
pub use models::{CleanedNames, IndexPair, NamePair, ScanStats};
