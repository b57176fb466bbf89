//! Source data providers.

mod delimited;
mod provider;

pub use delimited::DelimitedTable;
pub use provider::{SourceMetadata, TableSource};
