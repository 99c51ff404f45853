//! Persistent top-10 tables for won games.

pub use error::*;
pub use prompt::*;
pub use records::*;
pub use store::*;

mod error;
mod prompt;
mod records;
mod store;
