pub mod error;

pub use error::{ClearBranchesError, Result};
