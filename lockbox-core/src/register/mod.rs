mod error;
mod field;
mod file;
mod transaction;

pub use error::RegisterError;
pub use field::{field_mask, Field, FieldWrite};
pub use file::RegisterFile;
pub use transaction::{StagedWord, Transaction};
