pub mod error;

pub use error::{GymError, Result, ResultExt, ValidationError, ValidationErrorKind};

/// Store-assigned surrogate key (`_id`) of any row.
pub type RowId = i64;
