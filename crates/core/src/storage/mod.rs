mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use http_mapping::{
    record_error_to_status_code, repository_error_to_status_code,
    validation_error_to_status_code,
};
pub use traits::RecordStore;
pub use types::{FieldFilter, RecordKey, RecordQuery};
