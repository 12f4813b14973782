//! Request-scoped context module.
//!
//! Provides the `RequestContext` extractor that resolves the record owner and
//! request id for each request, complementing application-scoped `AppState`.

mod extractor;
mod types;

pub use extractor::{OWNER_HEADER, REQUEST_ID_HEADER};
pub use types::{RequestContext, RequestId};
