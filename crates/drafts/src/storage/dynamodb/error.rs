//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `drafts_core::storage`.
//! Only the conditional checks differ per operation; everything else goes
//! through the shared transport and service mappings.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use drafts_core::storage::RepositoryError;

fn dispatch_failure<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError> {
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Some(
            RepositoryError::ConnectionFailed("Could not reach DynamoDB".to_string()),
        ),
        _ => None,
    }
}

/// Maps the service errors all table operations share, by error code.
fn service_failure<E: ProvideErrorMetadata + Debug>(operation: &str, err: &E) -> RepositoryError {
    let reason = match err.code() {
        Some("ResourceNotFoundException") => "table not found",
        Some(
            "ProvisionedThroughputExceededException"
            | "RequestLimitExceeded"
            | "ThrottlingException",
        ) => "throughput exceeded, please retry",
        Some("TransactionConflictException") => "transaction conflict, please retry",
        Some("ItemCollectionSizeLimitExceededException") => "item collection size limit exceeded",
        Some("InternalServerError") => "DynamoDB internal server error",
        _ => return RepositoryError::QueryFailed(format!("{operation} failed: {err:?}")),
    };
    RepositoryError::QueryFailed(format!("{operation} failed: {reason}"))
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    dispatch_failure(&err)
        .unwrap_or_else(|| service_failure("GetItem", &err.into_service_error()))
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    dispatch_failure(&err).unwrap_or_else(|| service_failure("Query", &err.into_service_error()))
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> RepositoryError {
    dispatch_failure(&err)
        .unwrap_or_else(|| service_failure("DeleteItem", &err.into_service_error()))
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(e) = dispatch_failure(&err) {
        return e;
    }
    put_item_failure(err.into_service_error(), entity_type, id.into())
}

/// A failed `attribute_not_exists` condition means the key is taken.
fn put_item_failure(err: PutItemError, entity_type: &'static str, id: String) -> RepositoryError {
    match err {
        PutItemError::ConditionalCheckFailedException(_) => {
            RepositoryError::AlreadyExists { entity_type, id }
        }
        err => service_failure("PutItem", &err),
    }
}

/// Map an UpdateItem SDK error to RepositoryError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(e) = dispatch_failure(&err) {
        return e;
    }
    update_item_failure(err.into_service_error(), entity_type, id.into())
}

/// A failed condition returns the old item when the record exists, in which
/// case its expected field value no longer matched.
fn update_item_failure(
    err: UpdateItemError,
    entity_type: &'static str,
    id: String,
) -> RepositoryError {
    match err {
        UpdateItemError::ConditionalCheckFailedException(e) if e.item().is_some() => {
            RepositoryError::Conflict { entity_type, id }
        }
        UpdateItemError::ConditionalCheckFailedException(_) => {
            RepositoryError::NotFound { entity_type, id }
        }
        err => service_failure("UpdateItem", &err),
    }
}
