use std::future::Future;
use std::pin::Pin;

use sqlx::{Sqlite, Transaction};
use tracing::warn;

use workout_core::fault::{FaultContext, FaultKind, StructuredError};

/// A request-scoped transactional context. Commit and rollback both consume
/// the unit of work, so neither can run twice and they cannot be mixed.
pub trait UnitOfWork {
    async fn commit(self) -> Result<(), sqlx::Error>;
    async fn rollback(self) -> Result<(), sqlx::Error>;
}

impl<'c> UnitOfWork for Transaction<'c, Sqlite> {
    async fn commit(self) -> Result<(), sqlx::Error> {
        Transaction::commit(self).await
    }

    async fn rollback(self) -> Result<(), sqlx::Error> {
        Transaction::rollback(self).await
    }
}

/// Classifies a persistence failure. First match wins: a backend-reported
/// constraint violation stays a constraint violation even when the payload
/// also looks malformed.
pub fn classify(err: &sqlx::Error) -> FaultKind {
    match err {
        sqlx::Error::Database(db) => match db.kind() {
            sqlx::error::ErrorKind::UniqueViolation
            | sqlx::error::ErrorKind::ForeignKeyViolation
            | sqlx::error::ErrorKind::NotNullViolation
            | sqlx::error::ErrorKind::CheckViolation => FaultKind::ConstraintViolation,
            _ => FaultKind::Other(err.to_string()),
        },
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_)
        | sqlx::Error::Encode(_)
        | sqlx::Error::TypeNotFound { .. } => FaultKind::InvalidData,
        sqlx::Error::Configuration(_)
        | sqlx::Error::Io(_)
        | sqlx::Error::PoolClosed
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::Protocol(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => FaultKind::Operational,
        other => FaultKind::Other(other.to_string()),
    }
}

/// Terminal failure path: rolls the unit of work back exactly once, then
/// hands the failure to the translator.
pub async fn surface<U: UnitOfWork>(
    uow: U,
    err: sqlx::Error,
    ctx: &FaultContext,
) -> StructuredError {
    if let Err(rollback_err) = uow.rollback().await {
        warn!(error = %rollback_err, "rollback failed while surfacing a fault");
    }
    StructuredError::translate(&classify(&err), ctx)
}

/// Installs the fault boundary around one endpoint operation: run `op`
/// against the unit of work, commit on success, surface on failure. The
/// success path adds no side effects beyond the commit.
pub async fn guard<T, U, F>(mut uow: U, ctx: &FaultContext, op: F) -> Result<T, StructuredError>
where
    U: UnitOfWork,
    F: for<'a> FnOnce(&'a mut U) -> Pin<Box<dyn Future<Output = Result<T, sqlx::Error>> + Send + 'a>>,
{
    match op(&mut uow).await {
        Ok(value) => match uow.commit().await {
            Ok(()) => Ok(value),
            // A failed commit is aborted on the backend side and sqlx has
            // already consumed the transaction, so only translation remains.
            Err(err) => Err(StructuredError::translate(&classify(&err), ctx)),
        },
        Err(err) => Err(surface(uow, err, ctx).await),
    }
}
