use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Fixed message for malformed input data, regardless of which field was bad.
pub const INVALID_DATA_MESSAGE: &str = "Erro nos dados enviados, verifique os tipos e formatos";

/// Fixed message for operational failures in the persistence backend.
pub const OPERATIONAL_MESSAGE: &str = "Erro de operação no banco de dados, verifique a consulta";

/// A persistence failure after classification. Produced by the boundary's
/// classifier; first match wins, so a constraint violation that could also
/// read as invalid data is still a `ConstraintViolation`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FaultKind {
    #[error("constraint violation")]
    ConstraintViolation,
    #[error("invalid data")]
    InvalidData,
    #[error("operational failure")]
    Operational,
    #[error("{0}")]
    Other(String),
}

/// Optional (field, value) pair interpolated into constraint-violation
/// messages. Bound once per operation; empty when the operation has no
/// field worth reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultContext {
    pub field: String,
    pub value: String,
}

impl FaultContext {
    /// Context for operations with no interpolatable field.
    pub fn none() -> Self {
        Self::default()
    }

    /// Context naming the field a constraint violation would be about.
    pub fn field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: name.into(),
            value: value.into(),
        }
    }
}

/// Normalized (status, message) pair surfaced to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{status}: {message}")]
pub struct StructuredError {
    pub status: u16,
    pub message: String,
}

impl StructuredError {
    fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Maps a classified failure to the client-facing error. Pure: identical
    /// inputs produce identical output, no matter how often it runs.
    ///
    /// The fallback branch echoes the failure's own description in the 500
    /// body, matching the original product contract.
    pub fn translate(kind: &FaultKind, ctx: &FaultContext) -> Self {
        match kind {
            FaultKind::ConstraintViolation => Self::new(
                409,
                format!(
                    "Já existe um registro cadastrado com o {}: {}",
                    ctx.field, ctx.value
                ),
            ),
            FaultKind::InvalidData => Self::new(400, INVALID_DATA_MESSAGE),
            FaultKind::Operational => Self::new(500, OPERATIONAL_MESSAGE),
            FaultKind::Other(detail) => Self::new(500, detail.clone()),
        }
    }

    /// Controlled no-result outcome for point lookups. Raised by the
    /// endpoint itself; never goes through `translate`.
    pub fn not_found(id: &Uuid) -> Self {
        Self::new(404, format!("Categoria não encontrada no id: {id}"))
    }

    /// Rejection for payloads the validation layer could not decode.
    pub fn invalid_data() -> Self {
        Self::new(400, INVALID_DATA_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violation_interpolates_field_and_value() {
        let err = StructuredError::translate(
            &FaultKind::ConstraintViolation,
            &FaultContext::field("nome", "Hipertrofia"),
        );
        assert_eq!(err.status, 409);
        assert!(err.message.contains("nome"));
        assert!(err.message.contains("Hipertrofia"));
    }

    #[test]
    fn invalid_data_uses_the_fixed_message() {
        let err = StructuredError::translate(
            &FaultKind::InvalidData,
            &FaultContext::field("nome", "ignored"),
        );
        assert_eq!(err.status, 400);
        assert_eq!(err.message, INVALID_DATA_MESSAGE);
    }

    #[test]
    fn operational_uses_the_fixed_message() {
        let err = StructuredError::translate(&FaultKind::Operational, &FaultContext::none());
        assert_eq!(err.status, 500);
        assert_eq!(err.message, OPERATIONAL_MESSAGE);
    }

    #[test]
    fn fallback_echoes_the_raw_description() {
        let kind = FaultKind::Other("database is locked".to_string());
        let err = StructuredError::translate(&kind, &FaultContext::none());
        assert_eq!(err.status, 500);
        assert_eq!(err.message, "database is locked");
    }

    #[test]
    fn translation_is_pure() {
        let kind = FaultKind::ConstraintViolation;
        let ctx = FaultContext::field("nome", "Hipertrofia");
        let first = StructuredError::translate(&kind, &ctx);
        let second = StructuredError::translate(&kind, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn not_found_carries_the_requested_id() {
        let id = Uuid::new_v4();
        let err = StructuredError::not_found(&id);
        assert_eq!(err.status, 404);
        assert!(err.message.contains(&id.to_string()));
    }

    #[test]
    fn serializes_as_status_and_message() {
        let err = StructuredError::translate(&FaultKind::Operational, &FaultContext::none());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["status"], 500);
        assert_eq!(json["message"], OPERATIONAL_MESSAGE);
    }
}
