use thiserror::Error;

/// Typed failure taxonomy for every mutating operation in the core.
///
/// The four domain variants map 1:1 to the caller-visible outcomes: a
/// `Validation` failure is rejected before any state mutation; `Unauthorized`
/// and `Conflict` leave the entity exactly as it was; `NotFound` is returned
/// identically whether the entity is absent or simply not visible to the
/// actor. Nothing is retried internally.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    /// Stable machine-readable code surfaced in GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION",
            ServiceError::Unauthorized(_) => "UNAUTHORIZED",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Conflict(_) => "CONFLICT",
            ServiceError::Database(_) | ServiceError::Internal(_) => "INTERNAL",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ServiceError::Unauthorized(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict(message.into())
    }
}

/// Convenience alias used throughout activities and models.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ServiceError::validation("x").code(), "VALIDATION");
        assert_eq!(ServiceError::unauthorized("x").code(), "UNAUTHORIZED");
        assert_eq!(ServiceError::NotFound("request").code(), "NOT_FOUND");
        assert_eq!(ServiceError::conflict("x").code(), "CONFLICT");
    }

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(
            ServiceError::NotFound("collaboration request").to_string(),
            "collaboration request not found"
        );
    }
}
