use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Converts diesel errors into structured `AppError` variants.
///
/// Constraint violations carry enough information in their name and detail
/// line to become `Duplicate`, `NotFound` or `Validation`; everything else
/// stays an opaque `Database` error with the failing operation attached.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let details = info.details();
        let constraint_name = info.constraint_name();

        let converted = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(message, details, constraint_name).map(
                    |(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                )
            }
            // A dangling reference means the referenced row is missing.
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(message, details, constraint_name)
                    .map(|(entity, _field, value)| AppError::NotFound {
                        entity,
                        field: "id".to_string(),
                        value,
                    })
            }
            DatabaseErrorKind::NotNullViolation => {
                ConstraintParser::parse_not_null_violation(message).map(|(entity, field)| {
                    AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    }
                })
            }
            DatabaseErrorKind::CheckViolation => Some(AppError::Validation {
                field: constraint_name
                    .and_then(ConstraintParser::parse_constraint_name)
                    .map(|(_, field)| field)
                    .unwrap_or_else(|| "unknown".to_string()),
                reason: "Check constraint failed".to_string(),
            }),
            _ => None,
        };

        converted.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{:?}: {}", kind, message)),
        })
    }
}
