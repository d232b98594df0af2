use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Database error: {0}")]
    Query(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Maps a unique-index violation to `ConstraintViolation`, keeping every
    /// other driver error as is.
    pub fn from_unique_violation(err: sqlx::Error, message: &str) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DatabaseError::ConstraintViolation(format!("{}: {}", message, db_err.message()))
            }
            other => DatabaseError::from(other),
        }
    }
}
