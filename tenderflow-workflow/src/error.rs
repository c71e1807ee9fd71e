use thiserror::Error;

/// Persistence failures surfaced by the lifecycle managers.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid persisted value for {column}: {value}")]
    InvalidColumn { column: &'static str, value: String },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_column(column: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidColumn {
            column,
            value: value.into(),
        }
    }
}
