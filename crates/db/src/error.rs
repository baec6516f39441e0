/// Failures of the backing table itself.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Errors surfaced by the record store and range queries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("no record for {account} at hour {hour}")]
    NotFound { account: String, hour: i64 },
    #[error("no records for {account} between {start} and {end}")]
    RangeNotFound {
        account: String,
        start: i64,
        end: i64,
    },
    #[error("upstream store error: {0}")]
    Upstream(#[from] DbError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound { .. } | StoreError::RangeNotFound { .. }
        )
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Upstream(DbError::Sqlite(err))
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
