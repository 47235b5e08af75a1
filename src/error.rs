use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Purchase #{0} is already marked as bought")]
    AlreadyBought(i64),

    #[error("An expense for '{0}' has already been recorded")]
    DuplicateExpense(String),

    #[error("Database initialization failed: {0}")]
    Init(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl TallyError {
    /// Expected, user-correctable conditions as opposed to storage faults.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TallyError::Validation(_)
                | TallyError::NotFound(_)
                | TallyError::AlreadyBought(_)
                | TallyError::DuplicateExpense(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
