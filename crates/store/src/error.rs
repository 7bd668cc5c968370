use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    /// Backend failure (SQLite open/prepare/execute).
    Backend(String),
    /// A referenced record does not exist.
    NotFound { kind: &'static str, id: i64 },
    /// A stored column held a value the model cannot represent.
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(msg) => write!(f, "record store error: {msg}"),
            Self::NotFound { kind, id } => write!(f, "{kind} #{id} not found"),
            Self::Corrupt(msg) => write!(f, "corrupt catalog record: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Backend(e.to_string())
    }
}
