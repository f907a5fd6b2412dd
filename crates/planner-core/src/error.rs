use thiserror::Error;

/// Failures produced by the recurrence engine: date parsing, rule parsing and
/// occurrence search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("Invalid date '{0}', expected YYYYMMDD")]
    InvalidDateFormat(String),

    #[error("Unsupported repeat rule kind: '{0}'")]
    UnsupportedRuleKind(String),

    #[error("Invalid repeat rule format: '{0}'")]
    InvalidRuleShape(String),

    #[error("Invalid daily interval: '{0}', expected a number from 1 to 399")]
    InvalidInterval(String),

    #[error("Invalid day of week: '{0}', expected a number from 1 to 7")]
    InvalidWeekday(String),

    #[error("Invalid day of month: '{0}', expected 1 to 31, -1 or -2")]
    InvalidMonthDay(String),

    #[error("Invalid month: '{0}', expected a number from 1 to 12")]
    InvalidMonth(String),

    #[error("No day of week matches the repeat rule")]
    NoMatchingWeekday,

    #[error("Cannot find a suitable date for the repeat rule")]
    NoSuitableDate,

    #[error("Date arithmetic overflowed past {0}")]
    DateOutOfRange(String),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ambiguous short ID. Did you mean one of these?")]
    AmbiguousId(Vec<(String, String)>), // Vec of (ID, Title)

    #[error("Stored task is corrupt: {0}")]
    CorruptRow(String),
}

impl CoreError {
    /// True for errors caused by what the caller submitted rather than by the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::Recurrence(_) | CoreError::InvalidInput(_) | CoreError::AmbiguousId(_)
        )
    }
}
