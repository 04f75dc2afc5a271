/// All database primary keys are PostgreSQL BIGSERIAL; memory mode uses the
/// same sequential scheme.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
