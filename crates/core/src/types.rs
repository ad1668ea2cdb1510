/// Catalog entry identifiers are small positive integers assigned
/// monotonically (`max existing + 1`).
pub type EntryId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
