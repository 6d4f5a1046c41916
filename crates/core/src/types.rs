/// Users are identified by an opaque string (normally the signed-in e-mail).
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
