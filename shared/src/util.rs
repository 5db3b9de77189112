/// Current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an opaque entity id.
///
/// Random UUID v4 in hyphenated form, the same shape the stored JSON has
/// always carried, so existing collections load unchanged.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
