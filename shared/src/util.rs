/// Current UTC time
pub fn now() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}

/// Current UTC timestamp (seconds), the unit of token `exp` claims
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
