use chrono::Utc;

/// Current wall-clock time as Unix nanoseconds.
pub fn current_time_ns() -> i64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000))
}

/// A timestamp strictly later than `previous`, even if the clock has not
/// advanced (or went backwards) since it was taken.
pub fn next_time_ns(previous: i64) -> i64 {
    current_time_ns().max(previous.saturating_add(1))
}
