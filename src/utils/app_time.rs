// src/utils/app_time.rs

use chrono::Utc;

pub type AppInstant = std::time::Instant;

pub fn now() -> AppInstant {
    std::time::Instant::now()
}

/// Wall-clock milliseconds since the Unix epoch (export file naming).
pub fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}
