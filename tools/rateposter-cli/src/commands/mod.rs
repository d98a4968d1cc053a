pub mod config;
pub mod fields;
pub mod fonts;
pub mod layers;
pub mod render;

use chrono::NaiveDateTime;
use rateposter_common::clock::{parse_local_timestamp, SystemClock, WallClock};

/// `--at` value, or the system clock when absent.
pub fn resolve_now(at: Option<&str>) -> anyhow::Result<NaiveDateTime> {
    match at {
        Some(raw) => parse_local_timestamp(raw)
            .ok_or_else(|| anyhow::anyhow!("Invalid --at value '{raw}', expected YYYY-MM-DDTHH:MM")),
        None => Ok(SystemClock.now()),
    }
}
