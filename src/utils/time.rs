use chrono::{NaiveDateTime, Utc};

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Parses the schedule strings the portal works with: the datetime-local
/// form value (`2025-12-05T10:00`) and the full ISO form the service emits.
pub fn parse_schedule(raw: &str) -> anyhow::Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    raw.parse::<NaiveDateTime>()
        .map_err(|e| anyhow::anyhow!("Unparsable schedule '{}': {}", raw, e))
}
