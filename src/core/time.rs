use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Current UTC instant as an RFC3339 string, the shape the hosted store
/// accepts for timestamptz columns and hands back on reads.
pub(crate) fn now_rfc3339() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339).unwrap_or_else(|_| now.to_string())
}

/// Calendar-date part of a stored timestamp, for list responses.
pub(crate) fn date_only(timestamp: &str) -> String {
    match timestamp.split_once('T') {
        Some((date, _)) => date.to_string(),
        None => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_rfc3339_parseable() {
        let stamp = now_rfc3339();
        assert!(OffsetDateTime::parse(&stamp, &Rfc3339).is_ok());
    }

    #[test]
    fn date_only_strips_time_component() {
        assert_eq!(date_only("2026-03-14T09:26:53Z"), "2026-03-14");
        assert_eq!(date_only("2026-03-14T09:26:53+05:30"), "2026-03-14");
        assert_eq!(date_only("2026-03-14"), "2026-03-14");
    }
}
