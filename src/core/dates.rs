use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a backend date value. Accepts RFC 3339 timestamps, bare dates
/// and the SQL-ish "YYYY-MM-DD HH:MM:SS" form.
pub fn parse_flexible(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Value for a date input: "YYYY-MM-DD", empty when unparseable.
pub fn for_input(raw: &str) -> String {
    parse_flexible(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Display form "DD/MM/YYYY", None when unparseable.
pub fn badge(raw: &str) -> Option<String> {
    parse_flexible(raw).map(|d| d.format("%d/%m/%Y").to_string())
}

/// Wire form for a save body: a valid "YYYY-MM-DD" draft passes through,
/// anything else is omitted.
pub fn for_patch(draft: &str) -> Option<String> {
    let draft = draft.trim();
    NaiveDate::parse_from_str(draft, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_and_bare_dates() {
        assert_eq!(
            parse_flexible("2024-03-05T14:30:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(
            parse_flexible("2024-03-05"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(
            parse_flexible("2024-03-05 14:30:00"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(parse_flexible("não é data"), None);
        assert_eq!(parse_flexible(""), None);
    }

    #[test]
    fn input_format_is_iso() {
        assert_eq!(for_input("2024-12-01T00:00:00Z"), "2024-12-01");
        assert_eq!(for_input("garbage"), "");
    }

    #[test]
    fn badge_format_is_brazilian() {
        assert_eq!(badge("2024-12-01"), Some("01/12/2024".to_string()));
        assert_eq!(badge("2024-02-30"), None);
        assert_eq!(badge(""), None);
    }

    #[test]
    fn patch_rejects_invalid_drafts() {
        assert_eq!(for_patch("2025-01-15"), Some("2025-01-15".to_string()));
        assert_eq!(for_patch("  2025-01-15  "), Some("2025-01-15".to_string()));
        assert_eq!(for_patch("15/01/2025"), None);
        assert_eq!(for_patch(""), None);
    }
}
