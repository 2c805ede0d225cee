use chrono::{DateTime, Local, NaiveDate};

use crate::i18n::Locale;

/// Short date pattern used for `locale`.
fn date_pattern(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "%m/%d/%Y",
        Locale::Pl | Locale::De => "%d.%m.%Y",
        Locale::Fr => "%d/%m/%Y",
        Locale::Ja => "%Y/%m/%d",
    }
}

fn parse_saved_at(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Render a stored history date for display.
///
/// Values that are neither RFC 3339 timestamps nor `YYYY-MM-DD` dates, such
/// as dates stored pre-formatted by older versions, are shown unchanged.
pub fn format_saved_at(raw: &str, locale: Locale) -> String {
    match parse_saved_at(raw) {
        Some(date) => date.format(date_pattern(locale)).to_string(),
        None => {
            log::debug!("Showing unparsable history date as-is: {raw}");
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_dates_per_locale() {
        let raw = "2024-03-07";
        assert_eq!(format_saved_at(raw, Locale::En), "03/07/2024");
        assert_eq!(format_saved_at(raw, Locale::De), "07.03.2024");
        assert_eq!(format_saved_at(raw, Locale::Pl), "07.03.2024");
        assert_eq!(format_saved_at(raw, Locale::Fr), "07/03/2024");
        assert_eq!(format_saved_at(raw, Locale::Ja), "2024/03/07");
    }

    #[test]
    fn rfc3339_uses_local_date() {
        let now = Local::now();
        let expected = now.date_naive().format("%Y/%m/%d").to_string();
        assert_eq!(format_saved_at(&now.to_rfc3339(), Locale::Ja), expected);
    }

    #[test]
    fn unparsable_dates_fall_back_to_raw() {
        for raw in ["3/7/2024", "7.3.2024", "", "yesterday"] {
            assert_eq!(format_saved_at(raw, Locale::En), raw);
        }
    }
}
