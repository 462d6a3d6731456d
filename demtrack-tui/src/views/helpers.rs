//! Small formatting helpers shared by the views.

use chrono::NaiveDate;
use demtrack_core::Timestamp;

/// Placeholder for absent optional values.
pub const VAZIO: &str = "—";

pub fn opt(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => VAZIO.to_string(),
    }
}

/// Locale date rendering, dd/mm/YYYY.
pub fn data(value: Option<NaiveDate>) -> String {
    match value {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => VAZIO.to_string(),
    }
}

pub fn data_hora(value: Timestamp) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_values_fall_back_to_placeholder() {
        assert_eq!(opt(None), VAZIO);
        assert_eq!(opt(Some("")), VAZIO);
        assert_eq!(opt(Some("Ana")), "Ana");
    }

    #[test]
    fn dates_render_in_locale_order() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(data(Some(date)), "15/03/2024");
        assert_eq!(data(None), VAZIO);
    }
}
