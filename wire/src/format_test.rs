use super::*;

#[test]
fn truncate_chars_respects_multibyte_boundaries() {
    assert_eq!(truncate_chars("őszi", 2), "ős");
    assert_eq!(truncate_chars("abc", 10), "abc");
    assert_eq!(truncate_chars("", 3), "");
    assert_eq!(truncate_chars("abc", 0), "");
}

#[test]
fn percent_rounds_and_clamps() {
    assert_eq!(percent(0.644), 64);
    assert_eq!(percent(0.646), 65);
    assert_eq!(percent(1.7), 100);
    assert_eq!(percent(-0.2), 0);
    assert_eq!(percent(f64::NAN), 0);
}

#[test]
fn format_date_naive_iso() {
    assert_eq!(format_date("2024-03-05T14:30:00"), "2024. március 5.");
    assert_eq!(format_date("2024-03-05T14:30:00.123456"), "2024. március 5.");
}

#[test]
fn format_date_rfc3339_keeps_sender_offset() {
    assert_eq!(format_date_time("2024-12-31T23:15:00+01:00"), "2024. december 31. 23:15");
    assert_eq!(format_date_time("2024-01-02T08:05:09Z"), "2024. január 2. 08:05");
}

#[test]
fn format_date_accepts_space_separator_and_plain_dates() {
    assert_eq!(format_date("2023-10-23 09:00:00"), "2023. október 23.");
    assert_eq!(format_date_time("2023-10-23"), "2023. október 23. 00:00");
}

#[test]
fn format_date_returns_unparseable_input() {
    assert_eq!(format_date("tegnap"), "tegnap");
    assert_eq!(format_date_time(""), "");
}
