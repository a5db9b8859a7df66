//! Date/time display formats shared by reports and file names.

use chrono::NaiveDateTime;

/// `20240131235959`
pub const DATETIME_CONDENSED: &str = "%Y%m%d%H%M%S";
/// `2024-01-31 23:59:59`, as SQLite stores it
pub const DATETIME_SQLITEFORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_SQLITEFORMAT: &str = "%Y-%m-%d";
pub const TIME_SQLITEFORMAT: &str = "%H:%M:%S";
/// `31-01-2024 23:59:59`
pub const DATETIME_FR: &str = "%d-%m-%Y %H:%M:%S";
/// `31-01-2024-23-59-59`, safe in file names
pub const DATETIME_FR_FILEFORMAT: &str = "%d-%m-%Y-%H-%M-%S";

pub fn format_datetime(datetime: &NaiveDateTime, format: &str) -> String {
    datetime.format(format).to_string()
}

/// Current local time in `format`.
pub fn now(format: &str) -> String {
    format_datetime(&chrono::Local::now().naive_local(), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 31)
            .and_then(|d| d.and_hms_opt(23, 5, 9))
            .expect("Valid date")
    }

    #[test]
    fn test_formats() {
        let dt = sample();
        assert_eq!(format_datetime(&dt, DATETIME_CONDENSED), "20240131230509");
        assert_eq!(format_datetime(&dt, DATETIME_SQLITEFORMAT), "2024-01-31 23:05:09");
        assert_eq!(format_datetime(&dt, DATE_SQLITEFORMAT), "2024-01-31");
        assert_eq!(format_datetime(&dt, TIME_SQLITEFORMAT), "23:05:09");
        assert_eq!(format_datetime(&dt, DATETIME_FR), "31-01-2024 23:05:09");
        assert_eq!(format_datetime(&dt, DATETIME_FR_FILEFORMAT), "31-01-2024-23-05-09");
    }

    #[test]
    fn test_now_uses_format() {
        assert_eq!(now(DATETIME_CONDENSED).len(), 14);
    }
}
