//! Timestamp-derived filenames.

use chrono::{DateTime, Utc};

/// Filename for a new photo capture, e.g. `img_20240301_083000.jpg`.
pub fn capture_filename(at: DateTime<Utc>) -> String {
    format!("img_{}.jpg", at.format("%Y%m%d_%H%M%S"))
}

/// Default filename for a full export, e.g. `diary_export_20240301_083000.json`.
pub fn export_filename(at: DateTime<Utc>) -> String {
    format!("diary_export_{}.json", at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn names_follow_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 5).unwrap();
        assert_eq!(capture_filename(at), "img_20240301_083005.jpg");
        assert_eq!(export_filename(at), "diary_export_20240301_083005.json");
    }
}
