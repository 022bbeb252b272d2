use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Canonical attendance statuses. The attendance relation itself stores
/// free-form text, so aggregation code compares against the string forms.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Leave,
}

/// Single-character cell marker used by the monthly grid.
///
/// Anything that is not Present/Absent falls back to its first character,
/// so Late and Leave both render as "L". That collision is long-standing
/// observed behavior and is kept as-is.
pub fn status_glyph(status: &str) -> String {
    match status {
        "Present" => "✓".to_string(),
        "Absent" => "✗".to_string(),
        other => other.chars().next().map(|c| c.to_string()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_glyphs() {
        assert_eq!(status_glyph("Present"), "✓");
        assert_eq!(status_glyph("Absent"), "✗");
    }

    #[test]
    fn late_and_leave_share_a_glyph() {
        assert_eq!(status_glyph("Late"), "L");
        assert_eq!(status_glyph("Leave"), "L");
    }

    #[test]
    fn empty_status_renders_empty() {
        assert_eq!(status_glyph(""), "");
    }

    #[test]
    fn status_parses_from_string() {
        assert_eq!("Present".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Present);
        assert!("Holiday".parse::<AttendanceStatus>().is_err());
    }
}
