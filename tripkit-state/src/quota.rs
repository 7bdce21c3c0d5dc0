//! Quota display values
//!
//! A quota pairs a status label with used/total kilobyte figures, one per
//! network medium. Formatting is locale-independent and byte-exact; the
//! rendered form is `"<status> : <used>/<total> (kb)"`.

use serde::Serialize;

/// Format a quota line from its raw parts
///
/// Pure — no I/O, no failure mode.
///
/// ```rust
/// assert_eq!(tripkit_state::format_quota("OK", 120, 500), "OK : 120/500 (kb)");
/// ```
pub fn format_quota(status: &str, used: u64, total: u64) -> String {
    format!("{status} : {used}/{total} (kb)")
}

/// One medium's quota: status label plus usage figures in kilobytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaView {
    pub status_label: String,
    pub used: u64,
    pub total: u64,
}

impl QuotaView {
    pub fn new(status_label: impl Into<String>, used: u64, total: u64) -> Self {
        Self {
            status_label: status_label.into(),
            used,
            total,
        }
    }
}

impl std::fmt::Display for QuotaView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_quota(&self.status_label, self.used, self.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_exactly() {
        assert_eq!(format_quota("OK", 120, 500), "OK : 120/500 (kb)");
        assert_eq!(format_quota("EXCEEDED", 0, 0), "EXCEEDED : 0/0 (kb)");
    }

    #[test]
    fn display_matches_free_function() {
        let view = QuotaView::new("WARNING", 90, 100);
        assert_eq!(view.to_string(), format_quota("WARNING", 90, 100));
        assert_eq!(view.to_string(), "WARNING : 90/100 (kb)");
    }
}
