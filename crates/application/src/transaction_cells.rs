//! Cell rendering for the transactions table.

use voltdesk_domain::{InactivityStatus, Transaction};

/// Rendered inactivity cell: a severity for styling and the display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InactivityCell {
    /// Severity driving the cell color.
    pub status: InactivityStatus,
    /// Formatted inactivity with its share of the session duration.
    pub text: String,
}

/// Derives the inactivity cell of a transaction row.
///
/// Finalized sessions render their stop measures; in-progress ones the live
/// counters. The two never coexist on a row.
#[must_use]
pub fn inactivity_cell(transaction: &Transaction) -> InactivityCell {
    match &transaction.stop {
        Some(stop) => InactivityCell {
            status: stop.inactivity_status,
            text: format_inactivity(stop.total_inactivity_secs, stop.total_duration_secs),
        },
        None => InactivityCell {
            status: transaction.current_inactivity_status,
            text: format_inactivity(
                transaction.current_total_inactivity_secs,
                transaction.current_total_duration_secs,
            ),
        },
    }
}

/// Formats an inactivity duration with its whole-percent share of the total
/// session duration. A zero total renders as 0%.
#[must_use]
pub fn format_inactivity(inactivity_secs: u64, total_duration_secs: u64) -> String {
    let percent = if total_duration_secs > 0 {
        ((inactivity_secs as f64 / total_duration_secs as f64) * 100.0).round() as u64
    } else {
        0
    };

    format!("{} ({percent}%)", format_duration(inactivity_secs))
}

/// Formats a duration in seconds as `3d 4h`, `1h 02m`, `2m 05s` or `45s`,
/// keeping the two most significant units.
#[must_use]
pub fn format_duration(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use voltdesk_domain::TransactionStop;

    use super::*;

    fn in_progress_row() -> Transaction {
        Transaction {
            id: "T1".to_owned(),
            current_total_inactivity_secs: 300,
            current_total_duration_secs: 1_200,
            current_inactivity_status: InactivityStatus::Warning,
            stop: None,
        }
    }

    #[test]
    fn in_progress_rows_render_the_live_counters() {
        let cell = inactivity_cell(&in_progress_row());
        assert_eq!(cell.status, InactivityStatus::Warning);
        assert_eq!(cell.text, "5m 00s (25%)");
    }

    #[test]
    fn finalized_rows_render_the_stop_measures() {
        let mut row = in_progress_row();
        row.stop = Some(TransactionStop {
            total_inactivity_secs: 7_200,
            total_duration_secs: 14_400,
            inactivity_status: InactivityStatus::Error,
        });

        let cell = inactivity_cell(&row);
        assert_eq!(cell.status, InactivityStatus::Error);
        assert_eq!(cell.text, "2h 00m (50%)");
    }

    #[test]
    fn zero_total_duration_renders_zero_percent() {
        assert_eq!(format_inactivity(0, 0), "0s (0%)");
    }

    #[test]
    fn durations_keep_the_two_most_significant_units() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(125), "2m 05s");
        assert_eq!(format_duration(3_720), "1h 02m");
        assert_eq!(format_duration(273_600), "3d 4h");
    }

    #[test]
    fn rounded_percentages() {
        assert_eq!(format_inactivity(1, 3), "1s (33%)");
        assert_eq!(format_inactivity(2, 3), "2s (67%)");
    }
}
