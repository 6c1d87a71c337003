//! Message formatting utilities for console display.

use sahaya_shared::time::timestamp_to_ist_rfc3339;

/// Message formatter for console display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a local system announcement (connection status lines)
    pub fn format_system(text: &str) -> String {
        format!("\n* {}\n", text)
    }

    /// Format a message received from the other party
    ///
    /// # Arguments
    ///
    /// * `from` - Display name of the other party
    /// * `text` - The message text
    /// * `received_at` - Unix timestamp of arrival (milliseconds)
    pub fn format_incoming(from: &str, text: &str, received_at: i64) -> String {
        let timestamp_str = timestamp_to_ist_rfc3339(received_at);
        format!(
            "\n\n------------------------------------------------------------\n\
             @{}: {}\n\
             received at {}\n\
             ------------------------------------------------------------\n",
            from, text, timestamp_str
        )
    }

    /// Format a confirmation line after sending
    pub fn format_sent_confirmation(sent_at: i64) -> String {
        let timestamp_str = timestamp_to_ist_rfc3339(sent_at);
        format!("sent at {}\n", timestamp_str)
    }
}
