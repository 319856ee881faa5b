//! Assistant message cleanup for display

const SUMMARY_MARKER: &str = "Data Summary";
const ANALYSIS_MARKER: &str = "We analyzed";

/// Text to show for an assistant reply.
///
/// Flows sometimes prefix the answer with a raw "Data Summary" section. When
/// that marker is present and the reply also contains "We analyzed", the
/// display text starts at the first "We analyzed". Otherwise the reply is
/// shown unchanged.
pub fn display_text(reply: &str) -> &str {
    if !reply.contains(SUMMARY_MARKER) {
        return reply;
    }
    match reply.find(ANALYSIS_MARKER) {
        Some(idx) => &reply[idx..],
        None => reply,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_reply_unchanged() {
        let reply = "We analyzed 40 posts. Videos lead.";
        assert_eq!(display_text(reply), reply);
    }

    #[test]
    fn test_summary_prefix_removed() {
        let reply = "Data Summary\nrows=40 cols=3\n\nWe analyzed 40 posts. Videos lead.";
        assert_eq!(display_text(reply), "We analyzed 40 posts. Videos lead.");
    }

    #[test]
    fn test_summary_without_analysis_kept() {
        let reply = "Data Summary: nothing to report";
        assert_eq!(display_text(reply), reply);
    }

    #[test]
    fn test_first_analysis_marker_wins() {
        let reply = "Data Summary\nWe analyzed A. We analyzed B.";
        assert_eq!(display_text(reply), "We analyzed A. We analyzed B.");
    }
}
