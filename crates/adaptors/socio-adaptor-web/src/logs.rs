//! Live log stream over server-sent events

use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::{self, BoxStream, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use socio_core::{subscribe_logs, LogEvent};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;

const MAX_MESSAGE_CHARS: usize = 2000;

static SCRUB_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)bearer\s+[A-Za-z0-9._:~+/=-]+", "Bearer REDACTED"),
        (r"AstraCS:[A-Za-z0-9:._-]+", "AstraCS:REDACTED"),
        (
            r"(?i)api[_-]?key\s*[:=]?\s*[A-Za-z0-9_-]{12,}",
            "api_key=REDACTED",
        ),
        (
            r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
            "email@redacted",
        ),
    ]
    .into_iter()
    .filter_map(|(pattern, rep)| Regex::new(pattern).ok().map(|re| (re, rep)))
    .collect()
});

/// Truncate and redact secrets from a log message
pub fn scrub_message(mut s: String) -> String {
    if s.chars().count() > MAX_MESSAGE_CHARS {
        s = s.chars().take(MAX_MESSAGE_CHARS).collect();
    }
    for (re, rep) in SCRUB_PATTERNS.iter() {
        s = re.replace_all(&s, *rep).into_owned();
    }
    s
}

fn to_event(mut ev: LogEvent) -> Event {
    ev.message = scrub_message(ev.message);
    let data = serde_json::to_string(&ev).unwrap_or_else(|_| "{}".to_string());
    Event::default().data(data)
}

/// `GET /logs`
pub async fn logs_sse() -> Sse<BoxStream<'static, std::result::Result<Event, Infallible>>> {
    let stream: BoxStream<'static, std::result::Result<Event, Infallible>> = match subscribe_logs()
    {
        Some(rx) => BroadcastStream::new(rx)
            .filter_map(|item| async move { item.ok().map(|ev| Ok(to_event(ev))) })
            .boxed(),
        None => stream::once(async {
            Ok(to_event(LogEvent {
                level: "INFO".into(),
                target: "init".into(),
                message: "logging not initialized".into(),
                file: None,
                line: None,
                time: chrono::Utc::now().to_rfc3339(),
            }))
        })
        .boxed(),
    };
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrub_bearer_and_astra_tokens() {
        let out = scrub_message("Authorization: Bearer AstraCS:abc:123def".to_string());
        assert!(!out.contains("abc:123def"));
        assert!(out.contains("REDACTED"));

        let out = scrub_message("token AstraCS:zzzz:9999 leaked".to_string());
        assert_eq!(out, "token AstraCS:REDACTED leaked");
    }

    #[test]
    fn test_scrub_api_key_and_email() {
        let out = scrub_message("api_key=abcdefghijklmnop for ops@example.com".to_string());
        assert_eq!(out, "api_key=REDACTED for email@redacted");
    }

    #[test]
    fn test_scrub_keeps_plain_text_and_truncates() {
        assert_eq!(
            scrub_message("Projected 2 points over 2 metrics".to_string()),
            "Projected 2 points over 2 metrics"
        );
        let long = "x".repeat(MAX_MESSAGE_CHARS + 50);
        assert_eq!(scrub_message(long).len(), MAX_MESSAGE_CHARS);
    }
}
