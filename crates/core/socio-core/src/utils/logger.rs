//! Logging utilities

use once_cell::sync::OnceCell;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// A log record republished to live subscribers (e.g. the `/logs` SSE stream)
#[derive(Clone, Debug, Serialize)]
pub struct LogEvent {
    pub level: String,
    pub target: String,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub time: String,
}

static LOG_TX: OnceCell<broadcast::Sender<LogEvent>> = OnceCell::new();

/// Subscribe to live log events. `None` until [`init_logging`] has run.
pub fn subscribe_logs() -> Option<broadcast::Receiver<LogEvent>> {
    LOG_TX.get().map(|tx| tx.subscribe())
}

struct BroadcastLayer {
    tx: broadcast::Sender<LogEvent>,
}

impl<S> Layer<S> for BroadcastLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        use tracing::field::{Field, Visit};
        struct MsgVisitor {
            msg: String,
        }
        impl Visit for MsgVisitor {
            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.msg = format!("{:?}", value);
                }
            }
            fn record_str(&mut self, field: &Field, value: &str) {
                if field.name() == "message" {
                    self.msg = value.to_string();
                }
            }
        }
        let mut visitor = MsgVisitor { msg: String::new() };
        event.record(&mut visitor);
        let meta = event.metadata();
        let ev = LogEvent {
            level: meta.level().to_string(),
            target: meta.target().to_string(),
            message: visitor.msg,
            file: meta.file().map(|s| s.to_string()),
            line: meta.line(),
            time: chrono::Utc::now().to_rfc3339(),
        };
        // No receivers is fine
        let _ = self.tx.send(ev);
    }
}

/// Initialize the global logging system
///
/// Filter comes from `RUST_LOG`, then `SOCIO_LOG_LEVEL`, then `info`.
/// Calling it a second time is a no-op.
pub fn init_logging() {
    let level = std::env::var("SOCIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into());

    let tx = LOG_TX
        .get_or_init(|| {
            let (tx, _rx) = broadcast::channel(1024);
            tx
        })
        .clone();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(BroadcastLayer { tx })
        .try_init();
}
