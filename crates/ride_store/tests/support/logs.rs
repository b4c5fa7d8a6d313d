use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// One captured event: level plus its fields rendered as text.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    pub level: Level,
    pub fields: Vec<(String, String)>,
}

impl LoggedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<LoggedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events
            .lock()
            .expect("capture lock")
            .push(LoggedEvent {
                level: *event.metadata().level(),
                fields: visitor.0,
            });
    }
}

/// Runs `f` with a thread-local subscriber and returns its result together
/// with every event it emitted.
pub fn capture_events<T>(f: impl FnOnce() -> T) -> (T, Vec<LoggedEvent>) {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.events);
    let subscriber = tracing_subscriber::registry().with(layer);

    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().expect("capture lock").clone();
    (result, captured)
}

/// Captured events at `level`.
pub fn at_level(events: &[LoggedEvent], level: Level) -> Vec<&LoggedEvent> {
    events.iter().filter(|event| event.level == level).collect()
}
