//! Event capture for asserting structured diagnostics in tests.
//!
//! [`EventCapture`] is a `tracing_subscriber` layer that keeps every event it
//! sees, together with the names of the spans that enclosed it, so tests can
//! check what the engine logged without parsing formatted output.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use ::tracing::field::{Field, Visit};
use ::tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

/// A recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Event level.
    pub level: Level,
    /// Message passed to the logging macro, or an empty string.
    pub message: String,
    /// Names of the enclosing spans, outermost first.
    pub spans: Vec<String>,
    /// Structured fields other than the message.
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// Returns the value recorded for `name`, if any.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Layer that stores every event in emission order.
///
/// # Examples
/// ```
/// use wordpath_test_support::tracing::EventCapture;
///
/// let capture = EventCapture::default();
/// let events = capture.record(|| tracing::info!(answer = 42, "hello"));
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].message, "hello");
/// assert_eq!(events[0].field("answer"), Some("42"));
/// ```
#[derive(Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    /// Runs `body` with this layer installed as the thread-local subscriber
    /// and returns the events it emitted.
    #[must_use]
    pub fn record(&self, body: impl FnOnce()) -> Vec<CapturedEvent> {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        ::tracing::subscriber::with_default(subscriber, body);
        self.events()
    }

    /// Snapshot of the events captured so far.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<S> Layer<S> for EventCapture
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let spans = ctx
            .event_scope(event)
            .map(|scope| {
                scope
                    .from_root()
                    .map(|span| span.name().to_owned())
                    .collect()
            })
            .unwrap_or_default();
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedEvent {
                level: *event.metadata().level(),
                message: visitor.message,
                spans,
                fields: visitor.fields,
            });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl FieldVisitor {
    fn store(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.insert(field.name().to_owned(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.store(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.store(field, value.to_owned());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.store(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.store(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.store(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.store(field, value.to_string());
    }
}
