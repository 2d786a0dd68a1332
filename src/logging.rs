//! Tracing output for the browser console.
//!
//! A custom `Layer` renders each event as one line,
//! `LEVEL target: message key=value ...`, and hands it to the matching
//! `console` method so browser devtools can filter by severity.

use std::fmt::Write as FmtWrite;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};
use wasm_bindgen::JsValue;

/// A tracing Layer that writes events to the browser console.
pub struct ConsoleLayer {
    write: fn(&Level, &str),
}

impl ConsoleLayer {
    pub fn new() -> Self {
        Self {
            write: write_console,
        }
    }

    /// Send rendered lines somewhere other than `console`.
    pub fn with_writer(write: fn(&Level, &str)) -> Self {
        Self { write }
    }
}

impl Default for ConsoleLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = ConsoleVisitor::default();
        event.record(&mut visitor);

        let spans = ctx.event_scope(event).map(|scope| {
            scope
                .from_root()
                .map(|span| span.name())
                .collect::<Vec<_>>()
                .join(" > ")
        });

        let line = format_line(
            metadata.level(),
            metadata.target(),
            spans.as_deref(),
            visitor.message.as_deref().unwrap_or_default(),
            &visitor.fields,
        );
        (self.write)(metadata.level(), &line);
    }
}

fn write_console(level: &Level, line: &str) {
    let line = JsValue::from_str(line);
    match *level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        Level::INFO => web_sys::console::info_1(&line),
        _ => web_sys::console::debug_1(&line),
    }
}

/// Render one event as a console line.
pub fn format_line(
    level: &Level,
    target: &str,
    spans: Option<&str>,
    message: &str,
    fields: &[(String, String)],
) -> String {
    let mut line = format!("{:>5} {target}", level.as_str());
    if let Some(spans) = spans.filter(|s| !s.is_empty()) {
        let _ = write!(line, " [{spans}]");
    }
    let _ = write!(line, ": {message}");
    for (name, value) in fields {
        let _ = write!(line, " {name}={value}");
    }
    line
}

/// Visitor that extracts the message and fields from tracing events.
#[derive(Default)]
struct ConsoleVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl ConsoleVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for ConsoleVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, value.to_string());
    }
}

/// Install the console subscriber with `directive` as the level filter.
///
/// An unparseable directive falls back to `info`. Returns `false` when a
/// global subscriber was already installed.
pub fn init_logging(directive: &str) -> bool {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(ConsoleLayer::new())
        .try_init()
        .is_ok()
}
