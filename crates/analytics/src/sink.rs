//! Event sinks and the tracker that fans out to them.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use valform_core::SessionId;

use crate::error::{Error, Result};
use crate::event::{EventEnvelope, FunnelEvent};

/// Destination for analytics events.
///
/// Sinks are called synchronously on the navigation path, so they must
/// be cheap; anything slow should buffer internally.
pub trait EventSink: Send + Sync {
    /// Short name used in failure logs.
    fn name(&self) -> &'static str;

    /// Record one event.
    fn record(&self, envelope: &EventEnvelope) -> Result<()>;
}

/// Sink that buffers events in memory; the test workhorse.
#[derive(Debug, Default)]
pub struct InMemorySink {
    events: Mutex<Vec<EventEnvelope>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded envelopes, in emission order.
    pub fn events(&self) -> Vec<EventEnvelope> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Just the event names, for ordering assertions.
    pub fn names(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|envelope| envelope.event.name())
            .collect()
    }
}

impl EventSink for InMemorySink {
    fn name(&self) -> &'static str {
        "in_memory"
    }

    fn record(&self, envelope: &EventEnvelope) -> Result<()> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| Error::sink("in_memory", "poisoned buffer"))?;
        events.push(envelope.clone());
        Ok(())
    }
}

/// Sink that writes events to the tracing subscriber as structured logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn record(&self, envelope: &EventEnvelope) -> Result<()> {
        let payload = serde_json::to_string(&envelope.event)
            .map_err(|e| Error::serialization(e.to_string()))?;
        info!(
            target: "valform::analytics",
            event_id = %envelope.id,
            session_id = %envelope.session_id,
            event = envelope.event.name(),
            %payload,
            "analytics event"
        );
        Ok(())
    }
}

/// Fans events out to every registered sink.
///
/// A sink failure is logged and swallowed: analytics never blocks or
/// breaks the funnel.
#[derive(Clone)]
pub struct Tracker {
    session_id: SessionId,
    sinks: Vec<Arc<dyn EventSink>>,
}

impl Tracker {
    /// Create a tracker for a session with no sinks.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            sinks: Vec::new(),
        }
    }

    /// Register a sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// The session this tracker stamps onto events.
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Emit one event to every sink.
    pub fn emit(&self, event: FunnelEvent) {
        let envelope = EventEnvelope::new(self.session_id, event);
        for sink in &self.sinks {
            if let Err(err) = sink.record(&envelope) {
                warn!(
                    sink = sink.name(),
                    event = envelope.event.name(),
                    %err,
                    "analytics sink failed; event dropped for this sink"
                );
            }
        }
    }
}
