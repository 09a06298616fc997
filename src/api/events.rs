//! Typed event dispatch for one-to-many notifications.
//!
//! Statically-known sender/receiver pairs call methods directly; this
//! dispatcher exists for the genuinely broadcast cases (resize, map-ready,
//! applied scale changes).

/// Event variants with typed payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum GeonaEvent {
    Resize { width: u32 },
    MapReady,
    ScaleApplied { layer_id: String },
    TimeSelected { time: f64 },
}

type Subscriber = Box<dyn FnMut(&GeonaEvent)>;

/// Broadcast dispatcher with one-shot map-ready semantics.
#[derive(Default)]
pub struct EventDispatcher {
    subscribers: Vec<Subscriber>,
    map_ready: bool,
}

impl EventDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber. If the map-ready notification already fired,
    /// the new subscriber observes it immediately.
    pub fn subscribe(&mut self, mut subscriber: impl FnMut(&GeonaEvent) + 'static) {
        if self.map_ready {
            subscriber(&GeonaEvent::MapReady);
        }
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn emit(&mut self, event: &GeonaEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }

    /// Fires the map-ready notification exactly once; later calls are no-ops.
    pub fn emit_map_ready(&mut self) {
        if self.map_ready {
            return;
        }
        self.map_ready = true;
        self.emit(&GeonaEvent::MapReady);
    }

    #[must_use]
    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscribers", &self.subscribers.len())
            .field("map_ready", &self.map_ready)
            .finish()
    }
}
