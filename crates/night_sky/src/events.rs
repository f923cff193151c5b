//! Event types and sinks for observing sky generation and reveal evaluation.
//!
//! This module defines [`SkyEvent`] and sinks that drop, collect or forward events
//! while building a [`crate::scene::NightSky`] or ticking its
//! [`crate::reveal::RevealTracker`].
use glam::Vec2;

/// Describes events emitted by sky generation and reveal evaluation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum SkyEvent {
    /// Emitted when an anchor star was accepted by the placer.
    AnchorPlaced {
        /// Creation index of the anchor.
        index: usize,
        /// Accepted position.
        position: Vec2,
        /// Number of candidate draws used, including the accepted one.
        attempts: usize,
    },

    /// Emitted once all layers of a sky have been generated.
    SkyBuilt {
        stars: usize,
        swirls: usize,
        anchors: usize,
    },

    /// The agent moved within the reveal radius of an anchor.
    AnchorEntered {
        index: usize,
    },

    /// The agent moved out of the reveal radius of an anchor.
    AnchorLeft {
        index: usize,
    },

    /// An anchor was revealed for the first time.
    AnchorRevealed {
        index: usize,
    },
}

/// A generic event sink that accepts [`SkyEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: SkyEvent);

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = SkyEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: SkyEvent) {}
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(SkyEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(SkyEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(SkyEvent),
{
    #[inline]
    fn send(&mut self, event: SkyEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<SkyEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<SkyEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[SkyEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: SkyEvent) {
        self.events.push(event);
    }
}
