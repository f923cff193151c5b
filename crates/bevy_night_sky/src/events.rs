use bevy::prelude::*;
use night_sky::prelude::{EventSink, SkyEvent};

/// Bevy message carrying the sky entity and a reveal transition from its tracker.
///
/// Only [`SkyEvent::AnchorEntered`], [`SkyEvent::AnchorLeft`] and
/// [`SkyEvent::AnchorRevealed`] are forwarded.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct SkyRevealMessage {
    pub sky: Entity,
    pub event: SkyEvent,
}

/// Event sink that buffers reveal transitions for one sky entity until they are written
/// as messages.
pub struct MessageSink {
    pub sky: Entity,
    pub pending: Vec<SkyRevealMessage>,
}

impl MessageSink {
    pub fn new(sky: Entity) -> Self {
        Self {
            sky,
            pending: Vec::new(),
        }
    }
}

impl EventSink for MessageSink {
    #[inline]
    fn send(&mut self, event: SkyEvent) {
        if matches!(
            event,
            SkyEvent::AnchorEntered { .. }
                | SkyEvent::AnchorLeft { .. }
                | SkyEvent::AnchorRevealed { .. }
        ) {
            self.pending.push(SkyRevealMessage {
                sky: self.sky,
                event,
            });
        }
    }
}
