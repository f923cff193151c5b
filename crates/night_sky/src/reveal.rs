//! Proximity-driven reveal tracking.
//!
//! Two pieces of state are kept per anchor and both are observable:
//!
//! - **near**: recomputed from scratch on every [`RevealTracker::evaluate`] call. An anchor is
//!   near while the agent is strictly closer than the reveal radius. This is what decides
//!   whether a companion is drawn this tick.
//! - **revealed**: a one-way latch set the first time an anchor becomes near. It never resets.
//!
//! Companion visibility is intentionally not gated by the latch; nothing in this crate reads
//! the latch except its accessors and the events it emits.
use std::collections::BTreeSet;

use glam::Vec2;
use tracing::debug;

use crate::events::{EventSink, SkyEvent};
use crate::sky::AnchorStar;

pub const DEFAULT_REVEAL_RADIUS: f32 = 50.0;

/// Instantaneous visibility of one anchor's companion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorVisibility {
    #[default]
    Hidden,
    Near,
}

/// Changes produced by one [`RevealTracker::evaluate`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealUpdate {
    /// Anchors that became near during this call.
    pub entered: Vec<usize>,
    /// Anchors that stopped being near during this call.
    pub left: Vec<usize>,
    /// Anchors revealed for the first time during this call.
    pub revealed: Vec<usize>,
}

impl RevealUpdate {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.left.is_empty() && self.revealed.is_empty()
    }
}

/// Per-anchor near/revealed state with a single mutator.
///
/// Indices are positions in the anchor slice passed to [`RevealTracker::evaluate`], which
/// match [`AnchorStar::index`] for anchors produced by the placer.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    radius: f32,
    near: Vec<bool>,
    revealed: BTreeSet<usize>,
}

impl Default for RevealTracker {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_RADIUS)
    }
}

impl RevealTracker {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            near: Vec::new(),
            revealed: BTreeSet::new(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Evaluate the agent position against every anchor.
    ///
    /// With no agent every anchor is hidden and the revealed set is left untouched.
    pub fn evaluate(&mut self, agent: Option<Vec2>, anchors: &[AnchorStar]) -> RevealUpdate {
        self.evaluate_with_events(agent, anchors, &mut ())
    }

    pub fn evaluate_with_events(
        &mut self,
        agent: Option<Vec2>,
        anchors: &[AnchorStar],
        sink: &mut dyn EventSink,
    ) -> RevealUpdate {
        self.evaluate_positions(agent, anchors.iter().map(|a| a.position), sink)
    }

    /// Evaluate against bare anchor positions, in index order.
    ///
    /// Anchors past the end of a shorter sequence than the previous call are dropped and
    /// reported as left if they were near.
    pub fn evaluate_positions<I>(
        &mut self,
        agent: Option<Vec2>,
        positions: I,
        sink: &mut dyn EventSink,
    ) -> RevealUpdate
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut update = RevealUpdate::default();
        let mut count = 0;

        for (index, position) in positions.into_iter().enumerate() {
            if index == self.near.len() {
                self.near.push(false);
            }
            count = index + 1;

            let now_near = agent.is_some_and(|p| p.distance(position) < self.radius);
            let was_near = std::mem::replace(&mut self.near[index], now_near);

            if now_near && !was_near {
                update.entered.push(index);
                sink.send(SkyEvent::AnchorEntered { index });
            } else if was_near && !now_near {
                update.left.push(index);
                sink.send(SkyEvent::AnchorLeft { index });
            }

            if now_near && self.revealed.insert(index) {
                debug!(index, "anchor revealed");
                update.revealed.push(index);
                sink.send(SkyEvent::AnchorRevealed { index });
            }
        }
        for index in count..self.near.len() {
            if self.near[index] {
                update.left.push(index);
                sink.send(SkyEvent::AnchorLeft { index });
            }
        }
        self.near.truncate(count);

        update
    }

    /// True while the agent is within the reveal radius of anchor `index` as of the last
    /// evaluation.
    pub fn is_near(&self, index: usize) -> bool {
        self.near.get(index).copied().unwrap_or(false)
    }

    /// True once anchor `index` has ever been near.
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    pub fn visibility(&self, index: usize) -> AnchorVisibility {
        if self.is_near(index) {
            AnchorVisibility::Near
        } else {
            AnchorVisibility::Hidden
        }
    }

    pub fn near_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.near
            .iter()
            .enumerate()
            .filter_map(|(i, &near)| near.then_some(i))
    }

    /// Revealed indices in ascending order.
    pub fn revealed_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.revealed.iter().copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::VecSink;

    fn anchor_at(index: usize, x: f32, y: f32) -> AnchorStar {
        AnchorStar {
            index,
            position: Vec2::new(x, y),
            size: 16.0,
            brightness: 255.0,
            glow_size: 50.0,
            twinkle_speed: 0.02,
            phase: 0.0,
        }
    }

    #[test]
    fn near_uses_strict_radius() {
        let anchors = [anchor_at(0, 1000.0, 1000.0)];
        let mut tracker = RevealTracker::new(50.0);

        tracker.evaluate(Some(Vec2::new(1000.0, 1049.0)), &anchors);
        assert!(tracker.is_near(0));
        assert_eq!(tracker.visibility(0), AnchorVisibility::Near);
        assert!(tracker.is_revealed(0));

        tracker.evaluate(Some(Vec2::new(1000.0, 1051.0)), &anchors);
        assert!(!tracker.is_near(0));
        assert_eq!(tracker.visibility(0), AnchorVisibility::Hidden);
        assert!(tracker.is_revealed(0), "latch survives leaving the radius");
    }

    #[test]
    fn exact_radius_is_not_near() {
        let anchors = [anchor_at(0, 1000.0, 1000.0)];
        let mut tracker = RevealTracker::new(50.0);

        tracker.evaluate(Some(Vec2::new(1000.0, 1050.0)), &anchors);
        assert!(!tracker.is_near(0));
        assert!(!tracker.is_revealed(0));

        tracker.evaluate(Some(Vec2::new(1030.0, 1040.0)), &anchors);
        assert!(!tracker.is_near(0));
    }

    #[test]
    fn repeated_evaluation_is_idempotent() {
        let anchors = [anchor_at(0, 10.0, 10.0), anchor_at(1, 500.0, 500.0)];
        let mut tracker = RevealTracker::default();
        let agent = Some(Vec2::new(12.0, 9.0));

        let first = tracker.evaluate(agent, &anchors);
        assert_eq!(first.entered, vec![0]);
        assert_eq!(first.revealed, vec![0]);

        let second = tracker.evaluate(agent, &anchors);
        assert!(second.is_empty());
        assert!(tracker.is_revealed(0));
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn revealed_set_is_monotonic() {
        let anchors = [
            anchor_at(0, 0.0, 0.0),
            anchor_at(1, 300.0, 0.0),
            anchor_at(2, 600.0, 0.0),
        ];
        let mut tracker = RevealTracker::new(50.0);
        let path = [
            Some(Vec2::new(1.0, 1.0)),
            Some(Vec2::new(150.0, 0.0)),
            None,
            Some(Vec2::new(601.0, -3.0)),
            Some(Vec2::new(-1000.0, -1000.0)),
            None,
        ];

        let mut previous: Vec<usize> = Vec::new();
        for agent in path {
            tracker.evaluate(agent, &anchors);
            let now: Vec<usize> = tracker.revealed_indices().collect();
            assert!(previous.iter().all(|i| now.contains(i)));
            previous = now;
        }
        assert_eq!(previous, vec![0, 2]);
        assert!(!tracker.is_revealed(1));
    }

    #[test]
    fn missing_agent_hides_everything_without_mutating_reveals() {
        let anchors = [anchor_at(0, 0.0, 0.0), anchor_at(1, 400.0, 0.0)];
        let mut tracker = RevealTracker::new(50.0);

        let update = tracker.evaluate(None, &anchors);
        assert!(update.is_empty());
        assert_eq!(tracker.near_indices().count(), 0);
        assert_eq!(tracker.revealed_count(), 0);

        tracker.evaluate(Some(Vec2::new(400.0, 10.0)), &anchors);
        let update = tracker.evaluate(None, &anchors);
        assert_eq!(update.left, vec![1]);
        assert!(!tracker.is_near(1));
        assert!(tracker.is_revealed(1));
    }

    #[test]
    fn overlapping_radii_mark_every_near_anchor() {
        let anchors = [anchor_at(0, 0.0, 0.0), anchor_at(1, 30.0, 0.0)];
        let mut tracker = RevealTracker::new(50.0);
        tracker.evaluate(Some(Vec2::new(15.0, 0.0)), &anchors);
        assert_eq!(tracker.near_indices().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(tracker.revealed_indices().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn events_follow_state_transitions() {
        let anchors = [anchor_at(0, 0.0, 0.0)];
        let mut tracker = RevealTracker::new(50.0);
        let mut sink = VecSink::new();

        tracker.evaluate_with_events(Some(Vec2::new(5.0, 5.0)), &anchors, &mut sink);
        tracker.evaluate_with_events(Some(Vec2::new(100.0, 5.0)), &anchors, &mut sink);
        tracker.evaluate_with_events(Some(Vec2::new(0.0, 0.0)), &anchors, &mut sink);

        assert_eq!(
            sink.into_inner(),
            vec![
                SkyEvent::AnchorEntered { index: 0 },
                SkyEvent::AnchorRevealed { index: 0 },
                SkyEvent::AnchorLeft { index: 0 },
                SkyEvent::AnchorEntered { index: 0 },
            ]
        );
    }

    #[test]
    fn shrinking_anchor_set_reports_dropped_near_anchors_as_left() {
        let anchors = [
            anchor_at(0, 0.0, 0.0),
            anchor_at(1, 400.0, 0.0),
            anchor_at(2, 410.0, 0.0),
        ];
        let mut tracker = RevealTracker::new(50.0);
        tracker.evaluate(Some(Vec2::new(405.0, 0.0)), &anchors);
        assert_eq!(tracker.near_indices().collect::<Vec<_>>(), vec![1, 2]);

        let mut sink = VecSink::new();
        let update =
            tracker.evaluate_with_events(Some(Vec2::new(405.0, 0.0)), &anchors[..1], &mut sink);

        assert_eq!(update.left, vec![1, 2]);
        assert!(update.entered.is_empty());
        assert_eq!(
            sink.into_inner(),
            vec![
                SkyEvent::AnchorLeft { index: 1 },
                SkyEvent::AnchorLeft { index: 2 },
            ]
        );
        assert_eq!(tracker.near_indices().count(), 0);
        assert!(tracker.is_revealed(2));
    }

    #[test]
    fn out_of_range_queries_are_false() {
        let tracker = RevealTracker::default();
        assert!(!tracker.is_near(7));
        assert!(!tracker.is_revealed(7));
        assert_eq!(tracker.visibility(7), AnchorVisibility::Hidden);
    }
}
