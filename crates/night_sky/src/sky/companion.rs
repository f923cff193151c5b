//! Companion derivation: one hidden object per anchor, offset below it.
use glam::Vec2;

use crate::error::{Error, Result};
use crate::sky::{AnchorStar, AnchoredCompanion, Companion, CompanionKind};

/// Vertical distance between an anchor and its companion.
pub const DEFAULT_COMPANION_OFFSET: f32 = 100.0;

/// Derive one companion per anchor, placed `DEFAULT_COMPANION_OFFSET` below it.
///
/// `kinds[i]` becomes the kind of the companion of `anchors[i]`. The two slices must have
/// the same length.
pub fn derive_companions(
    anchors: &[AnchorStar],
    kinds: &[CompanionKind],
) -> Result<Vec<Companion>> {
    derive_companions_with_offset(anchors, kinds, DEFAULT_COMPANION_OFFSET)
}

pub fn derive_companions_with_offset(
    anchors: &[AnchorStar],
    kinds: &[CompanionKind],
    offset: f32,
) -> Result<Vec<Companion>> {
    if anchors.len() != kinds.len() {
        return Err(Error::CompanionCountMismatch {
            anchors: anchors.len(),
            kinds: kinds.len(),
        });
    }

    Ok(anchors
        .iter()
        .zip(kinds)
        .map(|(anchor, &kind)| Companion {
            anchor_index: anchor.index,
            kind,
            position: anchor.position + Vec2::new(0.0, offset),
        })
        .collect())
}

/// Pair each anchor with its derived companion.
pub fn pair_companions(
    anchors: &[AnchorStar],
    kinds: &[CompanionKind],
    offset: f32,
) -> Result<Vec<AnchoredCompanion>> {
    let companions = derive_companions_with_offset(anchors, kinds, offset)?;
    Ok(anchors
        .iter()
        .zip(companions)
        .map(|(&anchor, companion)| AnchoredCompanion { anchor, companion })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(index: usize, x: f32, y: f32) -> AnchorStar {
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

    fn five_anchors() -> Vec<AnchorStar> {
        vec![
            anchor(0, 1000.0, 250.0),
            anchor(1, 1100.0, 560.0),
            anchor(2, 990.5, 870.25),
            anchor(3, 1300.0, 1100.0),
            anchor(4, 1010.0, 1399.75),
        ]
    }

    #[test]
    fn companions_sit_exactly_below_anchors() {
        let anchors = five_anchors();
        let companions = derive_companions(&anchors, &CompanionKind::DEFAULT_SEQUENCE).unwrap();

        assert_eq!(companions.len(), anchors.len());
        for (a, c) in anchors.iter().zip(&companions) {
            assert_eq!(c.anchor_index, a.index);
            assert_eq!(c.position, Vec2::new(a.position.x, a.position.y + 100.0));
        }
        assert_eq!(companions[0].kind, CompanionKind::Moon);
        assert_eq!(companions[1].kind, CompanionKind::PurpleCloud);
        assert_eq!(companions[2].kind, CompanionKind::Venus);
        assert_eq!(companions[3].kind, CompanionKind::OrangeCloud);
        assert_eq!(companions[4].kind, CompanionKind::Neptune);
    }

    #[test]
    fn derivation_is_deterministic() {
        let anchors = five_anchors();
        let a = derive_companions(&anchors, &CompanionKind::DEFAULT_SEQUENCE).unwrap();
        let b = derive_companions(&anchors, &CompanionKind::DEFAULT_SEQUENCE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mismatched_lengths_fail_fast() {
        let anchors = five_anchors();
        let err = derive_companions(&anchors[..3], &CompanionKind::DEFAULT_SEQUENCE).unwrap_err();
        assert!(matches!(
            err,
            Error::CompanionCountMismatch {
                anchors: 3,
                kinds: 5
            }
        ));

        let err = pair_companions(&anchors, &[CompanionKind::Moon], 100.0).unwrap_err();
        assert!(matches!(
            err,
            Error::CompanionCountMismatch {
                anchors: 5,
                kinds: 1
            }
        ));
    }

    #[test]
    fn pairs_keep_anchor_and_companion_together() {
        let anchors = five_anchors();
        let kinds = [
            CompanionKind::Neptune,
            CompanionKind::Neptune,
            CompanionKind::Moon,
            CompanionKind::Venus,
            CompanionKind::Moon,
        ];
        let pairs = pair_companions(&anchors, &kinds, 40.0).unwrap();
        for (i, pair) in pairs.iter().enumerate() {
            assert_eq!(pair.anchor, anchors[i]);
            assert_eq!(pair.companion.anchor_index, i);
            assert_eq!(pair.companion.kind, kinds[i]);
            assert_eq!(pair.companion.position.y, anchors[i].position.y + 40.0);
        }
    }

    #[test]
    fn empty_inputs_pair_to_nothing() {
        assert!(derive_companions(&[], &[]).unwrap().is_empty());
    }
}
