//! Fading trail on the second track
//!
//! The track piece under the second indicator is drawn fully opaque and the
//! pieces behind it fade back to the light color over a quarter turn.

use nannou::color::{srgba, Srgba};

use crate::tokens::{TRACK_PIECE_COUNT, TRACK_PIECE_DEGREES, TRAIL_PIECE_COUNT};

/// Per-piece color overrides for the second track, rebuilt every frame
#[derive(Debug, Clone, PartialEq)]
pub struct GradientTrail {
    colors: [Option<Srgba<u8>>; TRACK_PIECE_COUNT],
}

impl GradientTrail {
    /// Build the trail ending at the piece under `second_degrees`.
    ///
    /// Alpha runs from 255 at the head down toward the alpha of `light`,
    /// walking counter-clockwise one piece at a time.
    pub fn compute(second_degrees: f32, light: Srgba<u8>) -> Self {
        let mut colors = [None; TRACK_PIECE_COUNT];
        let head = (second_degrees / TRACK_PIECE_DEGREES).floor().max(0.0) as usize;
        let end_alpha = f32::from(light.alpha);
        let delta_alpha = 255.0 - end_alpha;

        let mut index = head % TRACK_PIECE_COUNT;
        for step in 0..TRAIL_PIECE_COUNT {
            let alpha = (255.0 - delta_alpha * step as f32 / TRAIL_PIECE_COUNT as f32) as u8;
            colors[index] = Some(srgba(light.red, light.green, light.blue, alpha));
            index = (index + TRACK_PIECE_COUNT - 1) % TRACK_PIECE_COUNT;
        }

        Self { colors }
    }

    /// Override for a track piece, if it is part of the trail
    pub fn color_at(&self, piece: usize) -> Option<Srgba<u8>> {
        self.colors.get(piece).copied().flatten()
    }

    /// Number of pieces carrying an override
    pub fn len(&self) -> usize {
        self.colors.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    fn light() -> Srgba<u8> {
        Style::default().light()
    }

    #[test]
    fn test_trail_has_fifty_pieces() {
        for second in [0.0, 1.79, 90.0, 180.0, 359.99] {
            assert_eq!(GradientTrail::compute(second, light()).len(), TRAIL_PIECE_COUNT);
        }
    }

    #[test]
    fn test_head_is_opaque_and_fades_backward() {
        let trail = GradientTrail::compute(180.0, light());
        let head = 100;
        assert_eq!(trail.color_at(head).unwrap().alpha, 255);
        assert!(trail.color_at(head + 1).is_none());

        let mut previous = 255;
        for step in 0..TRAIL_PIECE_COUNT {
            let alpha = trail.color_at(head - step).unwrap().alpha;
            assert!(alpha <= previous);
            assert!(alpha >= light().alpha);
            previous = alpha;
        }
        assert!(trail.color_at(head - TRAIL_PIECE_COUNT).is_none());
    }

    #[test]
    fn test_tail_alpha_values() {
        let trail = GradientTrail::compute(0.0, light());
        // 255 - 112 * 49 / 50 = 145.24
        assert_eq!(trail.color_at(TRACK_PIECE_COUNT - 49).unwrap().alpha, 145);
        // 255 - 112 * 25 / 50 = 199
        assert_eq!(trail.color_at(TRACK_PIECE_COUNT - 25).unwrap().alpha, 199);
    }

    #[test]
    fn test_trail_wraps_past_twelve() {
        let trail = GradientTrail::compute(3.6, light());
        assert!(trail.color_at(2).is_some());
        assert!(trail.color_at(0).is_some());
        assert!(trail.color_at(TRACK_PIECE_COUNT - 1).is_some());
        assert!(trail.color_at(TRACK_PIECE_COUNT - 47).is_some());
        assert!(trail.color_at(TRACK_PIECE_COUNT - 48).is_none());
        assert!(trail.color_at(3).is_none());
    }

    #[test]
    fn test_trail_keeps_light_rgb() {
        let light = srgba(0x12, 0x34, 0x56, 0x8F);
        let trail = GradientTrail::compute(45.0, light);
        let head = trail.color_at(25).unwrap();
        assert_eq!((head.red, head.green, head.blue), (0x12, 0x34, 0x56));
        assert!(trail.color_at(TRACK_PIECE_COUNT + 3).is_none());
    }
}
