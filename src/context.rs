//! Read-only views of the sheet context the checks consult.
//!
//! The checks never own glyphs, staves or systems. Hosts plug their own
//! sheet model in by implementing these traits; [`crate::model`] provides a
//! plain in-memory implementation.

use serde::{Deserialize, Serialize};

use crate::geometry::{Line, Point, PointF, Rect};

/// A detected glyph, as seen by the checks.
pub trait GlyphView {
    fn id(&self) -> u32;

    /// Bounding box, in pixels.
    fn bounds(&self) -> Rect;

    /// Number of foreground pixels.
    fn weight(&self) -> u32;

    /// Mass center of the foreground pixels.
    fn centroid(&self) -> PointF;

    /// Whether the glyph is still in use (not merged or discarded).
    fn is_active(&self) -> bool {
        true
    }

    /// Integer center of the bounding box.
    fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Exact center of the bounding box.
    fn center_2d(&self) -> PointF {
        self.bounds().center_f()
    }

    fn height(&self) -> i32 {
        self.bounds().height
    }
}

/// A staff of the system.
pub trait StaffView {
    fn id(&self) -> u32;

    fn is_tablature(&self) -> bool;

    /// Pitch position of a point: 0 on the middle line, one unit per
    /// half interline, positive going down (±4 on the outer lines of a
    /// 5-line staff).
    fn pitch_position_of(&self, point: PointF) -> f64;

    /// Ordinate of the first (top) line at abscissa `x`.
    fn first_line_y_at(&self, x: f64) -> f64;

    /// Vertical distance between the staff band and `rect`, 0 when they
    /// overlap.
    fn gap_to(&self, rect: &Rect) -> i32;
}

/// A stem candidate already present in the system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StemInfo {
    pub bounds: Rect,
    /// Median line, from top to bottom.
    pub median: Line,
}

/// A system: a group of staves played together, with its abscissa limits.
pub trait SystemView {
    /// Left abscissa of the system.
    fn left(&self) -> i32;

    /// Right abscissa of the system.
    fn right(&self) -> i32;

    /// Abscissa where the staff headers (clef, key, time) end.
    fn header_stop(&self) -> i32;

    /// Main interline of the sheet, in pixels.
    fn interline(&self) -> i32;

    /// Staff closest to `point`, none if the system has no staff.
    fn closest_staff(&self, point: PointF) -> Option<&dyn StaffView>;

    /// Top staff. Staves are told apart by reference, not by id, so this
    /// must return the same instance `closest_staff` yields for it.
    fn first_staff(&self) -> Option<&dyn StaffView>;

    /// Stems known in the system.
    fn stems(&self) -> Vec<StemInfo>;

    /// Pitch position of `point` relative to its closest staff. None when
    /// there is no such staff or when it is a tablature.
    fn estimated_pitch(&self, point: PointF) -> Option<f64> {
        let staff = self.closest_staff(point)?;
        if staff.is_tablature() {
            return None;
        }
        Some(staff.pitch_position_of(point))
    }

    fn scale(&self) -> Scale {
        Scale::new(self.interline())
    }
}

/// Converts interline fractions to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    interline: i32,
}

impl Scale {
    pub const fn new(interline: i32) -> Self {
        Self { interline }
    }

    pub fn interline(&self) -> i32 {
        self.interline
    }

    /// `fraction × interline`, rounded to the nearest pixel.
    pub fn to_pixels(&self, fraction: f64) -> i32 {
        (fraction * self.interline as f64).round() as i32
    }

    /// A pixel length expressed in interlines.
    pub fn normalize(&self, pixels: i32) -> f64 {
        pixels as f64 / self.interline as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_rounds_to_pixels() {
        let scale = Scale::new(20);
        assert_eq!(scale.to_pixels(0.2), 4);
        assert_eq!(scale.to_pixels(8.0), 160);
        assert_eq!(Scale::new(18).to_pixels(0.25), 5);
        assert_eq!(scale.normalize(50), 2.5);
    }
}
