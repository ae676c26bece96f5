//! In-memory sheet model.
//!
//! Plain records for glyphs, staves and systems, implementing the
//! [`context`](crate::context) views. They can be built in code or loaded
//! from JSON snapshots, for hosts without a sheet model of their own.

use serde::{Deserialize, Serialize};

use crate::context::{GlyphView, StaffView, StemInfo, SystemView};
use crate::error::{Error, Result};
use crate::geometry::{Line, PointF, Rect};

/// A detected glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub id: u32,
    /// Bounding box in pixels
    pub bounds: Rect,
    /// Number of foreground pixels (defaults to the box area)
    #[serde(default)]
    pub weight: Option<u32>,
    /// Mass center (defaults to the box center)
    #[serde(default)]
    pub centroid: Option<PointF>,
    /// False once the glyph has been merged or discarded
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Glyph {
    pub fn new(id: u32, bounds: Rect) -> Self {
        Self {
            id,
            bounds,
            weight: None,
            centroid: None,
            active: true,
        }
    }
}

impl GlyphView for Glyph {
    fn id(&self) -> u32 {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn weight(&self) -> u32 {
        self.weight.unwrap_or_else(|| {
            let area = self.bounds.width.max(0) as u64 * self.bounds.height.max(0) as u64;
            area.min(u32::MAX as u64) as u32
        })
    }

    fn centroid(&self) -> PointF {
        self.centroid.unwrap_or_else(|| self.bounds.center_f())
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// A staff line, as points sampled from left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffLine {
    pub points: Vec<PointF>,
}

impl StaffLine {
    /// Horizontal line from `left` to `right` at ordinate `y`.
    pub fn straight(left: f64, right: f64, y: f64) -> Self {
        Self {
            points: vec![PointF::new(left, y), PointF::new(right, y)],
        }
    }

    /// Ordinate at abscissa `x`, interpolated between samples and held
    /// constant beyond both ends.
    pub fn y_at(&self, x: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return f64::NAN,
        };
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        self.points
            .windows(2)
            .find(|w| x <= w[1].x)
            .and_then(|w| Line::new(w[0], w[1]).y_at_x(x))
            .unwrap_or(last.y)
    }
}

/// A staff: its lines, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: u32,
    #[serde(default)]
    pub tablature: bool,
    pub lines: Vec<StaffLine>,
}

impl Staff {
    /// Staff of `line_count` straight lines, `interline` apart, the first
    /// one at ordinate `top`.
    pub fn regular(
        id: u32,
        left: i32,
        right: i32,
        top: i32,
        interline: i32,
        line_count: usize,
    ) -> Self {
        let lines = (0..line_count)
            .map(|i| {
                StaffLine::straight(
                    left as f64,
                    right as f64,
                    (top + i as i32 * interline) as f64,
                )
            })
            .collect();
        Self {
            id,
            tablature: false,
            lines,
        }
    }

    pub fn tablature(mut self) -> Self {
        self.tablature = true;
        self
    }

    fn last_line_y_at(&self, x: f64) -> f64 {
        self.lines.last().map_or(f64::NAN, |line| line.y_at(x))
    }

    /// Vertical distance from `point` to the staff band, 0 inside.
    fn distance_to(&self, point: PointF) -> f64 {
        let top = self.first_line_y_at(point.x);
        let bottom = self.last_line_y_at(point.x);
        if point.y < top {
            top - point.y
        } else if point.y > bottom {
            point.y - bottom
        } else {
            0.0
        }
    }
}

impl StaffView for Staff {
    fn id(&self) -> u32 {
        self.id
    }

    fn is_tablature(&self) -> bool {
        self.tablature
    }

    fn pitch_position_of(&self, point: PointF) -> f64 {
        let top = self.first_line_y_at(point.x);
        let bottom = self.last_line_y_at(point.x);
        let steps = self.lines.len().saturating_sub(1) as f64;
        steps * (2.0 * point.y - bottom - top) / (bottom - top)
    }

    fn first_line_y_at(&self, x: f64) -> f64 {
        self.lines.first().map_or(f64::NAN, |line| line.y_at(x))
    }

    fn gap_to(&self, rect: &Rect) -> i32 {
        let x = rect.center().x as f64;
        let staff_top = self.first_line_y_at(x).round() as i32;
        let staff_bottom = self.last_line_y_at(x).round() as i32;
        let glyph_top = rect.y;
        let glyph_bottom = rect.bottom() - 1;

        if glyph_top.max(staff_top) <= glyph_bottom.min(staff_bottom) {
            return 0;
        }
        (staff_top - glyph_bottom)
            .abs()
            .min((glyph_top - staff_bottom).abs())
    }
}

impl StemInfo {
    /// Vertical stem at abscissa `x`, from `top` to `bottom`.
    pub fn vertical(x: i32, top: i32, bottom: i32) -> Self {
        Self {
            bounds: Rect::new(x, top, 1, bottom - top),
            median: Line::new(
                PointF::new(x as f64 + 0.5, top as f64),
                PointF::new(x as f64 + 0.5, bottom as f64),
            ),
        }
    }
}

/// A system: staves played together, with the stems found so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub left: i32,
    pub right: i32,
    /// End of the staff headers (clef, key, time)
    pub header_stop: i32,
    pub interline: i32,
    /// Staves, top to bottom
    pub staves: Vec<Staff>,
    #[serde(default)]
    pub stems: Vec<StemInfo>,
}

impl System {
    pub fn new(left: i32, right: i32, header_stop: i32, interline: i32) -> Self {
        Self {
            left,
            right,
            header_stop,
            interline,
            staves: Vec::new(),
            stems: Vec::new(),
        }
    }

    pub fn with_staff(mut self, staff: Staff) -> Self {
        self.staves.push(staff);
        self
    }

    pub fn with_stem(mut self, stem: StemInfo) -> Self {
        self.stems.push(stem);
        self
    }

    /// Load a system snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let system: System = serde_json::from_str(json)?;
        system.validate()?;
        Ok(system)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the system is usable by the checks.
    pub fn validate(&self) -> Result<()> {
        if self.interline <= 0 {
            return Err(Error::InvalidSystem(format!(
                "interline must be positive, got {}",
                self.interline
            )));
        }
        if self.right < self.left {
            return Err(Error::InvalidSystem(format!(
                "right {} is left of left {}",
                self.right, self.left
            )));
        }
        for staff in &self.staves {
            if staff.lines.len() < 2 {
                return Err(Error::InvalidSystem(format!(
                    "staff {} has {} line(s)",
                    staff.id,
                    staff.lines.len()
                )));
            }
            if staff.lines.iter().any(|line| line.points.is_empty()) {
                return Err(Error::InvalidSystem(format!(
                    "staff {} has an empty line",
                    staff.id
                )));
            }
        }
        Ok(())
    }
}

impl SystemView for System {
    fn left(&self) -> i32 {
        self.left
    }

    fn right(&self) -> i32 {
        self.right
    }

    fn header_stop(&self) -> i32 {
        self.header_stop
    }

    fn interline(&self) -> i32 {
        self.interline
    }

    fn closest_staff(&self, point: PointF) -> Option<&dyn StaffView> {
        self.staves
            .iter()
            .min_by(|a, b| a.distance_to(point).total_cmp(&b.distance_to(point)))
            .map(|staff| staff as &dyn StaffView)
    }

    fn first_staff(&self) -> Option<&dyn StaffView> {
        self.staves.first().map(|staff| staff as &dyn StaffView)
    }

    fn stems(&self) -> Vec<StemInfo> {
        self.stems.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_staves() -> System {
        System::new(0, 1000, 120, 20)
            .with_staff(Staff::regular(1, 0, 1000, 100, 20, 5))
            .with_staff(Staff::regular(2, 0, 1000, 300, 20, 5))
    }

    #[test]
    fn pitch_positions_on_lines() {
        let staff = Staff::regular(1, 0, 1000, 100, 20, 5);
        assert_eq!(staff.pitch_position_of(PointF::new(50.0, 100.0)), -4.0);
        assert_eq!(staff.pitch_position_of(PointF::new(50.0, 140.0)), 0.0);
        assert_eq!(staff.pitch_position_of(PointF::new(50.0, 180.0)), 4.0);
        assert_eq!(staff.pitch_position_of(PointF::new(50.0, 125.0)), -1.5);
    }

    #[test]
    fn sloped_line_interpolates() {
        let line = StaffLine {
            points: vec![PointF::new(0.0, 100.0), PointF::new(100.0, 110.0)],
        };
        assert_eq!(line.y_at(50.0), 105.0);
        assert_eq!(line.y_at(-10.0), 100.0);
        assert_eq!(line.y_at(500.0), 110.0);
    }

    #[test]
    fn gap_is_zero_on_overlap() {
        let staff = Staff::regular(1, 0, 1000, 100, 20, 5);
        assert_eq!(staff.gap_to(&Rect::new(10, 90, 10, 20)), 0);
        assert_eq!(staff.gap_to(&Rect::new(10, 60, 10, 20)), 21);
        assert_eq!(staff.gap_to(&Rect::new(10, 200, 10, 10)), 20);
    }

    #[test]
    fn closest_staff_by_band_distance() {
        let system = two_staves();
        let near_first = system.closest_staff(PointF::new(10.0, 200.0)).unwrap();
        assert_eq!(near_first.id(), 1);
        let near_second = system.closest_staff(PointF::new(10.0, 250.0)).unwrap();
        assert_eq!(near_second.id(), 2);
        assert_eq!(system.first_staff().map(|s| s.id()), Some(1));
    }

    #[test]
    fn default_weight_saturates() {
        assert_eq!(Glyph::new(1, Rect::new(0, 0, 30, 20)).weight(), 600);
        assert_eq!(Glyph::new(2, Rect::new(0, 0, 100_000, 100_000)).weight(), u32::MAX);
        assert_eq!(Glyph::new(3, Rect::new(0, 0, -4, 20)).weight(), 0);
    }

    #[test]
    fn tablature_has_no_pitch() {
        let system = System::new(0, 1000, 120, 20)
            .with_staff(Staff::regular(1, 0, 1000, 100, 20, 6).tablature());
        assert_eq!(system.estimated_pitch(PointF::new(10.0, 140.0)), None);
    }

    #[test]
    fn json_snapshot_round_trip() {
        let system = two_staves().with_stem(StemInfo::vertical(300, 100, 170));
        let back = System::from_json(&system.to_json().unwrap()).unwrap();
        assert_eq!(back, system);

        let err = System::from_json(
            r#"{"left": 0, "right": 10, "header_stop": 0, "interline": 0, "staves": []}"#,
        );
        assert!(matches!(err, Err(Error::InvalidSystem(_))));
    }
}
