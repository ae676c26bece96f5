//! shapelib: glyph shape taxonomy and context-based shape checks for
//! optical music recognition.
//!
//! A glyph classifier only sees pixels, so it cannot tell an augmentation
//! dot from a staccato, or a half rest from a whole rest. This crate holds
//! the closed [`Shape`] catalog and re-examines each classifier candidate
//! against its musical context (pitch position, closest staff, nearby
//! stems, position within the system) to confirm, reject or refine it.
//!
//! # Example
//! ```no_run
//! use shapelib::{annotate, Evaluation, Glyph, Rect, Shape, Staff, System};
//!
//! let system = System::new(0, 1000, 120, 20)
//!     .with_staff(Staff::regular(1, 0, 1000, 100, 20, 5));
//! let glyph = Glyph::new(7, Rect::new(400, 120, 24, 10));
//!
//! let mut eval = Evaluation::new(Shape::HwRestSet, 0.9);
//! annotate(&system, &mut eval, &glyph);
//! println!("{} {:?}", eval.shape, eval.failure);
//! ```

pub mod checker;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod evaluation;
pub mod geometry;
pub mod model;
pub mod rational;
pub mod shape;
pub mod shape_set;

use serde::Serialize;

pub use checker::{CheckContext, CheckRegistry, Checker, Scope, ShapeChecker};
pub use color::Color;
pub use config::CheckConstants;
pub use context::{GlyphView, Scale, StaffView, StemInfo, SystemView};
pub use error::{Error, Result};
pub use evaluation::{Evaluation, Failure, FailureCode};
pub use geometry::{Line, Point, PointF, Rect};
pub use model::{Glyph, Staff, StaffLine, System};
pub use rational::Rational;
pub use shape::{HeadMotif, PhysicalShape, Shape, LAST_PHYSICAL_SHAPE};
pub use shape_set::ShapeSet;

/// Check a classifier candidate with the process-wide [`ShapeChecker`].
///
/// `eval.shape` may be refined and `eval.failure` set; see
/// [`ShapeChecker::annotate`].
pub fn annotate(system: &dyn SystemView, eval: &mut Evaluation, glyph: &dyn GlyphView) {
    ShapeChecker::instance().annotate(system, eval, glyph);
}

/// One catalog entry, as dumped by [`catalog_to_json`].
#[derive(Debug, Serialize)]
struct CatalogEntry {
    ordinal: usize,
    name: &'static str,
    description: &'static str,
    trainable: bool,
    physical_shape: Shape,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<String>,
    color: Color,
}

/// Dump the whole shape catalog as JSON, in catalog order.
/// Useful for tooling that needs classifier indexes or palette colors.
pub fn catalog_to_json() -> Result<String> {
    let entries: Vec<CatalogEntry> = Shape::ALL
        .iter()
        .map(|&shape| CatalogEntry {
            ordinal: shape.ordinal(),
            name: shape.name(),
            description: shape.description(),
            trainable: shape.is_trainable(),
            physical_shape: shape.physical_shape(),
            duration: shape.note_duration().map(|d| d.to_string()),
            color: shape.color(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}
