//! The standard checkers.
//!
//! Pitch positions are read at the exact center of the glyph box. Rules
//! that need a pitch and cannot get one (no staff, or a tablature staff)
//! reject with [`FailureCode::Tablature`] when they report a code at all.

use tracing::debug;

use super::{CheckContext, Checker, Scope};
use crate::config::{MAX_LONG_REST_PITCH_POSITION, MAX_WHOLE_TIME_HEIGHT};
use crate::context::{GlyphView, StaffView};
use crate::evaluation::{Evaluation, FailureCode};
use crate::geometry::PointF;
use crate::shape::Shape;
use crate::shape_set::{
    ShapeSet, ARTICULATIONS, CLEFS, DYNAMICS, FERMATA_ARCS, MARKERS, PEDALS, REPEAT_BARS,
    RESTS, SMALL_CLEFS, TUPLETS, WHOLE_TIMES,
};

// Group unions used as scopes
static STAFF_HEIGHT_SETS: [&ShapeSet; 2] = [&CLEFS, &WHOLE_TIMES];
static OFF_STAFF_SETS: [&ShapeSet; 2] = [&DYNAMICS, &FERMATA_ARCS];
static STAFF_GAP_SETS: [&ShapeSet; 3] = [&RESTS, &DYNAMICS, &ARTICULATIONS];

/// Standard checkers, in chain order.
pub static CHECKERS: &[Checker] = &[
    Checker::new("NotWithinWidth", Scope::AllPhysical, not_within_width),
    Checker::new("MeasureRest", Scope::Shape(Shape::HwRestSet), measure_rest),
    Checker::new(
        "NotWithinStaffHeight",
        Scope::SetsAnd(&STAFF_HEIGHT_SETS, &[Shape::TimeCustom]),
        not_within_staff_height,
    ),
    Checker::new("WithinStaffHeight", Scope::Sets(&OFF_STAFF_SETS), within_staff_height),
    Checker::new("WithinHeader", Scope::Set(&SMALL_CLEFS), within_header),
    Checker::new(
        "NotWithinHeader",
        Scope::Shape(Shape::PercussionClef),
        not_within_header,
    ),
    Checker::new("Text", Scope::Shape(Shape::Text), text),
    Checker::new("WholeTimeSig", Scope::Set(&WHOLE_TIMES), whole_time_sig),
    Checker::new("StaffGap", Scope::Sets(&STAFF_GAP_SETS), staff_gap),
    Checker::new("BelowStaff", Scope::Set(&PEDALS), below_staff),
    Checker::new("AboveStaff", Scope::Set(&MARKERS), above_staff),
    Checker::new("Tuplet", Scope::Set(&TUPLETS), tuplet),
    Checker::new("LongRest", Scope::Shape(Shape::LongRest), long_rest),
    Checker::new(
        "SystemTop",
        Scope::Shapes(&[Shape::DalSegno, Shape::DaCapo, Shape::Segno, Shape::Coda]),
        system_top,
    ),
    Checker::new("MeasureRepeats", Scope::Set(&REPEAT_BARS), measure_repeats),
];

/// Replace the candidate by a more precise shape. Always accepts.
fn refine(eval: &mut Evaluation, glyph: &dyn GlyphView, shape: Shape) -> bool {
    if eval.shape != shape {
        if eval.grade() >= 0.1 {
            debug!(
                glyph = glyph.id(),
                from = %eval.shape,
                to = %shape,
                grade = eval.grade(),
                weight = glyph.weight(),
                bounds = ?glyph.bounds(),
                "Candidate refined"
            );
        }
        eval.shape = shape;
    }
    true
}

fn normalized_height(ctx: &CheckContext<'_>, glyph: &dyn GlyphView) -> f64 {
    ctx.system.scale().normalize(glyph.height())
}

// ── Checks ──────────────────────────────────────────────────────────

/// Glyph must overlap the system abscissa range. Brackets, braces and
/// texts may stick out.
pub fn not_within_width(ctx: &CheckContext<'_>, eval: &mut Evaluation, glyph: &dyn GlyphView) -> bool {
    if matches!(
        eval.shape,
        Shape::Bracket | Shape::Brace | Shape::Text | Shape::Character
    ) {
        return true;
    }

    let bounds = glyph.bounds();
    !(bounds.right() < ctx.system.left() || bounds.x > ctx.system.right())
}

/// Tell a whole rest from a half rest by its pitch position.
///
/// A whole rest hangs below a line and a half rest sits on a line, so twice
/// the pitch is `4k + 1` for a whole and `4k - 1` for a half (standard
/// positions -1.5 and -0.5). A candidate crossed by a stem is rather part
/// of a beam hook.
pub fn measure_rest(ctx: &CheckContext<'_>, eval: &mut Evaluation, glyph: &dyn GlyphView) -> bool {
    let Some(pitch) = ctx.system.estimated_pitch(glyph.center_2d()) else {
        return eval.reject(FailureCode::Tablature);
    };

    if crossed_by_stem(ctx, glyph) {
        return eval.reject(FailureCode::Stem);
    }

    match (2.0 * pitch).round_ties_even() as i64 {
        -13 | -9 | -5 | -1 | 3 | 7 | 11 | 15 => refine(eval, glyph, Shape::HalfRest),
        -15 | -11 | -7 | -3 | 1 | 5 | 9 | 13 => refine(eval, glyph, Shape::WholeRest),
        _ => eval.reject(FailureCode::Pitch),
    }
}

/// Whether a stem of the system crosses the glyph box, padded horizontally,
/// at the glyph center ordinate.
fn crossed_by_stem(ctx: &CheckContext<'_>, glyph: &dyn GlyphView) -> bool {
    let dx = ctx.system.scale().to_pixels(ctx.constants.measure_rest_dx);
    let bounds = glyph.bounds().grow(dx, 0);
    let y = glyph.center().y as f64;

    ctx.system.stems().iter().any(|stem| {
        stem.bounds.intersects(&bounds)
            && stem
                .median
                .x_at_y(y)
                .is_some_and(|x| bounds.contains(PointF::new(x, y)))
    })
}

/// Clefs and whole time signatures lie within the staff height.
pub fn not_within_staff_height(
    ctx: &CheckContext<'_>,
    eval: &mut Evaluation,
    glyph: &dyn GlyphView,
) -> bool {
    let Some(pitch) = ctx.system.estimated_pitch(glyph.center_2d()) else {
        return false;
    };

    let max = if eval.shape == Shape::PercussionClef { 2.0 } else { 4.0 };
    pitch.abs() < max
}

/// Dynamics and fermata arcs lie outside the staff height.
pub fn within_staff_height(
    ctx: &CheckContext<'_>,
    _eval: &mut Evaluation,
    glyph: &dyn GlyphView,
) -> bool {
    ctx.system
        .estimated_pitch(glyph.center_2d())
        .is_some_and(|pitch| pitch.abs() > 4.0)
}

/// Small clefs (clef changes) appear after the staff header.
pub fn within_header(ctx: &CheckContext<'_>, _eval: &mut Evaluation, glyph: &dyn GlyphView) -> bool {
    glyph.center_2d().x.abs() > ctx.system.header_stop() as f64
}

/// Percussion clefs only appear in the staff header.
pub fn not_within_header(
    ctx: &CheckContext<'_>,
    _eval: &mut Evaluation,
    glyph: &dyn GlyphView,
) -> bool {
    glyph.center_2d().x.abs() < ctx.system.header_stop() as f64
}

/// Texts close to a staff (lyrics) must be shorter than titles far from it.
pub fn text(ctx: &CheckContext<'_>, eval: &mut Evaluation, glyph: &dyn GlyphView) -> bool {
    let Some(pitch) = ctx.system.estimated_pitch(glyph.center_2d()) else {
        return eval.reject(FailureCode::Tablature);
    };

    let constants = ctx.constants;
    let max_height = if pitch.abs() >= constants.min_title_pitch_position {
        constants.max_title_height
    } else {
        constants.max_lyrics_height
    };

    if normalized_height(ctx, glyph) >= max_height {
        return eval.reject(FailureCode::TooHigh);
    }
    true
}

/// A whole time signature is centered on the staff and no taller than it.
pub fn whole_time_sig(ctx: &CheckContext<'_>, eval: &mut Evaluation, glyph: &dyn GlyphView) -> bool {
    let Some(pitch) = ctx.system.estimated_pitch(glyph.center_2d()) else {
        return eval.reject(FailureCode::Tablature);
    };

    if pitch.abs() > ctx.constants.max_time_pitch_position_margin {
        return eval.reject(FailureCode::Pitch);
    }

    if normalized_height(ctx, glyph) > MAX_WHOLE_TIME_HEIGHT {
        return eval.reject(FailureCode::TooHigh);
    }
    true
}

/// Rests, dynamics and articulations stay close to a staff.
pub fn staff_gap(ctx: &CheckContext<'_>, _eval: &mut Evaluation, glyph: &dyn GlyphView) -> bool {
    let Some(staff) = ctx.system.closest_staff(glyph.center_2d()) else {
        return false;
    };

    let max_gap = ctx.system.scale().to_pixels(ctx.constants.max_gap_to_staff);
    staff.gap_to(&glyph.bounds()) <= max_gap
}

/// Pedal marks lie below the staff, without touching it.
pub fn below_staff(ctx: &CheckContext<'_>, _eval: &mut Evaluation, glyph: &dyn GlyphView) -> bool {
    outside_staff(ctx, glyph, |pitch| pitch > 4.0)
}

/// Segno, coda and friends lie above the staff, without touching it.
pub fn above_staff(ctx: &CheckContext<'_>, _eval: &mut Evaluation, glyph: &dyn GlyphView) -> bool {
    outside_staff(ctx, glyph, |pitch| pitch < -4.0)
}

fn outside_staff(ctx: &CheckContext<'_>, glyph: &dyn GlyphView, side: impl Fn(f64) -> bool) -> bool {
    let center = glyph.center_2d();
    match ctx.system.estimated_pitch(center) {
        Some(pitch) if side(pitch) => {}
        _ => return false,
    }

    ctx.system
        .closest_staff(center)
        .is_some_and(|staff| staff.gap_to(&glyph.bounds()) > 0)
}

pub fn tuplet(ctx: &CheckContext<'_>, eval: &mut Evaluation, glyph: &dyn GlyphView) -> bool {
    let Some(pitch) = ctx.system.estimated_pitch(glyph.center_2d()) else {
        return eval.reject(FailureCode::Tablature);
    };

    if pitch.abs() > ctx.constants.max_tuplet_pitch_position {
        return eval.reject(FailureCode::Pitch);
    }
    true
}

/// A long rest sits on the staff middle line.
pub fn long_rest(ctx: &CheckContext<'_>, eval: &mut Evaluation, glyph: &dyn GlyphView) -> bool {
    let Some(pitch) = ctx.system.estimated_pitch(glyph.center_2d()) else {
        return eval.reject(FailureCode::Tablature);
    };

    if pitch.abs() > MAX_LONG_REST_PITCH_POSITION {
        return eval.reject(FailureCode::Pitch);
    }
    true
}

/// Repeat markers sit just above the first staff of the system.
pub fn system_top(ctx: &CheckContext<'_>, _eval: &mut Evaluation, glyph: &dyn GlyphView) -> bool {
    let bounds = glyph.bounds();
    let bottom = PointF::new(
        (bounds.x + bounds.width / 2) as f64,
        bounds.bottom() as f64,
    );

    let (Some(staff), Some(first)) = (ctx.system.closest_staff(bottom), ctx.system.first_staff())
    else {
        return false;
    };
    let is_first = std::ptr::addr_eq(
        staff as *const dyn StaffView,
        first as *const dyn StaffView,
    );
    if !is_first || staff.is_tablature() {
        return false;
    }

    let center = glyph.center();
    let pitch = staff.pitch_position_of(center.into());
    let y_max = staff.first_line_y_at(center.x as f64);

    ctx.constants.min_marker_pitch_position <= pitch && bounds.bottom() as f64 <= y_max
}

/// Measure-repeat signs sit on the staff middle line.
pub fn measure_repeats(
    ctx: &CheckContext<'_>,
    eval: &mut Evaluation,
    glyph: &dyn GlyphView,
) -> bool {
    let Some(pitch) = ctx.system.estimated_pitch(glyph.center_2d()) else {
        return eval.reject(FailureCode::Tablature);
    };

    if pitch.abs() > ctx.constants.max_measure_repeat_pitch_position {
        return eval.reject(FailureCode::Pitch);
    }
    true
}
