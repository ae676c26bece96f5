//! Integration tests: configure the process-wide checker.
//!
//! Kept in its own test binary: the checker can be installed only once per
//! process.

use pretty_assertions::assert_eq;
use shapelib::{annotate, CheckConstants, Error, Evaluation, Glyph, Rect, Shape, ShapeChecker, System};

#[test]
fn install_once_then_refuse() {
    let invalid = CheckConstants {
        max_lyrics_height: f64::NAN,
        ..CheckConstants::default()
    };
    assert!(matches!(
        ShapeChecker::install(invalid),
        Err(Error::InvalidConstant { .. })
    ));

    let constants = CheckConstants::from_json(r#"{ "apply_specific_check": false }"#).unwrap();
    let installed = ShapeChecker::install(constants.clone()).unwrap();
    assert_eq!(installed.constants(), &constants);
    assert_eq!(ShapeChecker::instance().constants(), &constants);

    assert!(matches!(
        ShapeChecker::install(CheckConstants::default()),
        Err(Error::AlreadyInitialized)
    ));

    // Checks are now disabled process-wide.
    let mut eval = Evaluation::new(Shape::Flat, 0.6);
    annotate(&System::new(0, 100, 10, 20), &mut eval, &Glyph::new(1, Rect::new(500, 0, 5, 5)));
    assert_eq!(eval, Evaluation::new(Shape::Flat, 0.6));
}
