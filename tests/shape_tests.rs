//! Integration tests: invariants of the shape catalog and its groups.

use pretty_assertions::assert_eq;
use shapelib::shape_set::{self, PALETTE};
use shapelib::{catalog_to_json, HeadMotif, Rational, Shape, LAST_PHYSICAL_SHAPE};

#[test]
fn trainability_is_positional() {
    let last = LAST_PHYSICAL_SHAPE.ordinal();
    for &shape in Shape::ALL {
        assert_eq!(shape.is_trainable(), shape.ordinal() <= last, "{shape}");
        assert_eq!(shape.as_physical().is_some(), shape.is_trainable(), "{shape}");
    }
    let indexes: Vec<usize> = Shape::physical_shapes().map(|p| p.index()).collect();
    assert_eq!(indexes, (0..=last).collect::<Vec<_>>());
}

#[test]
fn back_references_point_to_physical_shapes() {
    for &shape in Shape::ALL {
        match shape.derived_from() {
            Some(physical) => {
                assert!(!shape.is_trainable(), "{shape} is physical and derived");
                assert!(physical.shape().is_trainable(), "{shape} -> {physical}");
                assert_eq!(shape.physical_shape(), physical.shape());
            }
            None => assert_eq!(shape.physical_shape(), shape),
        }
    }
}

#[test]
fn set_shapes_and_their_logical_forms() {
    let derived = |set: Shape| -> Vec<Shape> {
        Shape::ALL
            .iter()
            .copied()
            .filter(|s| s.derived_from().map(|p| p.shape()) == Some(set))
            .collect()
    };
    assert_eq!(
        derived(Shape::DotSet),
        [Shape::RepeatDot, Shape::AugmentationDot, Shape::Staccato]
    );
    assert_eq!(derived(Shape::HwRestSet), [Shape::WholeRest, Shape::HalfRest]);
    assert_eq!(derived(Shape::EighthSet), [Shape::GraceNote, Shape::MetroEighth]);

    for set in Shape::ALL.iter().filter(|s| s.name().ends_with("_set")) {
        assert!(set.is_trainable(), "{set}");
    }
}

#[test]
fn durations() {
    assert_eq!(Shape::LongRest.note_duration(), Some(Rational::from_integer(4)));
    assert_eq!(Shape::BreveRest.note_duration(), Some(Rational::from_integer(2)));
    assert_eq!(Shape::BreveCircleX.note_duration(), Some(Rational::from_integer(2)));
    assert_eq!(Shape::WholeRest.note_duration(), Some(Rational::from_integer(1)));
    assert_eq!(Shape::WholeNoteSmall.note_duration(), Some(Rational::from_integer(1)));
    assert_eq!(Shape::HalfRest.note_duration(), Some(Rational::new(1, 2)));
    assert_eq!(Shape::NoteheadDiamondVoid.note_duration(), Some(Rational::new(1, 2)));
    assert_eq!(Shape::QuarterRest.note_duration(), Some(Rational::new(1, 4)));
    assert_eq!(Shape::NoteheadCross.note_duration(), Some(Rational::new(1, 4)));
    assert_eq!(
        Shape::One128thRest.note_duration(),
        Some(Rational::new(1, 128))
    );
    assert_eq!(Shape::HwRestSet.note_duration(), None);
    assert_eq!(Shape::GClef.note_duration(), None);

    for &shape in Shape::ALL {
        if shape.is_head() || shape.is_rest() {
            assert!(shape.note_duration().is_some(), "{shape} has no duration");
        }
    }

    let rests: Vec<Rational> = shape_set::RESTS
        .shapes()
        .filter_map(|s| s.note_duration())
        .collect();
    assert!(rests.windows(2).all(|w| w[0] > w[1]), "rests not by decreasing value");
}

#[test]
fn slash_counts() {
    assert_eq!(Shape::RepeatOneBar.slash_count(), 1);
    assert_eq!(Shape::RepeatTwoBars.slash_count(), 2);
    assert_eq!(Shape::RepeatFourBars.slash_count(), 4);
    let others = Shape::ALL
        .iter()
        .filter(|s| !shape_set::REPEAT_BARS.contains(**s))
        .all(|s| s.slash_count() == 0);
    assert!(others);
}

#[test]
fn names_round_trip_through_serde() {
    for &shape in Shape::ALL {
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, format!("\"{}\"", shape.name()));
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
    }
    assert!(serde_json::from_str::<Shape>("\"WHOLE_RESTS\"").is_err());
}

#[test]
fn alpha_sorted_catalog() {
    let sorted = Shape::alpha_sorted();
    assert_eq!(sorted.len(), Shape::COUNT);
    assert!(sorted.windows(2).all(|w| w[0].name() < w[1].name()));
    assert_eq!(sorted[0], Shape::Accent);
}

#[test]
fn predicates() {
    assert!(Shape::NoteheadBlackSmall.is_head());
    assert!(Shape::NoteheadBlackSmall.is_small_head());
    assert!(!Shape::NoteheadBlack.is_small_head());
    assert!(Shape::WholeNoteCross.is_stem_less_head());
    assert!(!Shape::NoteheadVoid.is_stem_less_head());
    assert!(Shape::WholeNoteCross.is_percussion());
    assert!(!Shape::WholeNote.is_percussion());
    assert!(Shape::HalfRest.is_rest());
    assert!(!Shape::HwRestSet.is_rest());
    assert!(Shape::GraceNoteSlashDown.is_grace());
    assert!(Shape::SmallFlagSlashDown.is_small_flag());
    assert!(!Shape::Flag1.is_small_flag());
    assert!(Shape::KeyFlat4.is_flat_based());
    assert!(Shape::Flat.is_flat_based());
    assert!(!Shape::DoubleFlat.is_flat_based());
    assert!(Shape::KeySharp2.is_sharp_based());
    assert!(!Shape::KeyCancel.is_sharp_based());
    assert!(Shape::Character.is_text());
    assert!(!Shape::Lyrics.is_text());
    assert!(!Shape::TimeFour.is_draggable());
    assert!(Shape::TimeFourFour.is_draggable());

    assert_eq!(Shape::BreveDiamond.head_motif(), Some(HeadMotif::Diamond));
    assert_eq!(Shape::NoteheadVoidSmall.head_motif(), Some(HeadMotif::Small));
    assert_eq!(Shape::NoteheadBlack.head_motif(), Some(HeadMotif::Oval));
    assert_eq!(Shape::Stem.head_motif(), None);
}

#[test]
fn palette_colors() {
    for set in PALETTE {
        for shape in set.shapes() {
            let owner = PALETTE.iter().find(|s| s.contains(shape)).unwrap();
            if !matches!(
                shape,
                Shape::Clutter | Shape::ThinConnector | Shape::ThickConnector | Shape::BracketConnector
            ) {
                assert_eq!(shape.default_color(), owner.color, "{shape}");
            }
        }
    }
    assert_eq!(Shape::HwRestSet.default_color(), shape_set::RESTS.color);
}

#[test]
fn catalog_dump() {
    let json = catalog_to_json().unwrap();
    let entries: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(entries.len(), Shape::COUNT);

    let whole = &entries[Shape::WholeRest.ordinal()];
    assert_eq!(whole["name"], "WHOLE_REST");
    assert_eq!(whole["physical_shape"], "HW_REST_set");
    assert_eq!(whole["trainable"], false);
    assert_eq!(whole["duration"], "1");

    let eighth = &entries[Shape::EighthRest.ordinal()];
    assert_eq!(eighth["duration"], "1/8");
    assert_eq!(eighth["trainable"], true);
}
