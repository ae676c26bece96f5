//! Named groups of shapes.
//!
//! Palette groups (listed in [`PALETTE`]) gather shapes for viewers and give
//! their members a default color. The other groups exist for membership
//! queries only: trait predicates on [`Shape`] and checker scopes.

use serde::Serialize;

use crate::color::Color;
use crate::shape::Shape;
use crate::shape::Shape::*;

/// An immutable, named collection of shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShapeSet {
    pub name: &'static str,
    /// Shape used to represent the whole group
    pub rep: Shape,
    pub color: Color,
    pub shapes: &'static [Shape],
}

impl ShapeSet {
    pub fn contains(&self, shape: Shape) -> bool {
        self.shapes.contains(&shape)
    }

    pub fn shapes(&self) -> impl Iterator<Item = Shape> + '_ {
        self.shapes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

const fn set(name: &'static str, rep: Shape, color: u32, shapes: &'static [Shape]) -> ShapeSet {
    ShapeSet {
        name,
        rep,
        color: Color::from_u32(color),
        shapes,
    }
}

// ── Palette groups ──────────────────────────────────────────────────

pub static ACCIDENTALS: ShapeSet = set(
    "Accidentals",
    Sharp,
    0x9933ff,
    &[Flat, Natural, Sharp, DoubleSharp, DoubleFlat],
);

pub static ARTICULATIONS: ShapeSet = set(
    "Articulations",
    Accent,
    0xff6699,
    &[Accent, Tenuto, Staccato, Staccatissimo, StrongAccent],
);

pub static ATTRIBUTES: ShapeSet = set(
    "Attributes",
    PedalMark,
    0x000000,
    &[
        Ottava,
        Quindicesima,
        Ventiduesima,
        PedalMark,
        PedalUpMark,
        TupletThree,
        TupletSix,
        Arpeggiato,
    ],
);

pub static BARLINES: ShapeSet = set(
    "Barlines",
    LeftRepeatSign,
    0x0000ff,
    &[
        ThickBarline,
        ThickConnector,
        ThinBarline,
        ThinConnector,
        DoubleBarline,
        FinalBarline,
        ReverseFinalBarline,
        LeftRepeatSign,
        RightRepeatSign,
        BackToBackRepeatSign,
        Brace,
        Bracket,
        BracketConnector,
        RepeatDot,
    ],
);

pub static BEAMS: ShapeSet = set(
    "Beams",
    Beam,
    0x33ffff,
    &[Beam, BeamSmall, BeamHook, BeamHookSmall],
);

pub static CLEFS: ShapeSet = set(
    "Clefs",
    GClef,
    0xff99ff,
    &[
        GClef,
        GClefSmall,
        GClef8va,
        GClef8vb,
        FClef,
        FClefSmall,
        FClef8va,
        FClef8vb,
        CClef,
        PercussionClef,
    ],
);

pub static DYNAMICS: ShapeSet = set(
    "Dynamics",
    DynamicsF,
    0x009999,
    &[
        DynamicsP,
        DynamicsPp,
        DynamicsMp,
        DynamicsF,
        DynamicsFf,
        DynamicsMf,
        DynamicsFp,
        DynamicsSf,
        DynamicsSfz,
    ],
);

pub static FLAGS: ShapeSet = set(
    "Flags",
    Flag1,
    0x99cc00,
    &[
        Flag1,
        Flag2,
        Flag3,
        Flag4,
        Flag5,
        Flag1Down,
        Flag2Down,
        Flag3Down,
        Flag4Down,
        Flag5Down,
        SmallFlag,
        SmallFlagSlash,
        SmallFlagDown,
        SmallFlagSlashDown,
    ],
);

pub static HOLDS: ShapeSet = set(
    "Holds",
    Fermata,
    0x888888,
    &[BreathMark, Caesura, Fermata, FermataBelow],
);

pub static KEYS: ShapeSet = set(
    "Keys",
    KeySharp3,
    0x00ffff,
    &[
        KeyFlat7, KeyFlat6, KeyFlat5, KeyFlat4, KeyFlat3, KeyFlat2, KeyFlat1, KeyCancel,
        KeySharp1, KeySharp2, KeySharp3, KeySharp4, KeySharp5, KeySharp6, KeySharp7,
    ],
);

pub static HEADS_AND_DOT: ShapeSet = set(
    "HeadsAndDot",
    NoteheadBlack,
    0xffcc00,
    &[
        Breve,
        BreveSmall,
        BreveCross,
        BreveDiamond,
        BreveTriangleDown,
        BreveCircleX,
        WholeNote,
        WholeNoteSmall,
        WholeNoteCross,
        WholeNoteDiamond,
        WholeNoteTriangleDown,
        WholeNoteCircleX,
        NoteheadVoid,
        NoteheadVoidSmall,
        NoteheadCrossVoid,
        NoteheadDiamondVoid,
        NoteheadTriangleDownVoid,
        NoteheadCircleXVoid,
        NoteheadBlack,
        NoteheadBlackSmall,
        NoteheadCross,
        NoteheadDiamondFilled,
        NoteheadTriangleDownFilled,
        NoteheadCircleX,
        AugmentationDot,
    ],
);

pub static MARKERS: ShapeSet = set(
    "Markers",
    Coda,
    0x888888,
    &[DalSegno, DaCapo, Segno, Coda],
);

pub static ORNAMENTS: ShapeSet = set(
    "Ornaments",
    Mordent,
    0xcc3300,
    &[
        GraceNoteSlash,
        GraceNote,
        Tr,
        Turn,
        TurnInverted,
        TurnUp,
        TurnSlash,
        Mordent,
        MordentInverted,
    ],
);

pub static RESTS: ShapeSet = set(
    "Rests",
    QuarterRest,
    0x99ff66,
    &[
        LongRest,
        BreveRest,
        WholeRest,
        HalfRest,
        QuarterRest,
        EighthRest,
        One16thRest,
        One32ndRest,
        One64thRest,
        One128thRest,
    ],
);

pub static TIMES: ShapeSet = set(
    "Times",
    TimeFourFour,
    0xcc3300,
    &[
        TimeZero,
        TimeOne,
        TimeTwo,
        TimeThree,
        TimeFour,
        TimeFive,
        TimeSix,
        TimeSeven,
        TimeEight,
        TimeNine,
        TimeTwelve,
        TimeSixteen,
        CommonTime,
        CutTime,
        TimeFourFour,
        TimeTwoTwo,
        TimeTwoFour,
        TimeThreeFour,
        TimeFiveFour,
        TimeSixFour,
        TimeThreeEight,
        TimeSixEight,
        TimeTwelveEight,
    ],
);

pub static DIGITS: ShapeSet = set(
    "Digits",
    Digit1,
    0xcc3388,
    &[Digit0, Digit1, Digit2, Digit3, Digit4, Digit5],
);

pub static PLUCKINGS: ShapeSet = set(
    "Pluckings",
    PluckP,
    0xcc3388,
    &[PluckP, PluckI, PluckM, PluckA],
);

pub static ROMANS: ShapeSet = set(
    "Romans",
    RomanV,
    0xcc3388,
    &[
        RomanI, RomanIi, RomanIii, RomanIv, RomanV, RomanVi, RomanVii, RomanViii, RomanIx,
        RomanX, RomanXi, RomanXii,
    ],
);

pub static PHYSICALS: ShapeSet = set(
    "Physicals",
    Ledger,
    0x9999ff,
    &[Text, Character, Clutter, Slur, Ledger, Stem, Ending],
);

/// Palette groups, in the order used to pick a shape's default color.
pub static PALETTE: &[&ShapeSet] = &[
    &ACCIDENTALS,
    &ARTICULATIONS,
    &ATTRIBUTES,
    &BARLINES,
    &BEAMS,
    &CLEFS,
    &DYNAMICS,
    &FLAGS,
    &HOLDS,
    &KEYS,
    &HEADS_AND_DOT,
    &MARKERS,
    &ORNAMENTS,
    &RESTS,
    &TIMES,
    &DIGITS,
    &PLUCKINGS,
    &ROMANS,
    &PHYSICALS,
];

/// First palette group containing `shape`. HW_REST_set borrows the rest color.
pub fn group_of(shape: Shape) -> Option<&'static ShapeSet> {
    if shape == HwRestSet {
        return Some(&RESTS);
    }
    PALETTE.iter().copied().find(|set| set.contains(shape))
}

// ── Groups used by predicates and checker scopes ────────────────────

pub static SMALL_CLEFS: ShapeSet = set("SmallClefs", GClefSmall, 0xff99ff, &[GClefSmall, FClefSmall]);

/// Time signatures read as a single glyph.
pub static WHOLE_TIMES: ShapeSet = set(
    "WholeTimes",
    TimeFourFour,
    0xcc3300,
    &[
        CommonTime,
        CutTime,
        TimeFourFour,
        TimeTwoTwo,
        TimeTwoFour,
        TimeThreeFour,
        TimeFiveFour,
        TimeSixFour,
        TimeThreeEight,
        TimeSixEight,
        TimeTwelveEight,
    ],
);

/// Time signature halves (numerator or denominator alone).
pub static PARTIAL_TIMES: ShapeSet = set(
    "PartialTimes",
    TimeFour,
    0xcc3300,
    &[
        TimeZero,
        TimeOne,
        TimeTwo,
        TimeThree,
        TimeFour,
        TimeFive,
        TimeSix,
        TimeSeven,
        TimeEight,
        TimeNine,
        TimeTwelve,
        TimeSixteen,
    ],
);

pub static FERMATA_ARCS: ShapeSet = set(
    "FermataArcs",
    FermataArc,
    0x888888,
    &[FermataArc, FermataArcBelow],
);

pub static PEDALS: ShapeSet = set("Pedals", PedalMark, 0x000000, &[PedalMark, PedalUpMark]);

pub static TUPLETS: ShapeSet = set("Tuplets", TupletThree, 0x000000, &[TupletThree, TupletSix]);

pub static REPEAT_BARS: ShapeSet = set(
    "RepeatBars",
    RepeatOneBar,
    0x000000,
    &[RepeatOneBar, RepeatTwoBars, RepeatFourBars],
);

pub static HEADS: ShapeSet = set(
    "Heads",
    NoteheadBlack,
    0xffcc00,
    &[
        Breve,
        BreveSmall,
        BreveCross,
        BreveDiamond,
        BreveTriangleDown,
        BreveCircleX,
        WholeNote,
        WholeNoteSmall,
        WholeNoteCross,
        WholeNoteDiamond,
        WholeNoteTriangleDown,
        WholeNoteCircleX,
        NoteheadVoid,
        NoteheadVoidSmall,
        NoteheadCrossVoid,
        NoteheadDiamondVoid,
        NoteheadTriangleDownVoid,
        NoteheadCircleXVoid,
        NoteheadBlack,
        NoteheadBlackSmall,
        NoteheadCross,
        NoteheadDiamondFilled,
        NoteheadTriangleDownFilled,
        NoteheadCircleX,
    ],
);

pub static HEADS_OVAL: ShapeSet = set(
    "HeadsOval",
    NoteheadBlack,
    0xffcc00,
    &[Breve, WholeNote, NoteheadVoid, NoteheadBlack],
);

pub static HEADS_OVAL_SMALL: ShapeSet = set(
    "HeadsOvalSmall",
    NoteheadBlackSmall,
    0xffcc00,
    &[BreveSmall, WholeNoteSmall, NoteheadVoidSmall, NoteheadBlackSmall],
);

pub static HEADS_CROSS: ShapeSet = set(
    "HeadsCross",
    NoteheadCross,
    0xffcc00,
    &[BreveCross, WholeNoteCross, NoteheadCrossVoid, NoteheadCross],
);

pub static HEADS_DIAMOND: ShapeSet = set(
    "HeadsDiamond",
    NoteheadDiamondFilled,
    0xffcc00,
    &[BreveDiamond, WholeNoteDiamond, NoteheadDiamondVoid, NoteheadDiamondFilled],
);

pub static HEADS_TRIANGLE: ShapeSet = set(
    "HeadsTriangle",
    NoteheadTriangleDownFilled,
    0xffcc00,
    &[
        BreveTriangleDown,
        WholeNoteTriangleDown,
        NoteheadTriangleDownVoid,
        NoteheadTriangleDownFilled,
    ],
);

pub static HEADS_CIRCLE: ShapeSet = set(
    "HeadsCircle",
    NoteheadCircleX,
    0xffcc00,
    &[BreveCircleX, WholeNoteCircleX, NoteheadCircleXVoid, NoteheadCircleX],
);

pub static STEM_LESS_HEADS: ShapeSet = set(
    "StemLessHeads",
    WholeNote,
    0xffcc00,
    &[
        Breve,
        BreveSmall,
        BreveCross,
        BreveDiamond,
        BreveTriangleDown,
        BreveCircleX,
        WholeNote,
        WholeNoteSmall,
        WholeNoteCross,
        WholeNoteDiamond,
        WholeNoteTriangleDown,
        WholeNoteCircleX,
    ],
);

pub static GRACES: ShapeSet = set(
    "Graces",
    GraceNote,
    0xcc3300,
    &[GraceNote, GraceNoteDown, GraceNoteSlash, GraceNoteSlashDown],
);

pub static SMALL_FLAGS_UP: ShapeSet = set(
    "SmallFlagsUp",
    SmallFlag,
    0x99cc00,
    &[SmallFlag, SmallFlagSlash],
);

pub static SMALL_FLAGS_DOWN: ShapeSet = set(
    "SmallFlagsDown",
    SmallFlagDown,
    0x99cc00,
    &[SmallFlagDown, SmallFlagSlashDown],
);

pub static FLAT_KEYS: ShapeSet = set(
    "FlatKeys",
    KeyFlat3,
    0x00ffff,
    &[KeyFlat1, KeyFlat2, KeyFlat3, KeyFlat4, KeyFlat5, KeyFlat6, KeyFlat7],
);

pub static SHARP_KEYS: ShapeSet = set(
    "SharpKeys",
    KeySharp3,
    0x00ffff,
    &[KeySharp1, KeySharp2, KeySharp3, KeySharp4, KeySharp5, KeySharp6, KeySharp7],
);

/// Shapes that cannot be dragged: partial times and structural items.
pub static UNDRAGGABLES: ShapeSet = set(
    "Undraggables",
    NonDraggable,
    0x000000,
    &[
        TimeZero,
        TimeOne,
        TimeTwo,
        TimeThree,
        TimeFour,
        TimeFive,
        TimeSix,
        TimeSeven,
        TimeEight,
        TimeNine,
        TimeTwelve,
        TimeSixteen,
        Clutter,
        Noise,
        Forward,
        NonDraggable,
        GlyphPart,
        NoLegalTime,
        StaffLines,
    ],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_families_partition_heads() {
        let families = [
            &HEADS_OVAL,
            &HEADS_OVAL_SMALL,
            &HEADS_CROSS,
            &HEADS_DIAMOND,
            &HEADS_TRIANGLE,
            &HEADS_CIRCLE,
        ];
        for head in HEADS.shapes() {
            let count = families.iter().filter(|f| f.contains(head)).count();
            assert_eq!(count, 1, "{head} belongs to {count} families");
        }
        let total: usize = families.iter().map(|f| f.len()).sum();
        assert_eq!(total, HEADS.len());
    }

    #[test]
    fn every_group_contains_its_rep() {
        for set in PALETTE {
            assert!(set.contains(set.rep), "{} lacks {}", set.name, set.rep);
        }
    }

    #[test]
    fn rests_group_lists_logical_rests_only() {
        assert!(RESTS.contains(WholeRest));
        assert!(RESTS.contains(HalfRest));
        assert!(!RESTS.contains(HwRestSet));
        assert_eq!(group_of(HwRestSet).map(|s| s.name), Some("Rests"));
    }
}
