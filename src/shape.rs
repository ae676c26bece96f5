//! The closed catalog of glyph shapes.
//!
//! The catalog begins with *physical* shapes, the only ones a glyph
//! classifier is trained on, and ends with *logical* shapes. A few physical
//! shapes (their canonical name ends with `_set`) stand for several logical
//! shapes that only the musical context can tell apart:
//!
//! - `DOT_set`: repeat dot, augmentation dot or staccato
//! - `HW_REST_set`: half rest or whole rest, depending on pitch position
//! - `EIGHTH_set`: grace note or metronome eighth
//!
//! Classifiers are trained against ordinal positions, so the order of the
//! physical shapes below must never change.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::{self, Color};
use crate::error::Error;
use crate::rational::Rational;
use crate::shape_set;

/// Declares the catalog once: enum variants, canonical names, descriptions
/// and the optional physical shape a logical shape derives from.
macro_rules! shape_catalog {
    ($( $variant:ident $name:literal $desc:literal $(from $phys:ident)? ; )*) => {
        /// A glyph shape, physical or logical.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Shape {
            $( $variant, )*
        }

        impl Shape {
            /// Every shape, in catalog order.
            pub const ALL: &'static [Shape] = &[ $( Shape::$variant, )* ];

            /// Canonical (upper-case) name of the shape.
            pub fn name(self) -> &'static str {
                match self {
                    $( Shape::$variant => $name, )*
                }
            }

            /// User-friendly description of the shape.
            pub fn description(self) -> &'static str {
                match self {
                    $( Shape::$variant => $desc, )*
                }
            }

            fn physical_link(self) -> Option<Shape> {
                match self {
                    $( Shape::$variant => shape_catalog!(@link $($phys)?), )*
                }
            }
        }
    };
    (@link) => { None };
    (@link $phys:ident) => { Some(Shape::$phys) };
}

shape_catalog! {
    // ── Physical shapes: order is relevant for trained classifiers ───
    // Sets
    DotSet "DOT_set" "Dot set";
    HwRestSet "HW_REST_set" "Half & Whole Rest set";
    EighthSet "EIGHTH_set" "Grace & beat unit set";

    // Bars
    DalSegno "DAL_SEGNO" "D.S.: Repeat from the sign";
    DaCapo "DA_CAPO" "D.C.: Repeat from the beginning";
    Segno "SEGNO" "Sign";
    Coda "CODA" "Closing section";
    BreathMark "BREATH_MARK" "Breath Mark";
    Caesura "CAESURA" "Caesura";
    Fermata "FERMATA" "Fermata arc + dot";
    FermataBelow "FERMATA_BELOW" "Fermata below, arc + dot";
    RepeatOneBar "REPEAT_ONE_BAR" "Repeat last bar";
    RepeatTwoBars "REPEAT_TWO_BARS" "Repeat last two bars";
    RepeatFourBars "REPEAT_FOUR_BARS" "Repeat last four bars";

    // Clefs
    GClef "G_CLEF" "Treble Clef";
    GClefSmall "G_CLEF_SMALL" "Small Treble Clef";
    GClef8va "G_CLEF_8VA" "Treble Clef Ottava Alta";
    GClef8vb "G_CLEF_8VB" "Treble Clef Ottava Bassa";
    CClef "C_CLEF" "Ut Clef";
    FClef "F_CLEF" "Bass Clef";
    FClefSmall "F_CLEF_SMALL" "Small Bass Clef";
    FClef8va "F_CLEF_8VA" "Bass Clef Ottava Alta";
    FClef8vb "F_CLEF_8VB" "Bass Clef Ottava Bassa";
    PercussionClef "PERCUSSION_CLEF" "Percussion Clef";

    // Accidentals
    Flat "FLAT" "Minus one half step";
    Natural "NATURAL" "Natural value";
    Sharp "SHARP" "Plus one half step";
    DoubleSharp "DOUBLE_SHARP" "Double Sharp";
    DoubleFlat "DOUBLE_FLAT" "Double Flat";

    // Time
    TimeZero "TIME_ZERO" "Time digit 0";
    TimeOne "TIME_ONE" "Time digit 1";
    TimeTwo "TIME_TWO" "Time digit 2";
    TimeThree "TIME_THREE" "Time digit 3";
    TimeFour "TIME_FOUR" "Time digit 4";
    TimeFive "TIME_FIVE" "Time digit 5";
    TimeSix "TIME_SIX" "Time digit 6";
    TimeSeven "TIME_SEVEN" "Time digit 7";
    TimeEight "TIME_EIGHT" "Time digit 8";
    TimeNine "TIME_NINE" "Time digit 9";
    TimeTwelve "TIME_TWELVE" "Time number 12";
    TimeSixteen "TIME_SIXTEEN" "Time number 16";
    CommonTime "COMMON_TIME" "Alpha = 4/4";
    CutTime "CUT_TIME" "Semi-Alpha = 2/2";
    TimeFourFour "TIME_FOUR_FOUR" "Rational 4/4";
    TimeTwoTwo "TIME_TWO_TWO" "Rational 2/2";
    TimeTwoFour "TIME_TWO_FOUR" "Rational 2/4";
    TimeThreeFour "TIME_THREE_FOUR" "Rational 3/4";
    TimeFiveFour "TIME_FIVE_FOUR" "Rational 5/4";
    TimeSixFour "TIME_SIX_FOUR" "Rational 6/4";
    TimeThreeEight "TIME_THREE_EIGHT" "Rational 3/8";
    TimeSixEight "TIME_SIX_EIGHT" "Rational 6/8";
    TimeTwelveEight "TIME_TWELVE_EIGHT" "Rational 12/8";

    // Octave shifts
    Ottava "OTTAVA" "8";
    Quindicesima "QUINDICESIMA" "15";
    Ventiduesima "VENTIDUESIMA" "22";

    // Rests
    LongRest "LONG_REST" "Rest for 4 measures";
    BreveRest "BREVE_REST" "Rest for 2 measures";
    QuarterRest "QUARTER_REST" "Rest for a 1/4";
    EighthRest "EIGHTH_REST" "Rest for a 1/8";
    One16thRest "ONE_16TH_REST" "Rest for a 1/16";
    One32ndRest "ONE_32ND_REST" "Rest for a 1/32";
    One64thRest "ONE_64TH_REST" "Rest for a 1/64";
    One128thRest "ONE_128TH_REST" "Rest for a 1/128";

    // Flags
    Flag1 "FLAG_1" "Single flag";
    Flag1Down "FLAG_1_DOWN" "Single flag down";
    Flag2 "FLAG_2" "Double flag";
    Flag2Down "FLAG_2_DOWN" "Double flag down";
    Flag3 "FLAG_3" "Triple flag";
    Flag3Down "FLAG_3_DOWN" "Triple flag down";
    Flag4 "FLAG_4" "Quadruple flag";
    Flag4Down "FLAG_4_DOWN" "Quadruple flag down";
    Flag5 "FLAG_5" "Quintuple flag";
    Flag5Down "FLAG_5_DOWN" "Quintuple flag down";
    SmallFlag "SMALL_FLAG" "Flag for grace note";
    SmallFlagDown "SMALL_FLAG_DOWN" "Flag for grace note down";
    SmallFlagSlash "SMALL_FLAG_SLASH" "Slashed flag for grace note";
    SmallFlagSlashDown "SMALL_FLAG_SLASH_DOWN" "Slashed flag for grace note down";

    // Grace notes (the plain one is carried by EIGHTH_set)
    GraceNoteDown "GRACE_NOTE_DOWN" "Grace Note down with no slash";
    GraceNoteSlash "GRACE_NOTE_SLASH" "Grace Note with a slash";
    GraceNoteSlashDown "GRACE_NOTE_SLASH_DOWN" "Grace Note down with a slash";

    // Metronome notes (the eighth is carried by EIGHTH_set)
    MetroWhole "METRO_WHOLE" "Metronome whole note";
    MetroHalf "METRO_HALF" "Metronome half note";
    MetroQuarter "METRO_QUARTER" "Metronome quarter note";
    MetroSixteenth "METRO_SIXTEENTH" "Metronome 16th note";
    MetroDottedHalf "METRO_DOTTED_HALF" "Metronome dotted half note";
    MetroDottedQuarter "METRO_DOTTED_QUARTER" "Metronome dotted quarter note";
    MetroDottedEighth "METRO_DOTTED_EIGHTH" "Metronome dotted 8th note";
    MetroDottedSixteenth "METRO_DOTTED_SIXTEENTH" "Metronome dotted 16th note";

    // Articulations
    Accent "ACCENT" "Accent";
    Tenuto "TENUTO" "Tenuto";
    Staccatissimo "STACCATISSIMO" "Staccatissimo";
    StrongAccent "STRONG_ACCENT" "Marcato";
    Arpeggiato "ARPEGGIATO" "Arpeggiato";

    // Dynamics
    DynamicsP "DYNAMICS_P" "Piano";
    DynamicsPp "DYNAMICS_PP" "Pianissimo";
    DynamicsMp "DYNAMICS_MP" "Mezzo piano";
    DynamicsF "DYNAMICS_F" "Forte";
    DynamicsFf "DYNAMICS_FF" "Fortissimo";
    DynamicsMf "DYNAMICS_MF" "Mezzo forte";
    DynamicsFp "DYNAMICS_FP" "FortePiano";
    DynamicsSf "DYNAMICS_SF" "Subito forte";
    DynamicsSfz "DYNAMICS_SFZ" "Sforzando";

    // Ornaments
    Tr "TR" "Trill";
    Turn "TURN" "Turn";
    TurnInverted "TURN_INVERTED" "Inverted Turn";
    TurnUp "TURN_UP" "Turn Up";
    TurnSlash "TURN_SLASH" "Turn with a Slash";
    Mordent "MORDENT" "Lower mordent (with bisecting vertical line)";
    MordentInverted "MORDENT_INVERTED" "Upper mordent (no vertical line)";

    // Tuplets and pedals
    TupletThree "TUPLET_THREE" "3";
    TupletSix "TUPLET_SIX" "6";
    PedalMark "PEDAL_MARK" "Pedal down";
    PedalUpMark "PEDAL_UP_MARK" "Pedal downup";

    // Small digits
    Digit0 "DIGIT_0" "Digit 0";
    Digit1 "DIGIT_1" "Digit 1";
    Digit2 "DIGIT_2" "Digit 2";
    Digit3 "DIGIT_3" "Digit 3";
    Digit4 "DIGIT_4" "Digit 4";
    Digit5 "DIGIT_5" "Digit 5";

    // Roman numerals
    RomanI "ROMAN_I" "Roman number 1";
    RomanIi "ROMAN_II" "Roman number 2";
    RomanIii "ROMAN_III" "Roman number 3";
    RomanIv "ROMAN_IV" "Roman number 4";
    RomanV "ROMAN_V" "Roman number 5";
    RomanVi "ROMAN_VI" "Roman number 6";
    RomanVii "ROMAN_VII" "Roman number 7";
    RomanViii "ROMAN_VIII" "Roman number 8";
    RomanIx "ROMAN_IX" "Roman number 9";
    RomanX "ROMAN_X" "Roman number 10";
    RomanXi "ROMAN_XI" "Roman number 11";
    RomanXii "ROMAN_XII" "Roman number 12";

    // Plucking
    PluckP "PLUCK_P" "Plucking pouce/pulgar/thumb";
    PluckI "PLUCK_I" "Plucking index/indicio/index";
    PluckM "PLUCK_M" "Plucking majeur/medio/middle";
    PluckA "PLUCK_A" "Plucking annulaire/anular/ring";

    // Percussion playing technique
    PlayingOpen "PLAYING_OPEN" "Pict open: o";
    PlayingHalfOpen "PLAYING_HALF_OPEN" "Pict half-open: ø";
    PlayingClosed "PLAYING_CLOSED" "Pict closed: +";

    // Tremolos
    Tremolo1 "TREMOLO_1" "Single tremolo";
    Tremolo2 "TREMOLO_2" "Double tremolo";
    Tremolo3 "TREMOLO_3" "Triple tremolo";

    Clutter "CLUTTER" "Pure clutter";

    // ── Logical shapes: order is irrelevant ─────────────────────────
    Text "TEXT" "Sequence of letters & spaces";
    Character "CHARACTER" "Any letter";

    // Based on DOT_set
    RepeatDot "REPEAT_DOT" "Repeat dot" from DotSet;
    AugmentationDot "AUGMENTATION_DOT" "Augmentation Dot" from DotSet;
    Staccato "STACCATO" "Staccato dot" from DotSet;

    // Based on HW_REST_set
    WholeRest "WHOLE_REST" "Rest for a 1" from HwRestSet;
    HalfRest "HALF_REST" "Rest for a 1/2" from HwRestSet;

    // Based on EIGHTH_set
    GraceNote "GRACE_NOTE" "Grace Note with no slash" from EighthSet;
    MetroEighth "METRO_EIGHTH" "Metronome 8th note" from EighthSet;

    // Stem-less heads, duration 2
    Breve "BREVE" "Double Whole";
    BreveSmall "BREVE_SMALL" "Small Double Whole";
    BreveCross "BREVE_CROSS" "Double Whole Cross";
    BreveDiamond "BREVE_DIAMOND" "Double Whole Diamond";
    BreveTriangleDown "BREVE_TRIANGLE_DOWN" "Double Whole Triangle Down";
    BreveCircleX "BREVE_CIRCLE_X" "Double Whole Circle X";

    // Stem-less heads, duration 1
    WholeNote "WHOLE_NOTE" "Hollow node head for wholes";
    WholeNoteSmall "WHOLE_NOTE_SMALL" "Small hollow node head for grace or cue wholes";
    WholeNoteCross "WHOLE_NOTE_CROSS" "Hollow cross shape note head for unpitched percussion wholes";
    WholeNoteDiamond "WHOLE_NOTE_DIAMOND" "Hollow diamond-shaped note head for unpitched percussion wholes";
    WholeNoteTriangleDown "WHOLE_NOTE_TRIANGLE_DOWN" "Hollow point-down triangle shape for unpitched percussion wholes";
    WholeNoteCircleX "WHOLE_NOTE_CIRCLE_X" "Stemless circle-x head shape for unpitched percussion wholes";

    // Heads, duration 1/2
    NoteheadVoid "NOTEHEAD_VOID" "Hollow note head for halves";
    NoteheadVoidSmall "NOTEHEAD_VOID_SMALL" "Small hollow note head for grace or cue";
    NoteheadCrossVoid "NOTEHEAD_CROSS_VOID" "Hollow cross shape note head for unpitched percussion";
    NoteheadDiamondVoid "NOTEHEAD_DIAMOND_VOID" "Hollow diamond shape note head for unpitched percussion";
    NoteheadTriangleDownVoid "NOTEHEAD_TRIANGLE_DOWN_VOID" "Hollow point-down triangle shape note head for unpitched percussion";
    NoteheadCircleXVoid "NOTEHEAD_CIRCLE_X_VOID" "Hollow circle-x shape note head for unpitched percussion";

    // Heads, duration 1/4
    NoteheadBlack "NOTEHEAD_BLACK" "Filled note head for quarters and less";
    NoteheadBlackSmall "NOTEHEAD_BLACK_SMALL" "Small filled note head for grace or cue";
    NoteheadCross "NOTEHEAD_CROSS" "Ghost note with rhythmic value but no discernible pitch";
    NoteheadDiamondFilled "NOTEHEAD_DIAMOND_FILLED" "Filled diamond shape note head for unpitched percussion";
    NoteheadTriangleDownFilled "NOTEHEAD_TRIANGLE_DOWN_FILLED" "Filled point-down triangle shape note head for unpitched percussion";
    NoteheadCircleX "NOTEHEAD_CIRCLE_X" "Circle-x shape note head for unpitched percussion";

    // Compound notes
    SixteenthNoteUp "SIXTEENTH_NOTE_UP" "Filled head plus its up stem and two flags";
    DottedSixteenthNoteUp "DOTTED_SIXTEENTH_NOTE_UP" "Filled head plus its up stem, two flag and dot";
    EighthNoteUp "EIGHTH_NOTE_UP" "Filled head plus its up stem and flag";
    DottedEighthNoteUp "DOTTED_EIGHTH_NOTE_UP" "Filled head plus its up stem, flag and dot";
    QuarterNoteUp "QUARTER_NOTE_UP" "Filled head plus its up stem";
    QuarterNoteDown "QUARTER_NOTE_DOWN" "Filled head plus its down stem";
    DottedQuarterNoteUp "DOTTED_QUARTER_NOTE_UP" "Filled head plus its up stem and dot";
    HalfNoteUp "HALF_NOTE_UP" "Hollow head plus its up stem";
    HalfNoteDown "HALF_NOTE_DOWN" "Hollow head plus its down stem";
    DottedHalfNoteUp "DOTTED_HALF_NOTE_UP" "Hollow head plus its up stem and dot";

    // Beams, slurs, multiple rests
    Beam "BEAM" "Beam between two stems";
    BeamSmall "BEAM_SMALL" "Small beam for cue notes";
    BeamHook "BEAM_HOOK" "Hook of a beam attached on one stem";
    BeamHookSmall "BEAM_HOOK_SMALL" "Small hook of a beam for cue notes";
    Slur "SLUR" "Slur above or below notes";
    SlurAbove "SLUR_ABOVE" "Slur above notes";
    SlurBelow "SLUR_BELOW" "Slur below notes";
    MultipleRest "MULTIPLE_REST" "Multiple measure rest";
    MultipleRestLeft "MULTIPLE_REST_LEFT" "Multiple measure rest left";
    MultipleRestMiddle "MULTIPLE_REST_MIDDLE" "Multiple measure rest middle";
    MultipleRestRight "MULTIPLE_REST_RIGHT" "Multiple measure rest right";

    // Key signatures
    KeyFlat7 "KEY_FLAT_7" "Seven Flats";
    KeyFlat6 "KEY_FLAT_6" "Six Flats";
    KeyFlat5 "KEY_FLAT_5" "Five Flats";
    KeyFlat4 "KEY_FLAT_4" "Four Flats";
    KeyFlat3 "KEY_FLAT_3" "Three Flats";
    KeyFlat2 "KEY_FLAT_2" "Two Flats";
    KeyFlat1 "KEY_FLAT_1" "One Flat";
    KeyCancel "KEY_CANCEL" "Key Cancel";
    KeySharp1 "KEY_SHARP_1" "One Sharp";
    KeySharp2 "KEY_SHARP_2" "Two Sharps";
    KeySharp3 "KEY_SHARP_3" "Three Sharps";
    KeySharp4 "KEY_SHARP_4" "Four Sharps";
    KeySharp5 "KEY_SHARP_5" "Five Sharps";
    KeySharp6 "KEY_SHARP_6" "Six Sharps";
    KeySharp7 "KEY_SHARP_7" "Seven Sharps";

    // Barlines
    ThinBarline "THIN_BARLINE" "Thin bar line";
    ThinConnector "THIN_CONNECTOR" "Connector between thin barlines";
    ThickBarline "THICK_BARLINE" "Thick bar line";
    ThickConnector "THICK_CONNECTOR" "Connector between thick barlines";
    BracketConnector "BRACKET_CONNECTOR" "Connector between bracket items";
    DoubleBarline "DOUBLE_BARLINE" "Double thin bar line";
    FinalBarline "FINAL_BARLINE" "Thin / Thick bar line";
    ReverseFinalBarline "REVERSE_FINAL_BARLINE" "Thick / Thin bar line";
    LeftRepeatSign "LEFT_REPEAT_SIGN" "Thick / Thin bar line + Repeat dots";
    RightRepeatSign "RIGHT_REPEAT_SIGN" "Repeat dots + Thin / Thick bar line";
    BackToBackRepeatSign "BACK_TO_BACK_REPEAT_SIGN" "Repeat dots + Thin / Thick / Thin + REPEAT_DOTS";
    Ending "ENDING" "Alternate ending";
    EndingWrl "ENDING_WRL" "Alternate ending with right leg";

    // Wedges
    Crescendo "CRESCENDO" "Crescendo";
    Diminuendo "DIMINUENDO" "Diminuendo";

    // Miscellaneous
    Brace "BRACE" "Brace";
    Bracket "BRACKET" "Bracket";
    RepeatDotPair "REPEAT_DOT_PAIR" "Pair of repeat dots";
    Noise "NOISE" "Too small stuff";
    Ledger "LEDGER" "Ledger";
    Segment "SEGMENT" "Wedge or ending segment";
    Lyrics "LYRICS" "Lyrics";
    Metronome "METRONOME" "Text-based notes";

    // Stems
    Stem "STEM" "Stem";
    VerticalSerif "VERTICAL_SERIF" "Vertical serif";

    // Other stuff
    Forward "FORWARD" "To indicate a forward";
    NonDraggable "NON_DRAGGABLE" "Non draggable shape";
    GlyphPart "GLYPH_PART" "Part of a larger glyph";
    NumberCustom "NUMBER_CUSTOM" "Number defined by user";
    TimeCustom "TIME_CUSTOM" "Time signature defined by user";
    NoLegalTime "NO_LEGAL_TIME" "No Legal Time Shape";
    BracketUpperSerif "BRACKET_UPPER_SERIF" "Top serif of a bracket";
    BracketLowerSerif "BRACKET_LOWER_SERIF" "Bottom serif of a bracket";
    StaffLines "STAFF_LINES" "5-line staff";

    // Obsolete, kept so that older sample files still load
    Flag1Up "FLAG_1_UP" "OBSOLETE Single flag up";
    Flag2Up "FLAG_2_UP" "OBSOLETE Double flag up";
    Flag3Up "FLAG_3_UP" "OBSOLETE Triple flag up";
    Flag4Up "FLAG_4_UP" "OBSOLETE Quadruple flag up";
    Flag5Up "FLAG_5_UP" "OBSOLETE Quintuple flag up";
    FermataDot "FERMATA_DOT" "Fermata dot";
    FermataArc "FERMATA_ARC" "Fermata arc, without dot";
    FermataArcBelow "FERMATA_ARC_BELOW" "Fermata arc below, without dot";
}

/// Last physical shape: every shape up to this one (inclusive) is trainable.
pub const LAST_PHYSICAL_SHAPE: Shape = Shape::Clutter;

/// Display colors assigned at runtime, overriding the catalog defaults.
static COLOR_OVERRIDES: Lazy<RwLock<HashMap<Shape, Color>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Family of a note head, used to pick matching templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadMotif {
    Oval,
    Small,
    Cross,
    Diamond,
    Triangle,
    Circle,
}

/// A shape known to be trainable, i.e. one a classifier can output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhysicalShape(Shape);

impl PhysicalShape {
    pub fn shape(self) -> Shape {
        self.0
    }

    /// Index of this shape in the classifier output vector.
    pub fn index(self) -> usize {
        self.0.ordinal()
    }

    /// Physical shape at a classifier output index.
    pub fn from_index(index: usize) -> Option<Self> {
        Shape::ALL.get(index).and_then(|s| s.as_physical())
    }
}

impl From<PhysicalShape> for Shape {
    fn from(physical: PhysicalShape) -> Self {
        physical.0
    }
}

impl fmt::Display for PhysicalShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Shape {
    /// Number of shapes in the catalog.
    pub const COUNT: usize = Shape::ALL.len();

    /// Position of the shape in catalog order.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Whether a classifier can be trained on this shape.
    pub fn is_trainable(self) -> bool {
        self.ordinal() <= LAST_PHYSICAL_SHAPE.ordinal()
    }

    /// The classifier-facing view of this shape, if it is trainable.
    pub fn as_physical(self) -> Option<PhysicalShape> {
        self.is_trainable().then_some(PhysicalShape(self))
    }

    /// The physical shape this logical shape derives from, if any.
    pub fn derived_from(self) -> Option<PhysicalShape> {
        self.physical_link().map(PhysicalShape)
    }

    /// Shape to use for training or precise drawing: the linked physical
    /// shape if there is one, the shape itself otherwise.
    pub fn physical_shape(self) -> Shape {
        self.physical_link().unwrap_or(self)
    }

    /// All trainable shapes, in classifier order.
    pub fn physical_shapes() -> impl Iterator<Item = PhysicalShape> {
        Shape::ALL[..=LAST_PHYSICAL_SHAPE.ordinal()]
            .iter()
            .map(|&s| PhysicalShape(s))
    }

    /// The catalog sorted by canonical name.
    pub fn alpha_sorted() -> Vec<Shape> {
        let mut shapes = Shape::ALL.to_vec();
        shapes.sort_by_key(|s| s.name());
        shapes
    }

    /// Intrinsic duration of a head or rest, regardless of tuplet, flag,
    /// beam or augmentation dot.
    pub fn note_duration(self) -> Option<Rational> {
        use Shape::*;
        match self {
            LongRest => Some(Rational::from_integer(4)),
            BreveRest | Breve | BreveSmall | BreveCross | BreveDiamond | BreveTriangleDown
            | BreveCircleX => Some(Rational::from_integer(2)),
            WholeRest | WholeNote | WholeNoteSmall | WholeNoteCross | WholeNoteDiamond
            | WholeNoteTriangleDown | WholeNoteCircleX => Some(Rational::from_integer(1)),
            HalfRest | NoteheadVoid | NoteheadVoidSmall | NoteheadCrossVoid
            | NoteheadDiamondVoid | NoteheadTriangleDownVoid | NoteheadCircleXVoid => {
                Some(Rational::new(1, 2))
            }
            QuarterRest | NoteheadBlack | NoteheadBlackSmall | NoteheadCross
            | NoteheadDiamondFilled | NoteheadTriangleDownFilled | NoteheadCircleX => {
                Some(Rational::new(1, 4))
            }
            EighthRest => Some(Rational::new(1, 8)),
            One16thRest => Some(Rational::new(1, 16)),
            One32ndRest => Some(Rational::new(1, 32)),
            One64thRest => Some(Rational::new(1, 64)),
            One128thRest => Some(Rational::new(1, 128)),
            _ => None,
        }
    }

    /// Number of slashes in a measure-repeat sign, 0 for any other shape.
    pub fn slash_count(self) -> u32 {
        match self {
            Shape::RepeatOneBar => 1,
            Shape::RepeatTwoBars => 2,
            Shape::RepeatFourBars => 4,
            _ => 0,
        }
    }

    pub fn head_motif(self) -> Option<HeadMotif> {
        if shape_set::HEADS_OVAL.contains(self) {
            Some(HeadMotif::Oval)
        } else if shape_set::HEADS_OVAL_SMALL.contains(self) {
            Some(HeadMotif::Small)
        } else if shape_set::HEADS_CROSS.contains(self) {
            Some(HeadMotif::Cross)
        } else if shape_set::HEADS_DIAMOND.contains(self) {
            Some(HeadMotif::Diamond)
        } else if shape_set::HEADS_TRIANGLE.contains(self) {
            Some(HeadMotif::Triangle)
        } else if shape_set::HEADS_CIRCLE.contains(self) {
            Some(HeadMotif::Circle)
        } else {
            None
        }
    }

    // ── Trait predicates ────────────────────────────────────────────

    pub fn is_head(self) -> bool {
        shape_set::HEADS.contains(self)
    }

    pub fn is_rest(self) -> bool {
        shape_set::RESTS.contains(self)
    }

    pub fn is_grace(self) -> bool {
        shape_set::GRACES.contains(self)
    }

    /// Small flag, meant for cue or grace notes.
    pub fn is_small_flag(self) -> bool {
        shape_set::SMALL_FLAGS_UP.contains(self) || shape_set::SMALL_FLAGS_DOWN.contains(self)
    }

    /// Small head (breve, whole, void or black), meant for cue or grace notes.
    pub fn is_small_head(self) -> bool {
        shape_set::HEADS_OVAL_SMALL.contains(self)
    }

    /// Whole or breve head.
    pub fn is_stem_less_head(self) -> bool {
        shape_set::STEM_LESS_HEADS.contains(self)
    }

    /// Flat, or a key signature made of flats.
    pub fn is_flat_based(self) -> bool {
        self == Shape::Flat || shape_set::FLAT_KEYS.contains(self)
    }

    /// Sharp, or a key signature made of sharps.
    pub fn is_sharp_based(self) -> bool {
        self == Shape::Sharp || shape_set::SHARP_KEYS.contains(self)
    }

    /// Head of an un-pitched percussion note.
    pub fn is_percussion(self) -> bool {
        shape_set::HEADS_CROSS.contains(self)
            || shape_set::HEADS_DIAMOND.contains(self)
            || shape_set::HEADS_TRIANGLE.contains(self)
            || shape_set::HEADS_CIRCLE.contains(self)
    }

    pub fn is_text(self) -> bool {
        matches!(self, Shape::Text | Shape::Character)
    }

    /// Whether the shape can be dragged in an editing gesture.
    pub fn is_draggable(self) -> bool {
        !shape_set::UNDRAGGABLES.contains(self)
    }

    // ── Colors ──────────────────────────────────────────────────────

    fn explicit_color(self) -> Option<Color> {
        use Shape::*;
        match self {
            MetroWhole | MetroHalf | MetroQuarter | MetroSixteenth | MetroDottedHalf
            | MetroDottedQuarter | MetroDottedEighth | MetroDottedSixteenth | Metronome => {
                Some(color::SCORE_PHYSICALS)
            }
            Clutter | Noise => Some(color::SHAPE_UNKNOWN),
            ThinConnector | ThickConnector | BracketConnector => Some(color::SCORE_FRAME),
            Lyrics => Some(color::SCORE_LYRICS),
            _ => None,
        }
    }

    /// Catalog color: the shape's own color, else the color of the first
    /// palette group containing it, else black.
    pub fn default_color(self) -> Color {
        self.explicit_color()
            .or_else(|| shape_set::group_of(self).map(|set| set.color))
            .unwrap_or(color::BLACK)
    }

    /// Current display color of the shape.
    pub fn color(self) -> Color {
        let overrides = COLOR_OVERRIDES.read().unwrap_or_else(|e| e.into_inner());
        overrides
            .get(&self)
            .copied()
            .unwrap_or_else(|| self.default_color())
    }

    /// Assign a display color, overriding the catalog default.
    pub fn set_color(self, color: Color) {
        let mut overrides = COLOR_OVERRIDES.write().unwrap_or_else(|e| e.into_inner());
        overrides.insert(self, color);
    }

    /// Drop any display color assigned with [`Shape::set_color`].
    pub fn reset_color(self) {
        let mut overrides = COLOR_OVERRIDES.write().unwrap_or_else(|e| e.into_inner());
        overrides.remove(&self);
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .iter()
            .copied()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| Error::UnknownShape(s.to_string()))
    }
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
