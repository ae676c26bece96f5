//! Tunable constants of the shape checks.
//!
//! Heights and distances are expressed in interlines, pitch positions in
//! half interlines from the staff middle line.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum normalized height of a whole time signature.
pub const MAX_WHOLE_TIME_HEIGHT: f64 = 4.5;

/// Maximum distance of a long rest from the staff middle line.
pub const MAX_LONG_REST_PITCH_POSITION: f64 = 0.5;

/// Constants consulted by the shape checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConstants {
    /// Master switch: when false, annotation leaves every evaluation untouched
    pub apply_specific_check: bool,
    /// Maximum normalized height for a title text
    pub max_title_height: f64,
    /// Maximum normalized height for a lyrics text
    pub max_lyrics_height: f64,
    /// Minimum pitch position for a segno, coda or repeat marker
    pub min_marker_pitch_position: f64,
    /// Maximum absolute pitch position for a measure-repeat sign
    pub max_measure_repeat_pitch_position: f64,
    /// Minimum absolute pitch position for a title
    pub min_title_pitch_position: f64,
    /// Maximum absolute pitch position for a tuplet sign
    pub max_tuplet_pitch_position: f64,
    /// Maximum absolute pitch position for a whole time signature
    pub max_time_pitch_position_margin: f64,
    /// Maximum vertical gap between a glyph and its closest staff
    pub max_gap_to_staff: f64,
    /// Horizontal padding around a measure-rest candidate when looking for stems
    pub measure_rest_dx: f64,
}

impl Default for CheckConstants {
    fn default() -> Self {
        Self {
            apply_specific_check: true,
            max_title_height: 4.0,
            max_lyrics_height: 2.5,
            min_marker_pitch_position: -13.0,
            max_measure_repeat_pitch_position: 1.0,
            min_title_pitch_position: 15.0,
            max_tuplet_pitch_position: 17.0,
            max_time_pitch_position_margin: 1.0,
            max_gap_to_staff: 8.0,
            measure_rest_dx: 0.2,
        }
    }
}

impl CheckConstants {
    /// Load constants from a JSON document; missing keys keep their default.
    pub fn from_json(json: &str) -> Result<Self> {
        let constants: CheckConstants = serde_json::from_str(json)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every constant is usable by the checks.
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("max_title_height", self.max_title_height),
            ("max_lyrics_height", self.max_lyrics_height),
            ("min_marker_pitch_position", self.min_marker_pitch_position),
            (
                "max_measure_repeat_pitch_position",
                self.max_measure_repeat_pitch_position,
            ),
            ("min_title_pitch_position", self.min_title_pitch_position),
            ("max_tuplet_pitch_position", self.max_tuplet_pitch_position),
            (
                "max_time_pitch_position_margin",
                self.max_time_pitch_position_margin,
            ),
            ("max_gap_to_staff", self.max_gap_to_staff),
            ("measure_rest_dx", self.measure_rest_dx),
        ];
        for (name, value) in all {
            if !value.is_finite() {
                return Err(invalid(name, format!("must be finite, got {value}")));
            }
        }

        for (name, value) in [
            ("max_title_height", self.max_title_height),
            ("max_lyrics_height", self.max_lyrics_height),
            ("max_gap_to_staff", self.max_gap_to_staff),
        ] {
            if value <= 0.0 {
                return Err(invalid(name, format!("must be positive, got {value}")));
            }
        }

        for (name, value) in [
            (
                "max_measure_repeat_pitch_position",
                self.max_measure_repeat_pitch_position,
            ),
            ("min_title_pitch_position", self.min_title_pitch_position),
            ("max_tuplet_pitch_position", self.max_tuplet_pitch_position),
            (
                "max_time_pitch_position_margin",
                self.max_time_pitch_position_margin,
            ),
            ("measure_rest_dx", self.measure_rest_dx),
        ] {
            if value < 0.0 {
                return Err(invalid(name, format!("must not be negative, got {value}")));
            }
        }

        if self.max_title_height < self.max_lyrics_height {
            return Err(invalid(
                "max_title_height",
                format!(
                    "{} is below max_lyrics_height {}",
                    self.max_title_height, self.max_lyrics_height
                ),
            ));
        }

        Ok(())
    }
}

fn invalid(name: &'static str, message: String) -> Error {
    Error::InvalidConstant { name, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        CheckConstants::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = CheckConstants::from_json(r#"{ "max_gap_to_staff": 6.0 }"#).unwrap();
        assert_eq!(
            c,
            CheckConstants {
                max_gap_to_staff: 6.0,
                ..CheckConstants::default()
            }
        );
    }

    #[test]
    fn json_round_trip() {
        let c = CheckConstants {
            apply_specific_check: false,
            ..CheckConstants::default()
        };
        let back = CheckConstants::from_json(&c.to_json().unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn rejects_bad_values() {
        let negative_gap = CheckConstants {
            max_gap_to_staff: -1.0,
            ..CheckConstants::default()
        };
        assert!(matches!(
            negative_gap.validate(),
            Err(Error::InvalidConstant {
                name: "max_gap_to_staff",
                ..
            })
        ));

        let inverted = CheckConstants {
            max_title_height: 2.0,
            ..CheckConstants::default()
        };
        assert!(inverted.validate().is_err());

        assert!(matches!(
            CheckConstants::from_json(r#"{ "max_title_height": "tall" }"#),
            Err(Error::Json(_))
        ));
    }
}
