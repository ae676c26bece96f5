//! Exact note and rest durations, counted in whole notes.

use num_rational::Ratio;

/// A reduced fraction; `Display` prints `1/8`, or `2` for whole numbers.
pub type Rational = Ratio<i64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_with_positive_denominator() {
        let r = Rational::new(6, -8);
        assert_eq!(*r.numer(), -3);
        assert_eq!(*r.denom(), 4);
        assert_eq!(r.to_string(), "-3/4");
    }

    #[test]
    fn ordering_follows_value() {
        assert!(Rational::new(1, 8) < Rational::new(1, 4));
        assert!(Rational::from_integer(2) > Rational::from_integer(1));
        assert_eq!(Rational::new(2, 4), Rational::new(1, 2));
        assert_eq!(Rational::from_integer(4).to_string(), "4");
    }
}
