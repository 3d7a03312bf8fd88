//! # Temperature Value Types and Scale Constants
//!
//! [`Fahrenheit`] and [`Celsius`] wrap an `f64` that is guaranteed to be
//! finite. Values outside the physical range (below absolute zero) are
//! accepted: the service converts numbers, it does not model matter.
//!
//! Conversions evaluate the textbook formula first. Near `f64::MAX` its
//! intermediate product can overflow even though the answer is representable,
//! so an infinite result is recomputed dividing first. Only a result that is
//! still infinite (Celsius above roughly `f64::MAX / 1.8`) is reported as an
//! invalid argument.

use crate::common::error::{Error, Result};
use core::fmt;

/// Offset between the two scales' zero points, in degrees Fahrenheit.
pub const FAHRENHEIT_OFFSET: f64 = 32.0;

/// Celsius side of the `5 / 9` degree ratio.
pub const CELSIUS_DEGREES: f64 = 5.0;

/// Fahrenheit side of the `5 / 9` degree ratio.
pub const FAHRENHEIT_DEGREES: f64 = 9.0;

/// A finite temperature in degrees Fahrenheit.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Fahrenheit(f64);

/// A finite temperature in degrees Celsius.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Celsius(f64);

impl Fahrenheit {
    /// Wraps `degrees`, rejecting NaN and infinities.
    pub fn new(degrees: f64) -> Result<Self> {
        finite("fahrenheit", degrees).map(Self)
    }

    pub const fn degrees(self) -> f64 {
        self.0
    }

    /// `(F - 32) * 5 / 9`
    pub fn to_celsius(self) -> Result<Celsius> {
        let shifted = self.0 - FAHRENHEIT_OFFSET;
        let mut celsius = shifted * CELSIUS_DEGREES / FAHRENHEIT_DEGREES;
        if celsius.is_infinite() {
            celsius = shifted / FAHRENHEIT_DEGREES * CELSIUS_DEGREES;
        }
        finite("celsius", celsius).map(Celsius)
    }
}

impl Celsius {
    /// Wraps `degrees`, rejecting NaN and infinities.
    pub fn new(degrees: f64) -> Result<Self> {
        finite("celsius", degrees).map(Self)
    }

    pub const fn degrees(self) -> f64 {
        self.0
    }

    /// `C * 9 / 5 + 32`
    pub fn to_fahrenheit(self) -> Result<Fahrenheit> {
        let mut fahrenheit = self.0 * FAHRENHEIT_DEGREES / CELSIUS_DEGREES + FAHRENHEIT_OFFSET;
        if fahrenheit.is_infinite() {
            fahrenheit = self.0 / CELSIUS_DEGREES * FAHRENHEIT_DEGREES + FAHRENHEIT_OFFSET;
        }
        finite("fahrenheit", fahrenheit).map(Fahrenheit)
    }
}

impl fmt::Display for Fahrenheit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°F", self.0)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°C", self.0)
    }
}

fn finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::non_finite(field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-9;

    fn to_celsius(fahrenheit: f64) -> Result<f64> {
        Fahrenheit::new(fahrenheit)?.to_celsius().map(Celsius::degrees)
    }

    fn to_fahrenheit(celsius: f64) -> Result<f64> {
        Celsius::new(celsius)?.to_fahrenheit().map(Fahrenheit::degrees)
    }

    #[test]
    fn fahrenheit_to_celsius_reference_points() {
        let cases = [
            ("freezing point", 32.0, 0.0),
            ("boiling point", 212.0, 100.0),
            ("body temperature", 98.6, 37.0),
            ("zero fahrenheit", 0.0, -17.78),
            ("scales cross", -40.0, -40.0),
            ("hot day", 100.0, 37.78),
        ];
        for (name, fahrenheit, expected) in cases {
            let celsius = to_celsius(fahrenheit).unwrap();
            assert!(
                (celsius - expected).abs() < 0.01,
                "{name}: {fahrenheit}°F -> {celsius}°C, want {expected}"
            );
        }
    }

    #[test]
    fn celsius_to_fahrenheit_reference_points() {
        let cases = [
            ("freezing point", 0.0, 32.0),
            ("boiling point", 100.0, 212.0),
            ("body temperature", 37.0, 98.6),
            ("scales cross", -40.0, -40.0),
            ("room temperature", 20.0, 68.0),
        ];
        for (name, celsius, expected) in cases {
            let fahrenheit = to_fahrenheit(celsius).unwrap();
            assert!(
                (fahrenheit - expected).abs() < 0.01,
                "{name}: {celsius}°C -> {fahrenheit}°F, want {expected}"
            );
        }
    }

    #[test]
    fn zero_celsius_is_exactly_freezing() {
        assert_eq!(to_fahrenheit(0.0).unwrap(), 32.0);
    }

    #[test]
    fn rejects_non_finite_values() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Fahrenheit::new(value),
                Err(Error::InvalidArgument { .. })
            ));
            assert!(matches!(
                Celsius::new(value),
                Err(Error::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn accepts_values_below_absolute_zero() {
        let celsius = to_celsius(-1000.0).unwrap();
        assert!((celsius - (-573.333_333_333)).abs() < 1e-6);
    }

    #[test]
    fn huge_fahrenheit_still_converts() {
        let celsius = to_celsius(1e308).unwrap();
        assert!((celsius / (1e308 / 9.0 * 5.0) - 1.0).abs() < 1e-12, "{celsius}");

        for fahrenheit in [f64::MAX, f64::MIN] {
            let celsius = to_celsius(fahrenheit).unwrap();
            assert!(celsius.is_finite());
            assert_eq!(celsius.signum(), fahrenheit.signum());
        }
    }

    #[test]
    fn huge_celsius_converts_while_representable() {
        let fahrenheit = to_fahrenheit(5e307).unwrap();
        assert!((fahrenheit / 9e307 - 1.0).abs() < 1e-12, "{fahrenheit}");

        let fahrenheit = to_fahrenheit(-5e307).unwrap();
        assert!((fahrenheit / -9e307 - 1.0).abs() < 1e-12, "{fahrenheit}");
    }

    #[test]
    fn unrepresentable_result_is_rejected() {
        for celsius in [f64::MAX, f64::MIN] {
            let err = Celsius::new(celsius).unwrap().to_fahrenheit().unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { .. }));
        }
    }

    #[test]
    fn display_uses_two_decimals() {
        let fahrenheit = Fahrenheit::new(100.0).unwrap();
        assert_eq!(fahrenheit.to_string(), "100.00°F");
        assert_eq!(fahrenheit.to_celsius().unwrap().to_string(), "37.78°C");
    }

    proptest! {
        #[test]
        fn fahrenheit_formula_holds(f in -1.0e9f64..1.0e9) {
            let celsius = to_celsius(f).unwrap();
            prop_assert!((celsius - (f - 32.0) * 5.0 / 9.0).abs() <= TOLERANCE);
        }

        #[test]
        fn celsius_formula_holds(c in -1.0e9f64..1.0e9) {
            let fahrenheit = to_fahrenheit(c).unwrap();
            prop_assert!((fahrenheit - (c * 9.0 / 5.0 + 32.0)).abs() <= TOLERANCE);
        }

        #[test]
        fn round_trip_returns_input(x in -1.0e5f64..1.0e5) {
            let back = to_fahrenheit(to_celsius(x).unwrap()).unwrap();
            prop_assert!((back - x).abs() <= TOLERANCE, "{x} -> {back}");
        }

        #[test]
        fn every_finite_fahrenheit_converts(
            f in any::<f64>().prop_filter("finite", |f| f.is_finite())
        ) {
            prop_assert!(to_celsius(f).is_ok());
        }

        #[test]
        fn celsius_converts_up_to_max_over_1_8(c in -9.9e307f64..9.9e307) {
            let fahrenheit = to_fahrenheit(c).unwrap();
            let expected = c / 5.0 * 9.0 + 32.0;
            prop_assert!((fahrenheit - expected).abs() <= expected.abs() * 1e-12 + TOLERANCE);
        }
    }
}
