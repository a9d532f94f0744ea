use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// Unsigned fixed-point value stored as an integer count of `10^-DIGITS` units.
///
/// Keeping the raw integer avoids rounding drift when values are displayed
/// again; floating point is only produced on request.
///
/// # Examples
/// ```
/// use wiifit_core::{Hundredths, Tenths};
///
/// assert_eq!(Tenths::from_raw(1523).to_string(), "152.3");
/// assert_eq!(Hundredths::from_raw(2145).to_string(), "21.45");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed<const DIGITS: u8>(u16);

/// One fractional digit (weight in kilograms, balance percentage).
pub type Tenths = Fixed<1>;
/// Two fractional digits (BMI).
pub type Hundredths = Fixed<2>;

impl<const DIGITS: u8> Fixed<DIGITS> {
    const SCALE: u16 = 10u16.pow(DIGITS as u32);

    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub fn whole(self) -> u16 {
        self.0 / Self::SCALE
    }

    pub fn fraction(self) -> u16 {
        self.0 % Self::SCALE
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }
}

impl<const DIGITS: u8> fmt::Display for Fixed<DIGITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.whole(),
            self.fraction(),
            width = DIGITS as usize
        )
    }
}

impl<const DIGITS: u8> Serialize for Fixed<DIGITS> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de, const DIGITS: u8> Deserialize<'de> for Fixed<DIGITS> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        let scaled = (value * Self::SCALE as f64).round();
        if !(0.0..=u16::MAX as f64).contains(&scaled) {
            return Err(de::Error::custom(format!(
                "fixed-point value out of range: {value}"
            )));
        }
        Ok(Self(scaled as u16))
    }
}
