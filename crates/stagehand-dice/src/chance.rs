//! Win chance expressed either as a fraction or as an integer percentage.

/// The probability passed to [`DiceBag::chance`](crate::DiceBag::chance).
///
/// Floats are read as fractions in `[0, 1]`, integers as percentages in
/// `[0, 100]`, so `chance(0.25, 0)` and `chance(25, 0)` are the same roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WinChance {
    /// A fraction, `1.0` meaning a certain win.
    Fraction(f64),
    /// A whole-number percentage, `100` meaning a certain win.
    Percent(i64),
}

impl WinChance {
    /// The chance as a fraction.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_fraction(self) -> f64 {
        match self {
            Self::Fraction(f) => f,
            Self::Percent(p) => p as f64 / 100.0,
        }
    }
}

impl From<f64> for WinChance {
    fn from(value: f64) -> Self {
        Self::Fraction(value)
    }
}

impl From<f32> for WinChance {
    fn from(value: f32) -> Self {
        Self::Fraction(f64::from(value))
    }
}

impl From<i64> for WinChance {
    fn from(value: i64) -> Self {
        Self::Percent(value)
    }
}

impl From<i32> for WinChance {
    fn from(value: i32) -> Self {
        Self::Percent(i64::from(value))
    }
}

impl From<u32> for WinChance {
    fn from(value: u32) -> Self {
        Self::Percent(i64::from(value))
    }
}
