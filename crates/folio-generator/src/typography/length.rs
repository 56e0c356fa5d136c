//! CSS lengths produced by the rhythm engine.

use std::fmt;

/// Length units the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    Px,
    #[default]
    Rem,
    Em,
}

impl Unit {
    /// CSS suffix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Rem => "rem",
            Self::Em => "em",
        }
    }
}

/// A CSS length.
///
/// Displays with at most five decimals and no trailing zeros. Zero displays
/// as a bare `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: Unit,
}

impl Length {
    #[must_use]
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self::new(value, Unit::Px)
    }

    #[must_use]
    pub const fn rem(value: f64) -> Self {
        Self::new(value, Unit::Rem)
    }

    #[must_use]
    pub const fn em(value: f64) -> Self {
        Self::new(value, Unit::Em)
    }

    /// Sum two lengths of the same unit. `None` when the units differ.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        (self.unit == other.unit).then(|| Self::new(self.value + other.value, self.unit))
    }

    /// Whether two lengths are equal within `tolerance`.
    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        self.unit == other.unit && (self.value - other.value).abs() <= tolerance
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.5}", self.value);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "0" || trimmed == "-0" {
            return f.write_str("0");
        }
        write!(f, "{trimmed}{}", self.unit.as_str())
    }
}
