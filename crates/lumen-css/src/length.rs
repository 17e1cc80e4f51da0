//! [CSS Values and Units Module Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Conversion of `font-size` values to points. Contrast thresholds for large
//! text are defined in points, so everything is normalized there.

use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

use crate::font::default_font_size;

/// Root font size, in points, when nothing else is known (`16px`).
pub const DEFAULT_ROOT_SIZE_PT: f64 = 12.0;

/// Errors from [`to_points`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    /// The value was empty.
    #[error("empty font-size value")]
    Empty,
    /// A negative length. "Negative values are invalid."
    #[error("negative font-size '{0}'")]
    Negative(String),
    /// Not a number followed by a known unit, and not a keyword.
    #[error("unrecognized font-size '{0}'")]
    Unrecognized(String),
}

/// [§ 2.5 Font size: the font-size property](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
///
/// `<absolute-size>` and `<relative-size>` keywords. Relative keywords are
/// approximated with fixed sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SizeKeyword {
    /// `xx-small`
    XxSmall,
    /// `x-small`
    XSmall,
    /// `small`
    Small,
    /// `medium`
    Medium,
    /// `large`
    Large,
    /// `x-large`
    XLarge,
    /// `xx-large`
    XxLarge,
    /// `smaller`
    Smaller,
    /// `larger`
    Larger,
}

impl SizeKeyword {
    /// Size in points.
    #[must_use]
    pub const fn points(self) -> f64 {
        match self {
            Self::XxSmall => 7.0,
            Self::XSmall => 7.5,
            Self::Small | Self::Smaller => 10.0,
            Self::Medium => 12.0,
            Self::Large => 13.5,
            Self::XLarge => 18.0,
            Self::XxLarge => 24.0,
            Self::Larger => 14.0,
        }
    }
}

/// [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Unit {
    /// Pixels, 0.75pt
    Px,
    /// Points
    Pt,
    /// Picas, 12pt
    Pc,
    /// Inches, 72pt
    In,
    /// Centimeters
    Cm,
    /// Millimeters
    Mm,
    /// Root element font size
    Rem,
    /// Parent font size
    Em,
    /// x-height, half the parent font size
    Ex,
    /// "0" advance, approximated as 6pt
    Ch,
    /// Percentage of the parent font size
    #[strum(serialize = "%")]
    Percent,
}

/// Convert a `font-size` value on a `tag` element to points.
///
/// `parent_pt` and `root_pt` are the font sizes of the parent and root
/// elements. Resolution order:
/// 1. negative values are rejected
/// 2. size keywords map to fixed sizes
/// 3. `initial` is the tag's default size, else the root size
/// 4. `inherit` is the parent size
/// 5. font-relative units scale the parent (or root) size
/// 6. viewport units are approximated as the root size
/// 7. absolute units convert with their fixed ratios
///
/// # Errors
///
/// Returns a [`SizeError`] for empty, negative or unrecognized values.
/// Unitless numbers are unrecognized.
pub fn to_points(tag: &str, value: &str, parent_pt: f64, root_pt: f64) -> Result<f64, SizeError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SizeError::Empty);
    }
    if value.starts_with('-') {
        return Err(SizeError::Negative(value.to_string()));
    }
    if let Ok(keyword) = SizeKeyword::from_str(value) {
        return Ok(keyword.points());
    }
    if value.eq_ignore_ascii_case("initial") {
        return Ok(default_font_size(tag).unwrap_or(root_pt));
    }
    if value.eq_ignore_ascii_case("inherit") {
        return Ok(parent_pt);
    }

    let unrecognized = || SizeError::Unrecognized(value.to_string());
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .ok_or_else(unrecognized)?;
    let (number, unit) = value.split_at(split);
    let number: f64 = number.parse().map_err(|_| unrecognized())?;
    let unit = unit.trim();

    // vw, vh, vmin, vmax, and the logical viewport units
    if unit.contains(['v', 'V']) {
        return Ok(root_pt);
    }

    let factor = match Unit::from_str(unit).map_err(|_| unrecognized())? {
        Unit::Rem => root_pt,
        Unit::Em => parent_pt,
        Unit::Percent => parent_pt / 100.0,
        Unit::Ex => parent_pt / 2.0,
        Unit::Ch => 6.0,
        Unit::Px => 0.75,
        Unit::Pt => 1.0,
        Unit::Pc => 12.0,
        Unit::In => 72.0,
        Unit::Cm => 72.0 / 2.54,
        Unit::Mm => 72.0 / 25.4,
    };
    Ok(number * factor)
}
