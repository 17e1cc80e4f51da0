//! [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)
//!
//! Default font sizes per element and `font-weight` classification.

use std::str::FromStr;

use strum_macros::{Display, EnumString};
use thiserror::Error;

use crate::length::DEFAULT_ROOT_SIZE_PT;

/// Heading sizes in points, `h1` through `h6`.
const HEADING_SIZES_PT: [f64; 6] = [24.0, 18.0, 14.0, 12.0, 10.0, 9.0];

/// Errors from [`classify_weight`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightError {
    /// Numeric weight outside the open range 1-1000.
    #[error("font-weight '{0}' is out of range")]
    OutOfRange(String),
    /// Neither a keyword nor a number.
    #[error("unrecognized font-weight '{0}'")]
    Unrecognized(String),
}

/// [§ 2.2 Font weight: the font-weight property](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WeightKeyword {
    /// `normal`, same as 400
    Normal,
    /// `bold`, same as 700
    Bold,
    /// `bolder` than the parent
    Bolder,
    /// `lighter` than the parent
    Lighter,
    /// `inherit`
    Inherit,
    /// `initial`
    Initial,
    /// `unset`
    Unset,
}

/// Whether `tag` is `h1`..`h6`.
#[must_use]
pub fn is_heading(tag: &str) -> bool {
    heading_level(tag).is_some()
}

fn heading_level(tag: &str) -> Option<usize> {
    let level = tag.strip_prefix('h')?.parse::<usize>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

/// Default size of heading `tag` when nested `nesting` sectioning elements
/// deep. Each level of `article`, `aside`, `nav` or `section` demotes an
/// `h1` one step, bottoming out at `h6`. Other headings are not demoted.
#[must_use]
pub fn heading_size(tag: &str, nesting: usize) -> Option<f64> {
    let level = heading_level(tag)?;
    let effective = if level == 1 {
        (1 + nesting).min(6)
    } else {
        level
    };
    Some(HEADING_SIZES_PT[effective - 1])
}

/// Default font size of `tag`, in points, if the element has one.
///
/// The root and paragraphs use the root size; headings use
/// [`heading_size`] at nesting depth 0.
#[must_use]
pub fn default_font_size(tag: &str) -> Option<f64> {
    match tag {
        "html" | "p" => Some(DEFAULT_ROOT_SIZE_PT),
        _ => heading_size(tag, 0),
    }
}

/// Decide whether a `font-weight` value on a `tag` element makes text bold.
///
/// `bold` and `bolder` are bold; `normal`, `lighter` and `unset` are not;
/// `inherit` keeps `parent_bold`; `initial` is bold only for headings. A
/// number `n` with `1 < n < 1000` is bold only when `n > 700`.
///
/// # Errors
///
/// Returns a [`WeightError`] for numbers outside that range and for anything
/// that is not a keyword or number.
pub fn classify_weight(tag: &str, value: &str, parent_bold: bool) -> Result<bool, WeightError> {
    let value = value.trim();
    if let Ok(keyword) = WeightKeyword::from_str(value) {
        return Ok(match keyword {
            WeightKeyword::Bold | WeightKeyword::Bolder => true,
            WeightKeyword::Normal | WeightKeyword::Lighter | WeightKeyword::Unset => false,
            WeightKeyword::Inherit => parent_bold,
            WeightKeyword::Initial => is_heading(tag),
        });
    }
    let weight: f64 = value
        .parse()
        .ok()
        .filter(|n: &f64| n.is_finite())
        .ok_or_else(|| WeightError::Unrecognized(value.to_string()))?;
    if weight > 1.0 && weight < 1000.0 {
        Ok(weight > 700.0)
    } else {
        Err(WeightError::OutOfRange(value.to_string()))
    }
}
