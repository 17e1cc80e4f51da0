//! [CSS Style Attributes](https://www.w3.org/TR/css-style-attr/)
//!
//! Reading the declaration block of an element's `style` attribute.

use std::str::FromStr;

use strum_macros::{Display, EnumString};

use crate::color::{Color, ColorError, parse_color};

/// Properties the checker understands.
pub const SUPPORTED_PROPERTIES: &[&str] = &["background-color", "color", "font-size", "font-weight"];

/// Properties that change how text renders but are not modelled.
pub const UNSUPPORTED_PROPERTIES: &[&str] = &["background", "background-image", "font", "opacity"];

/// One `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lower-cased property name
    pub property: String,
    /// Lower-cased, trimmed value
    pub value: String,
}

/// The supported declarations of one `style` attribute, with duplicates
/// removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<Declaration>,
    unsupported: Vec<String>,
}

impl InlineStyle {
    /// [§ 3 Syntax and Parsing](https://www.w3.org/TR/css-style-attr/#syntax)
    ///
    /// The text is lower-cased and split on `;`, then each item on its first
    /// `:`. Items without a colon or with an empty property are skipped. When
    /// a property repeats, the later declaration wins.
    ///
    /// Only [`SUPPORTED_PROPERTIES`] are kept. Properties from
    /// [`UNSUPPORTED_PROPERTIES`] are remembered by name so the caller can
    /// report them; anything else is dropped.
    #[must_use]
    pub fn parse(style: &str) -> Self {
        let mut parsed = Self::default();
        for item in style.to_lowercase().split(';') {
            let Some((property, value)) = item.split_once(':') else {
                continue;
            };
            let property = property.trim();
            if UNSUPPORTED_PROPERTIES.contains(&property) {
                if !parsed.unsupported.iter().any(|p| p == property) {
                    parsed.unsupported.push(property.to_string());
                }
                continue;
            }
            if !SUPPORTED_PROPERTIES.contains(&property) {
                continue;
            }
            parsed.declarations.retain(|d| d.property != property);
            parsed.declarations.push(Declaration {
                property: property.to_string(),
                value: value.trim().to_string(),
            });
        }
        parsed
    }

    /// Value of `property`, if declared.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    /// All declarations, in the order they were last declared.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Unsupported properties that were declared, first occurrence first.
    #[must_use]
    pub fn unsupported(&self) -> &[String] {
        &self.unsupported
    }

    /// Whether no supported declaration was read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// [§ 7.3 Explicit Defaulting](https://www.w3.org/TR/css-cascade-4/#defaulting-keywords)
/// plus [§ 6.2 The transparent keyword](https://www.w3.org/TR/css-color-4/#transparent-color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ColorKeyword {
    /// `initial`
    Initial,
    /// `inherit`
    Inherit,
    /// `transparent`
    Transparent,
}

/// A classified `color` or `background-color` value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    /// A keyword the cascade resolves itself.
    Keyword(ColorKeyword),
    /// A concrete, possibly translucent, color.
    Literal(Color),
}

impl ColorValue {
    /// Classify a declared color value.
    ///
    /// # Errors
    ///
    /// Returns the [`ColorError`] from [`parse_color`] when the value is
    /// neither a keyword nor a color.
    pub fn classify(value: &str) -> Result<Self, ColorError> {
        match ColorKeyword::from_str(value.trim()) {
            Ok(keyword) => Ok(Self::Keyword(keyword)),
            Err(_) => parse_color(value).map(Self::Literal),
        }
    }
}
