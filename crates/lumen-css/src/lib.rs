//! CSS values and inline style resolution for the Lumen contrast checker.
//!
//! # Scope
//!
//! This crate implements:
//! - **Colors** ([CSS Color Level 4](https://www.w3.org/TR/css-color-4/))
//!   - Named colors, hex notation, `rgb()`/`rgba()`/`hsl()`/`hsla()`
//!   - HSL and HSV conversion
//!   - Alpha compositing over an opaque backdrop
//!
//! - **Font sizes** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//!   - Absolute, font-relative and viewport units, normalized to points
//!   - Size keywords
//!
//! - **Font weight** ([CSS Fonts Level 4](https://www.w3.org/TR/css-fonts-4/))
//!   - Bold classification of keywords and numeric weights
//!
//! - **Style resolution** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - HTML rendering defaults for `mark`, `b`, `strong`, `a` and headings
//!   - `style` attribute declarations, `inherit`, `initial`, `transparent`
//!
//! # Not Implemented
//!
//! - Stylesheets and selector matching
//! - The `font`, `background` and `opacity` properties

/// Style resolution per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// Color values per [CSS Color Level 4](https://www.w3.org/TR/css-color-4/).
pub mod color;
/// `style` attribute declarations per [CSS Style Attributes](https://www.w3.org/TR/css-style-attr/).
pub mod declaration;
/// Font weight and default sizes per [CSS Fonts Level 4](https://www.w3.org/TR/css-fonts-4/).
pub mod font;
/// Font-size units per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod length;

pub use cascade::{IssueKind, Resolution, StyleContext, StyleIssue, StyleResolver};
pub use color::{Color, ColorError, Rgb, composite, parse_color};
pub use font::{WeightError, classify_weight};
pub use length::{DEFAULT_ROOT_SIZE_PT, SizeError, to_points};
