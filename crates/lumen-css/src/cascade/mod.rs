//! Style resolution for the contrast walk.
//!
//! This module follows
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/),
//! restricted to what a checker without stylesheets needs: the rendering
//! defaults of a handful of HTML elements, then the element's own inline
//! declarations, on top of the parent's resolved style.

use strum_macros::Display;
use tracing::trace;

use lumen_dom::is_block_element;

use crate::color::{Color, Rgb, composite};
use crate::declaration::{ColorKeyword, ColorValue, InlineStyle};
use crate::font::{classify_weight, heading_size};
use crate::length::{DEFAULT_ROOT_SIZE_PT, to_points};

/// [§ 4 Value Processing](https://www.w3.org/TR/css-cascade-4/#value-stages)
///
/// The resolved style of one element, as far as contrast is concerned.
/// `background_color` and `font_color` are the opaque values actually
/// rendered. `true_background` and `true_foreground` keep the last declared,
/// possibly translucent, colors of the element's ancestry: `inherit` and
/// undeclared text colors re-composite those against a new background, which
/// a rendered color alone cannot express.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleContext {
    /// Rendered background color
    pub background_color: Rgb,
    /// Rendered text color
    pub font_color: Rgb,
    /// Last declared background color
    pub true_background: Color,
    /// Last declared text color
    pub true_foreground: Color,
    /// Font size in points
    pub font_size_pt: f64,
    /// Whether text is bold
    pub font_is_bold: bool,
    /// Number of enclosing `article`, `aside`, `nav` and `section` elements
    pub semantic_nesting_level: usize,
    /// Whether the element sits inside a `<mark>` highlight
    pub in_highlight: bool,
}

impl StyleContext {
    /// The style of the document root.
    #[must_use]
    pub const fn root(background: Rgb, foreground: Rgb) -> Self {
        Self {
            background_color: background,
            font_color: foreground,
            true_background: Color::Hex(background),
            true_foreground: Color::Hex(foreground),
            font_size_pt: DEFAULT_ROOT_SIZE_PT,
            font_is_bold: false,
            semantic_nesting_level: 0,
            in_highlight: false,
        }
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::root(Rgb::WHITE, Rgb::BLACK)
    }
}

/// What was wrong with a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    /// `color` or `background-color` is not a color.
    #[strum(serialize = "invalid color")]
    InvalidColor,
    /// `font-size` is not a usable size.
    #[strum(serialize = "invalid size")]
    InvalidSize,
    /// `font-weight` is not a usable weight.
    #[strum(serialize = "invalid weight")]
    InvalidWeight,
}

/// A declaration the resolver had to ignore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleIssue {
    /// Kind of problem
    pub kind: IssueKind,
    /// Property name, e.g. `"font-size"`
    pub property: String,
    /// The declared value
    pub value: String,
    /// Parser error message
    pub message: String,
}

impl StyleIssue {
    fn new(kind: IssueKind, property: &str, value: &str, error: &dyn std::error::Error) -> Self {
        Self {
            kind,
            property: property.to_string(),
            value: value.to_string(),
            message: error.to_string(),
        }
    }
}

/// Output of [`StyleResolver::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The element's resolved style, passed on to its children
    pub context: StyleContext,
    /// Declarations that were ignored, in property order
    pub issues: Vec<StyleIssue>,
    /// Declared properties that change rendering but are not modelled
    pub unsupported: Vec<String>,
}

/// Resolves element styles from their parent's resolved style.
///
/// Resolution reads nothing but its arguments and the configured root, so
/// sibling subtrees never see each other's declarations.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    root: StyleContext,
}

impl StyleResolver {
    /// Create a resolver for documents with the given root colors.
    #[must_use]
    pub const fn new(background: Rgb, foreground: Rgb) -> Self {
        Self {
            root: StyleContext::root(background, foreground),
        }
    }

    /// The context of the document root.
    #[must_use]
    pub const fn root(&self) -> &StyleContext {
        &self.root
    }

    /// Resolve the style of a `tag` element with inline `style`, given its
    /// parent's resolved context.
    ///
    /// HTML rendering defaults are applied first, then the declarations.
    /// Invalid declarations leave their property as it was and are returned
    /// as issues.
    #[must_use]
    pub fn resolve(&self, tag: &str, style: Option<&str>, parent: &StyleContext) -> Resolution {
        let mut context = parent.clone();
        let color_from_element = apply_element_defaults(tag, &mut context);

        let inline = style.map(InlineStyle::parse).unwrap_or_default();
        let mut issues = Vec::new();

        // background first: the text color composites over it
        if let Some(value) = inline.get("background-color") {
            match ColorValue::classify(value) {
                Ok(declared) => apply_background(declared, parent, &mut context),
                Err(err) => issues.push(StyleIssue::new(
                    IssueKind::InvalidColor,
                    "background-color",
                    value,
                    &err,
                )),
            }
        }

        match inline.get("color") {
            Some(value) => match ColorValue::classify(value) {
                Ok(declared) => self.apply_color(declared, parent, &mut context),
                Err(err) => {
                    issues.push(StyleIssue::new(IssueKind::InvalidColor, "color", value, &err));
                }
            },
            None if !color_from_element && context.true_foreground.is_pending() => {
                context.font_color = composite(&context.true_foreground, context.background_color);
            }
            None => {}
        }

        if let Some(value) = inline.get("font-size") {
            match to_points(tag, value, parent.font_size_pt, DEFAULT_ROOT_SIZE_PT) {
                Ok(size) => context.font_size_pt = size,
                Err(err) => {
                    issues.push(StyleIssue::new(IssueKind::InvalidSize, "font-size", value, &err));
                }
            }
        }

        if let Some(value) = inline.get("font-weight") {
            match classify_weight(tag, value, parent.font_is_bold) {
                Ok(bold) => context.font_is_bold = bold,
                Err(err) => issues.push(StyleIssue::new(
                    IssueKind::InvalidWeight,
                    "font-weight",
                    value,
                    &err,
                )),
            }
        }

        trace!(tag, ?context, issues = issues.len(), "resolved style");
        Resolution {
            context,
            issues,
            unsupported: inline.unsupported().to_vec(),
        }
    }

    /// [§ 3.1 Foreground Color](https://www.w3.org/TR/css-color-4/#the-color-property)
    fn apply_color(&self, declared: ColorValue, parent: &StyleContext, context: &mut StyleContext) {
        let node_bg = context.background_color;
        match declared {
            ColorValue::Literal(color) => {
                context.font_color = color.render_over(node_bg);
                context.true_foreground = color;
            }
            ColorValue::Keyword(ColorKeyword::Transparent) => {
                context.font_color = node_bg;
                context.true_foreground = Color::transparent();
            }
            ColorValue::Keyword(ColorKeyword::Initial) => {
                context.font_color = self.root.font_color;
                context.true_foreground = self.root.true_foreground.clone();
            }
            ColorValue::Keyword(ColorKeyword::Inherit) => {
                context.font_color = if context.true_foreground.is_pending() {
                    composite(&context.true_foreground, node_bg)
                } else {
                    parent.font_color
                };
            }
        }
    }
}

/// [§ 15.3.4 Phrasing content](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3)
///
/// Rendering defaults of `mark`, `b`, `strong`, `a`, headings and the
/// sectioning elements. Returns whether the text color was set.
fn apply_element_defaults(tag: &str, context: &mut StyleContext) -> bool {
    let mut color_set = false;

    // a block inside a highlight starts a fresh, unhighlighted box
    if context.in_highlight && is_block_element(tag) {
        context.in_highlight = false;
        context.background_color = Rgb::WHITE;
        context.font_color = Rgb::BLACK;
        context.true_background = Color::from(Rgb::WHITE);
        context.true_foreground = Color::from(Rgb::BLACK);
        color_set = true;
    }

    match tag {
        // "mark { background: yellow; color: black; }"
        "mark" => {
            context.background_color = Rgb::YELLOW;
            context.font_color = Rgb::BLACK;
            context.in_highlight = true;
            context.true_background = Color::from(Rgb::YELLOW);
            context.true_foreground = Color::from(Rgb::BLACK);
            color_set = true;
        }
        // "b, strong { font-weight: bolder; }"
        "b" | "strong" => context.font_is_bold = true,
        // ":link { color: #0000EE; }", approximated as blue
        "a" => {
            context.font_color = Rgb::BLUE;
            color_set = true;
        }
        "article" | "aside" | "nav" | "section" => context.semantic_nesting_level += 1,
        _ => {}
    }

    // "h1 { font-size: 2.00em; font-weight: bold; }" and friends
    if let Some(size) = heading_size(tag, context.semantic_nesting_level) {
        context.font_size_pt = size;
        context.font_is_bold = true;
    }

    color_set
}

/// [§ 3.2 Background Color](https://www.w3.org/TR/css-backgrounds-3/#background-color)
fn apply_background(declared: ColorValue, parent: &StyleContext, context: &mut StyleContext) {
    let parent_bg = parent.background_color;
    match declared {
        ColorValue::Literal(color) => {
            context.background_color = color.render_over(parent_bg);
            context.true_background = color;
        }
        ColorValue::Keyword(ColorKeyword::Transparent | ColorKeyword::Initial) => {
            context.background_color = parent_bg;
            context.true_background = Color::from(parent_bg);
        }
        ColorValue::Keyword(ColorKeyword::Inherit) => {
            context.background_color = if context.true_background.is_pending() {
                composite(&context.true_background, parent_bg)
            } else {
                parent_bg
            };
        }
    }
}
