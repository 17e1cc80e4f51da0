//! Integration tests for inline style resolution.

use lumen_css::declaration::{ColorKeyword, ColorValue, InlineStyle, SUPPORTED_PROPERTIES};
use lumen_css::{Color, IssueKind, Rgb, StyleContext, StyleResolver};

fn resolver() -> StyleResolver {
    StyleResolver::new(Rgb::WHITE, Rgb::BLACK)
}

/// Resolve a chain of `(tag, style)` elements, each the child of the
/// previous, and return every resolved context.
fn resolve_chain(resolver: &StyleResolver, chain: &[(&str, &str)]) -> Vec<StyleContext> {
    let mut parent = resolver.root().clone();
    let mut contexts = Vec::new();
    for &(tag, style) in chain {
        let style = (!style.is_empty()).then_some(style);
        let resolution = resolver.resolve(tag, style, &parent);
        assert!(resolution.issues.is_empty(), "{:?}", resolution.issues);
        parent = resolution.context.clone();
        contexts.push(resolution.context);
    }
    contexts
}

#[test]
fn test_inline_style_parsing() {
    let style = InlineStyle::parse("Color: RED; ; font-size 12px; background-color:blue;color: black");
    assert_eq!(style.get("color"), Some("black"));
    assert_eq!(style.get("background-color"), Some("blue"));
    assert_eq!(style.get("font-size"), None);
    assert_eq!(style.declarations().len(), 2);
}

#[test]
fn test_inline_style_empty() {
    assert!(InlineStyle::parse("").is_empty());
    assert!(InlineStyle::parse(";;").is_empty());
}

#[test]
fn test_color_value_classification() {
    assert_eq!(
        ColorValue::classify("Inherit"),
        Ok(ColorValue::Keyword(ColorKeyword::Inherit))
    );
    assert_eq!(
        ColorValue::classify("transparent"),
        Ok(ColorValue::Keyword(ColorKeyword::Transparent))
    );
    assert_eq!(
        ColorValue::classify("#000"),
        Ok(ColorValue::Literal(Color::Hex(Rgb::BLACK)))
    );
    assert!(ColorValue::classify("unset").is_err());
}

#[test]
fn test_root_context_defaults() {
    let root = StyleContext::default();
    assert_eq!(root.background_color, Rgb::WHITE);
    assert_eq!(root.font_color, Rgb::BLACK);
    assert!((root.font_size_pt - 12.0).abs() < f64::EPSILON);
    assert!(!root.font_is_bold);
    assert_eq!(root.semantic_nesting_level, 0);
    assert!(!root.in_highlight);
}

#[test]
fn test_mark_defaults() {
    let resolver = resolver();
    let contexts = resolve_chain(&resolver, &[("p", "color: yellow"), ("mark", "")]);
    let mark = &contexts[1];
    assert_eq!(mark.background_color, Rgb::YELLOW);
    assert_eq!(mark.font_color, Rgb::BLACK);
    assert!(mark.in_highlight);
    assert_eq!(mark.true_background, Color::Hex(Rgb::YELLOW));
    assert_eq!(mark.true_foreground, Color::Hex(Rgb::BLACK));
}

#[test]
fn test_block_inside_mark_clears_highlight() {
    let resolver = resolver();
    let contexts = resolve_chain(&resolver, &[("mark", ""), ("span", ""), ("div", "")]);
    assert_eq!(contexts[1].background_color, Rgb::YELLOW);
    assert!(contexts[1].in_highlight);
    assert_eq!(contexts[2].background_color, Rgb::WHITE);
    assert!(!contexts[2].in_highlight);
}

#[test]
fn test_block_inside_mark_restores_black_text() {
    let resolver = resolver();
    let contexts = resolve_chain(
        &resolver,
        &[("mark", ""), ("span", "color: rgba(255, 255, 255, .9)"), ("div", "")],
    );
    assert!(contexts[1].true_foreground.is_pending());
    let block = &contexts[2];
    assert_eq!(block.background_color, Rgb::WHITE);
    assert_eq!(block.font_color, Rgb::BLACK);
    assert_eq!(block.true_foreground, Color::Hex(Rgb::BLACK));
    assert_eq!(block.true_background, Color::Hex(Rgb::WHITE));
}

#[test]
fn test_link_and_bold_defaults() {
    let resolver = resolver();
    let contexts = resolve_chain(&resolver, &[("a", ""), ("strong", "")]);
    assert_eq!(contexts[0].font_color, Rgb::BLUE);
    assert!(!contexts[0].font_is_bold);
    assert!(contexts[1].font_is_bold);
    assert_eq!(contexts[1].font_color, Rgb::BLUE);
}

#[test]
fn test_declared_color_overrides_link_default() {
    let resolver = resolver();
    let contexts = resolve_chain(&resolver, &[("a", "color: white;")]);
    assert_eq!(contexts[0].font_color, Rgb::WHITE);
}

#[test]
fn test_heading_defaults_and_sectioning() {
    let resolver = resolver();
    let contexts = resolve_chain(
        &resolver,
        &[("section", ""), ("article", ""), ("h1", "")],
    );
    assert_eq!(contexts[1].semantic_nesting_level, 2);
    let h1 = &contexts[2];
    assert!((h1.font_size_pt - 14.0).abs() < f64::EPSILON);
    assert!(h1.font_is_bold);
}

#[test]
fn test_translucent_background() {
    let resolver = resolver();
    let contexts = resolve_chain(&resolver, &[("p", "background-color: rgba(0, 0, 0, .8);")]);
    assert_eq!(contexts[0].background_color, Rgb::new(51, 51, 51));
    assert_eq!(contexts[0].true_background, Color::rgba(0.0, 0.0, 0.0, 0.8));
}

#[test]
fn test_background_inherit_recomposites() {
    let resolver = resolver();
    let contexts = resolve_chain(
        &resolver,
        &[
            ("div", "background-color: rgba(75, 0, 0, .5)"),
            ("div", "background-color: inherit"),
            ("div", "background-color: inherit"),
        ],
    );
    assert_eq!(contexts[0].background_color, Rgb::new(165, 128, 128));
    assert_eq!(contexts[1].background_color, Rgb::new(120, 64, 64));
    assert_eq!(contexts[2].background_color, Rgb::new(98, 32, 32));
}

#[test]
fn test_background_initial_takes_parent_and_ends_translucency() {
    let resolver = resolver();
    let contexts = resolve_chain(
        &resolver,
        &[
            ("div", "background-color: rgba(75, 0, 0, .5)"),
            ("div", "background-color: initial"),
            ("div", "background-color: inherit"),
        ],
    );
    assert_eq!(contexts[1].background_color, Rgb::new(165, 128, 128));
    assert_eq!(contexts[2].background_color, Rgb::new(165, 128, 128));
    assert!(!contexts[2].true_background.is_pending());
}

#[test]
fn test_background_transparent_takes_parent() {
    let resolver = resolver();
    let contexts = resolve_chain(
        &resolver,
        &[
            ("div", "background-color: black"),
            ("p", "background-color: transparent"),
        ],
    );
    assert_eq!(contexts[1].background_color, Rgb::BLACK);
}

#[test]
fn test_translucent_text_composites_over_own_background() {
    let resolver = resolver();
    let contexts = resolve_chain(
        &resolver,
        &[
            ("div", "color: rgba(0, 0, 75, .5)"),
            ("p", "background-color: black"),
        ],
    );
    assert_eq!(contexts[0].font_color, Rgb::new(128, 128, 165));
    assert_eq!(contexts[1].font_color, Rgb::new(0, 0, 38));
}

#[test]
fn test_link_keeps_its_color_under_translucent_text() {
    let resolver = resolver();
    let contexts = resolve_chain(
        &resolver,
        &[("div", "color: rgba(0, 0, 0, .5)"), ("a", "")],
    );
    assert_eq!(contexts[1].font_color, Rgb::BLUE);
}

#[test]
fn test_color_transparent() {
    let resolver = resolver();
    let contexts = resolve_chain(
        &resolver,
        &[
            ("div", "background-color: teal; color: transparent"),
            ("p", "background-color: navy"),
        ],
    );
    assert_eq!(contexts[0].font_color, Rgb::new(0, 128, 128));
    assert_eq!(contexts[1].font_color, Rgb::new(0, 0, 128));
    assert_eq!(contexts[1].true_foreground, Color::transparent());
}

#[test]
fn test_color_initial_uses_configured_foreground() {
    let resolver = StyleResolver::new(Rgb::WHITE, Rgb::new(10, 10, 10));
    let contexts = resolve_chain(
        &resolver,
        &[("div", "color: white"), ("h1", "color: initial")],
    );
    assert_eq!(contexts[1].font_color, Rgb::new(10, 10, 10));
}

#[test]
fn test_color_inherit_with_opaque_parent() {
    let resolver = resolver();
    let contexts = resolve_chain(&resolver, &[("a", ""), ("span", "color: inherit")]);
    assert_eq!(contexts[1].font_color, Rgb::BLUE);
}

#[test]
fn test_translucent_color_stays_in_its_subtree() {
    let resolver = resolver();
    let root = StyleContext::default();
    let first = resolver.resolve("p", Some("color: rgba(0, 0, 0, .5)"), &root);
    assert_eq!(first.context.font_color, Rgb::new(128, 128, 128));
    let child = resolver.resolve("span", None, &first.context);
    assert_eq!(child.context.font_color, Rgb::new(128, 128, 128));

    let sibling = resolver.resolve("p", None, &root);
    assert_eq!(sibling.context.font_color, Rgb::BLACK);
    assert_eq!(sibling.context.true_foreground, Color::Hex(Rgb::BLACK));
}

#[test]
fn test_translucent_background_stays_in_its_subtree() {
    let resolver = resolver();
    let root = StyleContext::default();
    let first = resolver.resolve("div", Some("background-color: rgba(0, 0, 0, .9)"), &root);
    assert!(first.context.true_background.is_pending());

    let sibling = resolver.resolve("div", Some("background-color: inherit"), &root);
    assert_eq!(sibling.context.background_color, Rgb::WHITE);
    assert!(!sibling.context.true_background.is_pending());
}

#[test]
fn test_font_size_and_weight_declarations() {
    let resolver = resolver();
    let contexts = resolve_chain(
        &resolver,
        &[("div", "font-size: 2em"), ("p", "font-size: 19px; font-weight: 800")],
    );
    assert!((contexts[0].font_size_pt - 24.0).abs() < f64::EPSILON);
    assert!((contexts[1].font_size_pt - 14.25).abs() < f64::EPSILON);
    assert!(contexts[1].font_is_bold);
}

#[test]
fn test_invalid_colors_are_reported_and_ignored() {
    let resolver = resolver();
    let root = StyleContext::default();
    let resolution = resolver.resolve("p", Some("background-color: reddd; color:reddd"), &root);
    let kinds: Vec<_> = resolution
        .issues
        .iter()
        .map(|issue| (issue.kind, issue.property.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (IssueKind::InvalidColor, "background-color"),
            (IssueKind::InvalidColor, "color"),
        ]
    );
    assert_eq!(resolution.context, root);
    assert_eq!(resolution.issues[1].value, "reddd");
    assert_eq!(IssueKind::InvalidColor.to_string(), "invalid color");
}

#[test]
fn test_invalid_size_keeps_parent_size() {
    let resolver = resolver();
    let parent = StyleContext {
        font_size_pt: 16.0,
        ..StyleContext::default()
    };
    let resolution = resolver.resolve("span", Some("font-size: 12ppp"), &parent);
    assert_eq!(resolution.issues.len(), 1);
    assert_eq!(resolution.issues[0].kind, IssueKind::InvalidSize);
    assert!((resolution.context.font_size_pt - 16.0).abs() < f64::EPSILON);
}

#[test]
fn test_invalid_weight_is_reported() {
    let resolver = resolver();
    let resolution = resolver.resolve("p", Some("font-weight: 1100"), &StyleContext::default());
    assert_eq!(resolution.issues.len(), 1);
    assert_eq!(resolution.issues[0].kind, IssueKind::InvalidWeight);
    assert_eq!(resolution.issues[0].property, "font-weight");
    assert!(!resolution.context.font_is_bold);
}

#[test]
fn test_unsupported_properties_are_collected() {
    let resolver = resolver();
    let style = Some("opacity: 0.5; margin: 0; font: 12px serif; opacity: 1");
    let resolution = resolver.resolve("p", style, &StyleContext::default());
    assert!(resolution.issues.is_empty());
    assert_eq!(resolution.unsupported, ["opacity", "font"]);
    assert_eq!(resolution.context, StyleContext::default());
}

#[test]
fn test_inline_style_keeps_supported_properties_only() {
    let style = InlineStyle::parse("margin: 0; Opacity: .5; color: red; background: blue");
    assert_eq!(style.get("margin"), None);
    assert_eq!(style.get("opacity"), None);
    assert_eq!(style.get("color"), Some("red"));
    assert_eq!(style.unsupported(), ["opacity", "background"]);
    assert!(
        style
            .declarations()
            .iter()
            .all(|d| SUPPORTED_PROPERTIES.contains(&d.property.as_str()))
    );
}

#[test]
fn test_resolution_is_deterministic() {
    let first = resolver();
    let parent = resolve_chain(&first, &[("div", "color: rgba(0, 0, 75, .5)")]).remove(0);
    let second = first.clone();
    let style = Some("background-color: hsla(120, 50%, 50%, .3); font-size: 120%");
    assert_eq!(
        first.resolve("span", style, &parent),
        second.resolve("span", style, &parent)
    );
}
