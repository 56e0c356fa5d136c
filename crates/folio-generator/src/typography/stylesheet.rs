//! Ordered CSS rule sets with deep-merge semantics.
//!
//! Rules keep insertion order so the cascade of the generated CSS matches the
//! order in which themes contribute them. Merging a selector that already
//! exists updates it in place instead of appending a duplicate.

use std::fmt::Write as _;

use super::length::Length;

/// Ordered CSS declarations for a single selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations(Vec<(String, String)>);

impl Declarations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Declarations::set`].
    #[must_use]
    pub fn with(mut self, property: &str, value: impl ToString) -> Self {
        self.set(property, value);
        self
    }

    /// Set a property, replacing an existing value in its original position.
    ///
    /// Property names may be camelCase (`boxShadow`); they are stored in
    /// CSS form (`box-shadow`).
    pub fn set(&mut self, property: &str, value: impl ToString) {
        let property = css_property_name(property);
        let value = value.to_string();
        match self.0.iter_mut().find(|(name, _)| *name == property) {
            Some(entry) => entry.1 = value,
            None => self.0.push((property, value)),
        }
    }

    /// Merge another set of declarations, later values winning.
    pub fn extend(&mut self, other: Declarations) {
        for (property, value) in other.0 {
            self.set(&property, value);
        }
    }

    /// Look up a property value.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        let property = css_property_name(property);
        self.0
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(property, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body of a rule: plain declarations, or nested rules for at-rules.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleBody {
    Declarations(Declarations),
    Nested(Stylesheet),
}

/// Ordered mapping from selector or at-rule to its body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    rules: Vec<(String, RuleBody)>,
}

impl Stylesheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a declaration block.
    #[must_use]
    pub fn rule(mut self, selector: &str, declarations: Declarations) -> Self {
        self.insert(selector, RuleBody::Declarations(declarations));
        self
    }

    /// Builder: add an at-rule with nested rules.
    #[must_use]
    pub fn nest(mut self, at_rule: &str, inner: Stylesheet) -> Self {
        self.insert(at_rule, RuleBody::Nested(inner));
        self
    }

    /// Insert a rule, merging into an existing rule with the same key.
    ///
    /// When the existing body has a different shape it is replaced.
    pub fn insert(&mut self, selector: &str, body: RuleBody) {
        let Some(index) = self.rules.iter().position(|(key, _)| key == selector) else {
            self.rules.push((selector.to_string(), body));
            return;
        };

        let existing = &mut self.rules[index].1;
        match (existing, body) {
            (RuleBody::Declarations(current), RuleBody::Declarations(incoming)) => {
                current.extend(incoming);
            }
            (RuleBody::Nested(current), RuleBody::Nested(incoming)) => {
                current.merge(incoming);
            }
            (existing, body) => *existing = body,
        }
    }

    /// Deep-merge another stylesheet into this one.
    pub fn merge(&mut self, other: Stylesheet) {
        for (selector, body) in other.rules {
            self.insert(&selector, body);
        }
    }

    /// Get a rule body by selector.
    #[must_use]
    pub fn get(&self, selector: &str) -> Option<&RuleBody> {
        self.rules
            .iter()
            .find(|(key, _)| key == selector)
            .map(|(_, body)| body)
    }

    /// Declarations for a selector, if it is a plain rule.
    #[must_use]
    pub fn declarations(&self, selector: &str) -> Option<&Declarations> {
        match self.get(selector)? {
            RuleBody::Declarations(declarations) => Some(declarations),
            RuleBody::Nested(_) => None,
        }
    }

    /// Nested rules for an at-rule.
    #[must_use]
    pub fn nested(&self, at_rule: &str) -> Option<&Stylesheet> {
        match self.get(at_rule)? {
            RuleBody::Nested(inner) => Some(inner),
            RuleBody::Declarations(_) => None,
        }
    }

    /// Selectors in order.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Serialize to CSS text. Empty declaration blocks are skipped.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        self.write_css(&mut out, 0);
        out
    }

    fn write_css(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        for (selector, body) in &self.rules {
            match body {
                RuleBody::Declarations(declarations) => {
                    if declarations.is_empty() {
                        continue;
                    }
                    let _ = writeln!(out, "{indent}{selector} {{");
                    for (property, value) in declarations.iter() {
                        let _ = writeln!(out, "{indent}  {property}: {value};");
                    }
                    let _ = writeln!(out, "{indent}}}");
                }
                RuleBody::Nested(inner) => {
                    if inner.is_empty() {
                        continue;
                    }
                    let _ = writeln!(out, "{indent}{selector} {{");
                    inner.write_css(out, depth + 1);
                    let _ = writeln!(out, "{indent}}}");
                }
            }
        }
    }
}

/// Font size and line height pair returned by the modular scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontScale {
    pub font_size: Length,
    pub line_height: Length,
}

impl From<FontScale> for Declarations {
    fn from(scale: FontScale) -> Self {
        Declarations::new()
            .with("font-size", scale.font_size)
            .with("line-height", scale.line_height)
    }
}

/// Convert a camelCase property name to CSS form.
///
/// Custom properties and names that are already kebab-case pass through.
/// A leading capital marks a vendor prefix (`MozFoo` → `-moz-foo`).
pub fn css_property_name(name: &str) -> String {
    if name.starts_with("--") || !name.chars().any(|c| c.is_ascii_uppercase()) {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_property_name() {
        assert_eq!(css_property_name("boxShadow"), "box-shadow");
        assert_eq!(css_property_name("box-shadow"), "box-shadow");
        assert_eq!(css_property_name("--bg-code"), "--bg-code");
        assert_eq!(
            css_property_name("MozFontFeatureSettings"),
            "-moz-font-feature-settings"
        );
    }

    #[test]
    fn test_declarations_set_replaces_in_place() {
        let mut decls = Declarations::new().with("color", "red").with("margin", "0");
        decls.set("color", "blue");

        let pairs: Vec<_> = decls.iter().collect();
        assert_eq!(pairs, vec![("color", "blue"), ("margin", "0")]);
    }

    #[test]
    fn test_merge_combines_same_selector() {
        let mut base = Stylesheet::new()
            .rule("a", Declarations::new().with("color", "#007acc"))
            .rule("p", Declarations::new().with("margin", "0"));
        base.merge(Stylesheet::new().rule(
            "a",
            Declarations::new()
                .with("color", "red")
                .with("boxShadow", "none"),
        ));

        assert_eq!(base.len(), 2);
        let a = base.declarations("a").unwrap();
        assert_eq!(a.get("color"), Some("red"));
        assert_eq!(a.get("box-shadow"), Some("none"));
        assert_eq!(base.selectors().collect::<Vec<_>>(), vec!["a", "p"]);
    }

    #[test]
    fn test_merge_nested_at_rules() {
        let query = "@media (prefers-color-scheme: dark)";
        let mut base = Stylesheet::new().nest(
            query,
            Stylesheet::new().rule("body", Declarations::new().with("color", "white")),
        );
        base.merge(Stylesheet::new().nest(
            query,
            Stylesheet::new().rule(":root", Declarations::new().with("--text-code", "#d0d0ff")),
        ));

        let inner = base.nested(query).unwrap();
        assert_eq!(inner.len(), 2);
        assert!(inner.declarations("body").is_some());
        assert!(inner.declarations(":root").is_some());
    }

    #[test]
    fn test_to_css() {
        let sheet = Stylesheet::new()
            .rule("html", Declarations::new().with("color-scheme", "light dark"))
            .rule("empty", Declarations::new())
            .nest(
                "@media (max-width: 42rem)",
                Stylesheet::new().rule("ul,ol", Declarations::new().with("margin-left", "1rem")),
            );

        assert_eq!(
            sheet.to_css(),
            "html {\n  color-scheme: light dark;\n}\n\
             @media (max-width: 42rem) {\n  ul,ol {\n    margin-left: 1rem;\n  }\n}\n"
        );
    }

    #[test]
    fn test_font_scale_into_declarations() {
        let decls: Declarations = FontScale {
            font_size: Length::rem(1.0),
            line_height: Length::rem(1.75),
        }
        .into();
        assert_eq!(decls.get("font-size"), Some("1rem"));
        assert_eq!(decls.get("line-height"), Some("1.75rem"));
    }
}
