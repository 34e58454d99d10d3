//! Element selectors for querying a parsed page.
//!
//! Supported grammar (a deliberately small subset of CSS):
//!
//! | Form              | Matches                                             |
//! |-------------------|-----------------------------------------------------|
//! | `Name`            | nodes whose element name is `Name`                  |
//! | `[attr]`          | nodes carrying property `attr`, whatever its value  |
//! | `[attr=value]`    | nodes whose `attr` renders as `value` (quotes optional) |
//! | `Name[attr]`      | both of the above                                   |
//!
//! Several bracket groups may follow each other: `Canvas[a][b=c]`.

use std::fmt;
use std::str::FromStr;

use crate::ast::Node;
use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrTest {
    key: String,
    value: Option<String>,
}

/// A parsed element selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    element: Option<String>,
    attrs: Vec<AttrTest>,
}

impl Selector {
    /// Parses a selector string.
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        let s = src.trim();
        if s.is_empty() {
            return Err(ParseError::new("empty selector", 1, 1));
        }

        let name_end = s.find('[').unwrap_or(s.len());
        let name = &s[..name_end];
        if !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            return Err(ParseError::new(format!("invalid element name {:?}", name), 1, 1));
        }
        let element = (!name.is_empty()).then(|| name.to_string());

        let mut attrs = Vec::new();
        let mut rest = &s[name_end..];
        while !rest.is_empty() {
            let col = s.len() - rest.len() + 1;
            let Some(inner) = rest.strip_prefix('[') else {
                return Err(ParseError::new(format!("expected '[' in selector {:?}", s), 1, col));
            };
            let Some(close) = inner.find(']') else {
                return Err(ParseError::new(format!("unclosed '[' in selector {:?}", s), 1, col));
            };
            attrs.push(parse_attr(&inner[..close], col)?);
            rest = &inner[close + 1..];
        }

        if element.is_none() && attrs.is_empty() {
            return Err(ParseError::new("selector matches nothing", 1, 1));
        }

        Ok(Self { element, attrs })
    }

    /// Shorthand for an attribute-presence selector: `[key]`.
    pub fn attribute(key: impl Into<String>) -> Self {
        Self { element: None, attrs: vec![AttrTest { key: key.into(), value: None }] }
    }

    pub fn matches(&self, node: &Node) -> bool {
        if let Some(element) = &self.element {
            if node.widget != *element {
                return false;
            }
        }
        self.attrs.iter().all(|test| match (&test.value, node.prop(&test.key)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => actual.as_text() == *expected,
        })
    }
}

fn parse_attr(body: &str, col: usize) -> Result<AttrTest, ParseError> {
    let (key, value) = match body.split_once('=') {
        Some((k, v)) => {
            let v = v.trim();
            let v = v
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(v);
            (k.trim(), Some(v.to_string()))
        }
        None => (body.trim(), None),
    };
    if key.is_empty() {
        return Err(ParseError::new("empty attribute name in selector", 1, col));
    }
    Ok(AttrTest { key: key.to_string(), value })
}

impl FromStr for Selector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(element) = &self.element {
            f.write_str(element)?;
        }
        for attr in &self.attrs {
            match &attr.value {
                Some(v) => write!(f, "[{}={}]", attr.key, v)?,
                None => write!(f, "[{}]", attr.key)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_str;

    const PAGE: &str = r#"
        Page {
            Section "Intro" { data-page-section: true  scope: PageSection }
            Section "Work"  { data-page-section: true  scope: PageSection }
            Backdrop {
                data-webgl-canvas: true
                scope: WebglCanvas
                Canvas { ref: canvas }
            }
        }
    "#;

    #[test]
    fn attribute_selector_finds_all_in_order() {
        let doc = parse_str(PAGE).unwrap();
        let hits = doc.query_all(&Selector::parse("[data-page-section]").unwrap());
        let titles: Vec<_> = hits.iter().map(|n| n.content.as_deref().unwrap()).collect();
        assert_eq!(titles, ["Intro", "Work"]);
    }

    #[test]
    fn missing_attribute_matches_nothing() {
        let doc = parse_str(PAGE).unwrap();
        assert!(doc.query_all(&Selector::attribute("data-video")).is_empty());
    }

    #[test]
    fn element_and_value_tests() {
        let doc = parse_str(PAGE).unwrap();
        let sel: Selector = "Canvas[ref=canvas]".parse().unwrap();
        assert_eq!(doc.query_all(&sel).len(), 1);
        let sel: Selector = "Section[scope=\"WebglCanvas\"]".parse().unwrap();
        assert!(doc.query(&sel).is_none());
    }

    #[test]
    fn display_round_trips_shape() {
        let sel = Selector::parse("Canvas[ref=canvas][data-x]").unwrap();
        assert_eq!(sel.to_string(), "Canvas[ref=canvas][data-x]");
    }

    #[test]
    fn rejects_malformed() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("[unclosed").is_err());
        assert!(Selector::parse("[]").is_err());
        assert!(Selector::parse("Canvas x").is_err());
    }
}
