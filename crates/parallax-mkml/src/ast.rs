use crate::selector::Selector;

// ── Value ─────────────────────────────────────────────────────────────────

/// A literal value in a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted string: `"hello"`
    Str(String),
    /// Floating-point literal: `16.0` or `16`
    Number(f32),
    /// `true` / `false`
    Bool(bool),
    /// Color literal: straight-alpha RGBA bytes from `#rrggbb` / `#rrggbbaa`.
    Color([u8; 4]),
    /// Unquoted identifier: component names, ref names, enum variants
    Ident(String),
}

impl Value {
    /// Text form used by `[attr=value]` selectors.
    pub fn as_text(&self) -> String {
        match self {
            Value::Str(s) | Value::Ident(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Color([r, g, b, a]) => format!("#{r:02x}{g:02x}{b:02x}{a:02x}"),
        }
    }
}

// ── Prop ──────────────────────────────────────────────────────────────────

/// A single `key: value` property inside a node block.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub key: String,
    pub value: Value,
}

// ── Node ──────────────────────────────────────────────────────────────────

/// An element of the page tree.
///
/// ```mkml
/// Section "Portfolio" {
///     data-page-section: true
///     scope: PageSection
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Element name or component alias: `"Page"`, `"Section"`, `"Canvas"`.
    pub widget: String,
    /// Optional inline string content.
    pub content: Option<String>,
    pub props: Vec<Prop>,
    pub children: Vec<Node>,
}

impl Node {
    /// Look up a property value by key.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.iter().find(|p| p.key == key).map(|p| &p.value)
    }

    /// `true` when the node carries `key`, whatever its value.
    pub fn has_prop(&self, key: &str) -> bool {
        self.props.iter().any(|p| p.key == key)
    }

    pub fn prop_f32(&self, key: &str) -> Option<f32> {
        match self.prop(key)? {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a property as `&str` if it is a `Str` or `Ident`.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        match self.prop(key)? {
            Value::Str(s) | Value::Ident(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn prop_bool(&self, key: &str) -> Option<bool> {
        match self.prop(key)? {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn prop_color(&self, key: &str) -> Option<[u8; 4]> {
        match self.prop(key)? {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Pre-order walk over this node and every descendant.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

// ── Import ────────────────────────────────────────────────────────────────

/// `import "path/to/file.mkml" as Alias`
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub path: String,
    pub alias: String,
}

// ── DslDocument ───────────────────────────────────────────────────────────

/// The top-level parse result for a `.mkml` source file.
#[derive(Debug, Clone, PartialEq)]
pub struct DslDocument {
    pub imports: Vec<Import>,
    pub root: Node,
}

impl DslDocument {
    /// All nodes matching `selector`, depth-first in document order.
    pub fn query_all(&self, selector: &Selector) -> Vec<&Node> {
        let mut out = Vec::new();
        self.root.walk(&mut |node| {
            if selector.matches(node) {
                out.push(node);
            }
        });
        out
    }

    /// First node matching `selector`, if any.
    pub fn query(&self, selector: &Selector) -> Option<&Node> {
        self.query_all(selector).into_iter().next()
    }
}
