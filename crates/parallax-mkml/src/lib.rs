//! Lexer, parser, AST and selectors for **Parallax page markup** (`.mkml`).
//!
//! The page markup plays the role of the document: components are discovered
//! by querying it for marker attributes, and bound to nodes through a `scope`
//! property.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `DslDocument`, `Node`, `Prop`, `Value`, `Import` |
//! | [`error`] | `ParseError` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `parse_str` entry point |
//! | [`selector`] | `Selector` (`Name`, `[attr]`, `[attr=value]`) |
//!
//! # Quick start
//!
//! ```rust
//! use parallax_mkml::{parse_str, Selector};
//!
//! let src = r#"
//!     Page {
//!         Backdrop {
//!             data-webgl-canvas: true
//!             scope: WebglCanvas
//!             Canvas { ref: canvas }
//!         }
//!     }
//! "#;
//!
//! let doc = parse_str(src).unwrap();
//! let marker = Selector::parse("[data-webgl-canvas]").unwrap();
//! assert_eq!(doc.query_all(&marker).len(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod selector;

pub use ast::{DslDocument, Node, Value};
pub use error::ParseError;
pub use parser::parse_str;
pub use selector::Selector;

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok(src: &str) -> DslDocument { parse_str(src).unwrap() }
    fn err(src: &str) -> ParseError { parse_str(src).unwrap_err() }

    #[test] fn empty_element() { ok("Page { }"); }
    #[test] fn bare_element() { ok("Page"); }
    #[test] fn block_comment() { ok("/* header */ Page { /* body */ title: \"x\" /* tail */ }"); }
    #[test] fn line_comment() { ok("// top\nPage {\n    // inside\n    gap: 8\n}"); }
    #[test] fn color_8digit() { ok("Page { bg: #aabbccdd }"); }
    #[test] fn string_escape() { ok(r#"Section "say \"hi\"" { }"#); }
    #[test] fn import_as() { ok(r#"import "footer.mkml" as Footer  Page { }"#); }

    #[test]
    fn marker_attributes_and_scope() {
        let doc = ok(r#"
            Page {
                Section "Intro" { data-page-section: true  scope: PageSection }
                Backdrop { data-webgl-canvas: true  scope: WebglCanvas  Canvas { ref: canvas } }
            }
        "#);
        let section = &doc.root.children[0];
        assert!(section.has_prop("data-page-section"));
        assert_eq!(section.prop_bool("data-page-section"), Some(true));
        assert_eq!(section.prop_str("scope"), Some("PageSection"));
        assert_eq!(section.content.as_deref(), Some("Intro"));

        let backdrop = &doc.root.children[1];
        assert_eq!(backdrop.children[0].prop_str("ref"), Some("canvas"));
    }

    #[test]
    fn props_and_children_interleave() {
        let doc = ok("Page { a: 1  Child { }  b: 2  Other }");
        assert_eq!(doc.root.props.len(), 2);
        assert_eq!(doc.root.children.len(), 2);
        assert_eq!(doc.root.prop_f32("b"), Some(2.0));
    }

    #[test] fn err_bad_color() { err("Page { bg: #xyz }"); }
    #[test] fn err_unclosed_string() { err(r#"Section "oops { }"#); }
    #[test] fn err_double_colon() { err("Page { gap: : 8 }"); }
    #[test] fn err_unclosed_block() { err("Page { a: 1"); }

    #[test]
    fn err_trailing_root() {
        let e = err("Page { }\nPage { }");
        assert_eq!(e.line, 2);
    }
}
