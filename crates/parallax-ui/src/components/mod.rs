//! Built-in page components and the registry that loads them.
//!
//! | Marker attribute       | Component      |
//! |------------------------|----------------|
//! | `data-page-section`    | `PageSection`  |
//! | `data-webgl-canvas`    | `WebglCanvas`  |

pub mod page_section;
pub mod webgl_canvas;

use parallax_mkml::Selector;

use crate::registry::ComponentRegistry;
use crate::scene::SceneConfig;

pub const PAGE_SECTION_MARKER: &str = "data-page-section";
pub const WEBGL_CANVAS_MARKER: &str = "data-webgl-canvas";

/// The registry used by [`crate::Application`] unless one is supplied.
pub fn default_registry(scene: SceneConfig) -> ComponentRegistry {
    ComponentRegistry::new()
        .register(
            Selector::attribute(PAGE_SECTION_MARKER),
            || Ok(page_section::factory()),
            "PageSection",
        )
        .register(
            Selector::attribute(WEBGL_CANVAS_MARKER),
            move || Ok(webgl_canvas::factory(scene)),
            "WebglCanvas",
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_mkml::parse_str;

    #[test]
    fn default_registry_loads_only_what_the_page_uses() {
        let doc = parse_str(r#"Page { Section "One" { data-page-section: true  scope: PageSection } }"#)
            .unwrap();
        let map = default_registry(SceneConfig::default()).resolve(&doc).unwrap();
        assert_eq!(map.names(), ["PageSection"]);
    }
}
