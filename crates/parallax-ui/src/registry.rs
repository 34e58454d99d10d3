//! Conditional component loading.
//!
//! A [`ComponentRegistry`] is a fixed table of `(selector, loader, name)`
//! entries. [`ComponentRegistry::resolve`] scans a page once: entries whose
//! selector matches nothing are skipped without running their loader, the
//! rest are loaded in declaration order and collected into a
//! [`ComponentMap`] for [`crate::runtime::PageRuntime::mount`].

use std::collections::HashMap;
use std::fmt;

use parallax_mkml::{DslDocument, ParseError, Selector};

use crate::component::ComponentFactory;

/// Produces the factory for one component kind. Runs at most once.
pub type Loader = Box<dyn FnOnce() -> anyhow::Result<ComponentFactory>>;

struct ComponentDescriptor {
    selector: Selector,
    loader: Loader,
    name: String,
}

/// Declarative table of loadable components.
///
/// ```rust,ignore
/// let registry = ComponentRegistry::new()
///     .register(Selector::attribute("data-page-section"), || Ok(page_section::factory()), "PageSection")
///     .register(Selector::attribute("data-webgl-canvas"), || Ok(webgl_canvas::factory(cfg)), "WebglCanvas");
///
/// let components = registry.resolve(&doc)?;
/// let runtime = PageRuntime::mount(&doc, components, viewport);
/// ```
#[derive(Default)]
pub struct ComponentRegistry {
    entries: Vec<ComponentDescriptor>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(mut self, selector: Selector, loader: F, name: impl Into<String>) -> Self
    where
        F: FnOnce() -> anyhow::Result<ComponentFactory> + 'static,
    {
        self.entries.push(ComponentDescriptor {
            selector,
            loader: Box::new(loader),
            name: name.into(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs the loaders whose selector matches at least one node of `doc`.
    ///
    /// Loaders run sequentially in registration order. The first failure
    /// aborts resolution; nothing should be mounted in that case.
    pub fn resolve(self, doc: &DslDocument) -> Result<ComponentMap, MountError> {
        let mut map = ComponentMap::default();

        for ComponentDescriptor { selector, loader, name } in self.entries {
            let hits = doc.query_all(&selector).len();
            if hits == 0 {
                log::debug!("no {selector} in page; {name} not loaded");
                continue;
            }

            log::debug!("loading {name} for {hits} node(s) matching {selector}");
            let factory = loader().map_err(|source| MountError::Load { name: name.clone(), source })?;
            if map.factories.insert(name.clone(), factory).is_some() {
                log::warn!("component {name} registered twice; the later loader wins");
            }
        }

        log::info!("resolved components: [{}]", map.names().join(", "));
        Ok(map)
    }
}

/// Loaded component factories, keyed by component name.
#[derive(Default, Clone)]
pub struct ComponentMap {
    factories: HashMap<String, ComponentFactory>,
}

impl ComponentMap {
    pub fn get(&self, name: &str) -> Option<&ComponentFactory> {
        self.factories.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ComponentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

// ── MountError ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum MountError {
    /// The page markup did not parse.
    Parse(ParseError),
    /// A component loader failed.
    Load { name: String, source: anyhow::Error },
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::Parse(e) => write!(f, "page markup: {e}"),
            MountError::Load { name, source } => write!(f, "failed to load component {name}: {source}"),
        }
    }
}

impl std::error::Error for MountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MountError::Parse(e) => Some(e),
            MountError::Load { source, .. } => Some(&**source),
        }
    }
}

impl From<ParseError> for MountError {
    fn from(e: ParseError) -> Self {
        MountError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use parallax_mkml::parse_str;

    use super::*;
    use crate::component::Component;

    struct Nop;
    impl Component for Nop {}

    fn nop_factory() -> ComponentFactory {
        Rc::new(|_| Box::new(Nop))
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn spy_loader(log: &Log, name: &'static str) -> impl FnOnce() -> anyhow::Result<ComponentFactory> + use<> {
        let log = log.clone();
        move || {
            log.borrow_mut().push(name.to_string());
            Ok(nop_factory())
        }
    }

    fn registry(log: &Log) -> ComponentRegistry {
        ComponentRegistry::new()
            .register(Selector::attribute("data-page-section"), spy_loader(log, "PageSection"), "PageSection")
            .register(Selector::attribute("data-webgl-canvas"), spy_loader(log, "WebglCanvas"), "WebglCanvas")
    }

    #[test]
    fn unmatched_selector_never_loads() {
        let log = Log::default();
        let doc = parse_str(r#"Page { Section { data-page-section: true } }"#).unwrap();
        let map = registry(&log).resolve(&doc).unwrap();
        assert_eq!(*log.borrow(), ["PageSection"]);
        assert!(!map.contains("WebglCanvas"));
    }

    #[test]
    fn many_matches_load_once() {
        let log = Log::default();
        let doc = parse_str(
            r#"Page {
                Section { data-page-section: true }
                Section { data-page-section: true }
                Section { data-page-section: true }
            }"#,
        )
        .unwrap();
        let map = registry(&log).resolve(&doc).unwrap();
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(map.names(), ["PageSection"]);
    }

    #[test]
    fn loaders_run_in_declaration_order() {
        let log = Log::default();
        let doc = parse_str(
            r#"Page {
                Backdrop { data-webgl-canvas: true }
                Section { data-page-section: true }
            }"#,
        )
        .unwrap();
        let map = registry(&log).resolve(&doc).unwrap();
        assert_eq!(*log.borrow(), ["PageSection", "WebglCanvas"]);
        assert_eq!(map.names(), ["PageSection", "WebglCanvas"]);
    }

    #[test]
    fn empty_page_yields_empty_map() {
        let log = Log::default();
        let doc = parse_str("Page { }").unwrap();
        let map = registry(&log).resolve(&doc).unwrap();
        assert!(map.is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn failing_loader_stops_resolution() {
        let log = Log::default();
        let doc = parse_str(
            r#"Page {
                Section { data-page-section: true }
                Backdrop { data-webgl-canvas: true }
            }"#,
        )
        .unwrap();
        let err = ComponentRegistry::new()
            .register(
                Selector::attribute("data-page-section"),
                || Err(anyhow::anyhow!("boom")),
                "PageSection",
            )
            .register(Selector::attribute("data-webgl-canvas"), spy_loader(&log, "WebglCanvas"), "WebglCanvas")
            .resolve(&doc)
            .unwrap_err();

        match &err {
            MountError::Load { name, .. } => assert_eq!(name, "PageSection"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.to_string().contains("boom"));
        assert!(log.borrow().is_empty());
    }
}
