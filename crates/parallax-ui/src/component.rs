use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use parallax_engine::coords::Viewport;
use parallax_engine::render::{RenderCtx, RenderTarget};
use parallax_engine::time::FrameTime;
use parallax_mkml::Node;

use crate::event::{Listeners, PageEvent, PageEventKind};

// ── Component trait ───────────────────────────────────────────────────────

/// Behaviour bound to a page node through its `scope` property.
///
/// Every hook except `on_mounted` only fires if the component subscribed to
/// it through the [`MountCtx`].
///
/// ```rust,ignore
/// struct Counter { seen: usize }
///
/// impl Component for Counter {
///     fn on_mounted(&mut self, ctx: &mut MountCtx<'_>) {
///         ctx.listen(PageEventKind::Scroll);
///     }
///     fn on_event(&mut self, _event: &PageEvent) {
///         self.seen += 1;
///     }
/// }
/// ```
pub trait Component: 'static {
    /// Called once, right after the component is instantiated on its node.
    fn on_mounted(&mut self, ctx: &mut MountCtx<'_>) {
        let _ = ctx;
    }

    fn on_event(&mut self, event: &PageEvent) {
        let _ = event;
    }

    /// Advance per-frame state. Called before [`Component::render`].
    fn on_frame(&mut self, time: FrameTime) {
        let _ = time;
    }

    fn render(&mut self, rctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let _ = (rctx, target);
    }

    /// Viewport-heights of scrollable page this component contributes.
    fn sections(&self) -> usize {
        0
    }
}

/// Builds a fresh component for a scoped node.
///
/// Cloned into the [`crate::registry::ComponentMap`]; called once per node.
pub type ComponentFactory = Rc<dyn Fn(&Node) -> Box<dyn Component>>;

// ── Refs ──────────────────────────────────────────────────────────────────

/// A resolved `ref: <name>` descendant that designates the render canvas.
///
/// Natively there is a single window surface; the ref only records which
/// element asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasRef {
    pub name: String,
    pub element: String,
}

impl fmt::Display for CanvasRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ref {})", self.element, self.name)
    }
}

/// Collects `ref` descendants of `node`, stopping at nested scopes.
pub(crate) fn collect_refs(node: &Node) -> HashMap<&str, &Node> {
    fn visit<'a>(node: &'a Node, out: &mut HashMap<&'a str, &'a Node>) {
        for child in &node.children {
            if let Some(name) = child.prop_str("ref") {
                out.entry(name).or_insert(child);
            }
            if !child.has_prop("scope") {
                visit(child, out);
            }
        }
    }

    let mut out = HashMap::new();
    visit(node, &mut out);
    out
}

// ── MountCtx ──────────────────────────────────────────────────────────────

/// Context handed to [`Component::on_mounted`].
pub struct MountCtx<'a> {
    node: &'a Node,
    refs: HashMap<&'a str, &'a Node>,
    viewport: Viewport,
    scroll_offset: f32,
    ordinal: usize,
    pub(crate) listeners: Listeners,
}

impl<'a> MountCtx<'a> {
    pub(crate) fn new(node: &'a Node, viewport: Viewport, scroll_offset: f32, ordinal: usize) -> Self {
        Self {
            node,
            refs: collect_refs(node),
            viewport,
            scroll_offset,
            ordinal,
            listeners: Listeners::default(),
        }
    }

    /// The node carrying the `scope` property.
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn element_ref(&self, name: &str) -> Option<&'a Node> {
        self.refs.get(name).copied()
    }

    pub fn canvas_ref(&self, name: &str) -> Option<CanvasRef> {
        self.element_ref(name).map(|node| CanvasRef {
            name: name.to_string(),
            element: node.widget.clone(),
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// How many components of the same kind were mounted before this one.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn listen(&mut self, kind: PageEventKind) {
        self.listeners.listen(kind);
    }

    /// Ask for `on_frame` + `render` on every redraw.
    pub fn request_frames(&mut self) {
        self.listeners.frames = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_mkml::parse_str;

    #[test]
    fn refs_stop_at_nested_scopes() {
        let doc = parse_str(
            r#"
            Backdrop {
                scope: WebglCanvas
                Frame { Canvas { ref: canvas } }
                Inner { scope: Other  Canvas { ref: hidden } }
            }
        "#,
        )
        .unwrap();
        let refs = collect_refs(&doc.root);
        assert!(refs.contains_key("canvas"));
        assert!(!refs.contains_key("hidden"));
    }

    #[test]
    fn canvas_ref_resolves_element_name() {
        let doc = parse_str("Backdrop { scope: WebglCanvas  Canvas { ref: canvas } }").unwrap();
        let ctx = MountCtx::new(&doc.root, Viewport::new(800.0, 600.0), 0.0, 0);
        let canvas = ctx.canvas_ref("canvas").unwrap();
        assert_eq!(canvas.element, "Canvas");
        assert!(ctx.canvas_ref("missing").is_none());
    }
}
