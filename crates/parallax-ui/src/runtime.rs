use std::collections::HashMap;

use parallax_engine::coords::Viewport;
use parallax_engine::input::{InputEvent, InputFrame, KeyState, PointerMoveEvent};
use parallax_engine::render::{RenderCtx, RenderTarget};
use parallax_engine::time::FrameTime;
use parallax_mkml::DslDocument;

use crate::component::{Component, MountCtx};
use crate::event::{Listeners, PageEvent};
use crate::registry::ComponentMap;
use crate::scroll::PageScroll;

struct Mounted {
    name: String,
    component: Box<dyn Component>,
    listeners: Listeners,
}

/// The mounted page: component instances bound to scoped nodes, plus the
/// page scroll they share.
pub struct PageRuntime {
    mounted: Vec<Mounted>,
    loaded: Vec<String>,
    scroll: PageScroll,
    viewport: Viewport,
}

impl PageRuntime {
    /// Instantiates every component whose name a node's `scope` property
    /// gives, in document order, and runs its `on_mounted` hook.
    ///
    /// Call once, after [`crate::registry::ComponentRegistry::resolve`].
    pub fn mount(doc: &DslDocument, components: ComponentMap, viewport: Viewport) -> Self {
        let mut mounted = Vec::new();
        let mut ordinals: HashMap<&str, usize> = HashMap::new();

        doc.root.walk(&mut |node| {
            let Some(name) = node.prop_str("scope") else { return };
            let Some(factory) = components.get(name) else {
                log::warn!("{} is scoped to {name}, which is not loaded; skipped", node.widget);
                return;
            };

            let ordinal = ordinals.entry(name).or_default();
            let mut component = factory(node);
            let mut ctx = MountCtx::new(node, viewport, 0.0, *ordinal);
            component.on_mounted(&mut ctx);
            *ordinal += 1;

            mounted.push(Mounted { name: name.to_string(), component, listeners: ctx.listeners });
        });

        let mut scroll = PageScroll::new(viewport.height);
        scroll.set_sections(mounted.iter().map(|m| m.component.sections()).sum());

        log::info!(
            "mounted {} component(s), {} section(s)",
            mounted.len(),
            scroll.sections(),
        );

        Self { mounted, loaded: components.names(), scroll, viewport }
    }

    /// Names of the loaded components this runtime was mounted with.
    pub fn loaded_names(&self) -> &[String] {
        &self.loaded
    }

    /// Names of the mounted instances, in document order.
    pub fn mounted_names(&self) -> Vec<&str> {
        self.mounted.iter().map(|m| m.name.as_str()).collect()
    }

    /// Total event listeners registered across all instances.
    pub fn listener_count(&self) -> usize {
        self.mounted.iter().map(|m| m.listeners.count()).sum()
    }

    pub fn wants_frames(&self) -> bool {
        self.mounted.iter().any(|m| m.listeners.frames)
    }

    pub fn scroll(&self) -> &PageScroll {
        &self.scroll
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Delivers `event` to every instance that listens for its kind.
    pub fn dispatch(&mut self, event: &PageEvent) {
        let kind = event.kind();
        for m in self.mounted.iter_mut().filter(|m| m.listeners.wants(kind)) {
            m.component.on_event(event);
        }
    }

    /// Translates one frame of raw input into page events.
    ///
    /// Pointer moves are forwarded as they arrive. Wheel and navigation keys
    /// are folded into the page scroll, and at most one `Scroll` event is
    /// emitted per frame, after all of them.
    pub fn feed_input(&mut self, input: &InputFrame) {
        let mut scrolled = false;

        for ev in &input.events {
            match ev {
                InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                    self.dispatch(&PageEvent::PointerMove { x: *x, y: *y });
                }
                InputEvent::Key { key, state: KeyState::Pressed, .. } => {
                    scrolled |= self.scroll.apply_key(*key);
                }
                _ => {}
            }
        }

        scrolled |= self.scroll.apply_wheel(input.scroll_delta.1);

        if scrolled {
            let offset = self.scroll.offset();
            self.dispatch(&PageEvent::Scroll { offset });
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        let reclamped = self.scroll.set_viewport_height(viewport.height);
        self.dispatch(&PageEvent::Resize { viewport });
        if reclamped {
            let offset = self.scroll.offset();
            self.dispatch(&PageEvent::Scroll { offset });
        }
    }

    pub fn frame(&mut self, time: FrameTime) {
        for m in self.mounted.iter_mut().filter(|m| m.listeners.frames) {
            m.component.on_frame(time);
        }
    }

    pub fn render(&mut self, rctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        for m in self.mounted.iter_mut().filter(|m| m.listeners.frames) {
            m.component.render(rctx, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Instant;

    use parallax_engine::input::{Key, Modifiers};
    use parallax_mkml::{parse_str, Selector};

    use super::*;
    use crate::component::ComponentFactory;
    use crate::components::{default_registry, page_section};
    use crate::event::PageEventKind;
    use crate::registry::ComponentRegistry;
    use crate::scene::SceneConfig;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records mounts and events; listens to everything.
    struct Spy {
        name: &'static str,
        log: Log,
    }

    impl Component for Spy {
        fn on_mounted(&mut self, ctx: &mut MountCtx<'_>) {
            self.log.borrow_mut().push(format!("mount:{}", self.name));
            ctx.listen(PageEventKind::PointerMove);
            ctx.listen(PageEventKind::Scroll);
            ctx.request_frames();
        }

        fn on_event(&mut self, event: &PageEvent) {
            self.log.borrow_mut().push(format!("{}:{event:?}", self.name));
        }

        fn on_frame(&mut self, _time: FrameTime) {
            self.log.borrow_mut().push(format!("frame:{}", self.name));
        }
    }

    fn spy_loader(log: &Log, name: &'static str) -> impl FnOnce() -> anyhow::Result<ComponentFactory> + use<> {
        let log = log.clone();
        move || {
            log.borrow_mut().push(format!("load:{name}"));
            let inner = log.clone();
            Ok(Rc::new(move |_: &parallax_mkml::Node| {
                Box::new(Spy { name, log: inner.clone() }) as Box<dyn Component>
            }) as ComponentFactory)
        }
    }

    const PAGE: &str = r#"
        Page {
            Section "Intro" { data-a: true  scope: A }
            Section "Work"  { data-a: true  scope: A }
            Backdrop { data-b: true  scope: B }
        }
    "#;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn every_load_precedes_every_mount() {
        let log = Log::default();
        let doc = parse_str(PAGE).unwrap();
        let map = ComponentRegistry::new()
            .register(Selector::attribute("data-a"), spy_loader(&log, "A"), "A")
            .register(Selector::attribute("data-b"), spy_loader(&log, "B"), "B")
            .register(Selector::attribute("data-c"), spy_loader(&log, "C"), "C")
            .resolve(&doc)
            .unwrap();
        let rt = PageRuntime::mount(&doc, map, viewport());

        assert_eq!(*log.borrow(), ["load:A", "load:B", "mount:A", "mount:A", "mount:B"]);
        assert_eq!(rt.loaded_names(), ["A", "B"]);
        assert_eq!(rt.mounted_names(), ["A", "A", "B"]);
    }

    #[test]
    fn unknown_scope_is_skipped() {
        let log = Log::default();
        let doc = parse_str(PAGE).unwrap();
        let map = ComponentRegistry::new()
            .register(Selector::attribute("data-b"), spy_loader(&log, "B"), "B")
            .resolve(&doc)
            .unwrap();
        let rt = PageRuntime::mount(&doc, map, viewport());
        assert_eq!(rt.mounted_names(), ["B"]);
    }

    #[test]
    fn canvas_without_ref_registers_nothing() {
        let doc = parse_str(
            r#"Page {
                Backdrop { data-webgl-canvas: true  scope: WebglCanvas }
            }"#,
        )
        .unwrap();
        let map = default_registry(SceneConfig::default()).resolve(&doc).unwrap();
        let rt = PageRuntime::mount(&doc, map, viewport());
        assert_eq!(rt.mounted_names(), ["WebglCanvas"]);
        assert_eq!(rt.listener_count(), 0);
        assert!(!rt.wants_frames());
    }

    #[test]
    fn sections_size_the_scroll_range() {
        let doc = parse_str(
            r#"Page {
                Section { data-page-section: true  scope: PageSection }
                Section { data-page-section: true  scope: PageSection }
                Section { data-page-section: true  scope: PageSection }
            }"#,
        )
        .unwrap();
        let map = ComponentRegistry::new()
            .register(Selector::attribute("data-page-section"), || Ok(page_section::factory()), "PageSection")
            .resolve(&doc)
            .unwrap();
        let rt = PageRuntime::mount(&doc, map, viewport());
        assert_eq!(rt.scroll().sections(), 3);
        assert_eq!(rt.scroll().max_offset(), 1200.0);
    }

    #[test]
    fn input_becomes_page_events() {
        let log = Log::default();
        let doc = parse_str(PAGE).unwrap();
        let map = ComponentRegistry::new()
            .register(Selector::attribute("data-b"), spy_loader(&log, "B"), "B")
            .resolve(&doc)
            .unwrap();
        let mut rt = PageRuntime::mount(&doc, map, viewport());
        log.borrow_mut().clear();

        let mut input = InputFrame::default();
        input.push_event(InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 20.0 }));
        input.push_event(InputEvent::Key {
            key: Key::PageDown,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        });
        input.scroll_delta = (0.0, -40.0);
        rt.feed_input(&input);

        assert_eq!(
            *log.borrow(),
            [
                "B:PointerMove { x: 10.0, y: 20.0 }".to_string(),
                "B:Scroll { offset: 640.0 }".to_string(),
            ]
        );
        assert_eq!(rt.scroll().offset(), 640.0);
    }

    #[test]
    fn frames_reach_only_subscribers() {
        let log = Log::default();
        let doc = parse_str(PAGE).unwrap();
        let map = ComponentRegistry::new()
            .register(Selector::attribute("data-a"), || Ok(page_section::factory()), "A")
            .register(Selector::attribute("data-b"), spy_loader(&log, "B"), "B")
            .resolve(&doc)
            .unwrap();
        let mut rt = PageRuntime::mount(&doc, map, viewport());
        log.borrow_mut().clear();

        rt.frame(FrameTime { dt: 0.016, elapsed: 0.016, now: Instant::now(), frame_index: 1 });
        assert_eq!(*log.borrow(), ["frame:B"]);
    }

    #[test]
    fn resize_is_forwarded_once() {
        let doc = parse_str(
            r#"Page { Section { data-page-section: true  scope: PageSection } }"#,
        )
        .unwrap();
        let map = default_registry(SceneConfig::default()).resolve(&doc).unwrap();
        let mut rt = PageRuntime::mount(&doc, map, viewport());
        rt.resize(Viewport::new(400.0, 300.0));
        rt.resize(Viewport::new(400.0, 300.0));
        assert_eq!(rt.viewport(), Viewport::new(400.0, 300.0));
    }
}
