use std::rc::Rc;

use parallax_mkml::Node;

use crate::component::{Component, ComponentFactory, MountCtx};
use crate::event::{PageEvent, PageEventKind};
use crate::scene::section_for;

/// One viewport-height block of the page.
///
/// Sections are numbered in mount order; the page runtime sizes the scroll
/// range from how many are mounted.
pub struct PageSection {
    title: Option<String>,
    index: usize,
    viewport_height: f32,
    current: bool,
}

pub fn factory() -> ComponentFactory {
    Rc::new(|node: &Node| Box::new(PageSection::new(node.content.clone())))
}

impl PageSection {
    pub fn new(title: Option<String>) -> Self {
        Self { title, index: 0, viewport_height: 0.0, current: false }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_current(&self) -> bool {
        self.current
    }

    fn label(&self) -> &str {
        self.title.as_deref().unwrap_or("untitled")
    }

    fn update_current(&mut self, offset: f32) {
        let Some(section) = section_for(offset, self.viewport_height) else { return };
        let now = section == self.index;
        if now && !self.current {
            log::info!("section {} ({}) is now current", self.index, self.label());
        }
        self.current = now;
    }
}

impl Component for PageSection {
    fn on_mounted(&mut self, ctx: &mut MountCtx<'_>) {
        self.index = ctx.ordinal();
        self.viewport_height = ctx.viewport().height;
        self.current = section_for(ctx.scroll_offset(), self.viewport_height) == Some(self.index);
        ctx.listen(PageEventKind::Scroll);
        ctx.listen(PageEventKind::Resize);
        log::debug!("mounted section {} ({})", self.index, self.label());
    }

    fn on_event(&mut self, event: &PageEvent) {
        match *event {
            PageEvent::Scroll { offset } => self.update_current(offset),
            PageEvent::Resize { viewport } => self.viewport_height = viewport.height,
            PageEvent::PointerMove { .. } => {}
        }
    }

    fn sections(&self) -> usize {
        1
    }
}
