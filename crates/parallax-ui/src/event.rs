use parallax_engine::coords::Viewport;

/// Page-level events delivered to mounted components.
///
/// These are the native counterparts of the window listeners a page script
/// would attach: pointer motion, document scroll and viewport resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// Pointer moved to `(x, y)` in logical pixels, origin top-left.
    PointerMove { x: f32, y: f32 },
    /// Page scroll offset changed. `offset` is in logical pixels from the top.
    Scroll { offset: f32 },
    /// The window was resized.
    Resize { viewport: Viewport },
}

impl PageEvent {
    pub fn kind(&self) -> PageEventKind {
        match self {
            PageEvent::PointerMove { .. } => PageEventKind::PointerMove,
            PageEvent::Scroll { .. } => PageEventKind::Scroll,
            PageEvent::Resize { .. } => PageEventKind::Resize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEventKind {
    PointerMove,
    Scroll,
    Resize,
}

/// What a mounted component subscribed to in `on_mounted`.
///
/// Components that never subscribe are never called again after mounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Listeners {
    pub pointer_move: bool,
    pub scroll: bool,
    pub resize: bool,
    /// Per-frame `on_frame` + `render` callbacks.
    pub frames: bool,
}

impl Listeners {
    pub fn listen(&mut self, kind: PageEventKind) {
        match kind {
            PageEventKind::PointerMove => self.pointer_move = true,
            PageEventKind::Scroll => self.scroll = true,
            PageEventKind::Resize => self.resize = true,
        }
    }

    pub fn wants(&self, kind: PageEventKind) -> bool {
        match kind {
            PageEventKind::PointerMove => self.pointer_move,
            PageEventKind::Scroll => self.scroll,
            PageEventKind::Resize => self.resize,
        }
    }

    /// Number of event listeners, frame requests excluded.
    pub fn count(&self) -> usize {
        [self.pointer_move, self.scroll, self.resize].iter().filter(|b| **b).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0 && !self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listen_and_count() {
        let mut l = Listeners::default();
        assert!(l.is_empty());
        l.listen(PageEventKind::Scroll);
        l.listen(PageEventKind::Scroll);
        assert_eq!(l.count(), 1);
        assert!(l.wants(PageEvent::Scroll { offset: 0.0 }.kind()));
        assert!(!l.wants(PageEventKind::PointerMove));
    }

    #[test]
    fn frames_alone_is_not_empty() {
        let l = Listeners { frames: true, ..Listeners::default() };
        assert_eq!(l.count(), 0);
        assert!(!l.is_empty());
    }
}
