use parallax_engine::input::{Key, WHEEL_LINE_HEIGHT};

/// Vertical scroll position of the page, in logical pixels from the top.
///
/// The page is `sections` viewport-heights tall, so the furthest offset is
/// `(sections - 1) * viewport_height`. With no sections the page is only
/// bounded at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageScroll {
    offset: f32,
    sections: usize,
    viewport_height: f32,
}

impl PageScroll {
    pub fn new(viewport_height: f32) -> Self {
        Self { offset: 0.0, sections: 0, viewport_height: viewport_height.max(0.0) }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn sections(&self) -> usize {
        self.sections
    }

    pub fn max_offset(&self) -> f32 {
        if self.sections == 0 {
            f32::INFINITY
        } else {
            (self.sections - 1) as f32 * self.viewport_height
        }
    }

    pub fn set_sections(&mut self, sections: usize) -> bool {
        self.sections = sections;
        self.clamp()
    }

    pub fn set_viewport_height(&mut self, height: f32) -> bool {
        self.viewport_height = height.max(0.0);
        self.clamp()
    }

    /// Moves to `offset` (clamped). Returns `true` when the offset changed.
    pub fn scroll_to(&mut self, offset: f32) -> bool {
        if !offset.is_finite() && offset != f32::INFINITY {
            return false;
        }
        let prev = self.offset;
        self.offset = offset.clamp(0.0, self.max_offset());
        if !self.offset.is_finite() {
            // `End` on an unbounded page.
            self.offset = prev;
        }
        self.offset != prev
    }

    pub fn scroll_by(&mut self, delta: f32) -> bool {
        self.scroll_to(self.offset + delta)
    }

    /// Applies a wheel delta where positive `dy` moves towards the top.
    pub fn apply_wheel(&mut self, dy: f32) -> bool {
        if dy == 0.0 {
            return false;
        }
        self.scroll_by(-dy)
    }

    /// Page navigation keys. Returns `true` when the offset changed.
    pub fn apply_key(&mut self, key: Key) -> bool {
        let page = self.viewport_height;
        match key {
            Key::PageDown | Key::Space => self.scroll_by(page),
            Key::PageUp => self.scroll_by(-page),
            Key::ArrowDown => self.scroll_by(WHEEL_LINE_HEIGHT),
            Key::ArrowUp => self.scroll_by(-WHEEL_LINE_HEIGHT),
            Key::Home => self.scroll_to(0.0),
            Key::End => self.scroll_to(f32::INFINITY),
            _ => false,
        }
    }

    fn clamp(&mut self) -> bool {
        let prev = self.offset;
        self.offset = self.offset.clamp(0.0, self.max_offset());
        self.offset != prev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_bound_the_page() {
        let mut s = PageScroll::new(600.0);
        s.set_sections(3);
        assert!(s.scroll_to(5000.0));
        assert_eq!(s.offset(), 1200.0);
        assert!(!s.scroll_by(10.0));
    }

    #[test]
    fn wheel_up_moves_towards_top() {
        let mut s = PageScroll::new(600.0);
        s.set_sections(3);
        s.apply_wheel(-120.0);
        assert_eq!(s.offset(), 120.0);
        s.apply_wheel(40.0);
        assert_eq!(s.offset(), 80.0);
        s.apply_wheel(1000.0);
        assert_eq!(s.offset(), 0.0);
    }

    #[test]
    fn keys_page_and_jump() {
        let mut s = PageScroll::new(600.0);
        s.set_sections(3);
        s.apply_key(Key::PageDown);
        assert_eq!(s.offset(), 600.0);
        s.apply_key(Key::End);
        assert_eq!(s.offset(), 1200.0);
        s.apply_key(Key::ArrowUp);
        assert_eq!(s.offset(), 1200.0 - WHEEL_LINE_HEIGHT);
        s.apply_key(Key::Home);
        assert_eq!(s.offset(), 0.0);
        assert!(!s.apply_key(Key::Escape));
    }

    #[test]
    fn unbounded_without_sections() {
        let mut s = PageScroll::new(600.0);
        s.scroll_by(10_000.0);
        assert_eq!(s.offset(), 10_000.0);
        assert!(!s.apply_key(Key::End));
        assert_eq!(s.offset(), 10_000.0);
    }

    #[test]
    fn shrinking_viewport_reclamps() {
        let mut s = PageScroll::new(600.0);
        s.set_sections(2);
        s.scroll_to(600.0);
        assert!(s.set_viewport_height(400.0));
        assert_eq!(s.offset(), 400.0);
    }
}
