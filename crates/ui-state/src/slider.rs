//! Carousel navigation for the home page sliders.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderState {
    index: usize,
    len: usize,
    visible: usize,
}

impl SliderState {
    /// A slider over `len` slides showing `visible` of them at once.
    pub fn new(len: usize, visible: usize) -> Self {
        Self {
            index: 0,
            len,
            visible: visible.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct start positions.
    fn positions(&self) -> usize {
        self.len.saturating_sub(self.visible) + 1
    }

    /// Advances one slide, wrapping to the start after the last position.
    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.positions();
    }

    /// Goes back one slide, wrapping to the last position from the start.
    pub fn prev(&mut self) {
        if self.len == 0 {
            return;
        }
        let positions = self.positions();
        self.index = (self.index + positions - 1) % positions;
    }

    /// Jumps to `index`, clamped to the last start position.
    pub fn go_to(&mut self, index: usize) {
        self.index = index.min(self.positions() - 1);
    }

    /// Updates the slide count, e.g. after a fetch, keeping the index valid.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.index = self.index.min(self.positions() - 1);
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Changes how many slides fit on screen, e.g. after a breakpoint change.
    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible.max(1);
        self.index = self.index.min(self.positions() - 1);
    }

    /// Indices of the slides currently on screen.
    pub fn window(&self) -> std::ops::Range<usize> {
        self.index..(self.index + self.visible).min(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_visible_keeps_window_in_range() {
        let mut slider = SliderState::new(6, 1);
        slider.go_to(5);
        slider.set_visible(4);
        assert_eq!(slider.index(), 2);
        assert_eq!(slider.window(), 2..6);
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let mut slider = SliderState::new(5, 3);
        slider.next();
        slider.next();
        assert_eq!(slider.index(), 2);
        slider.next();
        assert_eq!(slider.index(), 0);
        slider.prev();
        assert_eq!(slider.index(), 2);
        assert_eq!(slider.window(), 2..5);
    }

    #[test]
    fn test_empty_slider_stays_put() {
        let mut slider = SliderState::new(0, 4);
        slider.next();
        slider.prev();
        assert_eq!(slider.index(), 0);
        assert_eq!(slider.window(), 0..0);
    }

    #[test]
    fn test_shrinking_clamps_index() {
        let mut slider = SliderState::new(10, 2);
        slider.go_to(8);
        assert_eq!(slider.index(), 8);
        slider.set_len(4);
        assert_eq!(slider.index(), 2);
        slider.go_to(100);
        assert_eq!(slider.index(), 2);
    }
}
