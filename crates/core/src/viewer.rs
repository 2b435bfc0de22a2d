//! Viewer state: page, zoom, rotation
//!
//! Plain numeric state driving the external page renderer, independent of
//! the annotation subsystem. Changing the current page never touches
//! annotations on other pages; the store filters per page.

/// Zoom bounds and step for the toolbar buttons
pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 3.0;
pub const SCALE_STEP: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    scale: f32,
    /// One of 0, 90, 180, 270
    rotation: u16,
    /// 1-based, clamped to [1, total_pages]
    current_page: u16,
    total_pages: u16,
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            rotation: 0,
            current_page: 1,
            total_pages: 0,
        }
    }

    /// Adopt a freshly loaded document
    ///
    /// `total_pages` comes from the render crate once the document parses.
    /// Resets page, zoom, and rotation.
    pub fn load_document(&mut self, total_pages: u16) {
        self.total_pages = total_pages;
        self.current_page = 1;
        self.scale = 1.0;
        self.rotation = 0;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    pub fn current_page(&self) -> u16 {
        self.current_page
    }

    pub fn total_pages(&self) -> u16 {
        self.total_pages
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale + SCALE_STEP).min(MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale - SCALE_STEP).max(MIN_SCALE);
    }

    /// Advance rotation by 90 degrees, wrapping at 360
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 90) % 360;
    }

    /// Jump to a page, clamped to the document bounds
    pub fn set_page(&mut self, page: u16) {
        if self.total_pages == 0 {
            self.current_page = 1;
            return;
        }
        self.current_page = page.clamp(1, self.total_pages);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_steps_and_clamps() {
        let mut state = ViewerState::new();
        state.load_document(3);

        state.zoom_in();
        assert!((state.scale() - 1.2).abs() < 1e-6);

        for _ in 0..20 {
            state.zoom_in();
        }
        assert_eq!(state.scale(), MAX_SCALE);

        for _ in 0..30 {
            state.zoom_out();
        }
        assert_eq!(state.scale(), MIN_SCALE);
    }

    #[test]
    fn rotation_cycles_through_quarter_turns() {
        let mut state = ViewerState::new();
        let mut seen = Vec::new();
        for _ in 0..5 {
            state.rotate();
            seen.push(state.rotation());
        }
        assert_eq!(seen, vec![90, 180, 270, 0, 90]);
    }

    #[test]
    fn page_navigation_clamps_to_document() {
        let mut state = ViewerState::new();
        state.load_document(4);

        state.set_page(99);
        assert_eq!(state.current_page(), 4);
        assert!(!state.has_next());

        state.set_page(0);
        assert_eq!(state.current_page(), 1);
        assert!(!state.has_previous());

        state.next_page();
        assert_eq!(state.current_page(), 2);
        state.previous_page();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn load_document_resets_view() {
        let mut state = ViewerState::new();
        state.load_document(9);
        state.set_page(5);
        state.zoom_in();
        state.rotate();

        state.load_document(2);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.scale(), 1.0);
        assert_eq!(state.rotation(), 0);
        assert_eq!(state.total_pages(), 2);
    }

    #[test]
    fn empty_document_pins_to_page_one() {
        let mut state = ViewerState::new();
        state.set_page(7);
        assert_eq!(state.current_page(), 1);
    }
}
