//! Canvas interaction state machine
//!
//! Translates pointer events into annotation create/resize operations
//! against the store. Three states: idle, waiting for text input after a
//! click with the text tool, and dragging a provisional shape.
//!
//! Coordinates handed to the controller must already be relative to the
//! canvas element's bounding box at interaction time; callers re-derive
//! them from the canvas rect on every event rather than caching.

use crate::annotation::{Annotation, AnnotationKind, Color};
use crate::history::AnnotationStore;

/// The drawing tool currently selected in the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Text,
    Rectangle,
    Circle,
    Line,
}

impl Tool {
    pub fn kind(self) -> AnnotationKind {
        match self {
            Tool::Text => AnnotationKind::Text,
            Tool::Rectangle => AnnotationKind::Rectangle,
            Tool::Circle => AnnotationKind::Circle,
            Tool::Line => AnnotationKind::Line,
        }
    }

    pub const ALL: [Tool; 4] = [Tool::Text, Tool::Rectangle, Tool::Circle, Tool::Line];
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Text
    }
}

/// Tool, color, and font-size selection
///
/// Plain settings, not states: they may change at any time and affect only
/// annotations created after the change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSettings {
    pub tool: Tool,
    pub color: Color,
    pub font_size: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            color: Color::BLUE,
            font_size: 12.0,
        }
    }
}

/// Interaction state
#[derive(Debug, Clone, PartialEq)]
enum InteractionState {
    Idle,
    /// A click with the text tool landed at `anchor`; the UI is showing an
    /// inline editor and will confirm or cancel.
    PlacingText { anchor: (f32, f32), page: u16 },
    /// A shape is being dragged out; committed on pointer-up.
    Dragging { provisional: Annotation },
}

/// Pointer-event driven controller for the annotation overlay
#[derive(Debug, Clone)]
pub struct CanvasController {
    state: InteractionState,
}

impl CanvasController {
    pub fn new() -> Self {
        Self {
            state: InteractionState::Idle,
        }
    }

    /// Whether the UI should be showing the inline text editor
    pub fn awaiting_text(&self) -> Option<(f32, f32)> {
        match &self.state {
            InteractionState::PlacingText { anchor, .. } => Some(*anchor),
            _ => None,
        }
    }

    /// The shape currently being dragged, if any
    pub fn provisional(&self) -> Option<&Annotation> {
        match &self.state {
            InteractionState::Dragging { provisional } => Some(provisional),
            _ => None,
        }
    }

    /// Pointer-down on the canvas at a position relative to its origin
    ///
    /// With the text tool this enters the text-placement state; the caller
    /// follows up with `confirm_text` or `cancel_text`. With a shape tool
    /// it anchors a provisional annotation with zero extent.
    pub fn pointer_down(&mut self, pos: (f32, f32), settings: &ToolSettings, page: u16) {
        if self.state != InteractionState::Idle {
            return;
        }
        match settings.tool {
            Tool::Text => {
                self.state = InteractionState::PlacingText { anchor: pos, page };
            }
            shape_tool => {
                let provisional =
                    Annotation::shape(shape_tool.kind(), pos, settings.color, page);
                self.state = InteractionState::Dragging { provisional };
            }
        }
    }

    /// Pointer-move while dragging: extent becomes (current − anchor)
    ///
    /// Always expressed relative to the original down-position, never
    /// normalized, so components go negative when dragging up/left.
    /// Ignored outside the dragging state.
    pub fn pointer_move(&mut self, pos: (f32, f32)) {
        if let InteractionState::Dragging { provisional } = &mut self.state {
            let (ax, ay) = provisional.position();
            provisional.set_extent((pos.0 - ax, pos.1 - ay));
        }
    }

    /// Pointer-up: commit the provisional shape and return to idle
    ///
    /// Appends to the live list via a fresh snapshot. A pointer-up with no
    /// drag in progress is a no-op.
    pub fn pointer_up(&mut self, store: &mut AnnotationStore) {
        if let InteractionState::Dragging { provisional } =
            std::mem::replace(&mut self.state, InteractionState::Idle)
        {
            let mut list = store.annotations().to_vec();
            list.push(provisional);
            store.commit(list);
        }
    }

    /// Confirm the pending text input
    ///
    /// Non-empty input commits a text annotation at the recorded anchor
    /// with the current color and font size; empty input behaves like
    /// cancel. Either way the controller returns to idle.
    pub fn confirm_text(
        &mut self,
        content: &str,
        settings: &ToolSettings,
        store: &mut AnnotationStore,
    ) {
        if let InteractionState::PlacingText { anchor, page } =
            std::mem::replace(&mut self.state, InteractionState::Idle)
        {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                return;
            }
            let annotation =
                Annotation::text(anchor, trimmed, settings.color, settings.font_size, page);
            let mut list = store.annotations().to_vec();
            list.push(annotation);
            store.commit(list);
        }
    }

    /// Abandon the pending text input without committing
    pub fn cancel_text(&mut self) {
        if matches!(self.state, InteractionState::PlacingText { .. }) {
            self.state = InteractionState::Idle;
        }
    }

    /// Drop any in-progress interaction (document switch, edit-mode exit)
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// The annotations to draw for a page: the committed list in insertion
    /// order, plus the provisional (if on this page) appended last so it
    /// paints on top.
    pub fn visible<'a>(&'a self, store: &'a AnnotationStore, page: u16) -> Vec<&'a Annotation> {
        let mut out: Vec<&Annotation> = store.for_page(page).collect();
        if let Some(provisional) = self.provisional() {
            if provisional.page_number() == page {
                out.push(provisional);
            }
        }
        out
    }
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationKind;

    fn shape_settings(tool: Tool) -> ToolSettings {
        ToolSettings {
            tool,
            color: Color::RED,
            font_size: 12.0,
        }
    }

    #[test]
    fn drag_preserves_negative_extent_components() {
        let mut controller = CanvasController::new();
        let mut store = AnnotationStore::new();

        controller.pointer_down((10.0, 10.0), &shape_settings(Tool::Rectangle), 1);
        controller.pointer_move((5.0, 30.0));
        controller.pointer_up(&mut store);

        let committed = &store.annotations()[0];
        assert_eq!(committed.position(), (10.0, 10.0));
        assert_eq!(committed.extent(), Some((-5.0, 20.0)));
    }

    #[test]
    fn drag_commits_once_on_pointer_up() {
        let mut controller = CanvasController::new();
        let mut store = AnnotationStore::new();

        controller.pointer_down((0.0, 0.0), &shape_settings(Tool::Circle), 3);
        controller.pointer_move((40.0, 25.0));
        assert!(store.annotations().is_empty());

        controller.pointer_up(&mut store);
        assert_eq!(store.annotations().len(), 1);
        assert_eq!(store.annotations()[0].kind(), AnnotationKind::Circle);
        assert_eq!(store.annotations()[0].page_number(), 3);
        assert!(controller.provisional().is_none());

        // Releasing again without a new drag changes nothing
        controller.pointer_up(&mut store);
        assert_eq!(store.annotations().len(), 1);
        assert!(!store.can_redo());
    }

    #[test]
    fn text_click_waits_for_input() {
        let mut controller = CanvasController::new();
        let settings = shape_settings(Tool::Text);

        controller.pointer_down((7.0, 9.0), &settings, 1);
        assert_eq!(controller.awaiting_text(), Some((7.0, 9.0)));
        assert!(controller.provisional().is_none());
    }

    #[test]
    fn confirm_text_commits_at_anchor_with_current_style() {
        let mut controller = CanvasController::new();
        let mut store = AnnotationStore::new();
        let settings = ToolSettings {
            tool: Tool::Text,
            color: Color::VIOLET,
            font_size: 18.0,
        };

        controller.pointer_down((7.0, 9.0), &settings, 2);
        controller.confirm_text("hello", &settings, &mut store);

        let a = &store.annotations()[0];
        assert_eq!(a.position(), (7.0, 9.0));
        assert_eq!(a.text_content(), Some("hello"));
        assert_eq!(a.color(), Color::VIOLET);
        assert_eq!(a.font_size(), Some(18.0));
        assert_eq!(a.page_number(), 2);
        assert!(controller.awaiting_text().is_none());
    }

    #[test]
    fn empty_or_cancelled_text_commits_nothing() {
        let mut controller = CanvasController::new();
        let mut store = AnnotationStore::new();
        let settings = shape_settings(Tool::Text);

        controller.pointer_down((1.0, 1.0), &settings, 1);
        controller.confirm_text("   ", &settings, &mut store);
        assert!(store.annotations().is_empty());

        controller.pointer_down((1.0, 1.0), &settings, 1);
        controller.cancel_text();
        assert!(store.annotations().is_empty());
        assert!(controller.awaiting_text().is_none());
    }

    #[test]
    fn pointer_down_ignored_while_placing_text() {
        let mut controller = CanvasController::new();
        let settings = shape_settings(Tool::Text);

        controller.pointer_down((1.0, 1.0), &settings, 1);
        controller.pointer_down((9.0, 9.0), &shape_settings(Tool::Line), 1);
        // Still waiting on the first interaction
        assert_eq!(controller.awaiting_text(), Some((1.0, 1.0)));
    }

    #[test]
    fn visible_appends_provisional_last_on_matching_page() {
        let mut controller = CanvasController::new();
        let mut store = AnnotationStore::new();

        controller.pointer_down((0.0, 0.0), &shape_settings(Tool::Line), 1);
        controller.pointer_up(&mut store);

        controller.pointer_down((5.0, 5.0), &shape_settings(Tool::Rectangle), 1);
        controller.pointer_move((10.0, 10.0));

        let visible = controller.visible(&store, 1);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[1].kind(), AnnotationKind::Rectangle);

        // Provisional is on page 1, so page 2 sees nothing
        assert!(controller.visible(&store, 2).is_empty());
    }

    #[test]
    fn settings_changes_only_affect_future_annotations() {
        let mut controller = CanvasController::new();
        let mut store = AnnotationStore::new();

        let red = shape_settings(Tool::Rectangle);
        controller.pointer_down((0.0, 0.0), &red, 1);
        controller.pointer_up(&mut store);

        let mut lime = red;
        lime.color = Color::LIME;
        controller.pointer_down((1.0, 1.0), &lime, 1);
        controller.pointer_up(&mut store);

        assert_eq!(store.annotations()[0].color(), Color::RED);
        assert_eq!(store.annotations()[1].color(), Color::LIME);
    }
}
