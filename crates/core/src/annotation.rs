//! Annotation data model
//!
//! A single user-drawn mark overlaid on one PDF page. Coordinates are
//! page-local pixels at the zoom scale that was active when the mark was
//! drawn; the overlay and the page surface scale together.

/// Unique identifier for an annotation
///
/// Assigned at creation time, never reused. Generated using UUID v4.
pub type AnnotationId = uuid::Uuid;

/// The four drawing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Text,
    Rectangle,
    Circle,
    Line,
}

impl AnnotationKind {
    /// Whether this kind is drawn by dragging out an extent
    pub fn is_shape(self) -> bool {
        !matches!(self, AnnotationKind::Text)
    }

    pub fn label(self) -> &'static str {
        match self {
            AnnotationKind::Text => "Text",
            AnnotationKind::Rectangle => "Rectangle",
            AnnotationKind::Circle => "Circle",
            AnnotationKind::Line => "Line",
        }
    }
}

/// Opaque RGB color drawn from a fixed palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse a `#RRGGBB` string; returns None for anything else
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

/// The eight palette entries offered by the toolbar
impl Color {
    pub const BLUE: Color = Color::rgb(0x3B, 0x82, 0xF6);
    pub const RED: Color = Color::rgb(0xEF, 0x44, 0x44);
    pub const GREEN: Color = Color::rgb(0x10, 0xB9, 0x81);
    pub const AMBER: Color = Color::rgb(0xF5, 0x9E, 0x0B);
    pub const VIOLET: Color = Color::rgb(0x8B, 0x5C, 0xF6);
    pub const PINK: Color = Color::rgb(0xEC, 0x48, 0x99);
    pub const CYAN: Color = Color::rgb(0x06, 0xB6, 0xD4);
    pub const LIME: Color = Color::rgb(0x84, 0xCC, 0x16);

    pub const PALETTE: [Color; 8] = [
        Color::BLUE,
        Color::RED,
        Color::GREEN,
        Color::AMBER,
        Color::VIOLET,
        Color::PINK,
        Color::CYAN,
        Color::LIME,
    ];
}

/// Font size bounds for text annotations (inclusive)
pub const MIN_FONT_SIZE: f32 = 8.0;
pub const MAX_FONT_SIZE: f32 = 24.0;

/// A single user-drawn mark on one page
///
/// `kind` determines which optional fields are populated: `text` and
/// `font_size` exist only for text annotations, `extent` only for the
/// dragged shapes. The constructors enforce this; fields are immutable
/// once committed except via undo/redo replacing the whole list.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Annotation {
    id: AnnotationId,
    kind: AnnotationKind,
    /// Anchor point in page-local pixels
    position: (f32, f32),
    /// Signed deltas from `position`; negative components mean the shape
    /// was dragged up/left. Never normalized.
    extent: Option<(f32, f32)>,
    text: Option<String>,
    color: Color,
    font_size: Option<f32>,
    /// 1-based page this annotation belongs to
    page_number: u16,
}

impl Annotation {
    /// Create a text annotation at a click position
    ///
    /// `font_size` is clamped to the 8–24 range the toolbar offers.
    pub fn text(
        position: (f32, f32),
        content: impl Into<String>,
        color: Color,
        font_size: f32,
        page_number: u16,
    ) -> Self {
        Self {
            id: AnnotationId::new_v4(),
            kind: AnnotationKind::Text,
            position,
            extent: None,
            text: Some(content.into()),
            color,
            font_size: Some(font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)),
            page_number,
        }
    }

    /// Create a shape annotation anchored at the pointer-down position
    ///
    /// Starts with zero extent; the canvas controller grows it while the
    /// pointer drags.
    pub fn shape(kind: AnnotationKind, position: (f32, f32), color: Color, page_number: u16) -> Self {
        debug_assert!(kind.is_shape());
        Self {
            id: AnnotationId::new_v4(),
            kind,
            position,
            extent: Some((0.0, 0.0)),
            text: None,
            color,
            font_size: None,
            page_number,
        }
    }

    pub fn id(&self) -> AnnotationId {
        self.id
    }

    pub fn kind(&self) -> AnnotationKind {
        self.kind
    }

    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    pub fn extent(&self) -> Option<(f32, f32)> {
        self.extent
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    pub fn page_number(&self) -> u16 {
        self.page_number
    }

    /// Replace the extent, keeping it expressed relative to the original
    /// anchor. Only meaningful while a shape is provisional.
    pub(crate) fn set_extent(&mut self, extent: (f32, f32)) {
        if self.kind.is_shape() {
            self.extent = Some(extent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_annotation_populates_text_fields_only() {
        let a = Annotation::text((12.0, 30.0), "note", Color::RED, 14.0, 2);
        assert_eq!(a.kind(), AnnotationKind::Text);
        assert_eq!(a.text_content(), Some("note"));
        assert_eq!(a.font_size(), Some(14.0));
        assert_eq!(a.extent(), None);
        assert_eq!(a.page_number(), 2);
    }

    #[test]
    fn shape_annotation_starts_with_zero_extent_and_no_text() {
        let a = Annotation::shape(AnnotationKind::Circle, (5.0, 5.0), Color::BLUE, 1);
        assert_eq!(a.extent(), Some((0.0, 0.0)));
        assert_eq!(a.text_content(), None);
        assert_eq!(a.font_size(), None);
    }

    #[test]
    fn font_size_is_clamped_to_toolbar_range() {
        let small = Annotation::text((0.0, 0.0), "a", Color::BLUE, 2.0, 1);
        let large = Annotation::text((0.0, 0.0), "b", Color::BLUE, 99.0, 1);
        assert_eq!(small.font_size(), Some(MIN_FONT_SIZE));
        assert_eq!(large.font_size(), Some(MAX_FONT_SIZE));
    }

    #[test]
    fn ids_are_unique_per_creation() {
        let a = Annotation::shape(AnnotationKind::Line, (0.0, 0.0), Color::BLUE, 1);
        let b = Annotation::shape(AnnotationKind::Line, (0.0, 0.0), Color::BLUE, 1);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn color_hex_round_trip() {
        for color in Color::PALETTE {
            assert_eq!(Color::from_hex(&color.to_hex()), Some(color));
        }
        assert_eq!(Color::from_hex("#3B82F6"), Some(Color::BLUE));
        assert_eq!(Color::from_hex("3B82F6"), None);
        assert_eq!(Color::from_hex("#XYZ123"), None);
        assert_eq!(Color::from_hex("#FFF"), None);
    }

    #[test]
    fn annotation_survives_json_round_trip() {
        let mut a = Annotation::shape(AnnotationKind::Rectangle, (10.0, 20.0), Color::PINK, 3);
        a.set_extent((-5.0, 12.5));

        let json = serde_json::to_string(&a).expect("serialize should succeed");
        let back: Annotation = serde_json::from_str(&json).expect("deserialize should succeed");
        assert_eq!(back, a);
    }

    #[test]
    fn set_extent_ignored_for_text() {
        let mut a = Annotation::text((0.0, 0.0), "t", Color::BLUE, 12.0, 1);
        a.set_extent((10.0, 10.0));
        assert_eq!(a.extent(), None);
    }
}
