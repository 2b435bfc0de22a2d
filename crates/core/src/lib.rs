//! Resume Studio Core Library
//!
//! Annotation data model, undo/redo history, canvas interaction state
//! machine, viewer state, and upload validation. Pure state; no I/O.

pub mod annotation;
pub mod canvas;
pub mod history;
pub mod upload;
pub mod viewer;

pub use annotation::{
    Annotation, AnnotationId, AnnotationKind, Color, MAX_FONT_SIZE, MIN_FONT_SIZE,
};
pub use canvas::{CanvasController, Tool, ToolSettings};
pub use history::AnnotationStore;
pub use upload::{job_url_is_valid, FieldError, ResumeFile, UploadForm, PDF_MEDIA_TYPE};
pub use viewer::{ViewerState, MAX_SCALE, MIN_SCALE, SCALE_STEP};
