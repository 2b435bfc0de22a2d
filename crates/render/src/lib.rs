//! PDF document metadata for the viewer
//!
//! Parses the PDF container with `lopdf` just far enough to report what the
//! viewer needs: page count and per-page sizes. Rasterization is delegated
//! to an external renderer and stays out of this crate; the viewer draws a
//! blank page surface at the reported size and paints the annotation
//! overlay on top.

use lopdf::{Document, Object};

/// Page size in points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

/// US Letter, the fallback when a page carries no usable MediaBox
pub const DEFAULT_PAGE_SIZE: PageSize = PageSize {
    width_pt: 612.0,
    height_pt: 792.0,
};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF parse error: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("document has no pages")]
    Empty,
    #[error("page {page} out of range (page_count={page_count})")]
    PageOutOfRange { page: u16, page_count: u16 },
}

/// A parsed document: the original bytes plus per-page sizes
///
/// The bytes are kept verbatim so download/save can re-expose exactly what
/// the enhancement service returned.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    bytes: Vec<u8>,
    page_sizes: Vec<PageSize>,
}

impl PdfDocument {
    /// Parse a document from fetched bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, RenderError> {
        let page_sizes = parse_page_sizes(&bytes)?;
        log::debug!("parsed document with {} pages", page_sizes.len());
        Ok(Self { bytes, page_sizes })
    }

    pub fn page_count(&self) -> u16 {
        self.page_sizes.len() as u16
    }

    /// Size of a page, 1-based to match the viewer
    pub fn page_size(&self, page: u16) -> Result<PageSize, RenderError> {
        if page == 0 {
            return Err(RenderError::PageOutOfRange {
                page,
                page_count: self.page_count(),
            });
        }
        self.page_sizes
            .get(page as usize - 1)
            .copied()
            .ok_or(RenderError::PageOutOfRange {
                page,
                page_count: self.page_count(),
            })
    }

    /// The untouched bytes as fetched from the enhancement service
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn parse_page_sizes(bytes: &[u8]) -> Result<Vec<PageSize>, RenderError> {
    let doc = Document::load_mem(bytes)?;
    let pages = doc.get_pages();
    let mut sizes = Vec::with_capacity(pages.len());

    for (_, object_id) in pages {
        let dict = doc.get_dictionary(object_id)?;
        let size = dict
            .get(b"MediaBox")
            .ok()
            .and_then(|obj| obj.as_array().ok())
            .and_then(|array| {
                if array.len() != 4 {
                    return None;
                }
                let x0 = number(&array[0])?;
                let y0 = number(&array[1])?;
                let x1 = number(&array[2])?;
                let y1 = number(&array[3])?;
                Some(PageSize {
                    width_pt: (x1 - x0).abs(),
                    height_pt: (y1 - y0).abs(),
                })
            })
            .unwrap_or(DEFAULT_PAGE_SIZE);

        sizes.push(size);
    }

    if sizes.is_empty() {
        return Err(RenderError::Empty);
    }

    Ok(sizes)
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}
