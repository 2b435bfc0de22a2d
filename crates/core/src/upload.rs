//! Upload form validation
//!
//! Captures a résumé file and a job-listing URL, validates both, and gates
//! the submit action. Validation is recomputed on every change; the submit
//! predicate is purely a readiness check, no debouncing.

use thiserror::Error;

/// Media type a résumé must declare
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Allow-list heuristic for the one supported job board
const JOB_URL_HOST: &str = "naukri.com";
const JOB_URL_PATH_SEGMENT: &str = "job-listings";

/// Field-level validation failures
///
/// Non-fatal: they block submission and are reported inline next to the
/// offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("please upload a PDF file only")]
    NotPdf,
    #[error("please enter a valid Naukri.com job listing URL")]
    BadJobUrl,
}

/// A file the user picked, with its declared media type and contents
///
/// The same byte buffer is later handed to the multipart encoder, so the
/// form owns it rather than a path.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Résumé + job URL capture with field-level errors
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    resume: Option<ResumeFile>,
    job_url: String,
    resume_error: Option<FieldError>,
    url_error: Option<FieldError>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a picked file to the form
    ///
    /// Accepted iff the declared media type is exactly `application/pdf`;
    /// anything else sets the field error and does not store the file.
    pub fn set_resume(&mut self, file: ResumeFile) -> Result<(), FieldError> {
        if file.media_type != PDF_MEDIA_TYPE {
            log::debug!("rejected upload with media type {:?}", file.media_type);
            self.resume_error = Some(FieldError::NotPdf);
            return Err(FieldError::NotPdf);
        }
        self.resume_error = None;
        self.resume = Some(file);
        Ok(())
    }

    /// Update the URL field, revalidating on every keystroke
    ///
    /// An empty field is not an error, just not submittable yet.
    pub fn set_job_url(&mut self, url: impl Into<String>) {
        self.job_url = url.into();
        self.url_error = if self.job_url.is_empty() || job_url_is_valid(&self.job_url) {
            None
        } else {
            Some(FieldError::BadJobUrl)
        };
    }

    pub fn resume(&self) -> Option<&ResumeFile> {
        self.resume.as_ref()
    }

    pub fn job_url(&self) -> &str {
        &self.job_url
    }

    pub fn resume_error(&self) -> Option<&FieldError> {
        self.resume_error.as_ref()
    }

    pub fn url_error(&self) -> Option<&FieldError> {
        self.url_error.as_ref()
    }

    /// Readiness predicate for the submit button
    ///
    /// True only when both fields are present and currently valid.
    pub fn can_submit(&self) -> bool {
        self.resume.is_some()
            && !self.job_url.is_empty()
            && job_url_is_valid(&self.job_url)
            && self.resume_error.is_none()
            && self.url_error.is_none()
    }
}

/// The job-board allow-list: the URL must mention both the host and the
/// job-listing path segment.
pub fn job_url_is_valid(url: &str) -> bool {
    url.contains(JOB_URL_HOST) && url.contains(JOB_URL_PATH_SEGMENT)
}
