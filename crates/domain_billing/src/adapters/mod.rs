//! Concrete adapters for the billing ports
//!
//! Renderers produce the receipt artifact locally, artifact stores publish
//! it, and the mail notifier delivers the link. Every adapter receives an
//! explicit config struct at construction and reports failures as
//! `PortError`.

pub mod html;
pub mod local_store;
pub mod mail;
pub mod pdf;
pub mod s3_store;

pub use html::{HtmlReceiptRenderer, HtmlRendererConfig};
pub use local_store::{LocalArtifactStore, LocalArtifactStoreConfig};
pub use mail::{HttpMailNotifier, MailConfig};
pub use pdf::{PdfReceiptRenderer, PdfRendererConfig};
pub use s3_store::{S3ArtifactStore, S3ArtifactStoreConfig};

// Event branding shared by the renderers and the mail notifier.
pub(crate) const EVENT_EDITION: &str = "Phase Shift 2025";
pub(crate) const EVENT_NAME: &str = "Phase Shift";
pub(crate) const EVENT_DEPARTMENT: &str = "Department of Electrical Engineering";
pub(crate) const EVENT_INSTITUTE: &str = "Techno Main Salt Lake";
pub(crate) const EVENT_DATES: &str = "25th - 26th April 2025";
pub(crate) const EVENT_VENUE: &str = "Techno Main Salt Lake Campus";

/// Maps an artifact extension to its upload content type
pub(crate) fn content_type_for(object_name: &str) -> &'static str {
    match object_name.rsplit('.').next() {
        Some("pdf") => "application/pdf",
        Some("html") => "text/html; charset=utf-8",
        _ => "application/octet-stream",
    }
}
