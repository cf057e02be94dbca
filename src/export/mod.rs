//! Exporting the ledger as a PDF document.

mod endpoint;
mod pdf;

pub use endpoint::export_pdf_endpoint;
pub use pdf::{PdfRenderer, PrintPdfRenderer};
