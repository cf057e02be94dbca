//! Defines the endpoint for downloading the ledger as a PDF.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, export::PdfRenderer, stores::SQLiteTransactionStore, transaction::Ledger,
};

/// The state needed to export the ledger.
#[derive(Clone)]
pub struct ExportState {
    /// The ledger to export.
    pub ledger: Ledger<SQLiteTransactionStore>,
    /// Converts the ledger into a PDF document.
    pub pdf_renderer: Arc<dyn PdfRenderer + Send + Sync>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            pdf_renderer: state.pdf_renderer.clone(),
        }
    }
}

/// A route handler that downloads every transaction, newest first, as a PDF.
///
/// The sort and filter on the ledger page do not affect the export.
/// If the document cannot be created, a plain text error is returned instead
/// and no partial file is sent.
pub async fn export_pdf_endpoint(State(state): State<ExportState>) -> Response {
    let report = match state.ledger.export_ledger() {
        Ok(report) => report,
        Err(error) => {
            tracing::error!("Could not collect transactions for export: {error}");
            return error.into_plain_text_response();
        }
    };

    match state.pdf_renderer.render(&report) {
        Ok(bytes) => {
            tracing::info!(
                "Exported {} transactions as a {} byte PDF",
                report.transactions.len(),
                bytes.len()
            );

            (
                [
                    (CONTENT_TYPE, "application/pdf"),
                    (CONTENT_DISPOSITION, "attachment; filename=kakeibo.pdf"),
                ],
                bytes,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not render the ledger as a PDF: {error}");
            error.into_plain_text_response()
        }
    }
}
