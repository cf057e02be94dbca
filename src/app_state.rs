//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    export::{PdfRenderer, PrintPdfRenderer},
    stores::SQLiteTransactionStore,
    timezone::get_local_offset,
    transaction::Ledger,
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,

    /// The household ledger backed by the SQLite database.
    pub ledger: Ledger<SQLiteTransactionStore>,

    /// Converts the ledger into a PDF document for download.
    pub pdf_renderer: Arc<dyn PdfRenderer + Send + Sync>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Tokyo".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the timezone is not recognized.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            ledger: Ledger::new(SQLiteTransactionStore::new(connection)),
            pdf_renderer: Arc::new(PrintPdfRenderer),
        })
    }

    /// Replace the PDF renderer used by the export endpoint.
    pub fn with_pdf_renderer(self, pdf_renderer: Arc<dyn PdfRenderer + Send + Sync>) -> Self {
        Self {
            pdf_renderer,
            ..self
        }
    }

    /// Close the database connection.
    ///
    /// Call this after the server has shut down and dropped its copies of the state.
    ///
    /// # Errors
    /// Returns an error if the database connection could not be closed cleanly.
    pub fn close(self) -> Result<(), Error> {
        self.ledger.into_store().close()
    }
}
