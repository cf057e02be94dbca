//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    AppState, database_id::TransactionId, endpoints, stores::SQLiteTransactionStore,
    transaction::Ledger,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The ledger holding the transaction.
    pub ledger: Ledger<SQLiteTransactionStore>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler for deleting a transaction, redirects to the ledger page.
///
/// Deleting a transaction that does not exist also redirects to the ledger page.
pub async fn delete_transaction_endpoint(
    State(mut state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.ledger.delete_transaction(transaction_id) {
        Ok(true) => {
            tracing::info!("Deleted transaction {transaction_id}");
            Redirect::to(endpoints::LIST_VIEW).into_response()
        }
        Ok(false) => {
            tracing::debug!("Transaction {transaction_id} was already deleted");
            Redirect::to(endpoints::LIST_VIEW).into_response()
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}
