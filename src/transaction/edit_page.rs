//! The page and endpoint for editing a transaction.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    stores::SQLiteTransactionStore,
    transaction::{Ledger, TransactionForm, form::transaction_form_view},
};

/// The state needed to get or edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The ledger holding the transaction.
    pub ledger: Ledger<SQLiteTransactionStore>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Renders the edit form filled in with the transaction's current values.
///
/// Redirects to the ledger page if the transaction does not exist.
pub async fn get_edit_page(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.ledger.get_transaction(transaction_id) {
        Ok(transaction) => {
            edit_view(transaction_id, &TransactionForm::from(&transaction), "").into_response()
        }
        Err(Error::NotFound) => {
            tracing::debug!("Transaction {transaction_id} not found, redirecting to ledger");
            Redirect::to(endpoints::LIST_VIEW).into_response()
        }
        Err(error) => {
            tracing::error!("Could not get transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}

/// A route handler for editing a transaction, redirects to the ledger page on success.
///
/// Also redirects to the ledger page if the transaction does not exist.
/// An invalid form is rendered again with the error message and the submitted values.
pub async fn edit_transaction_endpoint(
    State(mut state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    match state.ledger.edit_transaction(transaction_id, &form) {
        Ok(_) => {
            tracing::info!("Updated transaction {transaction_id}");
            Redirect::to(endpoints::LIST_VIEW).into_response()
        }
        Err(Error::UpdateMissingTransaction) => {
            tracing::debug!("Transaction {transaction_id} not found, redirecting to ledger");
            Redirect::to(endpoints::LIST_VIEW).into_response()
        }
        Err(Error::Validation(error)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            edit_view(transaction_id, &form, &error.to_string()),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}

fn edit_view(transaction_id: TransactionId, form: &TransactionForm, error_message: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_VIEW).into_html();
    let action = format_endpoint(endpoints::EDIT_VIEW, transaction_id);
    let form = transaction_form_view(&action, form, error_message, "Save Changes");

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="mb-6 text-2xl font-bold" { "Edit Transaction" }

            (form)
        }
    };

    base("Edit Transaction", &content)
}
