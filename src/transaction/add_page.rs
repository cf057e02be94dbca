//! The page and endpoint for adding a transaction.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of rejecting the whole form like axum::Form.
use axum_extra::extract::Form;
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    stores::SQLiteTransactionStore,
    timezone::local_today,
    transaction::{Ledger, TransactionForm, form::transaction_form_view},
};

/// The state needed for the add transaction page.
#[derive(Debug, Clone)]
pub struct AddPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for AddPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the form for adding a transaction with today's date filled in.
pub async fn get_add_page(State(state): State<AddPageState>) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    add_view(&TransactionForm::with_date(today), "").into_response()
}

/// The state needed to add a transaction.
#[derive(Debug, Clone)]
pub struct AddTransactionState {
    /// The ledger to add transactions to.
    pub ledger: Ledger<SQLiteTransactionStore>,
}

impl FromRef<AppState> for AddTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler for adding a transaction, redirects to the ledger page on success.
///
/// An invalid form is rendered again with the error message and the submitted values.
pub async fn add_transaction_endpoint(
    State(mut state): State<AddTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    match state.ledger.add_transaction(&form) {
        Ok(transaction) => {
            tracing::info!("Added transaction {}", transaction.id);
            Redirect::to(endpoints::LIST_VIEW).into_response()
        }
        Err(Error::Validation(error)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            add_view(&form, &error.to_string()),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not add transaction: {error}");
            error.into_response()
        }
    }
}

fn add_view(form: &TransactionForm, error_message: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::ADD_VIEW).into_html();
    let form = transaction_form_view(endpoints::ADD_VIEW, form, error_message, "Add Transaction");

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="mb-6 text-2xl font-bold" { "Add Transaction" }

            (form)
        }
    };

    base("Add Transaction", &content)
}
