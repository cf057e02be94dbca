//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    export::export_pdf_endpoint,
    not_found::get_404_not_found,
    transaction::{
        add_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_add_page, get_edit_page, get_list_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LIST_VIEW, get(get_list_page))
        .route(
            endpoints::ADD_VIEW,
            get(get_add_page).post(add_transaction_endpoint),
        )
        .route(
            endpoints::EDIT_VIEW,
            get(get_edit_page).post(edit_transaction_endpoint),
        )
        .route(endpoints::DELETE, post(delete_transaction_endpoint))
        .route(endpoints::EXPORT_PDF, get(export_pdf_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the ledger page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::LIST_VIEW)
}
