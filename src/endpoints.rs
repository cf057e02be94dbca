//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/edit/{transaction_id}', use [format_endpoint].

/// The root route which redirects to the ledger page.
pub const ROOT: &str = "/";
/// The page for listing, sorting and filtering transactions.
pub const LIST_VIEW: &str = "/list";
/// The page and form endpoint for adding a transaction.
pub const ADD_VIEW: &str = "/add";
/// The page and form endpoint for editing a transaction.
pub const EDIT_VIEW: &str = "/edit/{transaction_id}";
/// The route for deleting a transaction.
pub const DELETE: &str = "/delete/{transaction_id}";
/// The route for downloading the ledger as a PDF.
pub const EXPORT_PDF: &str = "/export/pdf";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/edit/{transaction_id}', '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
