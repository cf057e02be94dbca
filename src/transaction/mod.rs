//! Transactions: the single record type of the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and its parsing from submitted forms
//! - The `Ledger` operations on top of a transaction store
//! - View handlers for the ledger, add and edit pages and the delete endpoint

mod add_page;
mod core;
mod delete_endpoint;
mod edit_page;
mod form;
mod ledger;
mod list_page;
mod query;

pub use add_page::{add_transaction_endpoint, get_add_page};
pub use core::{NewTransaction, Transaction, TransactionType, map_transaction_row};
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_page::{edit_transaction_endpoint, get_edit_page};
pub use form::TransactionForm;
pub use ledger::{Ledger, LedgerReport, LedgerView, Totals};
pub use list_page::get_list_page;
pub use query::ListQuery;
