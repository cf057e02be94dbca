//! Storage traits and their SQLite implementations.

mod sqlite;
mod transaction;

pub(crate) use sqlite::create_transaction_table;
pub use sqlite::SQLiteTransactionStore;
pub use transaction::{SortKey, SortOrder, TransactionQuery, TransactionStore, TypeFilter};
