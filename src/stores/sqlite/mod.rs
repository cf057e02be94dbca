//! SQLite backed implementations of the storage traits.

mod transaction;

pub use transaction::{SQLiteTransactionStore, create_transaction_table};
