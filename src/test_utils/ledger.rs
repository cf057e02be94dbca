use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{db::initialize, stores::SQLiteTransactionStore, transaction::Ledger};

/// Create a ledger backed by a fresh in-memory database.
pub(crate) fn get_test_ledger() -> Ledger<SQLiteTransactionStore> {
    let connection = Connection::open_in_memory().expect("Could not open database in memory");
    initialize(&connection).expect("Could not initialize database");

    Ledger::new(SQLiteTransactionStore::new(Arc::new(Mutex::new(
        connection,
    ))))
}
