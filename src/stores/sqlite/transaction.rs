//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{
    Error,
    database_id::TransactionId,
    stores::{TransactionQuery, TransactionStore},
    transaction::{NewTransaction, Transaction, map_transaction_row},
};

/// Stores transactions in a SQLite database.
///
/// Clones share the same connection, so every handler sees the same data.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The transaction table must already exist, see [create_transaction_table].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Close the underlying database connection.
    ///
    /// If another clone of the store still holds the connection, the
    /// connection is left open and will be closed when the last clone is dropped.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock was poisoned, or
    /// [Error::SqlError] if SQLite failed to close the connection.
    pub fn close(self) -> Result<(), Error> {
        let mutex = match Arc::try_unwrap(self.connection) {
            Ok(mutex) => mutex,
            Err(_) => {
                tracing::warn!(
                    "Database connection is still shared, it will be closed when the last reference is dropped"
                );
                return Ok(());
            }
        };

        let connection = mutex
            .into_inner()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        connection
            .close()
            .map_err(|(_, error)| Error::from(error))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock was poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (date, category, amount, transaction_type)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, date, category, amount, transaction_type",
            )?
            .query_row(
                (
                    transaction.date,
                    transaction.category,
                    transaction.amount,
                    transaction.transaction_type,
                ),
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(
                "SELECT id, date, category, amount, transaction_type
                 FROM \"transaction\" WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    /// Overwrite the transaction `id` with the fields in `transaction`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn update(
        &mut self,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "UPDATE \"transaction\"
             SET date = ?1, category = ?2, amount = ?3, transaction_type = ?4
             WHERE id = ?5",
            (
                &transaction.date,
                &transaction.category,
                transaction.amount,
                transaction.transaction_type,
                id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingTransaction);
        }

        Ok(transaction.with_id(id))
    }

    /// Delete the transaction `id` from the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn delete(&mut self, id: TransactionId) -> Result<usize, Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

        Ok(rows_affected)
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts =
            vec!["SELECT id, date, category, amount, transaction_type FROM \"transaction\"".to_owned()];

        let transaction_type = query.type_filter.transaction_type();

        if transaction_type.is_some() {
            query_string_parts.push("WHERE transaction_type = ?1".to_owned());
        }

        query_string_parts.push(format!(
            "ORDER BY {} {}, id ASC",
            query.sort_key.column(),
            query.sort_order.keyword()
        ));

        let query_string = query_string_parts.join(" ");
        let connection = self.lock()?;
        let mut statement = connection.prepare(&query_string)?;

        let rows = match transaction_type {
            Some(transaction_type) => statement.query_map([transaction_type], map_transaction_row)?,
            None => statement.query_map([], map_transaction_row)?,
        };

        rows.map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }
}

/// Create the transaction table and the indexes used for sorting.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            category TEXT NOT NULL,
            amount INTEGER NOT NULL,
            transaction_type TEXT NOT NULL CHECK (transaction_type IN ('income', 'expense'))
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date)",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_amount ON \"transaction\"(amount)",
        (),
    )?;

    Ok(())
}
