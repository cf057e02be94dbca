//! Defines the core data models for ledger transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{database_id::TransactionId, error::ValidationError};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned, e.g. a salary.
    Income,
    /// Money that was spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The text used for this type in forms, query strings and the database.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The text displayed to users.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(ValidationError::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: ValidationError| FromSqlError::Other(Box::new(error)))
    }
}

/// A single income or expense entry in the ledger.
///
/// To create a new `Transaction`, pass a [NewTransaction] to a
/// [TransactionStore](crate::stores::TransactionStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// A free-form label such as "food" or "salary".
    pub category: String,
    /// How much money was earned or spent.
    ///
    /// The amount is a magnitude, the direction comes from `transaction_type`.
    pub amount: i64,
    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,
}

/// The fields of a transaction that has not been assigned an ID yet.
///
/// Also used as the full set of replacement values when editing a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// When the transaction happened.
    pub date: Date,
    /// A free-form label such as "food" or "salary".
    pub category: String,
    /// How much money was earned or spent.
    pub amount: i64,
    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,
}

impl NewTransaction {
    /// Attach a database ID to create the stored representation.
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            date: self.date,
            category: self.category,
            amount: self.amount,
            transaction_type: self.transaction_type,
        }
    }
}

/// Map a database row to a Transaction.
///
/// Expects the columns in the order id, date, category, amount, transaction_type.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let category = row.get(2)?;
    let amount = row.get(3)?;
    let transaction_type = row.get(4)?;

    Ok(Transaction {
        id,
        date,
        category,
        amount,
        transaction_type,
    })
}
