//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{NewTransaction, Transaction, TransactionType},
};

/// Handles the creation, retrieval, modification and deletion of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    ///
    /// Implementers should return [Error::NotFound] if `id` does not refer to
    /// a stored transaction.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Overwrite every field of the transaction `id`.
    ///
    /// Implementers should return [Error::UpdateMissingTransaction] if `id`
    /// does not refer to a stored transaction.
    fn update(
        &mut self,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Transaction, Error>;

    /// Delete the transaction `id`, returning the number of transactions removed.
    ///
    /// Deleting a transaction that does not exist is not an error, it simply
    /// removes nothing.
    fn delete(&mut self, id: TransactionId) -> Result<usize, Error>;

    /// Retrieve transactions from the store in the way defined by `query`.
    fn query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::query].
///
/// The type filter is applied first, then the remaining transactions are
/// sorted by `sort_key`. Transactions with equal keys are ordered by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionQuery {
    /// The column to sort by.
    pub sort_key: SortKey,
    /// The direction to sort in.
    pub sort_order: SortOrder,
    /// Which transaction types to include.
    pub type_filter: TypeFilter,
}

/// The column used to order transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Order by the date the transaction happened.
    #[default]
    Date,
    /// Order by the transaction amount.
    Amount,
}

impl SortKey {
    /// The value used for this key in query strings.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Amount => "amount",
        }
    }

    pub(crate) fn column(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Amount => "amount",
        }
    }
}

/// The order to sort transactions in a [TransactionQuery].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    #[default]
    Descending,
}

impl SortOrder {
    /// The value used for this order in query strings.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub(crate) fn keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Restricts a [TransactionQuery] to one type of transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    /// Include both income and expenses.
    #[default]
    All,
    /// Only include income.
    Income,
    /// Only include expenses.
    Expense,
}

impl TypeFilter {
    /// The value used for this filter in query strings.
    pub fn as_query_value(self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }

    /// The transaction type to match, or `None` if every type passes.
    pub fn transaction_type(self) -> Option<TransactionType> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Income => Some(TransactionType::Income),
            TypeFilter::Expense => Some(TransactionType::Expense),
        }
    }
}
