//! The ledger operations behind every page: add, list, edit, delete and export.

use crate::{
    Error,
    database_id::TransactionId,
    stores::{SortKey, SortOrder, TransactionQuery, TransactionStore, TypeFilter},
    transaction::{ListQuery, Transaction, TransactionForm, TransactionType},
};

/// The sum of income and the sum of expenses for a set of transactions.
///
/// Sums are kept as `i128` so that adding up any number of `i64` amounts
/// cannot overflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// The sum of the amounts of the income transactions.
    pub income: i128,
    /// The sum of the amounts of the expense transactions.
    pub expense: i128,
}

impl Totals {
    /// Add up the income and expenses in `transactions`.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(Totals::default(), |mut totals, transaction| {
                let amount = i128::from(transaction.amount);

                match transaction.transaction_type {
                    TransactionType::Income => totals.income += amount,
                    TransactionType::Expense => totals.expense += amount,
                }

                totals
            })
    }

    /// Income minus expenses.
    pub fn balance(&self) -> i128 {
        self.income - self.expense
    }
}

/// What the ledger page shows for one sort and filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerView {
    /// The matching transactions in display order.
    pub transactions: Vec<Transaction>,
    /// The totals over `transactions`.
    pub totals: Totals,
    /// The selection that was actually applied, after falling back on unknown values.
    pub query: TransactionQuery,
}

/// The full ledger, newest first, ready to be turned into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerReport {
    /// Every transaction, ordered by date descending.
    pub transactions: Vec<Transaction>,
    /// The totals over every transaction.
    pub totals: Totals,
}

/// Business logic for the household ledger on top of a [TransactionStore].
#[derive(Debug, Clone)]
pub struct Ledger<S> {
    store: S,
}

impl<S: TransactionStore> Ledger<S> {
    /// Create a ledger backed by `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Take back the store, e.g. to close it at shutdown.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Validate `form` and record it as a new transaction.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the form is invalid, or a store error.
    pub fn add_transaction(&mut self, form: &TransactionForm) -> Result<Transaction, Error> {
        let transaction = form.validate()?;

        self.store.create(transaction)
    }

    /// Get the transactions and totals for the sort and filter in `list_query`.
    ///
    /// # Errors
    /// Returns an error if the store could not be queried.
    pub fn list_transactions(&self, list_query: &ListQuery) -> Result<LedgerView, Error> {
        let query = list_query.selection();
        let transactions = self.store.query(query)?;
        let totals = Totals::from_transactions(&transactions);

        Ok(LedgerView {
            transactions,
            totals,
            query,
        })
    }

    /// Get a single transaction.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no transaction `id`.
    pub fn get_transaction(&self, id: TransactionId) -> Result<Transaction, Error> {
        self.store.get(id)
    }

    /// Validate `form` and overwrite the transaction `id` with it.
    ///
    /// A missing transaction is reported even if the form is also invalid.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingTransaction] if there is no transaction
    /// `id`, or [Error::Validation] if the form is invalid.
    pub fn edit_transaction(
        &mut self,
        id: TransactionId,
        form: &TransactionForm,
    ) -> Result<Transaction, Error> {
        let transaction = match form.validate() {
            Ok(transaction) => transaction,
            Err(error) => {
                return match self.store.get(id) {
                    Ok(_) => Err(error.into()),
                    Err(Error::NotFound) => Err(Error::UpdateMissingTransaction),
                    Err(other) => Err(other),
                };
            }
        };

        self.store.update(id, transaction)
    }

    /// Delete the transaction `id`, doing nothing if it does not exist.
    ///
    /// Returns `true` if a transaction was removed.
    ///
    /// # Errors
    /// Returns an error if the store could not delete the transaction.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<bool, Error> {
        let rows_affected = self.store.delete(id)?;

        Ok(rows_affected > 0)
    }

    /// Collect every transaction, newest first, with the overall totals.
    ///
    /// The order is fixed and does not depend on what the ledger page is showing.
    ///
    /// # Errors
    /// Returns an error if the store could not be queried.
    pub fn export_ledger(&self) -> Result<LedgerReport, Error> {
        let transactions = self.store.query(TransactionQuery {
            sort_key: SortKey::Date,
            sort_order: SortOrder::Descending,
            type_filter: TypeFilter::All,
        })?;
        let totals = Totals::from_transactions(&transactions);

        Ok(LedgerReport {
            transactions,
            totals,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        error::ValidationError,
        stores::{SQLiteTransactionStore, SortKey, SortOrder, TransactionQuery, TypeFilter},
        transaction::{ListQuery, Transaction, TransactionForm, TransactionType},
    };

    use super::{Ledger, Totals};

    fn get_ledger() -> Ledger<SQLiteTransactionStore> {
        let connection = Connection::open_in_memory().expect("Could not open database in memory");
        initialize(&connection).expect("Could not initialize database");

        Ledger::new(SQLiteTransactionStore::new(Arc::new(Mutex::new(connection))))
    }

    fn form(date: &str, category: &str, amount: &str, transaction_type: &str) -> TransactionForm {
        TransactionForm {
            date: Some(date.to_owned()),
            category: Some(category.to_owned()),
            amount: Some(amount.to_owned()),
            transaction_type: Some(transaction_type.to_owned()),
        }
    }

    fn list_query(sort: &str, order: &str, type_filter: &str) -> ListQuery {
        ListQuery {
            sort: Some(sort.to_owned()),
            order: Some(order.to_owned()),
            type_filter: Some(type_filter.to_owned()),
        }
    }

    /// Add the salary and food transactions, returning them in that order.
    fn add_salary_and_food(ledger: &mut Ledger<SQLiteTransactionStore>) -> [Transaction; 2] {
        let salary = ledger
            .add_transaction(&form("2024-01-01", "salary", "3000", "income"))
            .expect("Could not add salary");
        let food = ledger
            .add_transaction(&form("2024-01-02", "food", "500", "expense"))
            .expect("Could not add food");

        [salary, food]
    }

    #[test]
    fn add_then_get_returns_same_fields() {
        let mut ledger = get_ledger();

        let added = ledger
            .add_transaction(&form("2024-01-01", "salary", "3000", "income"))
            .expect("Could not add transaction");

        let got = ledger
            .get_transaction(added.id)
            .expect("Could not get transaction");
        assert_eq!(got.date, date!(2024 - 01 - 01));
        assert_eq!(got.category, "salary");
        assert_eq!(got.amount, 3000);
        assert_eq!(got.transaction_type, TransactionType::Income);
    }

    #[test]
    fn add_rejects_invalid_form() {
        let mut ledger = get_ledger();

        let result = ledger.add_transaction(&form("not a date", "food", "500", "expense"));

        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::InvalidDate(
                "not a date".to_owned()
            )))
        );
        let view = ledger
            .list_transactions(&ListQuery::default())
            .expect("Could not list transactions");
        assert!(view.transactions.is_empty());
    }

    #[test]
    fn list_shows_both_in_date_order_with_totals() {
        let mut ledger = get_ledger();
        let [salary, food] = add_salary_and_food(&mut ledger);

        let view = ledger
            .list_transactions(&list_query("date", "asc", "all"))
            .expect("Could not list transactions");

        assert_eq!(view.transactions, vec![salary, food]);
        assert_eq!(
            view.totals,
            Totals {
                income: 3000,
                expense: 500
            }
        );
    }

    #[test]
    fn list_income_only() {
        let mut ledger = get_ledger();
        let [salary, _] = add_salary_and_food(&mut ledger);
        ledger
            .add_transaction(&form("2024-02-01", "bonus", "1200", "income"))
            .expect("Could not add transaction");

        let view = ledger
            .list_transactions(&list_query("date", "desc", "income"))
            .expect("Could not list transactions");

        assert!(
            view.transactions
                .iter()
                .all(|transaction| transaction.transaction_type == TransactionType::Income)
        );
        assert_eq!(view.transactions.len(), 2);
        assert_eq!(view.transactions[1], salary);
        assert_eq!(view.totals.income, 4200);
        assert_eq!(view.totals.expense, 0);
    }

    #[test]
    fn list_echoes_effective_selection() {
        let ledger = get_ledger();

        let view = ledger
            .list_transactions(&list_query("category", "sideways", "gifts"))
            .expect("Could not list transactions");

        assert_eq!(
            view.query,
            TransactionQuery {
                sort_key: SortKey::Amount,
                sort_order: SortOrder::Descending,
                type_filter: TypeFilter::All,
            }
        );
    }

    #[test]
    fn edit_changes_only_target() {
        let mut ledger = get_ledger();
        let [salary, food] = add_salary_and_food(&mut ledger);

        let edited = ledger
            .edit_transaction(food.id, &form("2024-01-03", "groceries", "650", "expense"))
            .expect("Could not edit transaction");

        assert_eq!(edited.id, food.id);
        assert_eq!(edited.category, "groceries");
        assert_eq!(edited.amount, 650);
        assert_eq!(ledger.get_transaction(food.id), Ok(edited));
        assert_eq!(ledger.get_transaction(salary.id), Ok(salary));
    }

    #[test]
    fn edit_missing_transaction() {
        let mut ledger = get_ledger();

        let result = ledger.edit_transaction(42, &form("2024-01-03", "food", "1", "expense"));

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn edit_missing_transaction_with_invalid_form() {
        let mut ledger = get_ledger();

        let result = ledger.edit_transaction(42, &form("", "", "", ""));

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn edit_with_invalid_form_keeps_original() {
        let mut ledger = get_ledger();
        let [salary, _] = add_salary_and_food(&mut ledger);

        let result = ledger.edit_transaction(salary.id, &form("2024-01-03", "", "1", "income"));

        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::MissingField("Category")))
        );
        assert_eq!(ledger.get_transaction(salary.id), Ok(salary));
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let mut ledger = get_ledger();
        let [salary, food] = add_salary_and_food(&mut ledger);

        let deleted = ledger
            .delete_transaction(salary.id)
            .expect("Could not delete transaction");

        assert!(deleted);
        assert_eq!(ledger.get_transaction(salary.id), Err(Error::NotFound));
        assert_eq!(ledger.get_transaction(food.id), Ok(food));
    }

    #[test]
    fn delete_twice_is_no_op() {
        let mut ledger = get_ledger();
        let [salary, _] = add_salary_and_food(&mut ledger);
        ledger
            .delete_transaction(salary.id)
            .expect("Could not delete transaction");

        let result = ledger.delete_transaction(salary.id);

        assert_eq!(result, Ok(false));
    }

    #[test]
    fn export_is_newest_first_with_full_totals() {
        let mut ledger = get_ledger();
        let [salary, food] = add_salary_and_food(&mut ledger);

        let report = ledger.export_ledger().expect("Could not export ledger");

        assert_eq!(report.transactions, vec![food, salary]);
        assert_eq!(
            report.totals,
            Totals {
                income: 3000,
                expense: 500
            }
        );
    }

    #[test]
    fn totals_of_empty_ledger_are_zero() {
        assert_eq!(Totals::from_transactions(&[]), Totals::default());
        assert_eq!(Totals::default().balance(), 0);
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let totals = Totals {
            income: 3000,
            expense: 500,
        };

        assert_eq!(totals.balance(), 2500);
    }

    #[test]
    fn totals_of_largest_amounts_do_not_overflow() {
        let mut ledger = get_ledger();
        let max = i64::MAX.to_string();
        for category in ["bonus", "lottery"] {
            ledger
                .add_transaction(&form("2024-01-01", category, &max, "income"))
                .expect("Could not add transaction");
        }

        let view = ledger
            .list_transactions(&ListQuery::default())
            .expect("Could not list transactions");

        assert_eq!(view.totals.income, 2 * i128::from(i64::MAX));
        assert_eq!(view.totals.expense, 0);
        assert_eq!(view.totals.balance(), 2 * i128::from(i64::MAX));
    }

    #[test]
    fn balance_of_smallest_expense_does_not_overflow() {
        let mut ledger = get_ledger();
        ledger
            .add_transaction(&form(
                "2024-01-01",
                "refund",
                &i64::MIN.to_string(),
                "expense",
            ))
            .expect("Could not add transaction");

        let report = ledger.export_ledger().expect("Could not export ledger");

        assert_eq!(report.totals.expense, i128::from(i64::MIN));
        assert_eq!(report.totals.balance(), -i128::from(i64::MIN));
    }
}
