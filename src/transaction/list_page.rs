//! The ledger page: every transaction with sorting, filtering and totals.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_amount, link, truncate_graphemes,
    },
    navigation::NavBar,
    stores::{SQLiteTransactionStore, SortKey, SortOrder, TransactionQuery, TypeFilter},
    transaction::{
        Ledger, LedgerView, ListQuery, Totals, Transaction, TransactionType,
        query::sort_toggle_url,
    },
};

/// The max number of graphemes of a category to show in the table before
/// truncating and displaying ellipses.
const MAX_CATEGORY_GRAPHEMES: usize = 32;

/// The state needed for the ledger page.
#[derive(Debug, Clone)]
pub struct ListPageState {
    /// The ledger to display.
    pub ledger: Ledger<SQLiteTransactionStore>,
}

impl FromRef<AppState> for ListPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Render the ledger page for the sort and filter in the query string.
pub async fn get_list_page(
    State(state): State<ListPageState>,
    Query(query): Query<ListQuery>,
) -> Response {
    match state.ledger.list_transactions(&query) {
        Ok(view) => list_view(&view).into_response(),
        Err(error) => {
            tracing::error!("Could not list transactions: {error}");
            error.into_response()
        }
    }
}

fn list_view(view: &LedgerView) -> Markup {
    let nav_bar = NavBar::new(endpoints::LIST_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                div class="flex items-center justify-between"
                {
                    h1 class="text-2xl font-bold" { "Ledger" }

                    div class="flex gap-4"
                    {
                        (link(endpoints::ADD_VIEW, "Add transaction"))
                        (link(endpoints::EXPORT_PDF, "Export PDF"))
                    }
                }

                (totals_view(&view.totals))
                (selection_form(view.query))
                (transaction_table(&view.transactions, view.query))
            }
        }
    };

    base("Ledger", &content)
}

fn totals_view(totals: &Totals) -> Markup {
    let cards = [
        ("total-income", "Income", totals.income),
        ("total-expense", "Expense", totals.expense),
        ("total-balance", "Balance", totals.balance()),
    ];

    html! {
        dl class="grid grid-cols-3 gap-4"
        {
            @for (id, label, amount) in cards {
                div class="rounded border border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-800 p-4"
                {
                    dt class="text-sm text-gray-500 dark:text-gray-400" { (label) }
                    dd id=(id) class="text-xl font-semibold" { (format_amount(amount)) }
                }
            }
        }
    }
}

/// The controls for choosing the sort column, direction and type filter.
fn selection_form(query: TransactionQuery) -> Markup {
    let sort_options = [(SortKey::Date, "Date"), (SortKey::Amount, "Amount")];
    let order_options = [
        (SortOrder::Descending, "Descending"),
        (SortOrder::Ascending, "Ascending"),
    ];
    let type_options = [
        (TypeFilter::All, "All"),
        (TypeFilter::Income, "Income"),
        (TypeFilter::Expense, "Expense"),
    ];

    html! {
        form
            method="get"
            action=(endpoints::LIST_VIEW)
            class="flex flex-wrap items-end gap-4"
        {
            div
            {
                label for="sort" class=(FORM_LABEL_STYLE) { "Sort by" }
                select id="sort" name="sort" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (sort_key, label) in sort_options {
                        option
                            value=(sort_key.as_query_value())
                            selected[sort_key == query.sort_key]
                        {
                            (label)
                        }
                    }
                }
            }

            div
            {
                label for="order" class=(FORM_LABEL_STYLE) { "Order" }
                select id="order" name="order" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (sort_order, label) in order_options {
                        option
                            value=(sort_order.as_query_value())
                            selected[sort_order == query.sort_order]
                        {
                            (label)
                        }
                    }
                }
            }

            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                select id="type" name="type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (type_filter, label) in type_options {
                        option
                            value=(type_filter.as_query_value())
                            selected[type_filter == query.type_filter]
                        {
                            (label)
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Apply" }
        }
    }
}

/// A column header that toggles sorting on `sort_key` when clicked.
fn sort_header(query: TransactionQuery, sort_key: SortKey, label: &str) -> Markup {
    let indicator = match (query.sort_key == sort_key, query.sort_order) {
        (true, SortOrder::Ascending) => " ▲",
        (true, SortOrder::Descending) => " ▼",
        (false, _) => "",
    };

    html! {
        th scope="col" class=(TABLE_CELL_STYLE)
        {
            a
                href=(sort_toggle_url(query, sort_key))
                class=(LINK_STYLE)
                data-sort=(sort_key.as_query_value())
            {
                (label) (indicator)
            }
        }
    }
}

fn transaction_table(transactions: &[Transaction], query: TransactionQuery) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md rounded"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        (sort_header(query, SortKey::Date, "Date"))
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        (sort_header(query, SortKey::Amount, "Amount"))
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="5" class="px-6 py-4 text-center"
                            {
                                "No transactions yet. "
                                (link(endpoints::ADD_VIEW, "Add one"))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (category, full_category) = truncate_graphemes(&transaction.category, MAX_CATEGORY_GRAPHEMES);
    let amount_style = match transaction.transaction_type {
        TransactionType::Income => "text-green-700 dark:text-green-300",
        TransactionType::Expense => "text-red-700 dark:text-red-300",
    };
    let edit_url = format_endpoint(endpoints::EDIT_VIEW, transaction.id);
    let delete_url = format_endpoint(endpoints::DELETE, transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) title=[full_category] { (category) }
            td class={ (TABLE_CELL_STYLE) " text-right " (amount_style) }
            {
                (format_amount(transaction.amount))
            }
            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type.label()) }
            td class={ (TABLE_CELL_STYLE) " flex gap-4" }
            {
                (link(&edit_url, "Edit"))

                form method="post" action=(delete_url)
                {
                    button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::{Query, State};
    use scraper::{ElementRef, Html, Selector};

    use crate::{
        stores::SQLiteTransactionStore,
        test_utils::{
            assert_content_type, assert_status_ok, assert_valid_html, get_test_ledger,
            parse_html_document,
        },
        transaction::{Ledger, ListQuery, TransactionForm, get_list_page},
    };

    use super::ListPageState;

    fn form(date: &str, category: &str, amount: &str, transaction_type: &str) -> TransactionForm {
        TransactionForm {
            date: Some(date.to_owned()),
            category: Some(category.to_owned()),
            amount: Some(amount.to_owned()),
            transaction_type: Some(transaction_type.to_owned()),
        }
    }

    fn ledger_with_salary_and_food() -> Ledger<SQLiteTransactionStore> {
        let mut ledger = get_test_ledger();
        ledger
            .add_transaction(&form("2024-01-01", "salary", "3000", "income"))
            .expect("Could not add transaction");
        ledger
            .add_transaction(&form("2024-01-02", "food", "500", "expense"))
            .expect("Could not add transaction");
        ledger
    }

    fn query(sort: &str, order: &str, type_filter: &str) -> ListQuery {
        ListQuery {
            sort: Some(sort.to_owned()),
            order: Some(order.to_owned()),
            type_filter: Some(type_filter.to_owned()),
        }
    }

    async fn render(ledger: Ledger<SQLiteTransactionStore>, query: ListQuery) -> Html {
        let response = get_list_page(State(ListPageState { ledger }), Query(query)).await;

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    fn text(element: ElementRef<'_>) -> String {
        element.text().collect::<String>().trim().to_owned()
    }

    /// The category column of each row in the table.
    fn categories(html: &Html) -> Vec<String> {
        let selector = Selector::parse("tbody tr[data-transaction-id] td:nth-child(2)").unwrap();
        html.select(&selector).map(text).collect()
    }

    fn total(html: &Html, id: &str) -> String {
        let selector = Selector::parse(&format!("#{id}")).unwrap();
        html.select(&selector)
            .next()
            .map(text)
            .unwrap_or_else(|| panic!("No element with id {id}"))
    }

    fn selected_value(html: &Html, name: &str) -> String {
        let selector = Selector::parse(&format!("select[name={name}] option[selected]")).unwrap();
        html.select(&selector)
            .next()
            .and_then(|option| option.value().attr("value"))
            .unwrap_or_else(|| panic!("No option selected for {name}"))
            .to_owned()
    }

    #[tokio::test]
    async fn lists_date_ascending_with_totals() {
        let html = render(ledger_with_salary_and_food(), query("date", "asc", "all")).await;

        assert_eq!(categories(&html), vec!["salary", "food"]);
        assert_eq!(total(&html, "total-income"), "3,000");
        assert_eq!(total(&html, "total-expense"), "500");
        assert_eq!(total(&html, "total-balance"), "2,500");
    }

    #[tokio::test]
    async fn defaults_to_newest_first() {
        let html = render(ledger_with_salary_and_food(), ListQuery::default()).await;

        assert_eq!(categories(&html), vec!["food", "salary"]);
        assert_eq!(selected_value(&html, "sort"), "date");
        assert_eq!(selected_value(&html, "order"), "desc");
        assert_eq!(selected_value(&html, "type"), "all");
    }

    #[tokio::test]
    async fn filters_expenses_and_totals_filtered_set() {
        let html = render(ledger_with_salary_and_food(), query("amount", "asc", "expense")).await;

        assert_eq!(categories(&html), vec!["food"]);
        assert_eq!(total(&html, "total-income"), "0");
        assert_eq!(total(&html, "total-expense"), "500");
        assert_eq!(selected_value(&html, "sort"), "amount");
        assert_eq!(selected_value(&html, "order"), "asc");
        assert_eq!(selected_value(&html, "type"), "expense");
    }

    #[tokio::test]
    async fn controls_show_fallback_for_unknown_values() {
        let html = render(ledger_with_salary_and_food(), query("category", "up", "gifts")).await;

        assert_eq!(selected_value(&html, "sort"), "amount");
        assert_eq!(selected_value(&html, "order"), "desc");
        assert_eq!(selected_value(&html, "type"), "all");
        assert_eq!(categories(&html), vec!["salary", "food"]);
    }

    #[tokio::test]
    async fn sort_header_toggles_current_order() {
        let html = render(ledger_with_salary_and_food(), query("date", "asc", "income")).await;
        let selector = Selector::parse("th a[data-sort=date]").unwrap();

        let href = html
            .select(&selector)
            .next()
            .and_then(|link| link.value().attr("href"))
            .expect("No sort link for date");

        assert_eq!(href, "/list?sort=date&order=desc&type=income");
    }

    #[tokio::test]
    async fn rows_link_to_edit_and_delete() {
        let html = render(ledger_with_salary_and_food(), query("date", "asc", "all")).await;
        let row_selector = Selector::parse("tbody tr[data-transaction-id]").unwrap();
        let link_selector = Selector::parse("a").unwrap();
        let form_selector = Selector::parse("form").unwrap();

        for row in html.select(&row_selector) {
            let id = row
                .value()
                .attr("data-transaction-id")
                .expect("Row is missing its transaction ID");
            let edit_href = row
                .select(&link_selector)
                .next()
                .and_then(|link| link.value().attr("href"));
            let delete_form = row.select(&form_selector).next().expect("No delete form");

            assert_eq!(edit_href, Some(format!("/edit/{id}").as_str()));
            assert_eq!(
                delete_form.value().attr("action"),
                Some(format!("/delete/{id}").as_str())
            );
            assert_eq!(delete_form.value().attr("method"), Some("post"));
        }
    }

    #[tokio::test]
    async fn long_category_is_truncated() {
        let mut ledger = get_test_ledger();
        let category = "a very long category name that keeps on going";
        ledger
            .add_transaction(&form("2024-01-01", category, "1", "expense"))
            .expect("Could not add transaction");

        let html = render(ledger, ListQuery::default()).await;
        let selector = Selector::parse("tbody tr[data-transaction-id] td[title]").unwrap();
        let cell = html.select(&selector).next().expect("No truncated cell");

        assert_eq!(cell.value().attr("title"), Some(category));
        assert!(text(cell).ends_with("..."));
    }

    #[tokio::test]
    async fn empty_ledger_shows_prompt() {
        let html = render(get_test_ledger(), ListQuery::default()).await;
        let selector = Selector::parse("tbody td").unwrap();

        let cell = html.select(&selector).next().expect("No table cell");

        assert!(text(cell).starts_with("No transactions yet."));
        assert_eq!(total(&html, "total-income"), "0");
        assert_eq!(total(&html, "total-expense"), "0");
    }
}
