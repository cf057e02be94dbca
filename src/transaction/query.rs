//! Parses the sort and filter selection of the ledger page from its query string.

use serde::{Deserialize, Serialize};

use crate::{
    endpoints,
    stores::{SortKey, SortOrder, TransactionQuery, TypeFilter},
};

/// The raw query parameters accepted by the ledger page.
///
/// Missing parameters select the defaults: newest first, all types.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    /// The column to sort by, "date" or "amount".
    pub sort: Option<String>,
    /// The sort direction, "asc" or "desc".
    pub order: Option<String>,
    /// The transaction types to show, "all", "income" or "expense".
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
}

impl ListQuery {
    /// Resolve the raw parameters into a store query.
    ///
    /// Unrecognized values never fail the request, they fall back as follows:
    /// any sort other than "date" sorts by amount, any order other than "asc"
    /// sorts descending, and any type other than "income" or "expense" shows
    /// all transactions. Each fallback is logged as a warning.
    pub fn selection(&self) -> TransactionQuery {
        TransactionQuery {
            sort_key: parse_sort_key(self.sort.as_deref()),
            sort_order: parse_sort_order(self.order.as_deref()),
            type_filter: parse_type_filter(self.type_filter.as_deref()),
        }
    }
}

fn parse_sort_key(value: Option<&str>) -> SortKey {
    match value {
        None | Some("date") => SortKey::Date,
        Some("amount") => SortKey::Amount,
        Some(other) => {
            tracing::warn!("Unrecognized sort \"{other}\", sorting by amount");
            SortKey::Amount
        }
    }
}

fn parse_sort_order(value: Option<&str>) -> SortOrder {
    match value {
        Some("asc") => SortOrder::Ascending,
        None | Some("desc") => SortOrder::Descending,
        Some(other) => {
            tracing::warn!("Unrecognized order \"{other}\", sorting in descending order");
            SortOrder::Descending
        }
    }
}

fn parse_type_filter(value: Option<&str>) -> TypeFilter {
    match value {
        None | Some("all") => TypeFilter::All,
        Some("income") => TypeFilter::Income,
        Some("expense") => TypeFilter::Expense,
        Some(other) => {
            tracing::warn!("Unrecognized type \"{other}\", showing all transactions");
            TypeFilter::All
        }
    }
}

#[derive(Serialize)]
struct ListQueryParams<'a> {
    sort: &'a str,
    order: &'a str,
    #[serde(rename = "type")]
    type_filter: &'a str,
}

/// The URL of the ledger page with `query` selected.
pub fn list_url(query: TransactionQuery) -> String {
    let params = ListQueryParams {
        sort: query.sort_key.as_query_value(),
        order: query.sort_order.as_query_value(),
        type_filter: query.type_filter.as_query_value(),
    };

    match serde_urlencoded::to_string(&params) {
        Ok(query_string) => format!("{}?{query_string}", endpoints::LIST_VIEW),
        Err(error) => {
            tracing::error!("Could not encode ledger query {query:?}: {error}");
            endpoints::LIST_VIEW.to_owned()
        }
    }
}

/// The URL for clicking on the column header `sort_key`.
///
/// Clicking the column that is already sorted flips the direction, clicking
/// another column sorts by it in descending order. The type filter is kept.
pub fn sort_toggle_url(current: TransactionQuery, sort_key: SortKey) -> String {
    let sort_order = if current.sort_key == sort_key {
        current.sort_order.reversed()
    } else {
        SortOrder::Descending
    };

    list_url(TransactionQuery {
        sort_key,
        sort_order,
        ..current
    })
}
