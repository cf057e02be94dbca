//! The transaction form shared by the add and edit pages.

use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    error::ValidationError,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
    },
    transaction::{NewTransaction, Transaction, TransactionType},
};

/// The raw form data submitted when adding or editing a transaction.
///
/// Every field is kept as text so that an invalid submission can be shown
/// back to the user exactly as they typed it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionForm {
    /// The date in the format YYYY-MM-DD.
    #[serde(default)]
    pub date: Option<String>,
    /// The free-form category label.
    #[serde(default)]
    pub category: Option<String>,
    /// The amount as a whole number.
    #[serde(default)]
    pub amount: Option<String>,
    /// Either "income" or "expense".
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
}

impl TransactionForm {
    /// An empty form with `date` filled in.
    pub fn with_date(date: Date) -> Self {
        Self {
            date: Some(date.to_string()),
            ..Default::default()
        }
    }

    /// Parse the form into a transaction that can be stored.
    ///
    /// Fields are checked in the order date, category, amount, type and the
    /// first problem found is returned.
    ///
    /// # Errors
    /// Returns a [ValidationError] if a field is missing, blank or cannot be parsed.
    pub fn validate(&self) -> Result<NewTransaction, ValidationError> {
        let date = required(&self.date, "Date")?;
        let date = Date::parse(date, format_description!("[year]-[month]-[day]"))
            .map_err(|_| ValidationError::InvalidDate(date.to_owned()))?;

        let category = required(&self.category, "Category")?.to_owned();

        let amount = required(&self.amount, "Amount")?;
        let amount = amount
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidAmount(amount.to_owned()))?;

        let transaction_type =
            required(&self.transaction_type, "Type")?.parse::<TransactionType>()?;

        Ok(NewTransaction {
            date,
            category,
            amount,
            transaction_type,
        })
    }
}

impl From<&Transaction> for TransactionForm {
    fn from(transaction: &Transaction) -> Self {
        Self {
            date: Some(transaction.date.to_string()),
            category: Some(transaction.category.clone()),
            amount: Some(transaction.amount.to_string()),
            transaction_type: Some(transaction.transaction_type.as_str().to_owned()),
        }
    }
}

/// Get the trimmed value of a field, treating blank values as missing.
fn required<'a>(
    value: &'a Option<String>,
    field_name: &'static str,
) -> Result<&'a str, ValidationError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingField(field_name))
}

/// Render the transaction form.
///
/// `form` holds the values to show in the inputs, `action` is the endpoint
/// the form posts to, and a non-empty `error_message` is shown above the
/// submit button.
pub fn transaction_form_view(
    action: &str,
    form: &TransactionForm,
    error_message: &str,
    submit_label: &str,
) -> Markup {
    // Expense is checked unless income was submitted.
    let is_income = form.transaction_type.as_deref() == Some(TransactionType::Income.as_str());

    html! {
        form
            method="post"
            action=(action)
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="date"
                    class=(FORM_LABEL_STYLE)
                {
                    "Date"
                }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=[form.date.as_deref()]
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="category"
                    class=(FORM_LABEL_STYLE)
                {
                    "Category"
                }

                input
                    name="category"
                    id="category"
                    type="text"
                    placeholder="Food"
                    value=[form.category.as_deref()]
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="amount"
                    class=(FORM_LABEL_STYLE)
                {
                    "Amount"
                }

                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="1"
                    placeholder="0"
                    value=[form.amount.as_deref()]
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for transaction_type in [TransactionType::Expense, TransactionType::Income] {
                        @let id = format!("transaction-type-{}", transaction_type.as_str());
                        @let checked = (transaction_type == TransactionType::Income) == is_income;

                        div class="flex items-center gap-3"
                        {
                            input
                                name="type"
                                id=(id)
                                type="radio"
                                value=(transaction_type.as_str())
                                checked[checked]
                                required
                                class=(FORM_RADIO_INPUT_STYLE);

                            label
                                for=(id)
                                class=(FORM_RADIO_LABEL_STYLE)
                            {
                                (transaction_type.label())
                            }
                        }
                    }
                }
            }

            @if !error_message.is_empty() {
                p class=(FORM_ERROR_STYLE)
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}
