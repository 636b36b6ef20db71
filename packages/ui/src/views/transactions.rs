//! Transactions: filter bar, paginated grid, create dialog (with optional
//! receipt parsing), and the soft-delete flow.

use std::collections::BTreeMap;

use api::{
    NormalizedError, Transaction, TransactionFilter, TransactionPayload, TransactionType,
};
use chrono::NaiveDate;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::data_grid::{DataGrid, EmptyState, GridColumn};
use crate::dropdown::{Dropdown, DropdownOption, OptionLoader};
use crate::form::{
    use_form, FormDatePicker, FormInput, FormSelect, FormTextarea, Rule, Schema, SelectChoice,
};
use crate::format::{format_date, signed_amount};
use crate::hooks::{
    use_accounts, use_categories, use_create_transaction, use_delete_transaction, use_merchants,
    use_parse_receipt, use_transactions, ReceiptUpload,
};

use super::use_display_currency;
use super::ModalOverlay;

/// Display row backing the grid; all formatting happens up front so column
/// accessors stay plain field reads.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub account: String,
    pub category: String,
    pub merchant: String,
    pub kind: String,
    pub amount: String,
}

pub(crate) fn transaction_rows(
    transactions: &[Transaction],
    currency: &str,
) -> Vec<TransactionRow> {
    transactions
        .iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: format_date(t.transaction_date),
            description: t.description.clone().unwrap_or_default(),
            account: t.account_name.clone(),
            category: t.category_name.clone().unwrap_or_default(),
            merchant: t.merchant_name.clone().unwrap_or_default(),
            kind: t.transaction_type.as_str().to_string(),
            amount: signed_amount(t.transaction_type, t.amount, currency),
        })
        .collect()
}

pub(crate) fn transaction_columns() -> Vec<GridColumn<TransactionRow>> {
    vec![
        GridColumn::new("date", "Date", |r: &TransactionRow| r.date.clone()),
        GridColumn::new("description", "Description", |r: &TransactionRow| {
            r.description.clone()
        }),
        GridColumn::new("account", "Account", |r: &TransactionRow| r.account.clone()),
        GridColumn::new("category", "Category", |r: &TransactionRow| {
            r.category.clone()
        }),
        GridColumn::new("merchant", "Merchant", |r: &TransactionRow| {
            r.merchant.clone()
        }),
        GridColumn::new("kind", "Type", |r: &TransactionRow| r.kind.clone()),
        GridColumn::new("amount", "Amount", |r: &TransactionRow| r.amount.clone()),
    ]
}

fn transaction_schema() -> Schema {
    Schema::new()
        .field("account_id", "Account", vec![Rule::Required])
        .field("transaction_type", "Type", vec![Rule::Required])
        .field(
            "amount",
            "Amount",
            vec![Rule::Required, Rule::Numeric, Rule::Min(0.01)],
        )
        .field(
            "transaction_date",
            "Date",
            vec![Rule::Required, Rule::NotAfterToday],
        )
        .field("description", "Description", vec![Rule::MaxLen(200)])
}

/// Build the request body from validated form values. `None` only when a
/// value slipped past validation (treated as a 400 by the caller).
fn transaction_payload(values: &BTreeMap<String, String>) -> Option<TransactionPayload> {
    let get = |name: &str| values.get(name).map(|v| v.trim().to_string()).unwrap_or_default();
    let optional = |name: &str| Some(get(name)).filter(|v| !v.is_empty());

    let amount: f64 = get("amount").parse().ok()?;
    let transaction_date = NaiveDate::parse_from_str(&get("transaction_date"), "%Y-%m-%d").ok()?;
    let transaction_type = TransactionType::from_str(&get("transaction_type"))?;
    let account_id = Some(get("account_id")).filter(|v| !v.is_empty())?;

    Some(TransactionPayload {
        account_id,
        category_id: optional("category_id"),
        merchant_id: optional("merchant_id"),
        amount,
        transaction_type,
        description: optional("description"),
        transaction_date,
    })
}

#[component]
pub fn TransactionsView() -> Element {
    let mut filter = use_signal(TransactionFilter::default);
    let transactions = use_transactions(filter());
    let accounts = use_accounts();
    let currency = use_display_currency();

    let mut show_create = use_signal(|| false);
    let mut selected = use_signal(|| None::<Transaction>);

    let list: Vec<Transaction> = transactions
        .data()
        .map(|t| (*t).clone())
        .unwrap_or_default();
    let rows = transaction_rows(&list, &currency);

    let account_options: Vec<DropdownOption> = accounts
        .data()
        .map(|accounts| {
            accounts
                .iter()
                .map(|a| DropdownOption::new(a.name.clone(), a.id.clone()))
                .collect()
        })
        .unwrap_or_default();
    let type_options: Vec<DropdownOption> = TransactionType::ALL
        .iter()
        .map(|t| DropdownOption::new(t.as_str(), t.as_str()))
        .collect();

    let click_list = list.clone();

    rsx! {
        div {
            class: "p-6 max-w-6xl mx-auto",
            div {
                class: "flex items-center justify-between mb-6",
                h1 { class: "m-0 text-xl font-semibold text-neutral-900", "Transactions" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| show_create.set(true),
                    "Record transaction"
                }
            }

            div {
                class: "flex items-end gap-3 mb-4 bg-white border border-neutral-200 rounded-lg p-3",
                div {
                    class: "w-48",
                    Label { html_for: "filter-account", "Account" }
                    div {
                        class: "mt-1.5",
                        Dropdown {
                            options: account_options,
                            value: filter().account_id,
                            placeholder: "All accounts",
                            searchable: true,
                            on_select: move |option: DropdownOption| {
                                filter.write().account_id = Some(option.value);
                            },
                        }
                    }
                }
                div {
                    class: "w-40",
                    Label { html_for: "filter-type", "Type" }
                    div {
                        class: "mt-1.5",
                        Dropdown {
                            options: type_options,
                            value: filter().transaction_type.map(|t| t.as_str().to_string()),
                            placeholder: "All types",
                            on_select: move |option: DropdownOption| {
                                filter.write().transaction_type = TransactionType::from_str(&option.value);
                            },
                        }
                    }
                }
                div {
                    Label { html_for: "filter-from", "From" }
                    Input {
                        id: "filter-from",
                        r#type: "date",
                        class: "mt-1.5",
                        value: filter().from.map(|d| d.to_string()).unwrap_or_default(),
                        oninput: move |evt: FormEvent| {
                            filter.write().from = NaiveDate::parse_from_str(&evt.value(), "%Y-%m-%d").ok();
                        },
                    }
                }
                div {
                    Label { html_for: "filter-to", "To" }
                    Input {
                        id: "filter-to",
                        r#type: "date",
                        class: "mt-1.5",
                        value: filter().to.map(|d| d.to_string()).unwrap_or_default(),
                        oninput: move |evt: FormEvent| {
                            filter.write().to = NaiveDate::parse_from_str(&evt.value(), "%Y-%m-%d").ok();
                        },
                    }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| filter.set(TransactionFilter::default()),
                    "Clear"
                }
            }

            div {
                class: "bg-white border border-neutral-200 rounded-lg",
                DataGrid::<TransactionRow> {
                    columns: transaction_columns(),
                    rows,
                    loading: transactions.loading(),
                    empty: EmptyState::new(
                        "No transactions",
                        "Nothing matches the current filters.",
                    ).action("Record transaction"),
                    on_empty_action: move |_| show_create.set(true),
                    on_row_click: move |index: usize| {
                        selected.set(click_list.get(index).cloned());
                    },
                }
            }

            if show_create() {
                ModalOverlay {
                    on_close: move |_| show_create.set(false),
                    TransactionFormDialog {
                        on_close: move |_| show_create.set(false),
                    }
                }
            }

            if let Some(transaction) = selected() {
                ModalOverlay {
                    on_close: move |_| selected.set(None),
                    TransactionDetailDialog {
                        transaction,
                        currency: currency.clone(),
                        on_close: move |_| selected.set(None),
                    }
                }
            }
        }
    }
}

#[component]
fn TransactionDetailDialog(
    transaction: Transaction,
    currency: String,
    on_close: EventHandler<()>,
) -> Element {
    let delete = use_delete_transaction();
    let delete_id = transaction.id.clone();

    let handle_delete = move |_| {
        let delete = delete.clone();
        let id = delete_id.clone();
        spawn(async move {
            if delete.run(id).await.is_ok() {
                on_close.call(());
            }
        });
    };

    rsx! {
        div {
            class: "p-6",
            h2 { class: "m-0 mb-1 text-lg font-semibold text-neutral-800",
                "{signed_amount(transaction.transaction_type, transaction.amount, &currency)}"
            }
            p { class: "m-0 mb-5 text-sm text-neutral-500",
                "{transaction.transaction_type.as_str()} · {format_date(transaction.transaction_date)}"
            }

            dl {
                class: "text-sm text-neutral-800",
                DetailRow { label: "Account", value: transaction.account_name.clone() }
                DetailRow { label: "Category", value: transaction.category_name.clone().unwrap_or_default() }
                DetailRow { label: "Merchant", value: transaction.merchant_name.clone().unwrap_or_default() }
                DetailRow { label: "Description", value: transaction.description.clone().unwrap_or_default() }
            }

            div {
                class: "flex gap-2 mt-5",
                Button {
                    variant: ButtonVariant::Danger,
                    onclick: handle_delete,
                    "Delete transaction"
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_close.call(()),
                    "Close"
                }
            }
        }
    }
}

#[component]
fn DetailRow(label: String, value: String) -> Element {
    if value.is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            class: "flex justify-between py-1.5 border-b border-neutral-100",
            dt { class: "text-neutral-500", "{label}" }
            dd { class: "m-0", "{value}" }
        }
    }
}

#[component]
fn TransactionFormDialog(on_close: EventHandler<()>) -> Element {
    let form = use_form(transaction_schema(), &[]);
    let accounts = use_accounts();
    let categories = use_categories();
    let merchants = use_merchants();
    let create = use_create_transaction();
    let parse = use_parse_receipt();
    let mut parsing = use_signal(|| false);

    let account_choices: Vec<SelectChoice> = accounts
        .data()
        .map(|accounts| {
            accounts
                .iter()
                .filter(|a| a.is_active)
                .map(|a| SelectChoice::new(a.name.clone(), a.id.clone()))
                .collect()
        })
        .unwrap_or_default();
    let category_choices: Vec<SelectChoice> = categories
        .data()
        .map(|categories| {
            categories
                .iter()
                .map(|c| SelectChoice::new(c.name.clone(), c.id.clone()))
                .collect()
        })
        .unwrap_or_default();
    let type_choices: Vec<SelectChoice> = TransactionType::ALL
        .iter()
        .map(|t| SelectChoice::new(t.as_str(), t.as_str()))
        .collect();

    // Merchant search: the reference list is fetched once and filtered
    // against the typed query on each debounced fetch.
    let merchant_loader = OptionLoader::new(move |query: String| {
        let merchants = merchants.clone();
        async move {
            let all = merchants.data().map(|m| (*m).clone()).unwrap_or_default();
            let needle = query.trim().to_lowercase();
            Ok(all
                .iter()
                .filter(|m| m.name.to_lowercase().contains(&needle))
                .map(|m| DropdownOption::new(m.name.clone(), m.id.clone()))
                .collect())
        }
    });

    let merchant_form = form.clone();
    let receipt_form = form.clone();
    let handle_receipt = move |evt: FormEvent| {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().first().cloned() else {
            return;
        };
        let parse = parse.clone();
        let form = receipt_form.clone();
        spawn(async move {
            parsing.set(true);
            if let Some(bytes) = engine.read_file(&name).await {
                let upload = ReceiptUpload {
                    file_name: name,
                    bytes,
                };
                if let Ok(draft) = parse.run(upload).await {
                    if let Some(amount) = draft.amount {
                        form.set_value("amount", format!("{amount:.2}"));
                    }
                    if let Some(date) = draft.transaction_date {
                        form.set_value("transaction_date", date.to_string());
                    }
                    if let Some(description) = draft.description {
                        form.set_value("description", description);
                    }
                }
            }
            parsing.set(false);
        });
    };

    let submit_form = form.clone();
    let handle_submit = move |_| {
        let form = submit_form.clone();
        let create = create.clone();
        spawn(async move {
            let ok = form
                .submit(|values| {
                    let payload = transaction_payload(&values);
                    async move {
                        match payload {
                            Some(payload) => create.run(payload).await.map(|_| ()),
                            None => Err(NormalizedError {
                                code: "FORM_INVALID".to_string(),
                                message: "Check the highlighted fields and try again".to_string(),
                                status: 400,
                                field_errors: None,
                                action: None,
                            }),
                        }
                    }
                })
                .await;
            if ok {
                on_close.call(());
            }
        });
    };

    rsx! {
        div {
            class: "p-6",
            h2 { class: "m-0 mb-5 text-lg font-semibold text-neutral-800", "Record transaction" }

            div {
                class: "mb-4 p-3 bg-neutral-50 border border-dashed border-neutral-300 rounded",
                Label { html_for: "receipt-file", "Parse from a receipt" }
                input {
                    id: "receipt-file",
                    r#type: "file",
                    accept: "image/*",
                    class: "mt-1.5 text-sm",
                    onchange: handle_receipt,
                }
                p {
                    class: "m-0 mt-1 text-[0.8125rem] text-neutral-500",
                    if parsing() { "Reading the receipt…" } else { "Amount, date and description will be pre-filled." }
                }
            }

            FormSelect {
                form: form.clone(),
                name: "account_id",
                label: "Account",
                choices: account_choices,
            }
            FormSelect {
                form: form.clone(),
                name: "transaction_type",
                label: "Type",
                choices: type_choices,
            }
            FormInput {
                form: form.clone(),
                name: "amount",
                label: "Amount",
                input_type: "number",
                placeholder: "0.00",
            }
            FormDatePicker {
                form: form.clone(),
                name: "transaction_date",
                label: "Date",
            }
            FormSelect {
                form: form.clone(),
                name: "category_id",
                label: "Category",
                choices: category_choices,
            }
            div {
                class: "mb-4",
                Label { html_for: "merchant-search", "Merchant" }
                div {
                    class: "mt-1.5",
                    AsyncMerchantSearch {
                        loader: merchant_loader,
                        on_pick: move |option: DropdownOption| {
                            merchant_form.set_value("merchant_id", option.value);
                        },
                    }
                }
            }
            FormTextarea {
                form: form.clone(),
                name: "description",
                label: "Description",
                placeholder: "What was this for?",
            }

            if let Some(error) = form.submit_error() {
                p { class: "text-[0.8125rem] text-red-600 mb-3", "{error.human_message()}" }
            }

            div {
                class: "flex gap-2 mt-5",
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: form.is_submitting(),
                    onclick: handle_submit,
                    if form.is_submitting() { "Saving…" } else { "Save" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
            }
        }
    }
}

/// Thin wrapper keeping the async dropdown usable inside the form layout.
#[component]
fn AsyncMerchantSearch(loader: OptionLoader, on_pick: EventHandler<DropdownOption>) -> Element {
    rsx! {
        crate::dropdown::AsyncDropdown {
            loader,
            placeholder: "Search merchants…",
            min_search_length: 2,
            on_select: move |option| on_pick.call(option),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_values() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("account_id".to_string(), "acct-1".to_string()),
            ("transaction_type".to_string(), "DEBIT".to_string()),
            ("amount".to_string(), "75".to_string()),
            ("transaction_date".to_string(), "2026-01-15".to_string()),
        ])
    }

    #[test]
    fn payload_builds_from_validated_values() {
        let payload = transaction_payload(&valid_values()).unwrap();
        assert_eq!(payload.account_id, "acct-1");
        assert_eq!(payload.transaction_type, TransactionType::Debit);
        assert_eq!(payload.amount, 75.0);
        assert_eq!(payload.category_id, None);
        assert_eq!(payload.description, None);
    }

    #[test]
    fn payload_rejects_unparsable_values() {
        let mut values = valid_values();
        values.insert("amount".to_string(), "seventy five".to_string());
        assert!(transaction_payload(&values).is_none());

        let mut values = valid_values();
        values.insert("transaction_type".to_string(), "BARTER".to_string());
        assert!(transaction_payload(&values).is_none());

        let mut values = valid_values();
        values.insert("account_id".to_string(), "  ".to_string());
        assert!(transaction_payload(&values).is_none());
    }

    #[test]
    fn rows_render_signed_amounts() {
        use chrono::Utc;
        let t = Transaction {
            id: "t1".to_string(),
            account_id: "a1".to_string(),
            account_name: "Salary".to_string(),
            category_id: None,
            category_name: None,
            merchant_id: None,
            merchant_name: Some("Zomato".to_string()),
            amount: 75.0,
            transaction_type: TransactionType::Debit,
            description: None,
            transaction_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            created_at: Utc::now(),
            deleted_at: None,
        };
        let mut income = t.clone();
        income.id = "t2".to_string();
        income.transaction_type = TransactionType::Income;

        let rows = transaction_rows(&[t, income], "INR");
        assert!(rows[0].amount.starts_with('-'));
        assert!(rows[0].amount.contains("75.00"));
        assert!(rows[1].amount.starts_with('+'));
        assert_eq!(rows[0].merchant, "Zomato");
    }
}
