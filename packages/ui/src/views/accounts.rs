//! Accounts: summary header, account cards, and the create/edit dialog.

use std::collections::BTreeMap;

use api::{Account, AccountPayload, AccountType};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::form::{use_form, FormInput, FormSelect, FormSwitch, Rule, Schema, SelectChoice};
use crate::format::{account_summary, format_currency};
use crate::hooks::{use_accounts, use_banks, use_create_account, use_update_account};

use super::use_display_currency;
use super::ModalOverlay;

fn account_schema() -> Schema {
    Schema::new()
        .field("name", "Account name", vec![Rule::Required, Rule::MaxLen(80)])
        .field(
            "account_number",
            "Account number",
            vec![Rule::Required, Rule::MinLen(4), Rule::MaxLen(32)],
        )
        .field("account_type", "Account type", vec![Rule::Required])
        .field("bank_code", "Bank", vec![Rule::Required])
}

fn account_payload(values: &BTreeMap<String, String>) -> AccountPayload {
    let get = |name: &str| values.get(name).map(|v| v.trim().to_string()).unwrap_or_default();
    AccountPayload {
        name: get("name"),
        account_number: get("account_number"),
        account_type: AccountType::from_str(&get("account_type")),
        bank_code: get("bank_code"),
        is_primary: get("is_primary") == "true",
        is_active: get("is_active") != "false",
    }
}

#[component]
pub fn AccountsView(on_open_account: EventHandler<String>) -> Element {
    let accounts = use_accounts();
    let currency = use_display_currency();
    let mut dialog = use_signal(|| None::<Option<Account>>);

    let list: Vec<Account> = accounts
        .data()
        .map(|accounts| (*accounts).clone())
        .unwrap_or_default();
    let summary = account_summary(&list);
    let retry = accounts.clone();

    rsx! {
        div {
            class: "p-6 max-w-5xl mx-auto",
            div {
                class: "flex items-center justify-between mb-6",
                h1 { class: "m-0 text-xl font-semibold text-neutral-900", "Accounts" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| dialog.set(Some(None)),
                    "New account"
                }
            }

            div {
                class: "grid grid-cols-2 gap-4 mb-6",
                div {
                    class: "bg-white border border-neutral-200 rounded-lg p-4",
                    p { class: "m-0 text-[0.8125rem] text-neutral-500", "Total balance" }
                    p {
                        class: "m-0 mt-1 text-2xl font-semibold text-neutral-900",
                        "{format_currency(summary.total_balance, &currency)}"
                    }
                }
                div {
                    class: "bg-white border border-neutral-200 rounded-lg p-4",
                    p { class: "m-0 text-[0.8125rem] text-neutral-500", "Active accounts" }
                    p {
                        class: "m-0 mt-1 text-2xl font-semibold text-neutral-900",
                        "{summary.active} of {summary.total}"
                    }
                }
            }

            if accounts.loading() {
                div { class: "py-16 text-center text-sm text-neutral-500", "Loading accounts…" }
            } else if let Some(error) = accounts.error() {
                div {
                    class: "py-16 text-center",
                    p { class: "m-0 mb-3 text-sm text-neutral-600", "{error.human_message()}" }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| retry.refetch(),
                        "Try again"
                    }
                }
            } else if list.is_empty() {
                div {
                    class: "py-16 text-center",
                    h3 { class: "m-0 mb-1 text-base font-medium text-neutral-800", "No accounts yet" }
                    p { class: "m-0 text-sm text-neutral-500", "Add your first bank account to start tracking." }
                }
            } else {
                div {
                    class: "grid grid-cols-2 gap-4",
                    for account in list {
                        AccountCard {
                            key: "{account.id}",
                            account: account.clone(),
                            currency: currency.clone(),
                            on_open: move |id| on_open_account.call(id),
                            on_edit: move |account| dialog.set(Some(Some(account))),
                        }
                    }
                }
            }

            if let Some(editing) = dialog() {
                ModalOverlay {
                    on_close: move |_| dialog.set(None),
                    AccountFormDialog {
                        account: editing,
                        on_close: move |_| dialog.set(None),
                    }
                }
            }
        }
    }
}

#[component]
fn AccountCard(
    account: Account,
    currency: String,
    on_open: EventHandler<String>,
    on_edit: EventHandler<Account>,
) -> Element {
    let masked = mask_account_number(&account.account_number);
    let open_id = account.id.clone();
    let edit_account = account.clone();

    rsx! {
        div {
            class: if account.is_active {
                "bg-white border border-neutral-200 rounded-lg p-4 cursor-pointer hover:border-primary-500"
            } else {
                "bg-neutral-50 border border-neutral-200 rounded-lg p-4 cursor-pointer opacity-70"
            },
            onclick: move |_| on_open.call(open_id.clone()),
            div {
                class: "flex items-start justify-between",
                div {
                    p { class: "m-0 text-sm font-medium text-neutral-900", "{account.name}" }
                    p {
                        class: "m-0 mt-0.5 text-[0.8125rem] text-neutral-500",
                        "{account.bank.name} · {masked} · {account.account_type.label()}"
                    }
                }
                div {
                    class: "flex items-center gap-2",
                    if account.is_primary {
                        span {
                            class: "text-[0.6875rem] uppercase tracking-wide bg-primary-600 text-white rounded px-1.5 py-0.5",
                            "Primary"
                        }
                    }
                    if !account.is_active {
                        span {
                            class: "text-[0.6875rem] uppercase tracking-wide bg-neutral-400 text-white rounded px-1.5 py-0.5",
                            "Inactive"
                        }
                    }
                }
            }
            div {
                class: "flex items-end justify-between mt-4",
                p {
                    class: "m-0 text-lg font-semibold text-neutral-900",
                    "{format_currency(account.current_balance, &currency)}"
                }
                button {
                    r#type: "button",
                    class: "text-sm text-primary-600 hover:underline",
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        on_edit.call(edit_account.clone());
                    },
                    "Edit"
                }
            }
        }
    }
}

/// Everything but the last four digits is masked.
fn mask_account_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().collect();
    if digits.len() <= 4 {
        return number.to_string();
    }
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("••{tail}")
}

#[component]
fn AccountFormDialog(account: Option<Account>, on_close: EventHandler<()>) -> Element {
    let editing = account.is_some();
    let account_id = account.as_ref().map(|a| a.id.clone()).unwrap_or_default();

    let defaults: Vec<(String, String)> = match &account {
        Some(a) => vec![
            ("name".to_string(), a.name.clone()),
            ("account_number".to_string(), a.account_number.clone()),
            ("account_type".to_string(), a.account_type.as_str().to_string()),
            ("bank_code".to_string(), a.bank.code.clone()),
            ("is_primary".to_string(), a.is_primary.to_string()),
            ("is_active".to_string(), a.is_active.to_string()),
        ],
        None => vec![("is_active".to_string(), "true".to_string())],
    };
    let default_refs: Vec<(&str, &str)> = defaults
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let form = use_form(account_schema(), &default_refs);

    let banks = use_banks();
    let bank_choices: Vec<SelectChoice> = banks
        .data()
        .map(|banks| {
            banks
                .iter()
                .map(|b| SelectChoice::new(b.name.clone(), b.code.clone()))
                .collect()
        })
        .unwrap_or_default();
    let type_choices: Vec<SelectChoice> = AccountType::ALL
        .iter()
        .map(|t| SelectChoice::new(t.label(), t.as_str()))
        .collect();

    let create = use_create_account();
    let update = use_update_account(account_id);

    let submit_form = form.clone();
    let handle_submit = move |_| {
        let form = submit_form.clone();
        let create = create.clone();
        let update = update.clone();
        spawn(async move {
            let ok = form
                .submit(|values| {
                    let payload = account_payload(&values);
                    async move {
                        if editing {
                            update.run(payload).await.map(|_| ())
                        } else {
                            create.run(payload).await.map(|_| ())
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
            h2 {
                class: "m-0 mb-5 text-lg font-semibold text-neutral-800",
                if editing { "Edit account" } else { "New account" }
            }

            FormInput {
                form: form.clone(),
                name: "name",
                label: "Account name",
                placeholder: "Salary account",
            }
            FormInput {
                form: form.clone(),
                name: "account_number",
                label: "Account number",
                placeholder: "XXXX XXXX 1234",
            }
            FormSelect {
                form: form.clone(),
                name: "account_type",
                label: "Account type",
                choices: type_choices,
            }
            FormSelect {
                form: form.clone(),
                name: "bank_code",
                label: "Bank",
                choices: bank_choices,
            }
            FormSwitch {
                form: form.clone(),
                name: "is_primary",
                label: "Primary account",
                description: "Shown first and used as the default for new transactions.",
            }
            FormSwitch {
                form: form.clone(),
                name: "is_active",
                label: "Active",
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
                    if form.is_submitting() { "Saving…" } else if editing { "Save changes" } else { "Create account" }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_reads_trimmed_values_and_flags() {
        let mut values = BTreeMap::new();
        values.insert("name".to_string(), "  Salary  ".to_string());
        values.insert("account_number".to_string(), "00123456".to_string());
        values.insert("account_type".to_string(), "CREDIT_CARD".to_string());
        values.insert("bank_code".to_string(), "HDFC".to_string());
        values.insert("is_primary".to_string(), "true".to_string());

        let payload = account_payload(&values);
        assert_eq!(payload.name, "Salary");
        assert_eq!(payload.account_type, Some(AccountType::CreditCard));
        assert!(payload.is_primary);
        // Absent switch defaults to active.
        assert!(payload.is_active);
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask_account_number("1234567890"), "••7890");
        assert_eq!(mask_account_number("123"), "123");
    }
}
