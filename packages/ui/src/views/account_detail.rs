//! Single-account view: header with balance and flags, recent activity,
//! and the delete flow.

use api::TransactionFilter;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::data_grid::{DataGrid, EmptyState};
use crate::format::format_currency;
use crate::hooks::{use_account, use_delete_account, use_transactions};

use super::transactions::{transaction_columns, transaction_rows};
use super::use_display_currency;
use super::ModalOverlay;

#[component]
pub fn AccountDetailView(id: String, on_back: EventHandler<()>) -> Element {
    let account = use_account(id.clone());
    let transactions = use_transactions(TransactionFilter {
        account_id: Some(id.clone()),
        ..Default::default()
    });
    let delete = use_delete_account();
    let currency = use_display_currency();
    let mut confirm_delete = use_signal(|| false);

    let rows = transactions
        .data()
        .map(|t| transaction_rows(&t, &currency))
        .unwrap_or_default();

    let delete_id = id.clone();
    let handle_delete = move |_| {
        let delete = delete.clone();
        let id = delete_id.clone();
        spawn(async move {
            if delete.run(id).await.is_ok() {
                on_back.call(());
            }
        });
    };

    rsx! {
        div {
            class: "p-6 max-w-5xl mx-auto",
            button {
                r#type: "button",
                class: "text-sm text-neutral-500 hover:text-neutral-800 mb-4",
                onclick: move |_| on_back.call(()),
                "← All accounts"
            }

            if account.loading() {
                div { class: "py-16 text-center text-sm text-neutral-500", "Loading…" }
            } else if let Some(account) = account.data() {
                div {
                    class: "bg-white border border-neutral-200 rounded-lg p-5 mb-6",
                    div {
                        class: "flex items-start justify-between",
                        div {
                            h1 { class: "m-0 text-xl font-semibold text-neutral-900", "{account.name}" }
                            p {
                                class: "m-0 mt-1 text-sm text-neutral-500",
                                "{account.bank.name} · {account.account_number} · {account.account_type.label()}"
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
                            class: "m-0 text-2xl font-semibold text-neutral-900",
                            "{format_currency(account.current_balance, &currency)}"
                        }
                        Button {
                            variant: ButtonVariant::Danger,
                            onclick: move |_| confirm_delete.set(true),
                            "Delete account"
                        }
                    }
                }

                h2 { class: "m-0 mb-3 text-base font-medium text-neutral-800", "Recent activity" }
                div {
                    class: "bg-white border border-neutral-200 rounded-lg",
                    DataGrid {
                        columns: transaction_columns(),
                        rows,
                        loading: transactions.loading(),
                        empty: EmptyState::new(
                            "No transactions",
                            "Nothing has been recorded against this account yet.",
                        ),
                        page_size: 25,
                    }
                }
            } else if let Some(error) = account.error() {
                div {
                    class: "py-16 text-center text-sm text-neutral-600",
                    "{error.human_message()}"
                }
            }

            if confirm_delete() {
                ModalOverlay {
                    on_close: move |_| confirm_delete.set(false),
                    div {
                        class: "p-6",
                        h2 { class: "m-0 mb-2 text-lg font-semibold text-neutral-800", "Delete this account?" }
                        p {
                            class: "m-0 mb-5 text-sm text-neutral-600",
                            "Its transactions stay on record, but the account disappears from every list."
                        }
                        div {
                            class: "flex gap-2",
                            Button {
                                variant: ButtonVariant::Danger,
                                onclick: handle_delete,
                                "Delete"
                            }
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: move |_| confirm_delete.set(false),
                                "Keep it"
                            }
                        }
                    }
                }
            }
        }
    }
}
