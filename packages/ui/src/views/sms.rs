//! SMS ingestion log: grid of upstream artifacts, a detail view, and the
//! manual ingest form for messages the pipeline missed.

use api::{ParsingStatus, SmsLog};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::data_grid::{DataGrid, EmptyState, GridColumn};
use crate::form::{use_form, FormInput, FormTextarea, Rule, Schema};
use crate::hooks::{use_ingest_sms, use_sms_log, use_sms_logs};

use super::ModalOverlay;

#[derive(Clone, Debug, PartialEq)]
struct SmsRow {
    id: String,
    received: String,
    sender: String,
    preview: String,
    status: String,
    parser: String,
}

fn sms_rows(logs: &[SmsLog]) -> Vec<SmsRow> {
    logs.iter()
        .map(|log| SmsRow {
            id: log.id.clone(),
            received: log.received_at.format("%d %b %Y %H:%M").to_string(),
            sender: log.sender.clone(),
            preview: preview(&log.message),
            status: log.parsing_status.label().to_string(),
            parser: if log.llm_parsed { "LLM" } else { "Rules" }.to_string(),
        })
        .collect()
}

/// First line of the message, truncated for the grid.
fn preview(message: &str) -> String {
    let line = message.lines().next().unwrap_or_default();
    let mut out: String = line.chars().take(60).collect();
    if line.chars().count() > 60 {
        out.push('…');
    }
    out
}

fn sms_columns() -> Vec<GridColumn<SmsRow>> {
    vec![
        GridColumn::new("received", "Received", |r: &SmsRow| r.received.clone()),
        GridColumn::new("sender", "Sender", |r: &SmsRow| r.sender.clone()),
        GridColumn::new("preview", "Message", |r: &SmsRow| r.preview.clone()),
        GridColumn::new("status", "Status", |r: &SmsRow| r.status.clone()),
        GridColumn::new("parser", "Parser", |r: &SmsRow| r.parser.clone()),
    ]
}

fn ingest_schema() -> Schema {
    Schema::new()
        .field("sender", "Sender", vec![Rule::Required, Rule::MaxLen(20)])
        .field(
            "message",
            "Message",
            vec![Rule::Required, Rule::MinLen(10)],
        )
}

#[component]
pub fn SmsView(on_open: EventHandler<String>) -> Element {
    let logs = use_sms_logs();
    let mut show_ingest = use_signal(|| false);

    let list: Vec<SmsLog> = logs.data().map(|l| (*l).clone()).unwrap_or_default();
    let rows = sms_rows(&list);
    let click_list = list.clone();

    rsx! {
        div {
            class: "p-6 max-w-6xl mx-auto",
            div {
                class: "flex items-center justify-between mb-6",
                h1 { class: "m-0 text-xl font-semibold text-neutral-900", "SMS logs" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| show_ingest.set(true),
                    "Add message"
                }
            }

            div {
                class: "bg-white border border-neutral-200 rounded-lg",
                DataGrid {
                    columns: sms_columns(),
                    rows,
                    loading: logs.loading(),
                    empty: EmptyState::new(
                        "No messages",
                        "Bank SMS picked up by the ingestion pipeline land here.",
                    ).action("Add one manually"),
                    on_empty_action: move |_| show_ingest.set(true),
                    on_row_click: move |index: usize| {
                        if let Some(log) = click_list.get(index) {
                            on_open.call(log.id.clone());
                        }
                    },
                }
            }

            if show_ingest() {
                ModalOverlay {
                    on_close: move |_| show_ingest.set(false),
                    IngestDialog {
                        on_close: move |_| show_ingest.set(false),
                    }
                }
            }
        }
    }
}

#[component]
fn IngestDialog(on_close: EventHandler<()>) -> Element {
    let form = use_form(ingest_schema(), &[]);
    let ingest = use_ingest_sms();

    let submit_form = form.clone();
    let handle_submit = move |_| {
        let form = submit_form.clone();
        let ingest = ingest.clone();
        spawn(async move {
            let ok = form
                .submit(|values| {
                    let payload = api::SmsPayload {
                        sender: values.get("sender").cloned().unwrap_or_default(),
                        message: values.get("message").cloned().unwrap_or_default(),
                    };
                    async move { ingest.run(payload).await.map(|_| ()) }
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
            h2 { class: "m-0 mb-1 text-lg font-semibold text-neutral-800", "Add a message" }
            p {
                class: "m-0 mb-5 text-sm text-neutral-500",
                "Paste a bank SMS the pipeline missed; it will be queued for parsing."
            }

            FormInput {
                form: form.clone(),
                name: "sender",
                label: "Sender",
                placeholder: "VM-HDFCBK",
            }
            FormTextarea {
                form: form.clone(),
                name: "message",
                label: "Message",
                rows: 6,
                placeholder: "Rs 450.00 debited from a/c **1234…",
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
                    if form.is_submitting() { "Queueing…" } else { "Queue for parsing" }
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

#[component]
pub fn SmsDetailView(id: String, on_back: EventHandler<()>) -> Element {
    let log = use_sms_log(id);

    rsx! {
        div {
            class: "p-6 max-w-3xl mx-auto",
            button {
                r#type: "button",
                class: "text-sm text-neutral-500 hover:text-neutral-800 mb-4",
                onclick: move |_| on_back.call(()),
                "← All messages"
            }

            if log.loading() {
                div { class: "py-16 text-center text-sm text-neutral-500", "Loading…" }
            } else if let Some(log) = log.data() {
                div {
                    class: "bg-white border border-neutral-200 rounded-lg p-5",
                    div {
                        class: "flex items-center justify-between mb-4",
                        div {
                            h1 { class: "m-0 text-lg font-semibold text-neutral-900", "{log.sender}" }
                            p {
                                class: "m-0 mt-0.5 text-[0.8125rem] text-neutral-500",
                                {format!("Received {}", log.received_at.format("%d %b %Y %H:%M"))}
                            }
                        }
                        span {
                            class: match log.parsing_status {
                                ParsingStatus::Parsed => "text-[0.6875rem] uppercase tracking-wide bg-emerald-600 text-white rounded px-1.5 py-0.5",
                                ParsingStatus::Pending => "text-[0.6875rem] uppercase tracking-wide bg-amber-500 text-white rounded px-1.5 py-0.5",
                                ParsingStatus::Failed => "text-[0.6875rem] uppercase tracking-wide bg-red-600 text-white rounded px-1.5 py-0.5",
                                ParsingStatus::Ignored => "text-[0.6875rem] uppercase tracking-wide bg-neutral-400 text-white rounded px-1.5 py-0.5",
                            },
                            "{log.parsing_status.label()}"
                        }
                    }
                    pre {
                        class: "m-0 p-3 bg-neutral-50 border border-neutral-200 rounded text-sm whitespace-pre-wrap font-[inherit]",
                        "{log.message}"
                    }
                    p {
                        class: "m-0 mt-3 text-[0.8125rem] text-neutral-500",
                        if log.llm_parsed {
                            "Parsed by the language-model fallback."
                        } else {
                            "Parsed by the rule-based extractor."
                        }
                    }
                }
            } else if let Some(error) = log.error() {
                div {
                    class: "py-16 text-center text-sm text-neutral-600",
                    "{error.human_message()}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_first_lines() {
        let long = "a".repeat(80);
        let p = preview(&long);
        assert_eq!(p.chars().count(), 61);
        assert!(p.ends_with('…'));

        assert_eq!(preview("short one\nsecond line"), "short one");
    }
}
