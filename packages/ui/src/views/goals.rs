//! Investment goals: progress cards and the create/edit dialog.

use std::collections::BTreeMap;

use api::{GoalPayload, GoalPriority, GoalStatus, InvestmentGoal};
use chrono::NaiveDate;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::form::{use_form, FormInput, FormSelect, Rule, Schema, SelectChoice};
use crate::format::{format_currency, format_date, format_percent};
use crate::hooks::{use_create_goal, use_investment_goals, use_update_goal};

use super::use_display_currency;
use super::ModalOverlay;

fn goal_schema() -> Schema {
    Schema::new()
        .field("name", "Goal name", vec![Rule::Required, Rule::MaxLen(80)])
        .field(
            "target_amount",
            "Target amount",
            vec![Rule::Required, Rule::Numeric, Rule::Min(0.01)],
        )
        .field(
            "current_amount",
            "Current amount",
            vec![Rule::Numeric, Rule::Min(0.0)],
        )
        .field("target_date", "Target date", vec![Rule::Required])
        .field("priority", "Priority", vec![Rule::Required])
        .field("status", "Status", vec![Rule::Required])
}

fn goal_payload(values: &BTreeMap<String, String>) -> Option<GoalPayload> {
    let get = |name: &str| values.get(name).map(|v| v.trim().to_string()).unwrap_or_default();

    let target_amount: f64 = get("target_amount").parse().ok()?;
    let current_amount: f64 = match get("current_amount").as_str() {
        "" => 0.0,
        s => s.parse().ok()?,
    };
    let target_date = NaiveDate::parse_from_str(&get("target_date"), "%Y-%m-%d").ok()?;
    let priority = GoalPriority::from_str(&get("priority"))?;
    let status = GoalStatus::from_str(&get("status"))?;
    let name = Some(get("name")).filter(|v| !v.is_empty())?;

    Some(GoalPayload {
        name,
        target_amount,
        current_amount,
        target_date,
        priority,
        status,
    })
}

#[component]
pub fn GoalsView() -> Element {
    let goals = use_investment_goals();
    let currency = use_display_currency();
    let mut dialog = use_signal(|| None::<Option<InvestmentGoal>>);

    let list: Vec<InvestmentGoal> = goals.data().map(|g| (*g).clone()).unwrap_or_default();
    let retry = goals.clone();

    rsx! {
        div {
            class: "p-6 max-w-5xl mx-auto",
            div {
                class: "flex items-center justify-between mb-6",
                h1 { class: "m-0 text-xl font-semibold text-neutral-900", "Investment goals" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| dialog.set(Some(None)),
                    "New goal"
                }
            }

            if goals.loading() {
                div { class: "py-16 text-center text-sm text-neutral-500", "Loading goals…" }
            } else if let Some(error) = goals.error() {
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
                    h3 { class: "m-0 mb-1 text-base font-medium text-neutral-800", "No goals yet" }
                    p { class: "m-0 text-sm text-neutral-500", "Set a target and watch it fill up." }
                }
            } else {
                div {
                    class: "grid grid-cols-2 gap-4",
                    for goal in list {
                        GoalCard {
                            key: "{goal.id}",
                            goal: goal.clone(),
                            currency: currency.clone(),
                            on_edit: move |goal| dialog.set(Some(Some(goal))),
                        }
                    }
                }
            }

            if let Some(editing) = dialog() {
                ModalOverlay {
                    on_close: move |_| dialog.set(None),
                    GoalFormDialog {
                        goal: editing,
                        on_close: move |_| dialog.set(None),
                    }
                }
            }
        }
    }
}

#[component]
fn GoalCard(goal: InvestmentGoal, currency: String, on_edit: EventHandler<InvestmentGoal>) -> Element {
    let percent = goal.progress_percent();
    let bar_style = format!("width: {percent}%");
    let edit_goal = goal.clone();

    rsx! {
        div {
            class: "bg-white border border-neutral-200 rounded-lg p-4",
            div {
                class: "flex items-start justify-between",
                div {
                    p { class: "m-0 text-sm font-medium text-neutral-900", "{goal.name}" }
                    p {
                        class: "m-0 mt-0.5 text-[0.8125rem] text-neutral-500",
                        "{goal.priority.label()} priority · due {format_date(goal.target_date)}"
                    }
                }
                span {
                    class: match goal.status {
                        GoalStatus::Active => "text-[0.6875rem] uppercase tracking-wide bg-primary-600 text-white rounded px-1.5 py-0.5",
                        GoalStatus::Completed => "text-[0.6875rem] uppercase tracking-wide bg-emerald-600 text-white rounded px-1.5 py-0.5",
                        GoalStatus::OnHold => "text-[0.6875rem] uppercase tracking-wide bg-amber-500 text-white rounded px-1.5 py-0.5",
                        GoalStatus::Cancelled => "text-[0.6875rem] uppercase tracking-wide bg-neutral-400 text-white rounded px-1.5 py-0.5",
                    },
                    "{goal.status.label()}"
                }
            }

            div {
                class: "mt-4",
                div {
                    class: "flex justify-between text-[0.8125rem] text-neutral-600 mb-1",
                    span {
                        "{format_currency(goal.current_amount, &currency)} of {format_currency(goal.target_amount, &currency)}"
                    }
                    span { "{format_percent(percent)}" }
                }
                div {
                    class: "h-2 bg-neutral-100 rounded-full overflow-hidden",
                    div {
                        class: "h-full bg-primary-600 rounded-full",
                        style: "{bar_style}",
                    }
                }
            }

            div {
                class: "flex justify-end mt-3",
                button {
                    r#type: "button",
                    class: "text-sm text-primary-600 hover:underline",
                    onclick: move |_| on_edit.call(edit_goal.clone()),
                    "Edit"
                }
            }
        }
    }
}

#[component]
fn GoalFormDialog(goal: Option<InvestmentGoal>, on_close: EventHandler<()>) -> Element {
    let editing = goal.as_ref().map(|g| g.id.clone());

    let defaults: Vec<(String, String)> = match &goal {
        Some(g) => vec![
            ("name".to_string(), g.name.clone()),
            ("target_amount".to_string(), g.target_amount.to_string()),
            ("current_amount".to_string(), g.current_amount.to_string()),
            ("target_date".to_string(), g.target_date.to_string()),
            ("priority".to_string(), g.priority.as_str().to_string()),
            ("status".to_string(), g.status.as_str().to_string()),
        ],
        None => vec![
            ("priority".to_string(), GoalPriority::Medium.as_str().to_string()),
            ("status".to_string(), GoalStatus::Active.as_str().to_string()),
        ],
    };
    let default_refs: Vec<(&str, &str)> = defaults
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let form = use_form(goal_schema(), &default_refs);

    let priority_choices: Vec<SelectChoice> = GoalPriority::ALL
        .iter()
        .map(|p| SelectChoice::new(p.label(), p.as_str()))
        .collect();
    let status_choices: Vec<SelectChoice> = GoalStatus::ALL
        .iter()
        .map(|s| SelectChoice::new(s.label(), s.as_str()))
        .collect();

    let create = use_create_goal();
    let update = use_update_goal();

    let submit_form = form.clone();
    let handle_submit = move |_| {
        let form = submit_form.clone();
        let create = create.clone();
        let update = update.clone();
        let editing = editing.clone();
        spawn(async move {
            let ok = form
                .submit(|values| {
                    let payload = goal_payload(&values);
                    async move {
                        let Some(payload) = payload else {
                            return Err(api::NormalizedError {
                                code: "FORM_INVALID".to_string(),
                                message: "Check the highlighted fields and try again".to_string(),
                                status: 400,
                                field_errors: None,
                                action: None,
                            });
                        };
                        match editing {
                            Some(id) => update.run((id, payload)).await.map(|_| ()),
                            None => create.run(payload).await.map(|_| ()),
                        }
                    }
                })
                .await;
            if ok {
                on_close.call(());
            }
        });
    };

    let is_edit = goal.is_some();

    rsx! {
        div {
            class: "p-6",
            h2 {
                class: "m-0 mb-5 text-lg font-semibold text-neutral-800",
                if is_edit { "Edit goal" } else { "New goal" }
            }

            FormInput {
                form: form.clone(),
                name: "name",
                label: "Goal name",
                placeholder: "Emergency fund",
            }
            FormInput {
                form: form.clone(),
                name: "target_amount",
                label: "Target amount",
                input_type: "number",
            }
            FormInput {
                form: form.clone(),
                name: "current_amount",
                label: "Current amount",
                input_type: "number",
                description: "How much is already set aside.",
            }
            FormInput {
                form: form.clone(),
                name: "target_date",
                label: "Target date",
                input_type: "date",
            }
            FormSelect {
                form: form.clone(),
                name: "priority",
                label: "Priority",
                choices: priority_choices,
            }
            FormSelect {
                form: form.clone(),
                name: "status",
                label: "Status",
                choices: status_choices,
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
                    if form.is_submitting() { "Saving…" } else { "Save goal" }
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
    fn payload_defaults_current_amount_to_zero() {
        let values = BTreeMap::from([
            ("name".to_string(), "House deposit".to_string()),
            ("target_amount".to_string(), "500000".to_string()),
            ("target_date".to_string(), "2028-06-01".to_string()),
            ("priority".to_string(), "high".to_string()),
            ("status".to_string(), "active".to_string()),
        ]);
        let payload = goal_payload(&values).unwrap();
        assert_eq!(payload.current_amount, 0.0);
        assert_eq!(payload.priority, GoalPriority::High);
        assert_eq!(payload.status, GoalStatus::Active);
    }

    #[test]
    fn payload_rejects_unknown_enum_values() {
        let values = BTreeMap::from([
            ("name".to_string(), "House".to_string()),
            ("target_amount".to_string(), "100".to_string()),
            ("target_date".to_string(), "2028-06-01".to_string()),
            ("priority".to_string(), "urgent".to_string()),
            ("status".to_string(), "active".to_string()),
        ]);
        assert!(goal_payload(&values).is_none());
    }
}
