//! Settings: profile details and the reconciliation statement upload.

use api::UserProfile;
use chrono::NaiveDate;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::dropdown::{Dropdown, DropdownOption};
use crate::form::{use_form, FormInput, FormSelect, Rule, Schema, SelectChoice};
use crate::hooks::{
    use_accounts, use_update_profile, use_upload_statement, use_user_profile, StatementUpload,
};
use crate::platform::today;

const CURRENCIES: [&str; 5] = ["INR", "USD", "EUR", "GBP", "SGD"];

fn profile_schema() -> Schema {
    Schema::new()
        .field("name", "Name", vec![Rule::Required, Rule::MaxLen(80)])
        .field(
            "currency",
            "Currency",
            vec![Rule::Required, Rule::MinLen(3), Rule::MaxLen(3)],
        )
}

#[component]
pub fn SettingsView() -> Element {
    let profile = use_user_profile();

    rsx! {
        div {
            class: "p-6 max-w-3xl mx-auto",
            h1 { class: "m-0 mb-6 text-xl font-semibold text-neutral-900", "Settings" }

            if let Some(profile) = profile.data() {
                ProfileSection { profile: (*profile).clone() }
            } else {
                div { class: "py-8 text-center text-sm text-neutral-500", "Loading profile…" }
            }

            ReconciliationSection {}
        }
    }
}

#[component]
fn ProfileSection(profile: UserProfile) -> Element {
    let defaults = [
        ("name", profile.name.clone()),
        ("currency", profile.currency.clone()),
    ];
    let default_refs: Vec<(&str, &str)> = defaults.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let form = use_form(profile_schema(), &default_refs);
    let update = use_update_profile();
    let mut auth = crate::auth::use_auth();

    let currency_choices: Vec<SelectChoice> = CURRENCIES
        .iter()
        .map(|c| SelectChoice::new(*c, *c))
        .collect();

    let submit_form = form.clone();
    let handle_submit = move |_| {
        let form = submit_form.clone();
        let update = update.clone();
        spawn(async move {
            let saved = form
                .submit(|values| {
                    let payload = api::UserPayload {
                        name: values.get("name").cloned().unwrap_or_default(),
                        currency: values.get("currency").cloned().unwrap_or_default(),
                    };
                    async move { update.run(payload).await.map(|_| ()) }
                })
                .await;
            if saved {
                // Keep the auth context's copy of the profile in step.
                let current = auth();
                if let Some(mut user) = current.user.clone() {
                    user.name = form.value("name");
                    user.currency = form.value("currency");
                    auth.set(crate::auth::AuthState {
                        user: Some(user),
                        loading: current.loading,
                        online: current.online,
                    });
                }
            }
        });
    };

    rsx! {
        section {
            class: "bg-white border border-neutral-200 rounded-lg p-5 mb-6",
            h2 { class: "m-0 mb-4 text-base font-medium text-neutral-800", "Profile" }

            div {
                class: "mb-4",
                Label { html_for: "profile-email", "Email" }
                p { class: "m-0 mt-1.5 text-sm text-neutral-500", "{profile.email}" }
            }
            FormInput {
                form: form.clone(),
                name: "name",
                label: "Name",
            }
            FormSelect {
                form: form.clone(),
                name: "currency",
                label: "Currency",
                choices: currency_choices,
                description: "Used for every amount shown in the app.",
            }

            if let Some(error) = form.submit_error() {
                p { class: "text-[0.8125rem] text-red-600 mb-3", "{error.human_message()}" }
            }

            Button {
                variant: ButtonVariant::Primary,
                disabled: form.is_submitting(),
                onclick: handle_submit,
                if form.is_submitting() { "Saving…" } else { "Save profile" }
            }
        }
    }
}

#[component]
fn ReconciliationSection() -> Element {
    let accounts = use_accounts();
    let upload = use_upload_statement();

    let mut account_id = use_signal(|| None::<String>);
    let mut period_start = use_signal(|| None::<NaiveDate>);
    let mut period_end = use_signal(|| None::<NaiveDate>);
    let mut file = use_signal(|| None::<(String, Vec<u8>)>);

    let account_options: Vec<DropdownOption> = accounts
        .data()
        .map(|accounts| {
            accounts
                .iter()
                .map(|a| DropdownOption::new(a.name.clone(), a.id.clone()))
                .collect()
        })
        .unwrap_or_default();

    let handle_file = move |evt: FormEvent| {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().first().cloned() else {
            return;
        };
        spawn(async move {
            if let Some(bytes) = engine.read_file(&name).await {
                file.set(Some((name, bytes)));
            }
        });
    };

    let ready = account_id().is_some()
        && period_start().is_some()
        && period_end().is_some()
        && file().is_some();
    let in_flight = upload.in_flight();

    let handle_upload = move |_| {
        let (Some(account_id), Some(period_start), Some(period_end), Some((file_name, bytes))) =
            (account_id(), period_start(), period_end(), file())
        else {
            return;
        };
        upload.dispatch(StatementUpload {
            account_id,
            period_start,
            period_end,
            file_name,
            bytes,
        });
        file.set(None);
    };

    let max_date = today().to_string();

    rsx! {
        section {
            class: "bg-white border border-neutral-200 rounded-lg p-5",
            h2 { class: "m-0 mb-1 text-base font-medium text-neutral-800", "Statement reconciliation" }
            p {
                class: "m-0 mb-4 text-sm text-neutral-500",
                "Upload a bank statement and the server matches it against recorded transactions."
            }

            div {
                class: "mb-4",
                Label { html_for: "recon-account", "Account" }
                div {
                    class: "mt-1.5 w-64",
                    Dropdown {
                        options: account_options,
                        value: account_id(),
                        placeholder: "Pick an account",
                        searchable: true,
                        on_select: move |option: DropdownOption| account_id.set(Some(option.value)),
                    }
                }
            }
            div {
                class: "flex gap-4 mb-4",
                div {
                    Label { html_for: "recon-start", "Period start" }
                    Input {
                        id: "recon-start",
                        r#type: "date",
                        class: "mt-1.5",
                        value: period_start().map(|d| d.to_string()).unwrap_or_default(),
                        max: Some(max_date.clone()),
                        oninput: move |evt: FormEvent| {
                            period_start.set(NaiveDate::parse_from_str(&evt.value(), "%Y-%m-%d").ok());
                        },
                    }
                }
                div {
                    Label { html_for: "recon-end", "Period end" }
                    Input {
                        id: "recon-end",
                        r#type: "date",
                        class: "mt-1.5",
                        value: period_end().map(|d| d.to_string()).unwrap_or_default(),
                        max: Some(max_date.clone()),
                        oninput: move |evt: FormEvent| {
                            period_end.set(NaiveDate::parse_from_str(&evt.value(), "%Y-%m-%d").ok());
                        },
                    }
                }
            }
            div {
                class: "mb-4",
                Label { html_for: "recon-file", "Statement file" }
                input {
                    id: "recon-file",
                    r#type: "file",
                    accept: ".csv,.pdf,.xls,.xlsx",
                    class: "mt-1.5 text-sm",
                    onchange: handle_file,
                }
                if let Some((name, bytes)) = file() {
                    p {
                        class: "m-0 mt-1 text-[0.8125rem] text-neutral-500",
                        "{name} · {bytes.len()} bytes"
                    }
                }
            }

            Button {
                variant: ButtonVariant::Primary,
                disabled: !ready || in_flight,
                onclick: handle_upload,
                if in_flight { "Uploading…" } else { "Upload statement" }
            }
        }
    }
}
