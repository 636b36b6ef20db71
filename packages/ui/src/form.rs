//! # Form system
//!
//! Schema-validated form state with a fixed submit contract:
//!
//! - `idle → validating → (invalid: idle with field errors) | (valid:
//!   submitting → success | error)`
//! - Validation failures populate field-level messages and never reach the
//!   submit handler or the network-error pipeline.
//! - A rejected submit arrives here already normalized
//!   ([`api::NormalizedError`]); server field errors are merged into the
//!   form's own error slots.
//! - `is_submitting` covers the whole validate+submit span and resets on
//!   every path. No stuck spinners.
//!
//! [`FormCore`] is the plain state machine (unit-testable), [`use_form`]
//! wraps it in a signal, and the `Form*` components are controlled-input
//! adapters binding one named field each, rendering label / required marker /
//! description / error in a fixed slot layout.

use std::collections::BTreeMap;
use std::rc::Rc;

use api::NormalizedError;
use chrono::NaiveDate;
use dioxus::prelude::*;

use crate::components::{Input, Label, Textarea};
use crate::platform::today;

/// A single validation rule. The first failing rule per field wins.
#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    Required,
    MinLen(usize),
    MaxLen(usize),
    Email,
    Numeric,
    Min(f64),
    Max(f64),
    /// Dates after "today" are rejected.
    NotAfterToday,
    Custom(fn(&str) -> Option<String>),
}

#[derive(Clone, Debug, PartialEq)]
struct FieldSpec {
    name: String,
    label: String,
    rules: Vec<Rule>,
}

/// Named fields with their rules.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, label: &str, rules: Vec<Rule>) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            label: label.to_string(),
            rules,
        });
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.name == name && f.rules.contains(&Rule::Required))
    }

    /// Validate the full value map. An empty result means valid.
    pub fn validate(&self, values: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for field in &self.fields {
            let raw = values.get(&field.name).map(String::as_str).unwrap_or("");
            let value = raw.trim();
            for rule in &field.rules {
                // An optional field left empty passes everything but Required.
                if value.is_empty() && !matches!(rule, Rule::Required) {
                    continue;
                }
                if let Some(message) = check_rule(rule, value, &field.label) {
                    errors.insert(field.name.clone(), message);
                    break;
                }
            }
        }
        errors
    }
}

fn check_rule(rule: &Rule, value: &str, label: &str) -> Option<String> {
    match rule {
        Rule::Required => value
            .is_empty()
            .then(|| format!("{label} cannot be empty")),
        Rule::MinLen(min) => (value.chars().count() < *min)
            .then(|| format!("{label} must be at least {min} characters")),
        Rule::MaxLen(max) => (value.chars().count() > *max)
            .then(|| format!("{label} must be at most {max} characters")),
        Rule::Email => (!value.contains('@') || !value.contains('.'))
            .then(|| "Invalid email format".to_string()),
        Rule::Numeric => value
            .parse::<f64>()
            .is_err()
            .then(|| format!("{label} must be a number")),
        Rule::Min(min) => match value.parse::<f64>() {
            Ok(n) if n < *min => Some(format!("{label} must be at least {min}")),
            _ => None,
        },
        Rule::Max(max) => match value.parse::<f64>() {
            Ok(n) if n > *max => Some(format!("{label} must be at most {max}")),
            _ => None,
        },
        Rule::NotAfterToday => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) if date > today() => Some(format!("{label} cannot be in the future")),
            Ok(_) => None,
            Err(_) => Some(format!("{label} is not a valid date")),
        },
        Rule::Custom(check) => check(value),
    }
}

/// Accept a picked date only when it is not after `today`; otherwise the
/// field keeps its previous value.
pub fn accept_date(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    (date <= today).then_some(date)
}

/// Plain form state machine; the hook below wraps it in a signal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormCore {
    values: BTreeMap<String, String>,
    errors: BTreeMap<String, String>,
    submitting: bool,
    submit_error: Option<NormalizedError>,
}

impl FormCore {
    pub fn with_defaults(defaults: &[(&str, &str)]) -> Self {
        Self {
            values: defaults
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn value(&self, name: &str) -> String {
        self.values.get(name).cloned().unwrap_or_default()
    }

    /// Set a field value, clearing its error and any stale submit error.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
        self.errors.remove(name);
        self.submit_error = None;
    }

    pub fn error(&self, name: &str) -> Option<String> {
        self.errors.get(name).cloned()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_error(&self) -> Option<NormalizedError> {
        self.submit_error.clone()
    }

    /// Validate; on success flip to submitting and hand back the values for
    /// the submit handler. On failure record field errors and stay idle —
    /// the handler must never run.
    pub fn begin_submit(&mut self, schema: &Schema) -> Option<BTreeMap<String, String>> {
        self.errors = schema.validate(&self.values);
        self.submit_error = None;
        if self.errors.is_empty() {
            self.submitting = true;
            Some(self.values.clone())
        } else {
            None
        }
    }

    /// Always called after the submit handler, success or not.
    /// Server-side field errors land in the same slots as local ones.
    pub fn finish_submit(&mut self, result: Result<(), NormalizedError>) {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.submit_error = None;
            }
            Err(error) => {
                if let Some(fields) = &error.field_errors {
                    for (field, message) in fields {
                        self.errors.insert(field.clone(), message.clone());
                    }
                }
                self.submit_error = Some(error);
            }
        }
    }
}

/// Handle tying a [`Schema`] to signal-backed [`FormCore`] state.
#[derive(Clone)]
pub struct UseForm {
    core: Signal<FormCore>,
    schema: Rc<Schema>,
    defaults: Rc<Vec<(String, String)>>,
}

impl PartialEq for UseForm {
    fn eq(&self, other: &Self) -> bool {
        // Same form instance; value changes reach fields via the signal.
        Rc::ptr_eq(&self.schema, &other.schema)
    }
}

pub fn use_form(schema: Schema, defaults: &[(&str, &str)]) -> UseForm {
    let core = use_signal(|| FormCore::with_defaults(defaults));
    let schema = use_hook(|| Rc::new(schema));
    let defaults = use_hook(|| {
        Rc::new(
            defaults
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    });
    UseForm {
        core,
        schema,
        defaults,
    }
}

impl UseForm {
    pub fn value(&self, name: &str) -> String {
        self.core.read().value(name)
    }

    pub fn set_value(&self, name: &str, value: impl Into<String>) {
        let mut core = self.core;
        core.write().set_value(name, value);
    }

    pub fn error(&self, name: &str) -> Option<String> {
        self.core.read().error(name)
    }

    pub fn is_submitting(&self) -> bool {
        self.core.read().is_submitting()
    }

    pub fn submit_error(&self) -> Option<NormalizedError> {
        self.core.read().submit_error()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.schema.is_required(name)
    }

    /// Back to the initial values, errors cleared.
    pub fn reset(&self) {
        let mut core = self.core;
        let defaults: Vec<(&str, &str)> = self
            .defaults
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        core.set(FormCore::with_defaults(&defaults));
    }

    /// Validate, then run `on_submit` with the values. Returns whether the
    /// whole chain succeeded. `is_submitting` resets on every path.
    pub async fn submit<F, Fut>(&self, on_submit: F) -> bool
    where
        F: FnOnce(BTreeMap<String, String>) -> Fut,
        Fut: std::future::Future<Output = Result<(), NormalizedError>>,
    {
        let mut core = self.core;
        let values = core.write().begin_submit(&self.schema);
        let Some(values) = values else {
            return false;
        };
        let result = on_submit(values).await;
        let ok = result.is_ok();
        core.write().finish_submit(result);
        ok
    }
}

/// Shared slot layout every field renders into.
#[component]
fn FieldSlot(
    form: UseForm,
    name: String,
    label: String,
    #[props(default)] description: Option<String>,
    children: Element,
) -> Element {
    let required = form.is_required(&name);
    let error = form.error(&name);
    rsx! {
        div {
            class: "mb-4",
            Label {
                html_for: "{name}",
                "{label}"
                if required {
                    span { class: "text-red-600 ml-0.5", "*" }
                }
            }
            div { class: "mt-1.5", {children} }
            if let Some(description) = description {
                p { class: "text-[0.8125rem] text-neutral-500 mt-1", "{description}" }
            }
            if let Some(error) = error {
                p { class: "text-[0.8125rem] text-red-600 mt-1", "{error}" }
            }
        }
    }
}

#[component]
pub fn FormInput(
    form: UseForm,
    name: String,
    label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
    #[props(default)] description: Option<String>,
) -> Element {
    let value = form.value(&name);
    let input_name = name.clone();
    let input_form = form.clone();
    rsx! {
        FieldSlot {
            form,
            name: name.clone(),
            label,
            description,
            Input {
                id: name,
                r#type: input_type,
                class: "w-full",
                value,
                placeholder,
                oninput: move |evt: FormEvent| input_form.set_value(&input_name, evt.value()),
            }
        }
    }
}

#[component]
pub fn FormTextarea(
    form: UseForm,
    name: String,
    label: String,
    #[props(default)] placeholder: String,
    #[props(default = 4)] rows: u32,
    #[props(default)] description: Option<String>,
) -> Element {
    let value = form.value(&name);
    let input_name = name.clone();
    let input_form = form.clone();
    rsx! {
        FieldSlot {
            form,
            name: name.clone(),
            label,
            description,
            Textarea {
                id: name,
                class: "w-full",
                rows,
                value,
                placeholder,
                oninput: move |evt: FormEvent| input_form.set_value(&input_name, evt.value()),
            }
        }
    }
}

/// One option of a [`FormSelect`].
#[derive(Clone, Debug, PartialEq)]
pub struct SelectChoice {
    pub label: String,
    pub value: String,
}

impl SelectChoice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[component]
pub fn FormSelect(
    form: UseForm,
    name: String,
    label: String,
    choices: Vec<SelectChoice>,
    #[props(default)] description: Option<String>,
) -> Element {
    let value = form.value(&name);
    let select_name = name.clone();
    let select_form = form.clone();
    rsx! {
        FieldSlot {
            form,
            name: name.clone(),
            label,
            description,
            select {
                id: "{name}",
                class: "w-full bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 outline-none font-[inherit] focus:border-primary-500",
                value: "{value}",
                onchange: move |evt| select_form.set_value(&select_name, evt.value()),
                option { value: "", disabled: true, "Select…" }
                for choice in &choices {
                    option {
                        key: "{choice.value}",
                        value: "{choice.value}",
                        selected: choice.value == value,
                        "{choice.label}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn FormCheckbox(
    form: UseForm,
    name: String,
    label: String,
    #[props(default)] description: Option<String>,
) -> Element {
    let checked = form.value(&name) == "true";
    let input_name = name.clone();
    let input_form = form.clone();
    let error = form.error(&name);
    rsx! {
        div {
            class: "mb-4",
            label {
                class: "flex items-center gap-2 text-sm text-neutral-800 cursor-pointer",
                input {
                    id: "{name}",
                    r#type: "checkbox",
                    checked,
                    onchange: move |evt: FormEvent| {
                        input_form.set_value(&input_name, if evt.checked() { "true" } else { "false" })
                    },
                }
                "{label}"
            }
            if let Some(description) = description {
                p { class: "text-[0.8125rem] text-neutral-500 mt-1", "{description}" }
            }
            if let Some(error) = error {
                p { class: "text-[0.8125rem] text-red-600 mt-1", "{error}" }
            }
        }
    }
}

/// Checkbox styled as a toggle; same `"true"`/`"false"` value contract.
#[component]
pub fn FormSwitch(
    form: UseForm,
    name: String,
    label: String,
    #[props(default)] description: Option<String>,
) -> Element {
    let on = form.value(&name) == "true";
    let input_name = name.clone();
    let input_form = form.clone();
    rsx! {
        div {
            class: "mb-4 flex items-center justify-between",
            div {
                span { class: "block text-sm font-medium text-neutral-800", "{label}" }
                if let Some(description) = description {
                    p { class: "text-[0.8125rem] text-neutral-500", "{description}" }
                }
            }
            button {
                r#type: "button",
                class: if on {
                    "relative w-10 h-6 rounded-full transition-colors bg-primary-600"
                } else {
                    "relative w-10 h-6 rounded-full transition-colors bg-neutral-300"
                },
                onclick: move |_| {
                    let next = if input_form.value(&input_name) == "true" { "false" } else { "true" };
                    input_form.set_value(&input_name, next);
                },
                span {
                    class: if on {
                        "absolute top-0.5 left-0.5 w-5 h-5 rounded-full bg-white transition-transform translate-x-4"
                    } else {
                        "absolute top-0.5 left-0.5 w-5 h-5 rounded-full bg-white transition-transform"
                    },
                }
            }
        }
    }
}

/// Date field that refuses dates after "today", both visually (the `max`
/// attribute) and on programmatic selection (the value simply stays put).
#[component]
pub fn FormDatePicker(
    form: UseForm,
    name: String,
    label: String,
    #[props(default)] description: Option<String>,
) -> Element {
    let value = form.value(&name);
    let max = today().to_string();
    let input_name = name.clone();
    let input_form = form.clone();
    rsx! {
        FieldSlot {
            form,
            name: name.clone(),
            label,
            description,
            Input {
                id: name,
                r#type: "date",
                class: "w-full",
                value,
                max: Some(max),
                oninput: move |evt: FormEvent| {
                    if let Some(date) = accept_date(&evt.value(), today()) {
                        input_form.set_value(&input_name, date.to_string());
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn account_schema() -> Schema {
        Schema::new()
            .field("account_name", "Account name", vec![Rule::Required])
            .field(
                "amount",
                "Amount",
                vec![Rule::Required, Rule::Numeric, Rule::Min(0.01)],
            )
    }

    #[test]
    fn empty_required_field_rejects_before_submit() {
        let schema = Schema::new().field("account_name", "Account name", vec![Rule::Required]);
        let mut core = FormCore::default();
        core.set_value("account_name", "");

        assert!(core.begin_submit(&schema).is_none());
        assert!(!core.is_submitting());
        assert!(core.error("account_name").is_some());
    }

    #[tokio::test]
    async fn handler_runs_only_for_valid_values() {
        let schema = account_schema();
        let mut core = FormCore::default();
        let ran = Cell::new(false);

        // Invalid: handler must never run.
        core.set_value("account_name", "Salary");
        core.set_value("amount", "not-a-number");
        assert!(core.begin_submit(&schema).is_none());
        assert!(!ran.get());
        assert!(core.error("amount").is_some());

        // Valid: full cycle, submitting resets afterwards.
        core.set_value("amount", "120.50");
        let values = core.begin_submit(&schema).expect("valid form");
        assert!(core.is_submitting());
        let result: Result<(), NormalizedError> = {
            ran.set(true);
            assert_eq!(values["amount"], "120.50");
            Ok(())
        };
        core.finish_submit(result);
        assert!(ran.get());
        assert!(!core.is_submitting());
        assert!(core.submit_error().is_none());
    }

    #[test]
    fn rejected_submit_resets_spinner_and_merges_field_errors() {
        let schema = account_schema();
        let mut core = FormCore::default();
        core.set_value("account_name", "Salary");
        core.set_value("amount", "10");
        core.begin_submit(&schema).expect("valid form");

        let error = NormalizedError {
            code: "VALIDATION".to_string(),
            message: "Invalid account".to_string(),
            status: 400,
            field_errors: Some(std::collections::BTreeMap::from([(
                "account_name".to_string(),
                "already taken".to_string(),
            )])),
            action: None,
        };
        core.finish_submit(Err(error));

        assert!(!core.is_submitting());
        assert_eq!(core.error("account_name").as_deref(), Some("already taken"));
        assert!(core.submit_error().is_some());
    }

    #[test]
    fn optional_empty_fields_skip_non_required_rules() {
        let schema = Schema::new().field("notes", "Notes", vec![Rule::MinLen(10)]);
        assert!(schema.validate(&BTreeMap::new()).is_empty());

        let mut values = BTreeMap::new();
        values.insert("notes".to_string(), "short".to_string());
        assert!(!schema.validate(&values).is_empty());
    }

    #[test]
    fn future_dates_are_rejected() {
        let today = today();
        let yesterday = today.pred_opt().unwrap();
        let tomorrow = today.succ_opt().unwrap();

        assert_eq!(accept_date(&yesterday.to_string(), today), Some(yesterday));
        assert_eq!(accept_date(&today.to_string(), today), Some(today));
        assert_eq!(accept_date(&tomorrow.to_string(), today), None);
        assert_eq!(accept_date("garbage", today), None);
    }

    #[test]
    fn date_rule_matches_the_picker_guard() {
        let schema = Schema::new().field("transaction_date", "Date", vec![Rule::NotAfterToday]);
        let mut values = BTreeMap::new();
        values.insert("transaction_date".to_string(), "9999-12-31".to_string());
        assert!(!schema.validate(&values).is_empty());

        values.insert("transaction_date".to_string(), "2000-01-01".to_string());
        assert!(schema.validate(&values).is_empty());
    }
}
