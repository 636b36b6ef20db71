//! Basic styled primitives shared by every view.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Danger,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => {
                "inline-flex items-center gap-2 rounded px-4 py-2 text-sm font-medium bg-primary-600 text-white hover:bg-primary-700 disabled:opacity-50 disabled:cursor-not-allowed"
            }
            ButtonVariant::Outline => {
                "inline-flex items-center gap-2 rounded px-4 py-2 text-sm font-medium border border-neutral-300 text-neutral-800 bg-white hover:bg-neutral-50 disabled:opacity-50 disabled:cursor-not-allowed"
            }
            ButtonVariant::Danger => {
                "inline-flex items-center gap-2 rounded px-4 py-2 text-sm font-medium bg-red-600 text-white hover:bg-red-700 disabled:opacity-50 disabled:cursor-not-allowed"
            }
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] disabled: bool,
    #[props(default)] class: String,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: "{variant.class()} {class}",
            disabled,
            onclick: move |evt| onclick.call(evt),
            {children}
        }
    }
}

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label {
            r#for: "{html_for}",
            class: "block text-[0.8125rem] font-medium text-neutral-700",
            {children}
        }
    }
}

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] value: String,
    #[props(default)] placeholder: String,
    #[props(default)] class: String,
    #[props(default)] disabled: bool,
    #[props(default)] min: Option<String>,
    #[props(default)] max: Option<String>,
    oninput: EventHandler<FormEvent>,
) -> Element {
    let min = min.unwrap_or_default();
    let max = max.unwrap_or_default();
    rsx! {
        input {
            id: "{id}",
            r#type: "{r#type}",
            value: "{value}",
            placeholder: "{placeholder}",
            disabled,
            min: "{min}",
            max: "{max}",
            class: "bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 outline-none font-[inherit] focus:border-primary-500 focus:shadow-[0_0_0_1px_var(--color-primary-500)] {class}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}

#[component]
pub fn Textarea(
    #[props(default)] id: String,
    #[props(default)] value: String,
    #[props(default)] placeholder: String,
    #[props(default)] class: String,
    #[props(default = 4)] rows: u32,
    #[props(default)] readonly: bool,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        textarea {
            id: "{id}",
            rows: "{rows}",
            placeholder: "{placeholder}",
            readonly,
            value: "{value}",
            class: "bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 outline-none font-[inherit] focus:border-primary-500 {class}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}
