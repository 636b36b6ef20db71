//! Toast notifications, provided as a context signal.

use dioxus::prelude::*;

use crate::platform::sleep_ms;

/// How long a toast stays on screen.
const TOAST_DISMISS_MS: u64 = 5_000;
/// Oldest entries are dropped past this backlog.
const MAX_TOASTS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Toasts {
    pub entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn push(&mut self, level: ToastLevel, message: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            level,
            message: message.to_string(),
        });
        if self.entries.len() > MAX_TOASTS {
            self.entries.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|t| t.id != id);
    }
}

/// Get the toast signal from context.
pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

/// Push a toast and schedule its auto-dismissal.
pub fn push_toast(toasts: &mut Signal<Toasts>, level: ToastLevel, message: &str) {
    let id = toasts.write().push(level, message);
    let mut toasts = *toasts;
    spawn(async move {
        sleep_ms(TOAST_DISMISS_MS).await;
        toasts.write().dismiss(id);
    });
}

/// Provider component that owns the toast state and renders the overlay.
/// Wrap the app with this to enable toasts.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_signal(Toasts::default);
    use_context_provider(|| toasts);

    rsx! {
        {children}
        Toaster {}
    }
}

#[component]
fn Toaster() -> Element {
    let mut toasts = use_toasts();

    rsx! {
        div {
            class: "fixed bottom-4 right-4 z-50 flex flex-col gap-2 max-w-sm",
            for toast in toasts().entries.iter() {
                div {
                    key: "{toast.id}",
                    class: match toast.level {
                        ToastLevel::Info => "toast rounded-md px-4 py-3 text-sm shadow-lg bg-neutral-800 text-white",
                        ToastLevel::Success => "toast rounded-md px-4 py-3 text-sm shadow-lg bg-emerald-600 text-white",
                        ToastLevel::Warning => "toast rounded-md px-4 py-3 text-sm shadow-lg bg-amber-500 text-white",
                        ToastLevel::Error => "toast rounded-md px-4 py-3 text-sm shadow-lg bg-red-600 text-white",
                    },
                    span { class: "whitespace-pre-line", "{toast.message}" }
                    button {
                        class: "ml-3 opacity-70 hover:opacity-100",
                        onclick: {
                            let id = toast.id;
                            move |_| toasts.write().dismiss(id)
                        },
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backlog_is_capped() {
        let mut toasts = Toasts::default();
        for i in 0..10 {
            toasts.push(ToastLevel::Info, &format!("toast {i}"));
        }
        assert_eq!(toasts.entries.len(), MAX_TOASTS);
        // Oldest entries dropped first.
        assert_eq!(toasts.entries[0].message, "toast 5");
    }

    #[test]
    fn dismiss_removes_by_id() {
        let mut toasts = Toasts::default();
        let a = toasts.push(ToastLevel::Error, "boom");
        let b = toasts.push(ToastLevel::Info, "hello");
        toasts.dismiss(a);
        assert_eq!(toasts.entries.len(), 1);
        assert_eq!(toasts.entries[0].id, b);
    }
}
