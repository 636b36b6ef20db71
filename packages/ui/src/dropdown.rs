//! # Dropdown primitives
//!
//! [`Dropdown`] is a searchable select over a static option list;
//! [`AsyncDropdown`] decorates the same menu with a debounced
//! fetch-on-keystroke loader. Both close on selection and always render an
//! explicit empty-state row when nothing matches.
//!
//! The debounce bookkeeping lives in [`SearchDebouncer`], a plain struct with
//! no timers of its own: every keystroke takes a ticket, the quiet period is
//! slept out by the component, and a ticket that is no longer current when
//! the sleep ends is dropped without fetching. Queries shorter than the
//! minimum search length never take a ticket at all.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use api::{parse_api_error, ApiError};
use dioxus::prelude::*;

use crate::platform::sleep_ms;
use crate::toast::{push_toast, use_toasts, ToastLevel};

/// One selectable entry.
#[derive(Clone, Debug, PartialEq)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
    pub disabled: bool,
    /// Short decoration rendered before the label (an emoji or glyph).
    pub icon: Option<String>,
}

impl DropdownOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: false,
            icon: None,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Case-insensitive substring filter over option labels.
/// An empty or whitespace query keeps every option.
pub fn filter_options(options: &[DropdownOption], query: &str) -> Vec<DropdownOption> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return options.to_vec();
    }
    options
        .iter()
        .filter(|o| o.label.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Debounce bookkeeping for [`AsyncDropdown`].
///
/// Generation-counted: each accepted keystroke invalidates every earlier
/// ticket, so at most the latest keystroke's fetch ever fires.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchDebouncer {
    debounce_ms: u64,
    min_len: usize,
    generation: u64,
}

impl SearchDebouncer {
    pub fn new(debounce_ms: u64, min_len: usize) -> Self {
        Self {
            debounce_ms,
            min_len,
            generation: 0,
        }
    }

    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }

    /// Register a keystroke. Returns the ticket to fire with once the quiet
    /// period elapses, or `None` when the query is below the minimum length.
    /// Either way, every previously issued ticket goes stale.
    pub fn keystroke(&mut self, query: &str) -> Option<u64> {
        self.generation += 1;
        (query.trim().chars().count() >= self.min_len).then_some(self.generation)
    }

    /// Whether `ticket` is still the latest one.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation == ticket
    }
}

/// Generic searchable select over a static option list.
///
/// Selecting an option invokes `on_select` with the full option and closes
/// the menu.
#[component]
pub fn Dropdown(
    options: Vec<DropdownOption>,
    /// Value of the currently selected option, if any.
    #[props(default)]
    value: Option<String>,
    #[props(default = "Select…".to_string())] placeholder: String,
    /// Show a client-side substring filter above the options.
    #[props(default)]
    searchable: bool,
    #[props(default)] disabled: bool,
    on_select: EventHandler<DropdownOption>,
) -> Element {
    let mut open = use_signal(|| false);
    let mut search = use_signal(String::new);

    let selected_label = value
        .as_ref()
        .and_then(|v| options.iter().find(|o| &o.value == v))
        .map(|o| o.label.clone());
    let visible = filter_options(&options, &search());

    rsx! {
        div {
            class: "relative",
            button {
                r#type: "button",
                class: "w-full flex items-center justify-between bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 disabled:opacity-50 disabled:cursor-not-allowed focus:border-primary-500",
                disabled,
                onclick: move |_| {
                    open.toggle();
                    search.set(String::new());
                },
                if let Some(label) = selected_label {
                    span { "{label}" }
                } else {
                    span { class: "text-neutral-400", "{placeholder}" }
                }
                span { class: "text-neutral-400 ml-2", "▾" }
            }

            if open() {
                div {
                    class: "absolute left-0 right-0 mt-1 bg-white border border-neutral-200 rounded shadow-lg max-h-64 overflow-y-auto",
                    style: "z-index: 1000",
                    if searchable {
                        div {
                            class: "p-2 border-b border-neutral-100",
                            input {
                                r#type: "text",
                                class: "w-full bg-white border border-neutral-300 rounded px-2 py-1 text-sm outline-none focus:border-primary-500",
                                placeholder: "Filter…",
                                value: search(),
                                oninput: move |evt: FormEvent| search.set(evt.value()),
                            }
                        }
                    }
                    if visible.is_empty() {
                        div { class: "px-3 py-2 text-sm text-neutral-400", "No options" }
                    }
                    for option in visible {
                        button {
                            key: "{option.value}",
                            r#type: "button",
                            class: if option.disabled {
                                "w-full text-left px-3 py-2 text-sm text-neutral-300 cursor-not-allowed"
                            } else {
                                "w-full text-left px-3 py-2 text-sm text-neutral-800 hover:bg-neutral-50"
                            },
                            disabled: option.disabled,
                            onclick: {
                                let option = option.clone();
                                move |_| {
                                    open.set(false);
                                    search.set(String::new());
                                    on_select.call(option.clone());
                                }
                            },
                            if let Some(ref icon) = option.icon {
                                span { class: "mr-1.5", "{icon}" }
                            }
                            "{option.label}"
                        }
                    }
                }
            }
        }
    }
}

type LoaderFuture = Pin<Box<dyn Future<Output = Result<Vec<DropdownOption>, ApiError>>>>;

/// Async option source for [`AsyncDropdown`], called with the search query.
#[derive(Clone)]
pub struct OptionLoader {
    run: Rc<dyn Fn(String) -> LoaderFuture>,
}

impl OptionLoader {
    pub fn new<F, Fut>(run: F) -> Self
    where
        F: Fn(String) -> Fut + 'static,
        Fut: Future<Output = Result<Vec<DropdownOption>, ApiError>> + 'static,
    {
        Self {
            run: Rc::new(move |query| Box::pin(run(query)) as LoaderFuture),
        }
    }

    pub async fn load(&self, query: String) -> Result<Vec<DropdownOption>, ApiError> {
        (self.run)(query).await
    }
}

impl PartialEq for OptionLoader {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.run, &other.run)
    }
}

/// [`Dropdown`] wired to a debounced remote option source.
///
/// Queries below `min_search_length` never reach the loader; a keystroke
/// during the quiet period supersedes the pending fetch. A failed fetch
/// surfaces as a toast plus an empty option list, never a crash.
#[component]
pub fn AsyncDropdown(
    loader: OptionLoader,
    #[props(default)] value: Option<String>,
    #[props(default = "Search…".to_string())] placeholder: String,
    #[props(default = 300)] debounce_ms: u64,
    #[props(default = 1)] min_search_length: usize,
    on_select: EventHandler<DropdownOption>,
) -> Element {
    let mut open = use_signal(|| false);
    let mut query = use_signal(String::new);
    let mut options = use_signal(Vec::<DropdownOption>::new);
    let mut loading = use_signal(|| false);
    let debouncer = use_signal(|| SearchDebouncer::new(debounce_ms, min_search_length));
    // Label of the picked option survives the option list changing under it.
    let mut selected_label = use_signal(|| None::<String>);
    let toasts = use_toasts();

    let handle_input = move |evt: FormEvent| {
        let text = evt.value();
        query.set(text.clone());
        let mut debouncer = debouncer;
        let ticket = debouncer.write().keystroke(&text);
        let Some(ticket) = ticket else {
            options.set(Vec::new());
            return;
        };
        let loader = loader.clone();
        let mut toasts = toasts;
        let quiet_ms = debouncer.peek().debounce_ms();
        spawn(async move {
            sleep_ms(quiet_ms).await;
            if !debouncer.peek().is_current(ticket) {
                return;
            }
            loading.set(true);
            match loader.load(text).await {
                Ok(loaded) => options.set(loaded),
                Err(error) => {
                    let normalized = parse_api_error(&error);
                    tracing::error!(
                        code = %normalized.code,
                        status = normalized.status,
                        "option search failed: {}",
                        normalized.message
                    );
                    push_toast(&mut toasts, ToastLevel::Error, &normalized.human_message());
                    options.set(Vec::new());
                }
            }
            loading.set(false);
        });
    };

    let display = selected_label();
    let visible = options();

    rsx! {
        div {
            class: "relative",
            input {
                r#type: "text",
                class: "w-full bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 outline-none focus:border-primary-500",
                placeholder: display.unwrap_or(placeholder),
                value: query(),
                onfocusin: move |_| open.set(true),
                oninput: handle_input,
            }

            if open() && !query().trim().is_empty() {
                div {
                    class: "absolute left-0 right-0 mt-1 bg-white border border-neutral-200 rounded shadow-lg max-h-64 overflow-y-auto",
                    style: "z-index: 1000",
                    if loading() {
                        div { class: "px-3 py-2 text-sm text-neutral-400", "Searching…" }
                    } else if visible.is_empty() {
                        div { class: "px-3 py-2 text-sm text-neutral-400", "No matches" }
                    }
                    for option in visible {
                        button {
                            key: "{option.value}",
                            r#type: "button",
                            class: if option.disabled {
                                "w-full text-left px-3 py-2 text-sm text-neutral-300 cursor-not-allowed"
                            } else {
                                "w-full text-left px-3 py-2 text-sm text-neutral-800 hover:bg-neutral-50"
                            },
                            disabled: option.disabled,
                            onclick: {
                                let option = option.clone();
                                move |_| {
                                    open.set(false);
                                    query.set(String::new());
                                    selected_label.set(Some(option.label.clone()));
                                    on_select.call(option.clone());
                                }
                            },
                            "{option.label}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn banks() -> Vec<DropdownOption> {
        vec![
            DropdownOption::new("HDFC Bank", "HDFC"),
            DropdownOption::new("State Bank of India", "SBI"),
            DropdownOption::new("ICICI Bank", "ICICI").disabled(),
        ]
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let all = banks();
        assert_eq!(filter_options(&all, "").len(), 3);
        assert_eq!(filter_options(&all, "   ").len(), 3);

        let hits = filter_options(&all, "bank");
        assert_eq!(hits.len(), 3);

        let hits = filter_options(&all, "state");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, "SBI");

        assert!(filter_options(&all, "axis").is_empty());
    }

    #[test]
    fn short_queries_never_take_a_ticket() {
        let mut debouncer = SearchDebouncer::new(300, 3);
        assert_eq!(debouncer.keystroke(""), None);
        assert_eq!(debouncer.keystroke("hd"), None);
        // Whitespace does not count towards the minimum.
        assert_eq!(debouncer.keystroke("  a  "), None);
        // Exactly at the minimum: fetch allowed.
        assert!(debouncer.keystroke("hdf").is_some());
    }

    #[test]
    fn newer_keystroke_invalidates_pending_ticket() {
        let mut debouncer = SearchDebouncer::new(300, 1);
        let first = debouncer.keystroke("h").unwrap();
        let second = debouncer.keystroke("hd").unwrap();

        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));
    }

    #[test]
    fn short_query_invalidates_pending_ticket_too() {
        // Deleting back below the minimum must cancel the queued fetch.
        let mut debouncer = SearchDebouncer::new(300, 2);
        let ticket = debouncer.keystroke("hd").unwrap();
        assert_eq!(debouncer.keystroke("h"), None);
        assert!(!debouncer.is_current(ticket));
    }

    #[test]
    fn exactly_one_fetch_per_quiet_period() {
        // Three quick keystrokes, then silence: only the last ticket is
        // current when its sleep would end, so exactly one fetch fires.
        let mut debouncer = SearchDebouncer::new(300, 1);
        let tickets: Vec<u64> = ["h", "hd", "hdf"]
            .iter()
            .filter_map(|q| debouncer.keystroke(q))
            .collect();
        assert_eq!(tickets.len(), 3);

        let fired: Vec<&u64> = tickets.iter().filter(|t| debouncer.is_current(**t)).collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(*fired[0], *tickets.last().unwrap());
    }

    #[tokio::test]
    async fn loader_passes_the_query_through() {
        let calls = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&calls);
        let loader = OptionLoader::new(move |query: String| {
            counter.set(counter.get() + 1);
            async move {
                Ok(vec![DropdownOption::new(
                    format!("match for {query}"),
                    query,
                )])
            }
        });

        let options = loader.load("zomato".to_string()).await.unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(options[0].value, "zomato");
    }
}
