//! # Generic query and mutation hooks
//!
//! [`use_api_query`] and [`use_api_mutation`] are the only two ways the UI
//! talks to the backend. Both funnel every failure through
//! [`api::parse_api_error`] exactly once and then either hand the normalized
//! error to a caller-supplied handler or surface it as a toast — never
//! neither. Errors also stay in the hook state so components that inspect it
//! directly see them; nothing is swallowed silently.
//!
//! Queries read through the [`store::QueryCache`]: a fresh cache entry is
//! served without a request, a stale one is refetched, and concurrent
//! fetches for the same key coalesce on the cache's fetch slot. Mutations
//! invalidate their declared dependency keys on success; the refetches that
//! provokes run asynchronously and are not awaited.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use api::{parse_api_error, ApiError, NormalizedError};
use dioxus::prelude::*;
use store::{QueryCache, QueryKey};

use crate::providers::use_query_cache;
use crate::toast::{push_toast, use_toasts, ToastLevel};

/// Options for [`use_api_query`].
#[derive(Clone, PartialEq)]
pub struct QueryOptions {
    /// The query only runs while this is true; domain hooks gate it on
    /// session readiness.
    pub enabled: bool,
    pub show_toast_on_error: bool,
    /// Fixed toast copy overriding the normalized human message.
    pub error_message: Option<String>,
    /// Custom handler; when set, no toast is shown.
    pub on_error: Option<EventHandler<NormalizedError>>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            show_toast_on_error: true,
            error_message: None,
            on_error: None,
        }
    }
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn on_error(mut self, handler: EventHandler<NormalizedError>) -> Self {
        self.on_error = Some(handler);
        self
    }

    /// Suppress the error toast without supplying a handler. The error is
    /// still kept in the hook state.
    pub fn silent(mut self) -> Self {
        self.show_toast_on_error = false;
        self
    }
}

/// Live state of one query.
pub struct QueryState<T> {
    pub data: Option<Rc<T>>,
    pub error: Option<NormalizedError>,
    pub loading: bool,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: true,
        }
    }
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            error: self.error.clone(),
            loading: self.loading,
        }
    }
}

/// Handle returned by [`use_api_query`].
pub struct UseQuery<T: 'static> {
    state: Signal<QueryState<T>>,
    cache: QueryCache,
    key: QueryKey,
}

impl<T> Clone for UseQuery<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            cache: self.cache.clone(),
            key: self.key.clone(),
        }
    }
}

impl<T> UseQuery<T> {
    pub fn data(&self) -> Option<Rc<T>> {
        self.state.read().data.clone()
    }

    pub fn error(&self) -> Option<NormalizedError> {
        self.state.read().error.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    /// Mark the key stale; the hook refetches on the resulting notification.
    pub fn refetch(&self) {
        self.cache.invalidate(&self.key);
    }
}

type QueryRunner<T> = Rc<dyn Fn() -> Pin<Box<dyn Future<Output = Result<T, ApiError>>>>>;

/// Render-time inputs mirrored into a signal, so the resource below re-runs
/// when the calling component passes a different key or options (hook
/// closures themselves are captured once, at mount).
struct QueryConfig<T> {
    key: QueryKey,
    options: QueryOptions,
    fetch: QueryRunner<T>,
}

impl<T> Clone for QueryConfig<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            options: self.options.clone(),
            fetch: Rc::clone(&self.fetch),
        }
    }
}

/// Run an async read against the cache under `key`.
///
/// `fetch` is invoked only when the options say the query is enabled and the
/// cache has no fresh value for the key. See the module docs for the error
/// contract.
pub fn use_api_query<T, F, Fut>(key: QueryKey, fetch: F, options: QueryOptions) -> UseQuery<T>
where
    T: 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let cache = use_query_cache();
    let toasts = use_toasts();
    let state = use_signal(QueryState::<T>::default);
    let mut epoch = use_signal(|| 0u64);

    let wrapped: QueryRunner<T> =
        Rc::new(move || Box::pin(fetch()) as Pin<Box<dyn Future<Output = Result<T, ApiError>>>>);
    let mut config = use_signal(|| QueryConfig {
        key: key.clone(),
        options: options.clone(),
        fetch: Rc::clone(&wrapped),
    });
    {
        let current = config.peek();
        let changed = current.key != key || current.options != options;
        drop(current);
        if changed {
            config.set(QueryConfig {
                key: key.clone(),
                options: options.clone(),
                fetch: Rc::clone(&wrapped),
            });
        }
    }

    // Re-render trigger: bump `epoch` whenever the key's cache entry is set
    // or invalidated. Re-subscribes when the key changes; the subscription
    // drops (and unregisters) with the component.
    let mut subscription = use_signal(|| None::<Rc<store::Subscription>>);
    let sub_cache = cache.clone();
    use_effect(move || {
        let watched = config.read().key.clone();
        let sub = sub_cache.subscribe(watched, move || {
            *epoch.write() += 1;
        });
        subscription.set(Some(Rc::new(sub)));
    });

    let run_cache = cache.clone();
    let _runner = use_resource(move || {
        let _ = epoch();
        let QueryConfig {
            key,
            options,
            fetch,
        } = config();
        let cache = run_cache.clone();
        let mut state = state;
        let mut toasts = toasts;
        async move {
            if !options.enabled {
                return;
            }
            // Serve whatever the cache holds, stale or not, for display.
            if let Some(value) = cache.get::<T>(&key) {
                let mut s = state.write();
                s.data = Some(value);
                s.loading = false;
            }
            if !cache.is_stale(&key) {
                return;
            }
            if !cache.begin_fetch(&key) {
                // Another hook instance owns the in-flight request for this
                // key; its `set` will wake us through the subscription.
                return;
            }
            state.write().loading = true;
            let result = fetch().await;
            cache.finish_fetch(&key);
            match result {
                Ok(value) => {
                    cache.set(&key, value);
                    let fresh = cache.get::<T>(&key);
                    let mut s = state.write();
                    s.data = fresh;
                    s.error = None;
                    s.loading = false;
                }
                Err(error) => {
                    let normalized = parse_api_error(&error);
                    tracing::error!(
                        key = %key,
                        code = %normalized.code,
                        status = normalized.status,
                        "query failed: {}",
                        normalized.message
                    );
                    if let Some(handler) = &options.on_error {
                        handler.call(normalized.clone());
                    } else if options.show_toast_on_error {
                        let message = options
                            .error_message
                            .clone()
                            .unwrap_or_else(|| normalized.human_message());
                        push_toast(&mut toasts, ToastLevel::Error, &message);
                    }
                    let mut s = state.write();
                    s.error = Some(normalized);
                    s.loading = false;
                }
            }
        }
    });

    UseQuery { state, cache, key }
}

/// Options for [`use_api_mutation`].
#[derive(Clone, PartialEq)]
pub struct MutationOptions {
    /// Exact keys invalidated when the mutation succeeds.
    pub invalidate_keys: Vec<QueryKey>,
    /// Key prefixes swept on success (every filter variant of a list).
    pub invalidate_prefixes: Vec<QueryKey>,
    /// Success toast is opt-in; forms usually manage their own feedback.
    pub show_toast_on_success: bool,
    pub success_message: Option<String>,
    pub show_toast_on_error: bool,
    pub error_message: Option<String>,
    pub on_success: Option<EventHandler<()>>,
    pub on_error: Option<EventHandler<NormalizedError>>,
}

impl Default for MutationOptions {
    fn default() -> Self {
        Self {
            invalidate_keys: Vec::new(),
            invalidate_prefixes: Vec::new(),
            show_toast_on_success: false,
            success_message: None,
            show_toast_on_error: true,
            error_message: None,
            on_success: None,
            on_error: None,
        }
    }
}

impl MutationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(mut self, key: QueryKey) -> Self {
        self.invalidate_keys.push(key);
        self
    }

    pub fn invalidate_prefix(mut self, prefix: QueryKey) -> Self {
        self.invalidate_prefixes.push(prefix);
        self
    }

    pub fn success_toast(mut self, message: impl Into<String>) -> Self {
        self.show_toast_on_success = true;
        self.success_message = Some(message.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn on_success(mut self, handler: EventHandler<()>) -> Self {
        self.on_success = Some(handler);
        self
    }

    pub fn on_error(mut self, handler: EventHandler<NormalizedError>) -> Self {
        self.on_error = Some(handler);
        self
    }

    pub fn silent(mut self) -> Self {
        self.show_toast_on_error = false;
        self
    }
}

type MutationRunner<I, O> = Rc<dyn Fn(I) -> Pin<Box<dyn Future<Output = Result<O, ApiError>>>>>;

/// Handle returned by [`use_api_mutation`].
pub struct UseMutation<I: 'static, O: 'static> {
    runner: MutationRunner<I, O>,
    options: MutationOptions,
    cache: QueryCache,
    toasts: Signal<crate::toast::Toasts>,
    in_flight: Signal<bool>,
    error: Signal<Option<NormalizedError>>,
}

impl<I, O> Clone for UseMutation<I, O> {
    fn clone(&self) -> Self {
        Self {
            runner: Rc::clone(&self.runner),
            options: self.options.clone(),
            cache: self.cache.clone(),
            toasts: self.toasts,
            in_flight: self.in_flight,
            error: self.error,
        }
    }
}

impl<I, O> UseMutation<I, O> {
    pub fn in_flight(&self) -> bool {
        *self.in_flight.read()
    }

    pub fn error(&self) -> Option<NormalizedError> {
        self.error.read().clone()
    }

    /// Run the mutation. The error is normalized, reported (handler or
    /// toast), kept in the hook state, and still returned to the caller.
    pub async fn run(&self, input: I) -> Result<O, NormalizedError> {
        let mut in_flight = self.in_flight;
        let mut error = self.error;
        let mut toasts = self.toasts;

        in_flight.set(true);
        let result = (self.runner)(input).await;
        in_flight.set(false);

        match result {
            Ok(output) => {
                // Synchronous invalidation; the refetches it triggers are
                // async and not awaited here.
                for key in &self.options.invalidate_keys {
                    self.cache.invalidate(key);
                }
                for prefix in &self.options.invalidate_prefixes {
                    self.cache.invalidate_prefix(prefix);
                }
                if self.options.show_toast_on_success {
                    let message = self
                        .options
                        .success_message
                        .clone()
                        .unwrap_or_else(|| "Saved".to_string());
                    push_toast(&mut toasts, ToastLevel::Success, &message);
                }
                if let Some(handler) = &self.options.on_success {
                    handler.call(());
                }
                error.set(None);
                Ok(output)
            }
            Err(e) => {
                let normalized = parse_api_error(&e);
                tracing::error!(
                    code = %normalized.code,
                    status = normalized.status,
                    "mutation failed: {}",
                    normalized.message
                );
                if let Some(handler) = &self.options.on_error {
                    handler.call(normalized.clone());
                } else if self.options.show_toast_on_error {
                    let message = self
                        .options
                        .error_message
                        .clone()
                        .unwrap_or_else(|| normalized.human_message());
                    push_toast(&mut toasts, ToastLevel::Error, &message);
                }
                error.set(Some(normalized.clone()));
                Err(normalized)
            }
        }
    }

    /// Fire-and-forget variant for plain button handlers.
    pub fn dispatch(&self, input: I) {
        let this = self.clone();
        spawn(async move {
            let _ = this.run(input).await;
        });
    }
}

/// Build a mutation handle around an async call.
pub fn use_api_mutation<I, O, F, Fut>(run: F, options: MutationOptions) -> UseMutation<I, O>
where
    I: 'static,
    O: 'static,
    F: Fn(I) -> Fut + 'static,
    Fut: Future<Output = Result<O, ApiError>> + 'static,
{
    let cache = use_query_cache();
    let toasts = use_toasts();
    let in_flight = use_signal(|| false);
    let error = use_signal(|| None::<NormalizedError>);
    // Rebuilt every render on purpose: the handle event handlers capture is
    // the one from their own render, so the closure never goes stale.
    let runner: MutationRunner<I, O> = Rc::new(move |input: I| {
        Box::pin(run(input)) as Pin<Box<dyn Future<Output = Result<O, ApiError>>>>
    });

    UseMutation {
        runner,
        options,
        cache,
        toasts,
        in_flight,
        error,
    }
}
