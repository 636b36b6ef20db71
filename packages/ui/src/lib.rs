//! This crate contains all shared UI for the workspace: the query/mutation
//! hooks over the cache, the domain hooks, the form system, the dropdown and
//! data-grid primitives, and the views composed from them.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod platform;
pub use platform::today;

pub mod components;
pub use components::{Button, ButtonVariant, Input, Label, Textarea};

mod providers;
pub use providers::{provide_data_layer, use_api_client, use_query_cache};

mod toast;
pub use toast::{push_toast, use_toasts, Toast, ToastLevel, ToastProvider, Toasts};

mod auth;
pub use auth::{set_signed_in, set_signed_out, use_auth, AuthProvider, AuthState};

mod query;
pub use query::{
    use_api_mutation, use_api_query, MutationOptions, QueryOptions, UseMutation, UseQuery,
};

pub mod hooks;

pub mod form;
pub use form::{
    accept_date, use_form, FormCheckbox, FormCore, FormDatePicker, FormInput, FormSelect,
    FormSwitch, FormTextarea, Rule, Schema, SelectChoice, UseForm,
};

mod dropdown;
pub use dropdown::{
    filter_options, AsyncDropdown, Dropdown, DropdownOption, OptionLoader, SearchDebouncer,
};

mod data_grid;
pub use data_grid::{CellEdit, DataGrid, EmptyState, GridColumn};

pub mod format;

pub mod views;

mod navbar;
pub use navbar::Navbar;
