//! # API crate — typed client for the Moneta backend
//!
//! Everything the frontends need to talk to the REST backend lives here:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | `AppConfig` — base URL, request timeout, display currency |
//! | [`models`] | DTOs mirrored from the server schema (accounts, transactions, goals, SMS logs, reference data) |
//! | [`error`] | The server error envelope, [`ApiError`], and [`parse_api_error`] normalization |
//! | [`session`] | The injected [`Session`] seam: auth readiness + bearer token source |
//! | [`client`] | [`ApiClient`] — reqwest wrapper that attaches the bearer token and decodes the envelope |
//! | [`accounts`] / [`transactions`] / [`goals`] / [`sms`] / [`static_data`] / [`user`] / [`reconciliation`] / [`health`] | One module per backend domain |
//!
//! The client holds no authoritative state; every entity is owned by the
//! server and cached only transiently by the `store` crate.

pub mod accounts;
pub mod client;
pub mod config;
pub mod error;
pub mod goals;
pub mod health;
pub mod models;
pub mod reconciliation;
pub mod session;
pub mod sms;
pub mod static_data;
pub mod transactions;
pub mod user;

pub use client::ApiClient;
pub use config::AppConfig;
pub use error::{parse_api_error, ApiError, ApiErrorBody, ErrorAction, FieldError, NormalizedError};
pub use models::{
    Account, AccountPayload, AccountType, Bank, Category, DeleteTransactionRequest, GoalPayload,
    GoalPriority, GoalStatus, HealthStatus, InvestmentGoal, Merchant, ParsedReceipt, ParsingStatus,
    SmsLog, SmsPayload, Transaction, TransactionFilter, TransactionPayload, TransactionType,
    UploadReceipt, UserPayload, UserProfile,
};
pub use session::{BearerSession, Session};
