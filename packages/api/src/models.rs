//! # Domain models mirrored from the server schema
//!
//! Thin DTOs for everything the backend owns. The client never derives
//! authoritative state from these beyond the transient query cache; derived
//! display values (signs, totals) live in the UI layer. The one exception is
//! [`InvestmentGoal::progress_percent`], which the server leaves to clients.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A bank the user holds an account with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub name: String,
    pub code: String,
}

/// Kind of financial account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Current,
    CreditCard,
    Wallet,
}

impl AccountType {
    pub const ALL: [AccountType; 4] = [
        AccountType::Savings,
        AccountType::Current,
        AccountType::CreditCard,
        AccountType::Wallet,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
            AccountType::CreditCard => "Credit Card",
            AccountType::Wallet => "Wallet",
        }
    }

    /// Wire name, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Current => "CURRENT",
            AccountType::CreditCard => "CREDIT_CARD",
            AccountType::Wallet => "WALLET",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

/// A financial account.
///
/// At most one account per user is primary; the server enforces it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_number: String,
    pub account_type: AccountType,
    pub bank: Bank,
    pub current_balance: f64,
    pub is_primary: bool,
    pub is_active: bool,
}

/// Create/update body for an account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountPayload {
    pub name: String,
    pub account_number: String,
    pub account_type: Option<AccountType>,
    pub bank_code: String,
    pub is_primary: bool,
    pub is_active: bool,
}

/// Transaction kind. Sign semantics depend on it and are interpreted
/// only for display (INCOME/CREDIT/REFUND render with a leading "+").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Debit,
    Credit,
    Income,
    Subscription,
    Investment,
    Refund,
}

impl TransactionType {
    pub const ALL: [TransactionType; 6] = [
        TransactionType::Debit,
        TransactionType::Credit,
        TransactionType::Income,
        TransactionType::Subscription,
        TransactionType::Investment,
        TransactionType::Refund,
    ];

    /// Wire name, also used as a cache-key segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Debit => "DEBIT",
            TransactionType::Credit => "CREDIT",
            TransactionType::Income => "INCOME",
            TransactionType::Subscription => "SUBSCRIPTION",
            TransactionType::Investment => "INVESTMENT",
            TransactionType::Refund => "REFUND",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }

    /// Whether amounts of this type are money coming in.
    pub fn is_inflow(&self) -> bool {
        matches!(
            self,
            TransactionType::Credit | TransactionType::Income | TransactionType::Refund
        )
    }
}

/// A transaction, with denormalized reference names for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub account_name: String,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub merchant_id: Option<String>,
    pub merchant_name: Option<String>,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Soft-delete marker; deleted rows are filtered server-side by default.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create body for a transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionPayload {
    pub account_id: String,
    pub category_id: Option<String>,
    pub merchant_id: Option<String>,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
}

/// Soft-delete body for `DELETE /transaction`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteTransactionRequest {
    pub transaction_id: String,
}

/// Server-side filter parameters for the transaction list.
///
/// Every set field becomes a query parameter and a cache-key segment, so
/// distinct filter combinations cache independently.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionFilter {
    pub account_id: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(ref id) = self.account_id {
            pairs.push(("account_id".to_string(), id.clone()));
        }
        if let Some(t) = self.transaction_type {
            pairs.push(("type".to_string(), t.as_str().to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from".to_string(), from.to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("to".to_string(), to.to_string()));
        }
        pairs
    }

    /// Cache-key segments, `name=value`, in a stable order.
    pub fn key_segments(&self) -> Vec<String> {
        self.query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect()
    }
}

/// Draft transaction fields extracted from a receipt image by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    pub amount: Option<f64>,
    pub merchant_name: Option<String>,
    pub transaction_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Investment goal priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

impl GoalPriority {
    pub const ALL: [GoalPriority; 3] = [GoalPriority::Low, GoalPriority::Medium, GoalPriority::High];

    pub fn label(&self) -> &'static str {
        match self {
            GoalPriority::Low => "Low",
            GoalPriority::Medium => "Medium",
            GoalPriority::High => "High",
        }
    }

    /// Wire name, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPriority::Low => "low",
            GoalPriority::Medium => "medium",
            GoalPriority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == s)
    }
}

/// Investment goal lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Completed,
    OnHold,
    Cancelled,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 4] = [
        GoalStatus::Active,
        GoalStatus::Completed,
        GoalStatus::OnHold,
        GoalStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::Active => "Active",
            GoalStatus::Completed => "Completed",
            GoalStatus::OnHold => "On hold",
            GoalStatus::Cancelled => "Cancelled",
        }
    }

    /// Wire name, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::OnHold => "on_hold",
            GoalStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s2| s2.as_str() == s)
    }
}

/// An investment goal with a target amount and date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvestmentGoal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub priority: GoalPriority,
    pub status: GoalStatus,
}

impl InvestmentGoal {
    /// Progress towards the target, clamped to `[0, 100]`.
    /// A zero or negative target reads as 0% rather than dividing by it.
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount * 100.0).clamp(0.0, 100.0)
    }
}

/// Create/update body for an investment goal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalPayload {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub priority: GoalPriority,
    pub status: GoalStatus,
}

/// Outcome of the upstream SMS parser for one message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsingStatus {
    Pending,
    Parsed,
    Failed,
    Ignored,
}

impl ParsingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ParsingStatus::Pending => "Pending",
            ParsingStatus::Parsed => "Parsed",
            ParsingStatus::Failed => "Failed",
            ParsingStatus::Ignored => "Ignored",
        }
    }
}

/// An ingested SMS message, read-mostly on the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmsLog {
    pub id: String,
    pub sender: String,
    pub message: String,
    pub parsing_status: ParsingStatus,
    pub llm_parsed: bool,
    pub received_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Manual ingest body for `POST /sms`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SmsPayload {
    pub sender: String,
    pub message: String,
}

/// Reference data from the static endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: String,
    pub name: String,
}

/// The signed-in user's profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub currency: String,
}

/// Update body for `PUT /user`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub currency: String,
}

/// Acknowledgement for an accepted reconciliation statement upload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub id: String,
    pub status: String,
}

/// Backend liveness response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_percent_clamps() {
        let mut goal = InvestmentGoal {
            id: "g1".to_string(),
            name: "Emergency fund".to_string(),
            target_amount: 1000.0,
            current_amount: 250.0,
            target_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
            priority: GoalPriority::High,
            status: GoalStatus::Active,
        };
        assert_eq!(goal.progress_percent(), 25.0);

        goal.current_amount = 1500.0;
        assert_eq!(goal.progress_percent(), 100.0);

        goal.current_amount = -10.0;
        assert_eq!(goal.progress_percent(), 0.0);

        goal.target_amount = 0.0;
        assert_eq!(goal.progress_percent(), 0.0);
    }

    #[test]
    fn transaction_type_roundtrip() {
        for t in TransactionType::ALL {
            assert_eq!(TransactionType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(TransactionType::from_str("JUNK"), None);
        assert!(TransactionType::Income.is_inflow());
        assert!(!TransactionType::Subscription.is_inflow());
    }

    #[test]
    fn filter_segments_follow_set_fields() {
        let filter = TransactionFilter {
            account_id: Some("42".to_string()),
            transaction_type: Some(TransactionType::Debit),
            from: None,
            to: None,
        };
        assert_eq!(
            filter.key_segments(),
            vec!["account_id=42".to_string(), "type=DEBIT".to_string()]
        );
        assert!(TransactionFilter::default().key_segments().is_empty());
    }
}
