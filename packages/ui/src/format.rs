//! Display helpers: money, percentages, dates, account roll-ups.
//!
//! Amount signs live here and nowhere else: the server owns the numbers,
//! the client only decides how they read.

use api::{Account, TransactionType};
use chrono::NaiveDate;
use num_format::{Buffer, Locale};

/// Format an amount as `CUR 1,234.50`, grouping the integer part.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let mut buffer = Buffer::default();
    buffer.write_formatted(&whole, &Locale::en);

    let sign = if negative { "-" } else { "" };
    format!("{sign}{currency} {}.{frac:02}", buffer.as_str())
}

/// Amount with the sign the transaction type implies: inflows read "+",
/// everything else "-". The stored amount's own sign is ignored.
pub fn signed_amount(transaction_type: TransactionType, amount: f64, currency: &str) -> String {
    let sign = if transaction_type.is_inflow() { "+" } else { "-" };
    format!("{sign}{}", format_currency(amount.abs(), currency))
}

/// Whole-number percent for progress bars.
pub fn format_percent(percent: f64) -> String {
    format!("{}%", percent.round() as i64)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Roll-up shown in the accounts header.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AccountSummary {
    pub total_balance: f64,
    pub active: usize,
    pub total: usize,
}

pub fn account_summary(accounts: &[Account]) -> AccountSummary {
    AccountSummary {
        total_balance: accounts.iter().map(|a| a.current_balance).sum(),
        active: accounts.iter().filter(|a| a.is_active).count(),
        total: accounts.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{AccountType, Bank};

    fn account(id: &str, balance: f64, active: bool) -> Account {
        Account {
            id: id.to_string(),
            name: format!("Account {id}"),
            account_number: "XX1234".to_string(),
            account_type: AccountType::Savings,
            bank: Bank {
                name: "HDFC".to_string(),
                code: "HDFC".to_string(),
            },
            current_balance: balance,
            is_primary: false,
            is_active: active,
        }
    }

    #[test]
    fn currency_groups_and_rounds() {
        assert_eq!(format_currency(1234.5, "INR"), "INR 1,234.50");
        assert_eq!(format_currency(0.0, "INR"), "INR 0.00");
        assert_eq!(format_currency(-99.999, "USD"), "-USD 100.00");
    }

    #[test]
    fn signs_follow_transaction_type() {
        let debit = signed_amount(TransactionType::Debit, 75.0, "INR");
        assert!(debit.starts_with('-'));
        assert!(debit.contains("75.00"));

        let income = signed_amount(TransactionType::Income, 75.0, "INR");
        assert!(income.starts_with('+'));
        assert!(income.contains("75.00"));

        // Stored sign is display-irrelevant.
        assert_eq!(
            signed_amount(TransactionType::Refund, -12.0, "INR"),
            "+INR 12.00"
        );
    }

    #[test]
    fn summary_totals_and_active_count() {
        let accounts = vec![account("1", 100.0, true), account("2", 250.0, false)];
        let summary = account_summary(&accounts);
        assert_eq!(summary.total_balance, 350.0);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.total, 2);
    }
}
