//! Defines the core data models for transactions.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use time::{Date, OffsetDateTime, macros::format_description};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// An opaque identifier for a bank account, usually an IBAN.
pub type AccountId = String;

/// The number that transaction IDs count up from.
///
/// IDs are incremented before use, so the first transaction is `TXN1001`.
pub const TRANSACTION_ID_START: u64 = 1000;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming into the account.
    Income,
    /// Money leaving the account.
    Expense,
}

impl TransactionKind {
    /// The category used when a transaction is recorded without one.
    pub fn default_category(self) -> &'static str {
        match self {
            TransactionKind::Income => "Salary",
            TransactionKind::Expense => "Entertainment",
        }
    }
}

/// A unique, monotonically assigned transaction ID, written as `TXN<n>`.
///
/// The number is written without leading zeros, so each ID has exactly one
/// text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(u64);

impl TransactionId {
    const PREFIX: &'static str = "TXN";

    /// Create a transaction ID from its sequence number.
    pub fn new(sequence_number: u64) -> Self {
        Self(sequence_number)
    }

    /// The sequence number of the ID, e.g. 1001 for `TXN1001`.
    pub fn sequence_number(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// The string was not of the form `TXN<n>`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a valid transaction ID")]
pub struct ParseTransactionIdError(String);

impl FromStr for TransactionId {
    type Err = ParseTransactionIdError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.strip_prefix(Self::PREFIX)
            .filter(|digits| digits.bytes().all(|byte| byte.is_ascii_digit()))
            .filter(|digits| *digits == "0" || !digits.starts_with('0'))
            .and_then(|digits| digits.parse().ok())
            .map(Self)
            .ok_or_else(|| ParseTransactionIdError(text.to_owned()))
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// The reasons a value cannot be used as a transaction amount.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountError {
    /// The value is not a decimal number.
    #[error("Invalid amount format")]
    Format(String),
    /// The value is zero or negative.
    #[error("Amount must be positive")]
    NotPositive(Decimal),
}

/// An exact decimal amount of money greater than zero.
///
/// Sent and received as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount, rejecting values that are not positive.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }

        Ok(Self(value))
    }

    /// The amount in dollars.
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parse plain (`"12.50"`) or scientific (`"1.25e1"`) decimal text.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| AmountError::Format(text.to_owned()))?;

        Self::new(value)
    }
}

/// An income or expense recorded against an account.
///
/// Transactions are never modified once recorded, they can only be removed.
/// To create a new `Transaction`, use [Transaction::build] and hand the
/// builder to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    #[serde(rename = "tid")]
    pub id: TransactionId,
    /// The account the transaction belongs to.
    #[serde(rename = "iban")]
    pub account_id: AccountId,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The amount of money earned or spent.
    pub amount: Amount,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: String,
    /// The category of the transaction, e.g. "Salary", "Food".
    pub category: String,
    /// When the transaction was recorded.
    #[serde(rename = "timestamp", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Start building a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(account_id: &str, amount: Amount, date: Date) -> TransactionBuilder {
        TransactionBuilder {
            account_id: account_id.to_owned(),
            amount,
            date,
            description: String::new(),
            category: None,
        }
    }

    /// The effect of the transaction on the account balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount.value(),
            TransactionKind::Expense => -self.amount.value(),
        }
    }
}

/// A builder for transactions that have not been recorded yet.
///
/// The ledger assigns the ID, kind and creation time when the transaction is
/// recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The account to record the transaction against.
    pub account_id: AccountId,
    /// The amount of money earned or spent.
    pub amount: Amount,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of the transaction. Empty if not specified.
    pub description: String,
    /// The category, or `None` to use the default for the transaction kind.
    pub category: Option<String>,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category for the transaction.
    ///
    /// A blank category is treated as unset.
    pub fn category(mut self, category: &str) -> Self {
        let category = category.trim();
        self.category = (!category.is_empty()).then(|| category.to_owned());
        self
    }

    /// The category the transaction will be recorded under.
    pub fn category_or_default(&self, kind: TransactionKind) -> &str {
        self.category
            .as_deref()
            .unwrap_or_else(|| kind.default_category())
    }

    pub(crate) fn finalize(
        self,
        id: TransactionId,
        kind: TransactionKind,
        created_at: OffsetDateTime,
    ) -> Transaction {
        let category = self
            .category
            .unwrap_or_else(|| kind.default_category().to_owned());

        Transaction {
            id,
            account_id: self.account_id,
            kind,
            amount: self.amount,
            date: self.date,
            description: self.description,
            category,
            created_at,
        }
    }
}

/// Parse a calendar date of the form `YYYY-MM-DD`.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is not a valid calendar date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod transaction_id_tests {
    use super::TransactionId;

    #[test]
    fn displays_with_prefix() {
        assert_eq!(TransactionId::new(1001).to_string(), "TXN1001");
    }

    #[test]
    fn parses_displayed_id() {
        assert_eq!("TXN1042".parse(), Ok(TransactionId::new(1042)));
        assert_eq!("TXN0".parse(), Ok(TransactionId::new(0)));
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!("1042".parse::<TransactionId>().is_err());
        assert!("TXN".parse::<TransactionId>().is_err());
        assert!("TXN-1".parse::<TransactionId>().is_err());
        assert!("TXN+1".parse::<TransactionId>().is_err());
        assert!("TXN01001".parse::<TransactionId>().is_err());
        assert!("TXN00".parse::<TransactionId>().is_err());
        assert!("txn1042".parse::<TransactionId>().is_err());
    }
}
