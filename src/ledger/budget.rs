//! Category budget rules and the calendar months they are measured over.

use std::fmt;

use rust_decimal::Decimal;
use time::{Date, Month};

use crate::{
    currency::{format_currency, format_currency_rounded},
    transaction::Amount,
};

/// A calendar month in a specific year, e.g. January 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: Month,
}

impl CalendarMonth {
    /// Create a calendar month.
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The month that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Whether `date` falls within this month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

/// Spending limits for expenses in a single category.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRule {
    /// The category the rule applies to, matched exactly.
    pub category: String,
    /// Single expenses of this amount or more are rejected.
    pub single_transaction_limit: Decimal,
    /// Expenses that would take the month's spending in the category past
    /// this amount are rejected.
    pub monthly_limit: Decimal,
}

impl BudgetRule {
    /// Create a rule for `category`.
    pub fn new(category: &str, single_transaction_limit: Decimal, monthly_limit: Decimal) -> Self {
        Self {
            category: category.to_owned(),
            single_transaction_limit,
            monthly_limit,
        }
    }

    /// The rule for the "Fun" category: less than $5,000 at a time and at most
    /// $10,000 a month.
    pub fn fun() -> Self {
        Self::new("Fun", Decimal::from(5000), Decimal::from(10000))
    }

    /// Whether the rule covers expenses in `category`.
    pub fn applies_to(&self, category: &str) -> bool {
        self.category == category
    }

    /// Check a new expense of `amount` against the rule.
    ///
    /// `month_to_date` is what has already been spent in the category this month.
    ///
    /// # Errors
    /// Returns the [BudgetWarning] for the first limit that the expense breaks.
    pub fn check(&self, amount: Amount, month_to_date: Decimal) -> Result<(), BudgetWarning> {
        if amount.value() >= self.single_transaction_limit {
            return Err(BudgetWarning::SingleTransactionLimit {
                category: self.category.clone(),
                limit: self.single_transaction_limit,
            });
        }

        if month_to_date + amount.value() > self.monthly_limit {
            return Err(BudgetWarning::MonthlyLimit {
                category: self.category.clone(),
                limit: self.monthly_limit,
                current_spending: month_to_date,
            });
        }

        Ok(())
    }
}

/// An expense that was not recorded because it breaks a [BudgetRule].
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetWarning {
    /// The expense is at or over the single transaction limit.
    SingleTransactionLimit {
        /// The category of the expense.
        category: String,
        /// The limit that was reached.
        limit: Decimal,
    },
    /// The expense would take the month's spending over the monthly limit.
    MonthlyLimit {
        /// The category of the expense.
        category: String,
        /// The limit that would be exceeded.
        limit: Decimal,
        /// What has been spent in the category this month.
        current_spending: Decimal,
    },
}

impl fmt::Display for BudgetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetWarning::SingleTransactionLimit { category, limit } => write!(
                f,
                "WARNING: You are exceeding one-time budget constraint for {category} category ({})!",
                format_currency_rounded(limit)
            ),
            BudgetWarning::MonthlyLimit {
                category,
                limit,
                current_spending,
            } => write!(
                f,
                "WARNING: Monthly {category} budget limit ({}) will be exceeded! Current spending: {}",
                format_currency_rounded(limit),
                format_currency(current_spending)
            ),
        }
    }
}

impl std::error::Error for BudgetWarning {}
