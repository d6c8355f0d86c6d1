//! The request body for recording income or an expense.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    transaction::core::{Amount, AmountError, Transaction, TransactionBuilder, parse_date},
};

/// An amount as sent by the client, either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `12.5`.
    Number(Decimal),
    /// A string holding a number, e.g. `"12.5"`.
    Text(String),
}

impl AmountInput {
    /// Convert the input to a positive amount.
    ///
    /// # Errors
    /// Returns an [AmountError] if the input is not a number or is not positive.
    pub fn parse(&self) -> Result<Amount, AmountError> {
        match self {
            AmountInput::Number(value) => Amount::new(*value),
            AmountInput::Text(text) => text.parse(),
        }
    }
}

/// The form data for recording a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionForm {
    /// The account to record the transaction against.
    pub iban: String,
    /// The value of the transaction in dollars.
    pub amount: AmountInput,
    /// When the transaction happened, as `YYYY-MM-DD`.
    pub date: String,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The category of the transaction. The default depends on whether the
    /// transaction is income or an expense.
    #[serde(default)]
    pub category: Option<String>,
}

impl TransactionForm {
    /// Validate the form and turn it into a [TransactionBuilder].
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is not a positive number,
    /// - or [Error::InvalidDate] if the date is not a valid calendar date.
    pub fn into_builder(self) -> Result<TransactionBuilder, Error> {
        let amount = self.amount.parse()?;
        let date = parse_date(&self.date)?;

        let mut builder = Transaction::build(&self.iban, amount, date);

        if let Some(description) = &self.description {
            builder = builder.description(description);
        }

        if let Some(category) = &self.category {
            builder = builder.category(category);
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        Error,
        transaction::{AmountError, form::AmountInput},
    };

    use super::TransactionForm;

    fn parse_form(value: serde_json::Value) -> TransactionForm {
        serde_json::from_value(value).expect("Could not parse form")
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(
            AmountInput::Number(dec!(12.5)).parse().unwrap().value(),
            dec!(12.5)
        );
        assert_eq!(
            AmountInput::Text("12.5".to_owned()).parse().unwrap().value(),
            dec!(12.5)
        );
    }

    #[test]
    fn deserializes_integer_amounts() {
        let form = parse_form(json!({"iban": "IBAN1", "amount": 100, "date": "2024-01-01"}));

        assert_eq!(form.amount, AmountInput::Number(dec!(100)));
        assert_eq!(form.description, None);
        assert_eq!(form.category, None);
    }

    #[test]
    fn deserializes_fractional_amounts_exactly() {
        let form = parse_form(json!({"iban": "IBAN1", "amount": 0.1, "date": "2024-01-01"}));

        assert_eq!(form.amount, AmountInput::Number(dec!(0.1)));
    }

    #[test]
    fn builds_transaction_with_optional_fields() {
        let form = parse_form(json!({
            "iban": "IBAN1",
            "amount": "30",
            "date": "2024-01-02",
            "description": "coffee",
            "category": "Food",
        }));

        let builder = form.into_builder().unwrap();

        assert_eq!(builder.account_id, "IBAN1");
        assert_eq!(builder.amount.value(), dec!(30));
        assert_eq!(builder.date, date!(2024 - 01 - 02));
        assert_eq!(builder.description, "coffee");
        assert_eq!(builder.category.as_deref(), Some("Food"));
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let form = parse_form(json!({"iban": "IBAN1", "amount": "lots", "date": "2024-01-02"}));

        assert_eq!(
            form.into_builder(),
            Err(Error::InvalidAmount(AmountError::Format("lots".to_owned())))
        );
    }

    #[test]
    fn rejects_non_positive_amount() {
        let form = parse_form(json!({"iban": "IBAN1", "amount": -5, "date": "2024-01-02"}));

        assert_eq!(
            form.into_builder(),
            Err(Error::InvalidAmount(AmountError::NotPositive(dec!(-5))))
        );
    }

    #[test]
    fn rejects_invalid_date() {
        let form = parse_form(json!({"iban": "IBAN1", "amount": 5, "date": "2024-13-01"}));

        assert_eq!(
            form.into_builder(),
            Err(Error::InvalidDate("2024-13-01".to_owned()))
        );
    }
}
