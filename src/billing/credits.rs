use rust_decimal::Decimal;

use crate::{
    types::{currency, models::Wallet},
    utils::error::BillingError,
};

/// Currency value of `credits` at `conversion_rate` currency units per credit.
pub fn credits_to_amount(credits: Decimal, conversion_rate: Decimal) -> Result<Decimal, BillingError> {
    credits.checked_mul(conversion_rate).ok_or_else(|| {
        BillingError::AmountOverflow(format!("{} credits at rate {}", credits, conversion_rate))
    })
}

/// Credits purchasable with `amount`.
pub fn amount_to_credits(amount: Decimal, conversion_rate: Decimal) -> Result<Decimal, BillingError> {
    if conversion_rate <= Decimal::ZERO {
        return Err(BillingError::InvalidConversionRate(conversion_rate));
    }
    amount.checked_div(conversion_rate).ok_or_else(|| {
        BillingError::AmountOverflow(format!("{} at rate {}", amount, conversion_rate))
    })
}

impl Wallet {
    /// Balance expressed in the wallet currency, rounded to its precision.
    pub fn balance_amount(&self) -> Result<Decimal, BillingError> {
        let amount = credits_to_amount(self.balance, self.conversion_rate)?;
        Ok(currency::round_amount(amount, &self.currency))
    }

    pub fn formatted_balance(&self) -> Result<String, BillingError> {
        Ok(currency::format_amount(self.balance_amount()?, &self.currency))
    }
}
