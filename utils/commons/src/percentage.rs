use super::*;
use core::{convert::TryFrom, ops::Mul};

/// 100% in micro percent.
const HUNDRED_PERCENT: u64 = 100_000_000;

/// Share expressed in micro percent (1% is `1_000_000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, SchemaType)]
pub struct Percentage(u64);

impl Percentage {
    pub const fn from_micro_percent(micro_percent: u64) -> Self {
        Self(micro_percent)
    }

    pub const fn from_percent(percent: u64) -> Self {
        Self(percent * 1_000_000)
    }

    pub fn micro_percent(&self) -> u64 {
        self.0
    }

    /// True for shares between 0% and 100%.
    pub fn is_valid_share(&self) -> bool {
        self.0 <= HUNDRED_PERCENT
    }

    /// Splits `amount` into `(share, rest)`.
    ///
    /// The share rounds down, so `rest` carries the rounding remainder and
    /// both parts always add up to `amount`.
    pub fn split(&self, amount: Amount) -> (Amount, Amount) {
        let share = *self * amount;
        (share, Amount::from_micro_ccd(amount.micro_ccd - share.micro_ccd))
    }
}

impl Mul<Amount> for Percentage {
    type Output = Amount;

    fn mul(self, rhs: Amount) -> Self::Output {
        let share = u128::from(rhs.micro_ccd) * u128::from(self.0.min(HUNDRED_PERCENT))
            / u128::from(HUNDRED_PERCENT);
        Amount::from_micro_ccd(u64::try_from(share).unwrap_or(rhs.micro_ccd))
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_percentage_of_amount() {
        claim_eq!(
            Percentage::from_percent(10) * Amount::from_ccd(15),
            Amount::from_micro_ccd(1_500_000)
        );
        claim_eq!(
            Percentage::from_micro_percent(2_500_000) * Amount::from_ccd(1),
            Amount::from_micro_ccd(25_000)
        );
        claim_eq!(Percentage::from_percent(0) * Amount::from_ccd(1), Amount::zero());
    }

    #[concordium_test]
    fn test_split_keeps_remainder() {
        let (share, rest) = Percentage::from_percent(20).split(Amount::from_micro_ccd(7));
        claim_eq!(share, Amount::from_micro_ccd(1));
        claim_eq!(rest, Amount::from_micro_ccd(6));

        let (share, rest) = Percentage::from_percent(100).split(Amount::from_ccd(3));
        claim_eq!(share, Amount::from_ccd(3));
        claim_eq!(rest, Amount::zero());
    }

    #[concordium_test]
    fn test_valid_share() {
        claim!(Percentage::from_percent(100).is_valid_share());
        claim!(!Percentage::from_micro_percent(100_000_001).is_valid_share());
    }
}
