//! Price ladder of the 512 bid slots.
//!
//! Slot 0 costs the base price, every 64 slots the price doubles and inside a
//! band of 64 slots it grows linearly.
use commons::CustomContractError;
use concordium_std::*;
use core::convert::TryFrom;

/// Number of price slots of every auction.
pub const NUM_SLOTS: u16 = 512;

/// Slots between two doublings of the slot price.
pub const SLOTS_PER_PRICE_DOUBLE: u16 = NUM_SLOTS / 8;

/// Exclusive upper bound for the base price of the ladder.
pub const BASE_PRICE_LIMIT: u128 = 1 << 88;

/// Smallest base price for which every slot is strictly more expensive than
/// the slot below it.
pub const MIN_BASE_PRICE: Amount = Amount {
    micro_ccd: SLOTS_PER_PRICE_DOUBLE as u64,
};

/// Bids worth less than this are outbid at +5%, other bids at +2.5%.
pub const OUTBID_THRESHOLD: Amount = Amount {
    micro_ccd: 500_000,
};

/// Value of `slot_index` on a ladder starting at `base_price`.
pub fn slot_index_to_bid_value(
    base_price: u128,
    slot_index: u16,
) -> Result<u128, CustomContractError> {
    ensure!(base_price < BASE_PRICE_LIMIT, CustomContractError::InvalidBasePrice);
    ensure!(slot_index < NUM_SLOTS, CustomContractError::SlotOutOfRange);

    let band_price = base_price << (slot_index / SLOTS_PER_PRICE_DOUBLE);
    let band_offset = u128::from(slot_index % SLOTS_PER_PRICE_DOUBLE);
    Ok(band_price + band_price * band_offset / u128::from(SLOTS_PER_PRICE_DOUBLE))
}

/// [`slot_index_to_bid_value`] in CCD.
pub fn slot_amount(base_price: Amount, slot_index: u16) -> Result<Amount, CustomContractError> {
    let value = slot_index_to_bid_value(u128::from(base_price.micro_ccd), slot_index)?;
    u64::try_from(value)
        .map(Amount::from_micro_ccd)
        .map_err(|_| CustomContractError::InvalidBasePrice)
}

/// Whether an auction can use `base_price`: the ladder must be strictly
/// increasing and its top slot must be representable in CCD.
pub fn is_valid_base_price(base_price: Amount) -> bool {
    base_price >= MIN_BASE_PRICE && slot_amount(base_price, NUM_SLOTS - 1).is_ok()
}

/// Whether `new_value` beats `old_value` by the required margin.
pub fn is_sufficient_outbid(new_value: Amount, old_value: Amount) -> bool {
    let new_value_micro = u128::from(new_value.micro_ccd);
    let old_value_micro = u128::from(old_value.micro_ccd);
    if old_value < OUTBID_THRESHOLD {
        new_value_micro * 20 >= old_value_micro * 21
    } else {
        new_value_micro * 40 >= old_value_micro * 41
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_ladder_anchors() {
        let base = 1_000_000u128;
        claim_eq!(slot_index_to_bid_value(base, 0), Ok(base));
        claim_eq!(slot_index_to_bid_value(base, 2), Ok(1_031_250));
        claim_eq!(slot_index_to_bid_value(base, 32), Ok(1_500_000));
        claim_eq!(slot_index_to_bid_value(base, 64), Ok(2 * base));
        claim_eq!(slot_index_to_bid_value(base, 128), Ok(4 * base));
        claim_eq!(slot_index_to_bid_value(base, 511), Ok(128 * base + 128 * base * 63 / 64));
    }

    #[concordium_test]
    fn test_ladder_strictly_increasing() {
        for base in [MIN_BASE_PRICE.micro_ccd, 100_000, 1_000_000, 123_456_789].iter() {
            let mut previous = 0u128;
            for slot in 0..NUM_SLOTS {
                let value = slot_index_to_bid_value(u128::from(*base), slot)
                    .expect_report("Slot value should exist");
                claim!(value > previous);
                previous = value;
            }
        }
    }

    #[concordium_test]
    fn test_ladder_bounds() {
        claim_eq!(
            slot_index_to_bid_value(BASE_PRICE_LIMIT, 0),
            Err(CustomContractError::InvalidBasePrice)
        );
        claim_eq!(
            slot_index_to_bid_value(1_000_000, NUM_SLOTS),
            Err(CustomContractError::SlotOutOfRange)
        );
        // Largest accepted base price stays far from overflow at the top slot.
        claim!(slot_index_to_bid_value(BASE_PRICE_LIMIT - 1, NUM_SLOTS - 1).is_ok());
    }

    #[concordium_test]
    fn test_base_price_validation() {
        claim!(is_valid_base_price(MIN_BASE_PRICE));
        claim!(is_valid_base_price(Amount::from_ccd(1_000)));
        claim!(!is_valid_base_price(Amount::from_micro_ccd(63)));
        claim!(!is_valid_base_price(Amount::from_micro_ccd(u64::MAX / 64)));
        claim_eq!(
            slot_amount(Amount::from_micro_ccd(u64::MAX / 64), NUM_SLOTS - 1),
            Err(CustomContractError::InvalidBasePrice)
        );
    }

    #[concordium_test]
    fn test_outbid_margin_below_threshold() {
        let base = Amount::from_micro_ccd(100_000);
        let slot_value = |slot| slot_amount(base, slot).expect_report("Slot value should exist");

        claim_eq!(slot_value(1), Amount::from_micro_ccd(101_562));
        claim!(!is_sufficient_outbid(slot_value(1), base));
        claim!(!is_sufficient_outbid(slot_value(3), base));
        claim_eq!(slot_value(4), Amount::from_micro_ccd(106_250));
        claim!(is_sufficient_outbid(slot_value(4), base));
    }

    #[concordium_test]
    fn test_outbid_margin_at_threshold() {
        let base = Amount::from_ccd(1);
        let slot_value = |slot| slot_amount(base, slot).expect_report("Slot value should exist");

        claim!(!is_sufficient_outbid(slot_value(1), base));
        claim_eq!(slot_value(2), Amount::from_micro_ccd(1_031_250));
        claim!(is_sufficient_outbid(slot_value(2), base));
        claim!(is_sufficient_outbid(
            Amount::from_micro_ccd(512_500),
            OUTBID_THRESHOLD
        ));
        claim!(!is_sufficient_outbid(
            Amount::from_micro_ccd(512_499),
            OUTBID_THRESHOLD
        ));
    }
}
