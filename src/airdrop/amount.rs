/// Both the flat share and the per-participant balance weight divide by this.
pub const SHARE_DIVISOR: f64 = 10.0;

const INTEGER_TOLERANCE: f64 = 1e-6;

/// `distributed / participant_count / 10`, or 0 for an empty campaign.
pub fn airdrop_amount(distributed: f64, participant_count: usize) -> f64 {
    if participant_count == 0 {
        return 0.0;
    }

    distributed / participant_count as f64 / SHARE_DIVISOR
}

pub fn decimals_multiplier(decimals: u8) -> u64 {
    10u64.saturating_pow(u32::from(decimals))
}

/// Smallest-unit magnitude of one participant's credit leg:
/// `airdrop_amount * (token_balance / 10) * multiplier`, truncated toward zero.
///
/// Returns `None` when the result is negative, not finite or does not fit a leg.
pub fn leg_amount(airdrop_amount: f64, token_balance: f64, multiplier: u64) -> Option<u64> {
    let raw = airdrop_amount * (token_balance / SHARE_DIVISOR) * multiplier as f64;

    if !raw.is_finite() || raw < 0.0 || raw > i64::MAX as f64 {
        return None;
    }

    // Absorb float noise such as 299.99999999997 before truncating.
    let rounded = raw.round();
    let units = if (raw - rounded).abs() < INTEGER_TOLERANCE {
        rounded
    } else {
        raw.trunc()
    };

    Some(units as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_share_of_distributed() {
        assert_eq!(airdrop_amount(12000.0, 3), 400.0);
        assert_eq!(airdrop_amount(6000.0, 2), 300.0);
    }

    #[test]
    fn empty_campaign_collapses_to_zero() {
        assert_eq!(airdrop_amount(12000.0, 0), 0.0);
    }

    #[test]
    fn leg_uses_literal_formula() {
        let d = decimals_multiplier(2);

        assert_eq!(d, 100);
        assert_eq!(leg_amount(400.0, 1000.0, d), Some(400 * 100 * d));
        assert_eq!(leg_amount(300.0, 500.0, d), Some(300 * 50 * d));
        assert_eq!(leg_amount(300.0, 1500.0, d), Some(300 * 150 * d));
    }

    #[test]
    fn fractional_units_truncate() {
        // 1 * 0.15 * 10 = 1.5 units
        assert_eq!(leg_amount(1.0, 1.5, 10), Some(1));
        // 0.1 * 3 accumulates float error but is exactly 30 units
        assert_eq!(leg_amount(0.1, 30.0, 100), Some(30));
    }

    #[test]
    fn negative_or_nan_legs_are_rejected() {
        assert_eq!(leg_amount(400.0, -10.0, 100), None);
        assert_eq!(leg_amount(f64::NAN, 10.0, 100), None);
        assert_eq!(leg_amount(f64::INFINITY, 10.0, 100), None);
    }

    #[test]
    fn zero_balance_is_a_zero_leg() {
        assert_eq!(leg_amount(400.0, 0.0, 100), Some(0));
    }
}
