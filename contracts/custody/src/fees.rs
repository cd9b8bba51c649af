/// Basis points in 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Hard cap on the platform fee (10%).
pub const MAX_FEE_BPS: u32 = 1_000;

/// Splits a sale amount into `(seller_amount, fee)`.
///
/// The fee is `amount * fee_bps / 10000`, rounded down, and the seller gets
/// the remainder so the two parts always add up to `amount`. Returns `None`
/// for negative amounts, rates above 100% or on overflow.
pub fn split(amount: i128, fee_bps: u32) -> Option<(i128, i128)> {
    if amount < 0 || fee_bps > BPS_DENOMINATOR {
        return None;
    }
    let fee = amount
        .checked_mul(fee_bps as i128)?
        .checked_div(BPS_DENOMINATOR as i128)?;
    Some((amount - fee, fee))
}
