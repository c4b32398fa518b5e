use rust_decimal::Decimal;

/// # Summary
/// Formats a monetary amount as dollars with exactly two decimal places.
///
/// # Logic
/// 1. Rounds half away from zero to two decimal places.
/// 2. Pads trailing zeros so the result always has two fraction digits.
/// 3. Places a minus sign before the currency symbol.
///
/// # Arguments
/// * `amount` - The amount in dollars.
///
/// # Returns
/// * e.g. `$0.00`, `$1234.50`, `-$5.00`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    // Compared after rounding so -0.001 renders as $0.00
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}${:.2}", sign, rounded.abs())
}

/// # Summary
/// Masks a phone number for log output, keeping only the last four characters.
///
/// # Arguments
/// * `phone` - Phone number in any format.
///
/// # Returns
/// * `***0100` for `+15550100`; numbers of four characters or fewer are fully masked.
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}
