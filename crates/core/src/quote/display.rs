use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to the nearest whole unit (midpoint away from zero) for display.
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `USD 1,080`, `KES 30,000`.
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let rounded = round_for_display(amount);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{currency} {sign}{grouped}")
}
