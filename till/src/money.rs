//! Money formatting for printed receipts
//!
//! Amounts are printed with exactly two fractional digits and the integer
//! part grouped in threes with `,` (`1234567.891` → `1,234,567.89`).
//! Negative amounts keep their sign in front of all digits (`-1,234.56`).

use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits printed for every amount
const DECIMAL_PLACES: u32 = 2;

/// Separator inserted between groups of three integer digits
const GROUP_SEPARATOR: char = ',';

/// Format an amount as a grouped, fixed-precision string
pub fn format_money(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    // -0.001 rounds to a signed zero, which prints unsigned
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
}

/// Insert a separator every three digits, counting from the right
///
/// Walks the digits in reverse and emits a separator before each
/// character whose 0-based index is a nonzero multiple of three, then
/// reverses the result back. Expects ASCII decimal digits only.
fn group_thousands(digits: &str) -> String {
    let mut reversed = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            reversed.push(GROUP_SEPARATOR);
        }
        reversed.push(c);
    }
    reversed.chars().rev().collect()
}
