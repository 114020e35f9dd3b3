use pairsplit_domain::Money;

/// `¥1,000`, `-¥500`.
pub fn format_yen(amount: Money) -> String {
    let digits = group_thousands(amount.amount().unsigned_abs());
    if amount.is_negative() {
        format!("-¥{digits}")
    } else {
        format!("¥{digits}")
    }
}

/// Balance label: always carries a sign, zero included.
pub fn format_signed(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "+" };
    format!("{sign}{}", group_thousands(amount.amount().unsigned_abs()))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
