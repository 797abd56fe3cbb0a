//! Prices are stored as plain INR amounts; this module only formats them.

/// Format an INR amount with Indian digit grouping, e.g. `₹1,23,456.50`.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = paise / 100;
    let fraction = paise % 100;

    // Indian grouping: last three digits, then groups of two.
    let digits = rupees.to_string();
    let mut grouped = String::new();
    let head_len = if digits.len() > 3 { digits.len() - 3 } else { 0 };
    let (head, tail) = digits.split_at(head_len);
    let head_bytes = head.as_bytes();
    let lead = head_bytes.len() % 2;
    for (i, b) in head_bytes.iter().enumerate() {
        if i > 0 && (i + 2 - lead) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(*b as char);
    }
    if !head.is_empty() {
        grouped.push(',');
    }
    grouped.push_str(tail);

    let sign = if negative { "-" } else { "" };
    format!("{sign}₹{grouped}.{fraction:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_small_amounts() {
        assert_eq!(format_inr(0.0), "₹0.00");
        assert_eq!(format_inr(5.5), "₹5.50");
        assert_eq!(format_inr(720.0), "₹720.00");
    }

    #[test]
    fn groups_thousands_indian_style() {
        assert_eq!(format_inr(1450.0), "₹1,450.00");
        assert_eq!(format_inr(123456.5), "₹1,23,456.50");
        assert_eq!(format_inr(10000000.0), "₹1,00,00,000.00");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_inr(-295.0), "-₹295.00");
    }
}
