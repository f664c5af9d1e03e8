//! Number formatting for table cells.

/// Format `n` with a `,` between every group of three digits
/// (`1234567` → `"1,234,567"`).
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_three() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(98_765), "98,765");
        assert_eq!(group_thousands(1_100_000), "1,100,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
