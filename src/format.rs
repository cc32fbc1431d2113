// Currency formatting for view records

/// Format an integer-cents amount as an en-US USD string, e.g. `123456`
/// becomes `"$1,234.56"`.
///
/// Applied exactly once, at the final return boundary of a query; values
/// that are still going to be aggregated stay in integer cents.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Insert comma separators into a whole-dollar amount.
fn group_thousands(mut dollars: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let rest = dollars / 1000;
        if rest == 0 {
            groups.push(dollars.to_string());
            break;
        }
        groups.push(format!("{:03}", dollars % 1000));
        dollars = rest;
    }
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_currency(0), "$0.00");
    }

    #[test]
    fn test_cents_only() {
        assert_eq!(format_currency(7), "$0.07");
        assert_eq!(format_currency(99), "$0.99");
    }

    #[test]
    fn test_whole_dollars() {
        assert_eq!(format_currency(500), "$5.00");
        assert_eq!(format_currency(100_000), "$1,000.00");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_currency(123_456), "$1,234.56");
        assert_eq!(format_currency(1_234_567_890), "$12,345,678.90");
    }

    #[test]
    fn test_group_boundaries() {
        assert_eq!(format_currency(99_999), "$999.99");
        assert_eq!(format_currency(100_099), "$1,000.99");
        assert_eq!(format_currency(100_000_003), "$1,000,000.03");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_currency(-1234), "-$12.34");
        assert_eq!(format_currency(-100_000), "-$1,000.00");
    }
}
