//! Number formatting for prices shown on the search pages.
//!
//! Suggestion rows use the plain grouped form (`450,000`) behind a literal
//! dollar sign; result and detail pages use the SGD currency form with no
//! decimals.

/// Group a number with comma thousands separators, keeping up to three
/// fraction digits with trailing zeros trimmed.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an amount as Singapore dollars with no decimal places
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}${}", sign, non_finite(value.abs()));
    }

    // -0.2 rounds to -0 and still prints as "-$0"
    let rounded = value.round();
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{}${}", sign, group_digits(&format!("{:.0}", rounded.abs())))
}

/// Price per square metre in SGD; `None` when the floor area is unusable
pub fn format_price_per_sqm(price: f64, area_sqm: f64) -> Option<String> {
    if !area_sqm.is_finite() || area_sqm <= 0.0 {
        return None;
    }
    Some(format_price(price / area_sqm))
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "∞".to_string()
    } else {
        "-∞".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_whole_prices() {
        assert_eq!(group_thousands(450000.0), "450,000");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1_000.0), "1,000");
        assert_eq!(group_thousands(12_345_678.0), "12,345,678");
        assert_eq!(group_thousands(0.0), "0");
    }

    #[test]
    fn keeps_up_to_three_fraction_digits() {
        assert_eq!(group_thousands(450000.5), "450,000.5");
        assert_eq!(group_thousands(1234567.891), "1,234,567.891");
        assert_eq!(group_thousands(999.9999), "1,000");
        assert_eq!(group_thousands(-1500.25), "-1,500.25");
    }

    #[test]
    fn formats_sgd_without_decimals() {
        assert_eq!(format_price(450000.0), "$450,000");
        assert_eq!(format_price(1234.5), "$1,235");
        assert_eq!(format_price(-1200.0), "-$1,200");
        assert_eq!(format_price(0.2), "$0");
    }

    #[test]
    fn negative_amounts_rounding_to_zero_keep_the_sign() {
        assert_eq!(format_price(-0.2), "-$0");
        assert_eq!(format_price(-0.0), "-$0");
        assert_eq!(format_price(0.4), "$0");
    }

    #[test]
    fn price_per_sqm_needs_positive_area() {
        assert_eq!(format_price_per_sqm(450000.0, 90.0).as_deref(), Some("$5,000"));
        assert_eq!(format_price_per_sqm(428000.0, 91.0).as_deref(), Some("$4,703"));
        assert_eq!(format_price_per_sqm(450000.0, 0.0), None);
        assert_eq!(format_price_per_sqm(450000.0, f64::NAN), None);
    }
}
