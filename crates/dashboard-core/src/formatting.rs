/// Prefix for amounts rendered in Brazilian reais.
pub const BRL_PREFIX: &str = "R$ ";

/// Format a floating-point number with a fixed number of decimal places,
/// grouping thousands with `thousands_sep` and separating the fraction with
/// `decimal_sep`.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 2, '.', ','), "1.234,50");
/// assert_eq!(format_number(1234567.0, 0, ',', '.'), "1,234,567");
/// assert_eq!(format_number(0.0, 2, '.', ','), "0,00");
/// assert_eq!(format_number(-9876.5, 1, '.', ','), "-9.876,5");
/// ```
pub fn format_number(value: f64, decimals: u32, thousands_sep: char, decimal_sep: char) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    let (integer_digits, frac_digits) = split_digits(abs_value, decimals);
    let grouped = group_thousands(&integer_digits, thousands_sep);

    let result = if decimals == 0 {
        grouped
    } else {
        format!("{}{}{}", grouped, decimal_sep, frac_digits)
    };

    // "-0,00" reads as noise.
    let is_zero = integer_digits.chars().chain(frac_digits.chars()).all(|c| c == '0');
    if negative && !is_zero {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount as Brazilian currency text: `R$ ` prefix, two
/// decimals, `.` between thousands and `,` before the cents.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_brl;
///
/// assert_eq!(format_brl(1234.5), "R$ 1.234,50");
/// assert_eq!(format_brl(0.0), "R$ 0,00");
/// assert_eq!(format_brl(-15.0), "R$ -15,00");
/// ```
pub fn format_brl(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    format!("{}{}", BRL_PREFIX, format_number(amount, 2, '.', ','))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Integer and zero-padded fraction digits of a non-negative `value`
/// rounded to `decimals` places.
fn split_digits(value: f64, decimals: u32) -> (String, String) {
    let factor = 10_f64.powi(decimals as i32);
    let scaled = value * factor;

    if scaled < MAX_EXACT_INTEGER {
        // The epsilon nudges exact binary midpoints (1.005 and friends) the
        // way a human expects.
        let units = (scaled + f64::EPSILON * scaled).round() as u64;
        let factor = 10_u64.pow(decimals);
        let frac = if decimals == 0 {
            String::new()
        } else {
            format!("{:0width$}", units % factor, width = decimals as usize)
        };
        return ((units / factor).to_string(), frac);
    }

    // Past 2^53 there is no sub-unit precision left to round; let the
    // float formatter produce every digit.
    let text = format!("{:.*}", decimals as usize, value);
    match text.split_once('.') {
        Some((integer, frac)) => (integer.to_string(), frac.to_string()),
        None => (text, String::new()),
    }
}

/// Insert `sep` every three digits from the right of an integer string.
fn group_thousands(s: &str, sep: char) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(sep);
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0, '.', ','), "0");
        assert_eq!(format_number(0.0, 2, '.', ','), "0,00");
    }

    #[test]
    fn test_format_number_no_thousands() {
        assert_eq!(format_number(123.456, 2, '.', ','), "123,46");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1, '.', ','), "1.234,5");
    }

    #[test]
    fn test_format_number_millions() {
        assert_eq!(format_number(1_234_567.0, 0, '.', ','), "1.234.567");
    }

    #[test]
    fn test_format_number_english_separators() {
        assert_eq!(format_number(1_234_567.891, 2, ',', '.'), "1,234,567.89");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1, '.', ','), "-9.876,5");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(1.005, 2, '.', ','), "1,01");
        assert_eq!(format_number(999.999, 2, '.', ','), "1.000,00");
    }

    #[test]
    fn test_format_number_beyond_integer_precision() {
        assert_eq!(
            format_number(1e20, 2, '.', ','),
            "100.000.000.000.000.000.000,00"
        );
        assert_eq!(format_number(-1e20, 0, '.', ','), "-100.000.000.000.000.000.000");
    }

    #[test]
    fn test_format_number_negative_rounding_to_zero() {
        assert_eq!(format_number(-0.001, 2, '.', ','), "0,00");
    }

    // ── format_brl ───────────────────────────────────────────────────────────

    #[test]
    fn test_format_brl_reference_value() {
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
    }

    #[test]
    fn test_format_brl_zero() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
    }

    #[test]
    fn test_format_brl_small() {
        assert_eq!(format_brl(15.0), "R$ 15,00");
        assert_eq!(format_brl(0.5), "R$ 0,50");
    }

    #[test]
    fn test_format_brl_large() {
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
    }

    #[test]
    fn test_format_brl_total_above_u64_range() {
        // u64::MAX / 100 is about 1.8e17; the integer path would saturate.
        assert_eq!(format_brl(1e20), "R$ 100.000.000.000.000.000.000,00");
    }

    #[test]
    fn test_format_brl_negative() {
        assert_eq!(format_brl(-1234.5), "R$ -1.234,50");
    }

    #[test]
    fn test_format_brl_non_finite_is_zero() {
        assert_eq!(format_brl(f64::NAN), "R$ 0,00");
        assert_eq!(format_brl(f64::INFINITY), "R$ 0,00");
    }

    // ── group_thousands ──────────────────────────────────────────────────────

    #[test]
    fn test_group_thousands_short() {
        assert_eq!(group_thousands("5", '.'), "5");
        assert_eq!(group_thousands("999", '.'), "999");
    }

    #[test]
    fn test_group_thousands_seven_digits() {
        assert_eq!(group_thousands("1234567", '.'), "1.234.567");
    }
}
