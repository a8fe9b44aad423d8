//! Double to ASCII conversion
//!
//! Renders results the way a JavaScript host prints numbers: shortest
//! round-trip digits, plain notation for magnitudes in `[1e-6, 1e21)`,
//! exponent notation outside it.

/// Format a number as JavaScript's `Number.prototype.toString` would
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // covers -0 as well
        return "0".to_string();
    }

    let (digits, exp) = shortest_digits(value.abs());
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}", sign, layout(&digits, exp))
}

/// Shortest round-trip decimal digits and the decimal exponent of the first
/// digit, so that `value = 0.d1d2d3... * 10^(exp + 1)`
fn shortest_digits(value: f64) -> (String, i32) {
    // `{:e}` yields the shortest representation, e.g. "1.2345e-7"
    let formatted = format!("{:e}", value);
    let (mantissa, exp) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    (digits, exp.parse().unwrap_or(0))
}

fn layout(digits: &str, exp: i32) -> String {
    let k = digits.len() as i32;
    let n = exp + 1;

    if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let (first, rest) = digits.split_at(1);
        let exp_sign = if n - 1 < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}e{}{}", first, exp_sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", first, rest, exp_sign, (n - 1).abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_integers() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(512.0), "512");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-1.5), "-1.5");
        assert_eq!(format_number(std::f64::consts::PI), "3.141592653589793");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e300), "1.5e+300");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-9), "-2.5e-9");
    }
}
