//! Numeric formatting helpers for table rendering.

/// SI prefixes for exponents -24..=24, stepping by 3. Index 8 (10^0) is
/// unused; a zero exponent produces no suffix at all.
const SI_PREFIXES: [char; 17] = [
    'y', 'z', 'a', 'f', 'p', 'n', 'u', 'm', ' ', 'k', 'M', 'G', 'T', 'P', 'E', 'Z', 'Y',
];

/// Format a number in simplified engineering notation, using an exponent
/// that is a multiple of 3.
///
/// Values with magnitude at or below `1e-3` collapse to `"0"`. With
/// `si = true`, exponents in the SI range are written as a suffix letter
/// (`1230.0` becomes `1.23k`) instead of `e3` notation.
///
/// # Example
///
/// ```
/// use docweld::format::eng_string;
///
/// assert_eq!(eng_string(1230.0, 2, false), "1.23e3");
/// assert_eq!(eng_string(-1_230_000.0, 2, true), "-1.23M");
/// assert_eq!(eng_string(123.0, 2, false), "123.00");
/// ```
pub fn eng_string(x: f64, precision: usize, si: bool) -> String {
    if x.abs() <= 1e-3 {
        return "0".to_string();
    }

    let (sign, x) = if x < 0.0 { ("-", -x) } else { ("", x) };

    let exp = x.log10().floor() as i32;
    let exp3 = exp - exp.rem_euclid(3);
    let mantissa = x / 10f64.powi(exp3);

    let suffix = if si && (-24..=24).contains(&exp3) && exp3 != 0 {
        SI_PREFIXES[((exp3 + 24) / 3) as usize].to_string()
    } else if exp3 == 0 {
        String::new()
    } else {
        format!("e{exp3}")
    };

    format!("{sign}{mantissa:.precision$}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_range() {
        assert_eq!(eng_string(123.0, 2, false), "123.00");
        assert_eq!(eng_string(1.5, 2, false), "1.50");
    }

    #[test]
    fn test_exponent_multiple_of_three() {
        assert_eq!(eng_string(1230.0, 2, false), "1.23e3");
        assert_eq!(eng_string(-1_230_000.0, 2, false), "-1.23e6");
        assert_eq!(eng_string(0.0123, 2, false), "12.30e-3");
    }

    #[test]
    fn test_si_suffixes() {
        assert_eq!(eng_string(1230.0, 2, true), "1.23k");
        assert_eq!(eng_string(-1_230_000.0, 2, true), "-1.23M");
        assert_eq!(eng_string(2.5e9, 1, true), "2.5G");
    }

    #[test]
    fn test_tiny_values_collapse_to_zero() {
        assert_eq!(eng_string(0.0, 2, false), "0");
        assert_eq!(eng_string(1e-3, 2, false), "0");
        assert_eq!(eng_string(-5e-4, 2, true), "0");
    }

    #[test]
    fn test_precision() {
        assert_eq!(eng_string(1234.5, 3, false), "1.234e3"); // rounds down
        assert_eq!(eng_string(1234.5, 0, false), "1e3");
    }
}
