//! Arbitrary-precision base-10 numbers with a preserved scale.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Display};
use core::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_traits::{pow, ToPrimitive, Zero};
use thiserror::Error as ErrorTrait;

/// The literal was not a valid decimal number.
#[derive(ErrorTrait, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid decimal literal")]
pub struct ParseDecimalError;

/// An arbitrary-precision base-10 number.
///
/// A `Decimal` is a sign-carrying unscaled integer together with a scale:
/// the represented value is `unscaled * 10^(-scale)`. The scale observed in
/// the source literal survives parsing and re-serialization, so `"1.50"`
/// stays `1.50` and `"1.5e2"` becomes `150` (scale −1), never `1.5E+2`.
///
/// Comparison is numeric: `1.5 == 1.50`. Because of that, `Decimal` does not
/// implement `Hash`.
///
/// # Examples
/// ```
/// use decjson::Decimal;
///
/// let d: Decimal = "1.50".parse().unwrap();
/// assert_eq!(d.to_string(), "1.50");
/// assert_eq!(d, "1.5".parse().unwrap());
/// assert_eq!(d.to_i64(), Some(1));
/// ```
#[derive(Clone)]
pub struct Decimal {
    unscaled: BigInt,
    scale: i64,
}

impl Decimal {
    /// Build a decimal from an unscaled integer and a base-10 scale.
    ///
    /// The value is `unscaled * 10^(-scale)`; a positive scale moves the
    /// point left, a negative one appends zeros.
    pub fn from_parts(unscaled: impl Into<BigInt>, scale: i64) -> Self {
        Decimal {
            unscaled: unscaled.into(),
            scale,
        }
    }

    /// The closest decimal to a finite double, using its shortest
    /// round-trip representation. Returns `None` for NaN and infinities.
    pub fn from_f64(f: f64) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        let mut buffer = ryu::Buffer::new();
        buffer.format_finite(f).parse().ok()
    }

    /// The unscaled integer component.
    #[inline]
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// The base-10 scale. `1.50` has scale 2; `150` parsed from `1.5e2`
    /// has scale −1.
    #[inline]
    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Returns true for zero of any scale.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    /// Returns true if the value is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.unscaled.sign() == Sign::Minus
    }

    /// Returns true if the fractional part is zero.
    pub fn is_integer(&self) -> bool {
        if self.scale <= 0 {
            return true;
        }
        if self.unscaled.is_zero() {
            return true;
        }
        let digits = digit_count(&self.unscaled);
        if self.scale as u64 >= digits {
            return false;
        }
        (&self.unscaled % pow10(self.scale as usize)).is_zero()
    }

    /// The value truncated toward zero, if it fits in an `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        if self.unscaled.is_zero() {
            return Some(0);
        }
        if self.scale == 0 {
            return self.unscaled.to_i64();
        }
        if self.scale < 0 {
            // Appending more than 18 zeros to a nonzero integer always
            // overflows i64.
            let zeros = self.scale.unsigned_abs();
            if zeros > 18 {
                return None;
            }
            return (&self.unscaled * pow10(zeros as usize)).to_i64();
        }
        let digits = digit_count(&self.unscaled);
        if self.scale as u64 >= digits {
            return Some(0);
        }
        // BigInt division truncates toward zero, matching the required
        // conversion semantics for both signs.
        (&self.unscaled / pow10(self.scale as usize)).to_i64()
    }

    /// The nearest representable double. Values beyond the double range
    /// saturate to the infinities.
    pub fn to_f64(&self) -> f64 {
        // Routing through the exponent form keeps this correctly rounded:
        // Rust's f64 parser rounds to nearest for any decimal string.
        let exp = -(self.scale as i128);
        let repr = format!("{}e{}", self.unscaled, exp);
        repr.parse().unwrap_or_else(|_| {
            if self.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        })
    }

    /// Parse a decimal literal.
    ///
    /// Accepts the JSON number grammar plus a leading `+` and a leading
    /// point (`.5`). A trailing point (`5.`) and an empty exponent are
    /// rejected.
    pub fn parse(literal: &str) -> Result<Self, ParseDecimalError> {
        let bytes = literal.as_bytes();
        let mut pos = 0usize;

        let negative = match bytes.first() {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };

        let mut digits = String::with_capacity(bytes.len());
        let int_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            digits.push(bytes[pos] as char);
            pos += 1;
        }
        let int_len = pos - int_start;

        let mut frac_len = 0usize;
        if pos < bytes.len() && bytes[pos] == b'.' {
            pos += 1;
            let frac_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                digits.push(bytes[pos] as char);
                pos += 1;
            }
            frac_len = pos - frac_start;
            if frac_len == 0 {
                return Err(ParseDecimalError);
            }
        }
        if int_len == 0 && frac_len == 0 {
            return Err(ParseDecimalError);
        }

        let mut exponent = 0i64;
        if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
            pos += 1;
            let exp_negative = match bytes.get(pos) {
                Some(b'-') => {
                    pos += 1;
                    true
                }
                Some(b'+') => {
                    pos += 1;
                    false
                }
                _ => false,
            };
            let exp_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                exponent = exponent
                    .checked_mul(10)
                    .and_then(|e| e.checked_add((bytes[pos] - b'0') as i64))
                    .ok_or(ParseDecimalError)?;
                pos += 1;
            }
            if pos == exp_start {
                return Err(ParseDecimalError);
            }
            if exp_negative {
                exponent = -exponent;
            }
        }
        if pos != bytes.len() {
            return Err(ParseDecimalError);
        }

        let mut unscaled =
            BigInt::parse_bytes(digits.as_bytes(), 10).ok_or(ParseDecimalError)?;
        if negative {
            unscaled = -unscaled;
        }
        let scale = (frac_len as i64)
            .checked_sub(exponent)
            .ok_or(ParseDecimalError)?;
        Ok(Decimal { unscaled, scale })
    }

    /// Compare magnitudes without materializing huge power-of-ten factors
    /// for inputs whose orders of magnitude already differ.
    fn cmp_abs(&self, other: &Self) -> Ordering {
        let self_order = digit_count(&self.unscaled) as i128 - self.scale as i128;
        let other_order = digit_count(&other.unscaled) as i128 - other.scale as i128;
        if self_order != other_order {
            return self_order.cmp(&other_order);
        }
        // Equal orders bound the scale difference by the digit-count
        // difference, so the alignment factor stays small.
        let diff = self.scale - other.scale;
        if diff >= 0 {
            self.unscaled
                .magnitude()
                .cmp(&(other.unscaled.magnitude() * pow10_uint(diff as usize)))
        } else {
            (self.unscaled.magnitude() * pow10_uint(diff.unsigned_abs() as usize))
                .cmp(other.unscaled.magnitude())
        }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.unscaled.sign(), other.unscaled.sign()) {
            (Sign::NoSign, Sign::NoSign) => Ordering::Equal,
            (Sign::Minus, Sign::Minus) => other.cmp_abs(self),
            (Sign::Minus, _) => Ordering::Less,
            (_, Sign::Minus) => Ordering::Greater,
            (Sign::NoSign, Sign::Plus) => Ordering::Less,
            (Sign::Plus, Sign::NoSign) => Ordering::Greater,
            (Sign::Plus, Sign::Plus) => self.cmp_abs(other),
        }
    }
}

impl Display for Decimal {
    /// Canonical form: plain decimal notation preserving the scale,
    /// never exponent notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        let digits = self.unscaled.magnitude().to_str_radix(10);
        if self.scale <= 0 {
            f.write_str(&digits)?;
            if !self.unscaled.is_zero() {
                for _ in 0..self.scale.unsigned_abs() {
                    f.write_str("0")?;
                }
            }
            return Ok(());
        }
        let scale = self.scale as usize;
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{int_part}.{frac_part}")
        } else {
            f.write_str("0.")?;
            for _ in 0..scale - digits.len() {
                f.write_str("0")?;
            }
            f.write_str(&digits)
        }
    }
}

impl Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({self})")
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse(s)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal {
            unscaled: BigInt::from(value),
            scale: 0,
        }
    }
}

fn pow10(exp: usize) -> BigInt {
    pow(BigInt::from(10), exp)
}

fn pow10_uint(exp: usize) -> num_bigint::BigUint {
    pow(num_bigint::BigUint::from(10u32), exp)
}

/// Number of base-10 digits in the magnitude; 1 for zero.
fn digit_count(value: &BigInt) -> u64 {
    if value.is_zero() {
        return 1;
    }
    // bits/log2(10) underestimates by at most one digit; one cheap
    // comparison corrects it.
    let bits = value.magnitude().bits();
    let estimate = (bits as f64 / core::f64::consts::LOG2_10) as u64;
    let estimate = estimate.max(1);
    if value.magnitude() >= &pow10_uint(estimate as usize) {
        estimate + 1
    } else {
        estimate
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::parse(s).unwrap()
    }

    #[test]
    fn test_parse_and_display_preserve_scale() {
        assert_eq!(dec("1.50").to_string(), "1.50");
        assert_eq!(dec("0.00").to_string(), "0.00");
        assert_eq!(dec("-12.345").to_string(), "-12.345");
        assert_eq!(dec("150").to_string(), "150");
    }

    #[test]
    fn test_exponent_folds_into_scale() {
        assert_eq!(dec("1.5e2").to_string(), "150");
        assert_eq!(dec("1.5E+2").to_string(), "150");
        assert_eq!(dec("15e-1").to_string(), "1.5");
        assert_eq!(dec("5e-4").to_string(), "0.0005");
        assert_eq!(dec("9223372036854775808").to_string(), "9223372036854775808");
    }

    #[test]
    fn test_lenient_forms() {
        assert_eq!(dec("+3").to_string(), "3");
        assert_eq!(dec(".5").to_string(), "0.5");
    }

    #[test]
    fn test_rejects() {
        assert!(Decimal::parse("5.").is_err());
        assert!(Decimal::parse(".").is_err());
        assert!(Decimal::parse("1e").is_err());
        assert!(Decimal::parse("1e+").is_err());
        assert!(Decimal::parse("0x10").is_err());
        assert!(Decimal::parse("").is_err());
        assert!(Decimal::parse("1.5 ").is_err());
    }

    #[test]
    fn test_to_i64_truncates_toward_zero() {
        assert_eq!(dec("1.9").to_i64(), Some(1));
        assert_eq!(dec("-1.9").to_i64(), Some(-1));
        assert_eq!(dec("1.5e2").to_i64(), Some(150));
        assert_eq!(dec("0.0001").to_i64(), Some(0));
        assert_eq!(dec("9223372036854775807").to_i64(), Some(i64::MAX));
        assert_eq!(dec("9223372036854775808").to_i64(), None);
        assert_eq!(dec("-9223372036854775808").to_i64(), Some(i64::MIN));
        assert_eq!(dec("1e300").to_i64(), None);
        assert_eq!(dec("0e300").to_i64(), Some(0));
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(dec("1.5e2").to_f64(), 150.0);
        assert_eq!(dec("0.1").to_f64(), 0.1);
        assert_eq!(dec("-2.5").to_f64(), -2.5);
        assert_eq!(dec("1e400").to_f64(), f64::INFINITY);
        assert_eq!(dec("-1e400").to_f64(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_from_f64_shortest() {
        assert_eq!(Decimal::from_f64(1.5).unwrap().to_string(), "1.5");
        assert_eq!(Decimal::from_f64(f64::NAN), None);
        assert_eq!(Decimal::from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_numeric_equality_ignores_scale() {
        assert_eq!(dec("1.5"), dec("1.50"));
        assert_eq!(dec("150"), dec("1.5e2"));
        assert_eq!(dec("0"), dec("0.000"));
        assert_eq!(dec("0"), dec("-0"));
        assert_ne!(dec("1.5"), dec("1.51"));
    }

    #[test]
    fn test_ordering() {
        assert!(dec("2") > dec("1.99"));
        assert!(dec("-2") < dec("-1.99"));
        assert!(dec("-1") < dec("0"));
        assert!(dec("0.009") < dec("0.01"));
        assert!(dec("1e10") > dec("9999999999"));
    }

    #[test]
    fn test_is_integer() {
        assert!(dec("150").is_integer());
        assert!(dec("1.5e2").is_integer());
        assert!(dec("2.00").is_integer());
        assert!(!dec("2.01").is_integer());
        assert!(dec("0.000").is_integer());
    }
}
