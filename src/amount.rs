//! Human-scale token quantities and their conversion to base units.
//!
//! Amounts are kept as exact decimals so that scaling by `10^decimals` never
//! goes through binary floating point.

use crate::error::{ClaimerError, Result};
use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};
use std::fmt;
use std::str::FromStr;

/// Digits in `U256::MAX`.
const UINT256_DIGITS: u32 = 78;
/// Upper bound on accepted fractional digits: `uint256` width plus the largest `decimals`.
const MAX_SCALE: u32 = UINT256_DIGITS + u8::MAX as u32;
const MAX_INTEGER_ZEROS: u32 = UINT256_DIGITS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    mantissa: BigInt,
    scale: u32,
}

impl TokenAmount {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| ClaimerError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let parsed = BigDecimal::from_str(input.trim()).map_err(|_| invalid("not a decimal number"))?;
        if parsed.is_negative() {
            return Err(invalid("amount cannot be negative"));
        }

        let (mantissa, exponent) = parsed.normalized().into_bigint_and_exponent();
        if exponent >= 0 {
            let scale = u32::try_from(exponent)
                .ok()
                .filter(|scale| *scale <= MAX_SCALE)
                .ok_or_else(|| invalid("too many fractional digits for any token"))?;
            return Ok(Self { mantissa, scale });
        }
        let zeros = u32::try_from(exponent.unsigned_abs())
            .ok()
            .filter(|zeros| *zeros <= MAX_INTEGER_ZEROS)
            .ok_or_else(|| invalid("too large for uint256"))?;
        Ok(Self {
            mantissa: mantissa * pow10(zeros),
            scale: 0,
        })
    }

    /// Uses the shortest decimal rendering of `amount`, so `0.1` means one tenth.
    pub fn from_f64(amount: f64) -> Result<Self> {
        if !amount.is_finite() {
            return Err(ClaimerError::InvalidAmount {
                input: amount.to_string(),
                reason: "amount must be finite".to_string(),
            });
        }
        Self::parse(&amount.to_string())
    }

    /// Number of fractional digits after normalization.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// `round(amount * 10^decimals)`, rounding half away from zero.
    ///
    /// Exact whenever the amount has no more than `decimals` fractional digits.
    pub fn to_base_units(&self, decimals: u8) -> Result<U256> {
        let decimals = decimals as u32;
        let units = if decimals >= self.scale {
            &self.mantissa * pow10(decimals - self.scale)
        } else {
            let divisor = pow10(self.scale - decimals);
            let quotient = &self.mantissa / &divisor;
            let remainder = &self.mantissa % &divisor;
            if remainder * 2u8 >= divisor {
                quotient + 1u8
            } else {
                quotient
            }
        };

        let (sign, digits) = units.to_bytes_be();
        if sign == Sign::Minus || digits.len() > 32 {
            return Err(ClaimerError::InvalidAmount {
                input: self.to_string(),
                reason: format!("does not fit in uint256 at {} decimals", decimals),
            });
        }
        Ok(U256::from_be_slice(&digits))
    }

    /// Inverse of [`TokenAmount::to_base_units`].
    pub fn from_base_units(units: U256, decimals: u8) -> Self {
        let mantissa = BigInt::from_bytes_be(Sign::Plus, &units.to_be_bytes::<32>());
        let decimal = BigDecimal::new(mantissa, decimals as i64);
        let (mantissa, exponent) = decimal.normalized().into_bigint_and_exponent();
        if exponent >= 0 {
            Self {
                mantissa,
                scale: exponent as u32,
            }
        } else {
            Self {
                mantissa: mantissa * pow10((-exponent) as u32),
                scale: 0,
            }
        }
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", BigDecimal::new(self.mantissa.clone(), self.scale as i64))
    }
}

impl FromStr for TokenAmount {
    type Err = ClaimerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u8).pow(exp)
}
