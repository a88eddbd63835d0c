//! Validation of user-entered amounts before they reach the contract.

use alloy::primitives::U256;

use crate::error::InputError;

pub type ValidationResult = Result<U256, InputError>;

const DECIMAL_SEPARATORS: [char; 2] = ['.', ','];

/// Checks `text` against the domain of the `uint256` argument of `setMyNumber`.
///
/// Rules are applied in a fixed order and the first failing one is reported,
/// so `"-1.5"` is [`InputError::Negative`] rather than
/// [`InputError::NotInteger`].
pub fn validate(text: &str) -> ValidationResult {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let number = Decimal::parse(trimmed).ok_or(InputError::NotANumber)?;

    if number.negative && !number.is_zero() {
        return Err(InputError::Negative);
    }

    if trimmed.contains(DECIMAL_SEPARATORS) {
        return Err(InputError::NotInteger);
    }

    U256::from_str_radix(number.integer, 10).map_err(|_| InputError::Overflow)
}

/// Lexical view of a decimal literal, either separator accepted.
struct Decimal<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
}

impl<'a> Decimal<'a> {
    fn parse(s: &'a str) -> Option<Self> {
        let (negative, unsigned) = match s.as_bytes().first()? {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let (integer, fraction) = match unsigned.find(DECIMAL_SEPARATORS) {
            Some(idx) => (&unsigned[..idx], &unsigned[idx + 1..]),
            None => (unsigned, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }
        if !all_digits(integer) || !all_digits(fraction) {
            return None;
        }

        Some(Self {
            negative,
            integer,
            fraction,
        })
    }

    fn is_zero(&self) -> bool {
        self.integer
            .bytes()
            .chain(self.fraction.bytes())
            .all(|b| b == b'0')
    }
}
