use crate::error::CowintError;
use crate::interrupt::{test_int, Interrupt, Never};
use crate::num::BigInt;
use crate::result::CowintResult;
use std::fmt;
use std::str::FromStr;

// largest power of ten that fits in a word
const CHUNK_DIVISOR: u32 = 1_000_000_000;
const CHUNK_DIGITS: usize = 9;

impl BigInt {
	fn decimal_digits<I: Interrupt>(&self, int: &I) -> CowintResult<String> {
		let mut num = self.abs();
		// base 10^9 digits, least significant first
		let mut chunks = vec![];
		loop {
			test_int(int)?;
			chunks.push(num.div_word_in_place(CHUNK_DIVISOR));
			if num.is_zero() {
				break;
			}
		}
		let mut output = String::with_capacity(chunks.len() * CHUNK_DIGITS);
		let mut chunks = chunks.iter().rev();
		if let Some(most_significant) = chunks.next() {
			output.push_str(&most_significant.to_string());
		}
		for chunk in chunks {
			output.push_str(&format!("{chunk:09}"));
		}
		Ok(output)
	}

	/// Renders the value in base 10, checking for interrupts between digit
	/// groups.
	pub fn format<I: Interrupt>(&self, int: &I) -> CowintResult<String> {
		let digits = self.decimal_digits(int)?;
		Ok(if self.is_negative() {
			format!("-{digits}")
		} else {
			digits
		})
	}
}

impl fmt::Display for BigInt {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let int = Never::default();
		let digits = self.decimal_digits(&int).map_err(|_| fmt::Error)?;
		f.pad_integral(!self.is_negative(), "", &digits)
	}
}

impl fmt::Debug for BigInt {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{self}")
	}
}

impl FromStr for BigInt {
	type Err = CowintError;

	/// Parses an optionally signed decimal integer such as `-123` or `+45`.
	fn from_str(s: &str) -> Result<Self, CowintError> {
		let (negative, digits) = if let Some(rest) = s.strip_prefix('-') {
			(true, rest)
		} else if let Some(rest) = s.strip_prefix('+') {
			(false, rest)
		} else {
			(false, s)
		};
		if digits.is_empty() {
			return Err(CowintError::EmptyNumber);
		}
		if let Some(ch) = digits.chars().find(|ch| !ch.is_ascii_digit()) {
			return Err(CowintError::ExpectedADigit(ch));
		}
		let mut res = Self::zero();
		for chunk in digits.as_bytes().chunks(CHUNK_DIGITS) {
			let mut scale = 1;
			let mut value = 0;
			for &digit in chunk {
				scale *= 10;
				value = value * 10 + u32::from(digit - b'0');
			}
			res.mul_word_add_in_place(scale, value);
		}
		if negative {
			res.negate_in_place();
		}
		Ok(res)
	}
}
