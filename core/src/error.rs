use std::{error, fmt};

use crate::parser::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CowintError {
	Interrupted,
	DivideByZero,
	EmptyNumber,
	ExpectedADigit(char),
	ExponentTooLarge,
	NegativeExponent,
	ZeroToThePowerOfZero,
	NegativeNumbersNotAllowed,
	ValueTooLarge,
	ShiftTooLarge,
	UnexpectedChar(char),
	DigitSeparatorsOnlyBetweenDigits,
	IdentifierNotFound(String),
	UnknownFunction(String),
	WrongArgumentCount {
		function: &'static str,
		expected: usize,
		found: usize,
	},
	ParseError(ParseError),
}

impl fmt::Display for CowintError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Interrupted => write!(f, "interrupted"),
			Self::DivideByZero => write!(f, "division by zero"),
			Self::EmptyNumber => write!(f, "expected at least one digit"),
			Self::ExpectedADigit(ch) => write!(f, "expected a digit, found '{ch}'"),
			Self::ExponentTooLarge => write!(f, "exponent too large"),
			Self::NegativeExponent => write!(f, "negative exponents are not supported"),
			Self::ZeroToThePowerOfZero => write!(f, "zero to the power of zero is undefined"),
			Self::NegativeNumbersNotAllowed => write!(f, "negative numbers are not allowed"),
			Self::ValueTooLarge => write!(f, "value too large"),
			Self::ShiftTooLarge => write!(f, "shift amount too large"),
			Self::UnexpectedChar(ch) => write!(f, "unexpected character '{ch}'"),
			Self::DigitSeparatorsOnlyBetweenDigits => {
				write!(f, "digit separators can only occur between digits")
			}
			Self::IdentifierNotFound(s) => write!(f, "unknown identifier '{s}'"),
			Self::UnknownFunction(s) => write!(f, "unknown function '{s}'"),
			Self::WrongArgumentCount {
				function,
				expected,
				found,
			} => write!(
				f,
				"{function} expects {expected} argument{}, found {found}",
				if *expected == 1 { "" } else { "s" }
			),
			Self::ParseError(e) => write!(f, "{e}"),
		}
	}
}

impl error::Error for CowintError {}
