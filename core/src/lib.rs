//! Arbitrary-precision two's-complement integers backed by a copy-on-write,
//! small-buffer-optimized word store, plus a small calculator language over
//! them.
//!
//! ```
//! use cowint_core::BigInt;
//!
//! let a: BigInt = "340282366920938463463374607431768211456".parse().unwrap();
//! assert_eq!((a + BigInt::from(1)).to_string(), "340282366920938463463374607431768211457");
//! assert_eq!(BigInt::from(-7) / BigInt::from(2), BigInt::from(-3));
//! ```
#![forbid(unsafe_code)]

mod ast;
mod error;
mod interrupt;
mod lexer;
mod num;
mod parser;
mod result;

use std::collections::HashMap;

pub use error::CowintError;
pub use interrupt::Interrupt;
pub use num::{BigInt, WordStore, INLINE_WORDS};

use interrupt::{test_int, Never};
use result::CowintResult;

/// Name of the variable that holds the most recent result.
const PREVIOUS_RESULT: &str = "_";

/// The result of a single evaluation.
#[derive(PartialEq, Eq, Debug)]
pub struct EvalResult {
	main_result: String,
	value: Option<BigInt>,
}

impl EvalResult {
	fn empty() -> Self {
		Self {
			main_result: String::new(),
			value: None,
		}
	}

	/// The result rendered in base 10. Empty for blank input.
	pub fn get_main_result(&self) -> &str {
		self.main_result.as_str()
	}

	/// The computed value, or `None` for blank input.
	pub fn get_value(&self) -> Option<&BigInt> {
		self.value.as_ref()
	}
}

/// Variables that persist between calls to [`evaluate`].
#[derive(Clone, Debug, Default)]
pub struct Context {
	variables: HashMap<String, BigInt>,
}

impl Context {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get_variable(&self, name: &str) -> Option<&BigInt> {
		self.variables.get(name)
	}

	pub fn set_variable(&mut self, name: impl Into<String>, value: BigInt) {
		self.variables.insert(name.into(), value);
	}
}

fn evaluate_to_value<I: Interrupt>(
	input: &str,
	variables: &mut HashMap<String, BigInt>,
	int: &I,
) -> CowintResult<Option<BigInt>> {
	let tokens = lexer::lex(input, int).collect::<CowintResult<Vec<_>>>()?;
	if tokens.is_empty() {
		return Ok(None);
	}
	let expr = parser::parse_tokens(&tokens)?;
	let value = ast::evaluate(&expr, variables, int)?;
	test_int(int)?;
	Ok(Some(value))
}

/// Evaluates a line of input such as `x = 2 ** 100` or `gcd(x, 6) << 3`.
///
/// Blank or comment-only input produces an empty result and leaves the
/// context untouched. A successful evaluation stores its value in `_`.
pub fn evaluate(input: &str, context: &mut Context) -> Result<EvalResult, String> {
	evaluate_with_interrupt(input, context, &Never::default())
}

/// Like [`evaluate`], but polls `int` during long computations and fails with
/// an "interrupted" error once it signals. A failed evaluation, interrupted or
/// not, leaves `context` unchanged.
pub fn evaluate_with_interrupt<I: Interrupt>(
	input: &str,
	context: &mut Context,
	int: &I,
) -> Result<EvalResult, String> {
	// assignments land in a scratch copy (heap words are shared, not copied)
	// and only reach the context once the result has been rendered
	let mut variables = context.variables.clone();
	let Some(value) = evaluate_to_value(input, &mut variables, int).map_err(|e| e.to_string())?
	else {
		return Ok(EvalResult::empty());
	};
	let main_result = value.format(int).map_err(|e| e.to_string())?;
	variables.insert(PREVIOUS_RESULT.to_string(), value.clone());
	context.variables = variables;
	Ok(EvalResult {
		main_result,
		value: Some(value),
	})
}

const fn get_version_as_str() -> &'static str {
	env!("CARGO_PKG_VERSION")
}

/// Returns the version of `cowint-core`.
pub fn get_version() -> String {
	get_version_as_str().to_string()
}

#[cfg(test)]
mod tests {
	use super::{evaluate, evaluate_with_interrupt, BigInt, Context, Interrupt};
	use std::cell::Cell;

	#[test]
	fn test_blank_input_is_empty() {
		let mut context = Context::new();
		let result = evaluate("  # just a comment", &mut context).unwrap();
		assert_eq!(result.get_main_result(), "");
		assert_eq!(result.get_value(), None);
		assert!(context.get_variable("_").is_none());
	}

	#[test]
	fn test_previous_result() {
		let mut context = Context::new();
		evaluate("6 * 7", &mut context).unwrap();
		assert_eq!(context.get_variable("_"), Some(&BigInt::from(42)));
		let result = evaluate("_ + 1", &mut context).unwrap();
		assert_eq!(result.get_value(), Some(&BigInt::from(43)));
	}

	#[test]
	fn test_failed_evaluation_keeps_previous_result() {
		let mut context = Context::new();
		evaluate("5", &mut context).unwrap();
		assert!(evaluate("1 / 0", &mut context).is_err());
		assert_eq!(evaluate("_", &mut context).unwrap().get_main_result(), "5");
	}

	#[test]
	fn test_set_variable() {
		let mut context = Context::new();
		context.set_variable("big", BigInt::from(u64::MAX));
		assert_eq!(
			evaluate("big + 1", &mut context).unwrap().get_main_result(),
			"18446744073709551616"
		);
	}

	#[test]
	fn test_interrupt() {
		struct Always;
		impl Interrupt for Always {
			fn should_interrupt(&self) -> bool {
				true
			}
		}
		let mut context = Context::new();
		assert_eq!(
			evaluate_with_interrupt("1 + 1", &mut context, &Always),
			Err("interrupted".to_string())
		);
	}

	// signals on every poll after the first `budget` ones
	struct AfterPolls {
		budget: Cell<usize>,
	}

	impl Interrupt for AfterPolls {
		fn should_interrupt(&self) -> bool {
			let remaining = self.budget.get();
			if remaining == 0 {
				return true;
			}
			self.budget.set(remaining - 1);
			false
		}
	}

	#[test]
	fn test_interrupted_assignment_leaves_context_unchanged() {
		let mut completed = false;
		for budget in 0..64 {
			let mut context = Context::new();
			context.set_variable("x", BigInt::from(1));
			let int = AfterPolls {
				budget: Cell::new(budget),
			};
			match evaluate_with_interrupt("x = 5 + 10 ** 30", &mut context, &int) {
				Ok(result) => {
					assert_eq!(result.get_main_result(), "1000000000000000000000000000005");
					assert_eq!(context.get_variable("_"), result.get_value());
					assert_eq!(context.get_variable("x"), result.get_value());
					completed = true;
				}
				Err(msg) => {
					assert_eq!(msg, "interrupted");
					assert_eq!(context.get_variable("x"), Some(&BigInt::from(1)));
					assert!(context.get_variable("_").is_none());
				}
			}
		}
		assert!(completed);
	}

	#[test]
	fn test_version() {
		assert_eq!(super::get_version(), env!("CARGO_PKG_VERSION"));
	}
}
