use crate::error::CowintError;
use crate::interrupt::{test_int, Interrupt};
use crate::num::BigInt;
use crate::result::CowintResult;
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Bop {
	Add,
	Sub,
	Mul,
	Div,
	Mod,
	Pow,
	BitwiseAnd,
	BitwiseOr,
	BitwiseXor,
	ShiftLeft,
	ShiftRight,
}

impl fmt::Display for Bop {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Self::Add => "+",
			Self::Sub => "-",
			Self::Mul => "*",
			Self::Div => "/",
			Self::Mod => "%",
			Self::Pow => "**",
			Self::BitwiseAnd => "&",
			Self::BitwiseOr => "|",
			Self::BitwiseXor => "^",
			Self::ShiftLeft => "<<",
			Self::ShiftRight => ">>",
		};
		write!(f, "{s}")
	}
}

#[derive(Clone, Debug)]
pub(crate) enum Expr {
	Num(BigInt),
	Ident(String),
	UnaryMinus(Box<Expr>),
	UnaryPlus(Box<Expr>),
	BitwiseNot(Box<Expr>),
	Bop(Bop, Box<Expr>, Box<Expr>),
	// function name and arguments
	Call(String, Vec<Expr>),
	Assign(String, Box<Expr>),
}

impl Expr {
	/// Fully parenthesised rendering, used to check how input was parsed.
	#[cfg(test)]
	pub(crate) fn format(&self) -> String {
		match self {
			Self::Num(n) => n.to_string(),
			Self::Ident(ident) => ident.clone(),
			Self::UnaryMinus(x) => format!("(-{})", x.format()),
			Self::UnaryPlus(x) => format!("(+{})", x.format()),
			Self::BitwiseNot(x) => format!("(~{})", x.format()),
			Self::Bop(op, a, b) => format!("({}{op}{})", a.format(), b.format()),
			Self::Call(name, args) => {
				let args = args.iter().map(Self::format).collect::<Vec<_>>();
				format!("{name}({})", args.join(", "))
			}
			Self::Assign(name, value) => format!("{name} = {}", value.format()),
		}
	}
}

// 2^24 bits is a 2 MiB result; anything larger is better written as `2 ** n`
const MAX_LEFT_SHIFT: u32 = 1 << 24;

fn shift_amount(amount: &BigInt) -> CowintResult<u32> {
	if amount.is_negative() {
		return Err(CowintError::NegativeNumbersNotAllowed);
	}
	let amount = amount
		.try_as_u64()
		.map_err(|_| CowintError::ShiftTooLarge)?;
	u32::try_from(amount).map_err(|_| CowintError::ShiftTooLarge)
}

fn evaluate_bop<I: Interrupt>(op: Bop, a: BigInt, b: &BigInt, int: &I) -> CowintResult<BigInt> {
	Ok(match op {
		Bop::Add => a + b,
		Bop::Sub => a - b,
		Bop::Mul => a * b,
		Bop::Div => a.checked_div(b)?,
		Bop::Mod => a.checked_rem(b)?,
		Bop::Pow => a.pow(b, int)?,
		Bop::BitwiseAnd => a & b,
		Bop::BitwiseOr => a | b,
		Bop::BitwiseXor => a ^ b,
		Bop::ShiftLeft => {
			let amount = shift_amount(b)?;
			if amount > MAX_LEFT_SHIFT && !a.is_zero() {
				return Err(CowintError::ShiftTooLarge);
			}
			a << amount
		}
		Bop::ShiftRight => a >> shift_amount(b)?,
	})
}

fn expect_args<'a, const N: usize>(
	function: &'static str,
	args: &'a [BigInt],
) -> CowintResult<&'a [BigInt; N]> {
	args.try_into()
		.map_err(|_| CowintError::WrongArgumentCount {
			function,
			expected: N,
			found: args.len(),
		})
}

fn call_function<I: Interrupt>(name: &str, args: &[BigInt], int: &I) -> CowintResult<BigInt> {
	Ok(match name {
		"abs" => {
			let [x] = expect_args::<1>("abs", args)?;
			x.abs()
		}
		"gcd" => {
			let [a, b] = expect_args::<2>("gcd", args)?;
			BigInt::gcd(a, b, int)?
		}
		"factorial" => {
			let [n] = expect_args::<1>("factorial", args)?;
			n.factorial(int)?
		}
		"sign" => {
			let [x] = expect_args::<1>("sign", args)?;
			x.signum()
		}
		"bits" => {
			let [x] = expect_args::<1>("bits", args)?;
			BigInt::from(x.bit_length())
		}
		_ => return Err(CowintError::UnknownFunction(name.to_string())),
	})
}

pub(crate) fn evaluate<I: Interrupt>(
	expr: &Expr,
	variables: &mut HashMap<String, BigInt>,
	int: &I,
) -> CowintResult<BigInt> {
	test_int(int)?;
	Ok(match expr {
		Expr::Num(n) => n.clone(),
		Expr::Ident(ident) => variables
			.get(ident)
			.cloned()
			.ok_or_else(|| CowintError::IdentifierNotFound(ident.clone()))?,
		Expr::UnaryMinus(x) => -evaluate(x, variables, int)?,
		Expr::UnaryPlus(x) => evaluate(x, variables, int)?,
		Expr::BitwiseNot(x) => !evaluate(x, variables, int)?,
		Expr::Bop(op, a, b) => {
			let a = evaluate(a, variables, int)?;
			let b = evaluate(b, variables, int)?;
			evaluate_bop(*op, a, &b, int)?
		}
		Expr::Call(name, args) => {
			let args = args
				.iter()
				.map(|arg| evaluate(arg, variables, int))
				.collect::<CowintResult<Vec<_>>>()?;
			call_function(name, &args, int)?
		}
		Expr::Assign(name, value) => {
			let value = evaluate(value, variables, int)?;
			variables.insert(name.clone(), value.clone());
			value
		}
	})
}
