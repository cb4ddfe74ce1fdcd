use crate::ast::{Bop, Expr};
use crate::lexer::{Symbol, Token};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
	ExpectedAToken,
	ExpectedToken(Symbol, Symbol),
	FoundInvalidTokenWhileExpecting(Symbol),
	UnexpectedSymbol(Symbol),
	UnexpectedInput,
	ExpectedIdentifierInAssignment,
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
		match self {
			Self::ExpectedAToken => write!(f, "expected a token"),
			Self::ExpectedToken(fnd, ex) => write!(f, "found '{fnd}' while expecting '{ex}'"),
			Self::FoundInvalidTokenWhileExpecting(sym) => {
				write!(f, "found an invalid token while expecting '{sym}'")
			}
			Self::UnexpectedSymbol(s) => {
				write!(f, "expected a value, instead found '{s}'")
			}
			Self::UnexpectedInput => write!(f, "unexpected input found"),
			Self::ExpectedIdentifierInAssignment => {
				write!(f, "expected an identifier on the left of '='")
			}
		}
	}
}

type ParseResult<'a, T = Expr> = Result<(T, &'a [Token]), ParseError>;

impl From<ParseError> for crate::error::CowintError {
	fn from(e: ParseError) -> Self {
		Self::ParseError(e)
	}
}

fn parse_token(input: &[Token]) -> ParseResult<'_, Token> {
	if input.is_empty() {
		return Err(ParseError::ExpectedAToken);
	}
	Ok((input[0].clone(), &input[1..]))
}

fn parse_fixed_symbol(input: &[Token], symbol: Symbol) -> ParseResult<'_, ()> {
	let (token, remaining) = parse_token(input)?;
	if let Token::Symbol(sym) = token {
		if sym == symbol {
			Ok(((), remaining))
		} else {
			Err(ParseError::ExpectedToken(sym, symbol))
		}
	} else {
		Err(ParseError::FoundInvalidTokenWhileExpecting(symbol))
	}
}

fn parse_parens(input: &[Token]) -> ParseResult<'_> {
	let ((), input) = parse_fixed_symbol(input, Symbol::OpenParens)?;
	let (inner, mut input) = parse_expression(input)?;
	// allow omitting closing parentheses at end of input
	if !input.is_empty() {
		let ((), remaining) = parse_fixed_symbol(input, Symbol::CloseParens)?;
		input = remaining;
	}
	Ok((inner, input))
}

// `input` starts right after the function name
fn parse_call_args(input: &[Token]) -> ParseResult<'_, Vec<Expr>> {
	let ((), mut input) = parse_fixed_symbol(input, Symbol::OpenParens)?;
	let mut args = vec![];
	if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::CloseParens) {
		return Ok((args, remaining));
	}
	loop {
		let (arg, remaining) = parse_expression(input)?;
		args.push(arg);
		if let Ok(((), remaining)) = parse_fixed_symbol(remaining, Symbol::Comma) {
			input = remaining;
			continue;
		}
		let ((), remaining) = parse_fixed_symbol(remaining, Symbol::CloseParens)?;
		return Ok((args, remaining));
	}
}

fn parse_primary(input: &[Token]) -> ParseResult<'_> {
	let (token, remaining) = parse_token(input)?;

	match token {
		Token::Num(n) => Ok((Expr::Num(n), remaining)),
		Token::Ident(ident) => {
			if let Some(Token::Symbol(Symbol::OpenParens)) = remaining.first() {
				let (args, remaining) = parse_call_args(remaining)?;
				Ok((Expr::Call(ident, args), remaining))
			} else {
				Ok((Expr::Ident(ident), remaining))
			}
		}
		Token::Symbol(Symbol::OpenParens) => parse_parens(input),
		Token::Symbol(s) => Err(ParseError::UnexpectedSymbol(s)),
	}
}

// `**` is right-associative and its right operand may carry a sign,
// e.g. `2 ** -1` or `2 ** 3 ** 2`
fn parse_power(input: &[Token]) -> ParseResult<'_> {
	let (mut result, mut input) = parse_primary(input)?;
	if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::Pow) {
		let (rhs, remaining) = parse_unary(remaining)?;
		result = Expr::Bop(Bop::Pow, Box::new(result), Box::new(rhs));
		input = remaining;
	}
	Ok((result, input))
}

fn parse_unary(input: &[Token]) -> ParseResult<'_> {
	if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::Sub) {
		let (result, remaining) = parse_unary(remaining)?;
		return Ok((Expr::UnaryMinus(Box::new(result)), remaining));
	}
	if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::Add) {
		let (result, remaining) = parse_unary(remaining)?;
		return Ok((Expr::UnaryPlus(Box::new(result)), remaining));
	}
	if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::BitwiseNot) {
		let (result, remaining) = parse_unary(remaining)?;
		return Ok((Expr::BitwiseNot(Box::new(result)), remaining));
	}
	parse_power(input)
}

// Parses a left-associative chain `next (op next)*` for the given operators.
fn parse_left_assoc<'a>(
	input: &'a [Token],
	operators: &[(Symbol, Bop)],
	next: fn(&[Token]) -> ParseResult<'_>,
) -> ParseResult<'a> {
	let (mut result, mut input) = next(input)?;
	'outer: loop {
		for &(symbol, bop) in operators {
			if let Ok(((), remaining)) = parse_fixed_symbol(input, symbol) {
				let (rhs, remaining) = next(remaining)?;
				result = Expr::Bop(bop, Box::new(result), Box::new(rhs));
				input = remaining;
				continue 'outer;
			}
		}
		return Ok((result, input));
	}
}

fn parse_multiplicative(input: &[Token]) -> ParseResult<'_> {
	parse_left_assoc(
		input,
		&[
			(Symbol::Mul, Bop::Mul),
			(Symbol::Div, Bop::Div),
			(Symbol::Mod, Bop::Mod),
		],
		parse_unary,
	)
}

fn parse_additive(input: &[Token]) -> ParseResult<'_> {
	parse_left_assoc(
		input,
		&[(Symbol::Add, Bop::Add), (Symbol::Sub, Bop::Sub)],
		parse_multiplicative,
	)
}

fn parse_bitshifts(input: &[Token]) -> ParseResult<'_> {
	parse_left_assoc(
		input,
		&[
			(Symbol::ShiftLeft, Bop::ShiftLeft),
			(Symbol::ShiftRight, Bop::ShiftRight),
		],
		parse_additive,
	)
}

fn parse_bitwise_and(input: &[Token]) -> ParseResult<'_> {
	parse_left_assoc(input, &[(Symbol::BitwiseAnd, Bop::BitwiseAnd)], parse_bitshifts)
}

fn parse_bitwise_xor(input: &[Token]) -> ParseResult<'_> {
	parse_left_assoc(input, &[(Symbol::BitwiseXor, Bop::BitwiseXor)], parse_bitwise_and)
}

fn parse_bitwise_or(input: &[Token]) -> ParseResult<'_> {
	parse_left_assoc(input, &[(Symbol::BitwiseOr, Bop::BitwiseOr)], parse_bitwise_xor)
}

pub(crate) fn parse_expression(input: &[Token]) -> ParseResult<'_> {
	parse_bitwise_or(input)
}

pub(crate) fn parse_tokens(input: &[Token]) -> Result<Expr, ParseError> {
	// assignment is only allowed at the top level
	let (res, remaining) = match input {
		[Token::Ident(name), Token::Symbol(Symbol::Equals), rest @ ..] => {
			let (value, remaining) = parse_expression(rest)?;
			(Expr::Assign(name.clone(), Box::new(value)), remaining)
		}
		_ => parse_expression(input)?,
	};
	match remaining.first() {
		None => Ok(res),
		Some(Token::Symbol(Symbol::Equals)) => Err(ParseError::ExpectedIdentifierInAssignment),
		Some(_) => Err(ParseError::UnexpectedInput),
	}
}
