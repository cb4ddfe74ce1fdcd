use crate::error::CowintError;
use crate::interrupt::{test_int, Interrupt};
use crate::num::BigInt;
use crate::result::CowintResult;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token {
	Num(BigInt),
	Ident(String),
	Symbol(Symbol),
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Symbol {
	OpenParens,
	CloseParens,
	Comma,
	Add,
	Sub,
	Mul,
	Div,
	Mod,
	Pow,
	BitwiseAnd,
	BitwiseOr,
	BitwiseXor,
	BitwiseNot,
	ShiftLeft,
	ShiftRight,
	Equals,
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Self::OpenParens => "(",
			Self::CloseParens => ")",
			Self::Comma => ",",
			Self::Add => "+",
			Self::Sub => "-",
			Self::Mul => "*",
			Self::Div => "/",
			Self::Mod => "%",
			Self::Pow => "**",
			Self::BitwiseAnd => "&",
			Self::BitwiseOr => "|",
			Self::BitwiseXor => "^",
			Self::BitwiseNot => "~",
			Self::ShiftLeft => "<<",
			Self::ShiftRight => ">>",
			Self::Equals => "=",
		};
		write!(f, "{s}")
	}
}

// Parses a plain integer: digits with optional '_' separators between them.
// Signs are handled by the parser as unary operators.
fn parse_integer(input: &str) -> CowintResult<(BigInt, &str)> {
	let mut digits = String::new();
	let mut prev_was_separator = false;
	let mut end = input.len();
	for (idx, ch) in input.char_indices() {
		if ch.is_ascii_digit() {
			digits.push(ch);
			prev_was_separator = false;
		} else if ch == '_' {
			if prev_was_separator {
				return Err(CowintError::DigitSeparatorsOnlyBetweenDigits);
			}
			prev_was_separator = true;
		} else {
			end = idx;
			break;
		}
	}
	if prev_was_separator {
		return Err(CowintError::DigitSeparatorsOnlyBetweenDigits);
	}
	let (_, remaining) = input.split_at(end);
	if let Some(ch) = remaining.chars().next() {
		if is_valid_in_ident(ch) {
			return Err(CowintError::ExpectedADigit(ch));
		}
	}
	Ok((digits.parse()?, remaining))
}

fn is_valid_in_ident(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || ch == '_'
}

fn parse_ident(input: &str) -> (Token, &str) {
	let end = input
		.char_indices()
		.find(|&(_, ch)| !is_valid_in_ident(ch))
		.map_or(input.len(), |(idx, _)| idx);
	let (ident, remaining) = input.split_at(end);
	(Token::Ident(ident.to_string()), remaining)
}

fn parse_symbol(ch: char, input: &mut &str) -> CowintResult<Token> {
	let mut test_next = |next: char| {
		if input.starts_with(next) {
			let (_, remaining) = input.split_at(next.len_utf8());
			*input = remaining;
			true
		} else {
			false
		}
	};
	Ok(Token::Symbol(match ch {
		'(' => Symbol::OpenParens,
		')' => Symbol::CloseParens,
		',' => Symbol::Comma,
		'+' => Symbol::Add,
		// unicode minus sign
		'-' | '\u{2212}' => Symbol::Sub,
		'*' | '\u{d7}' => {
			if test_next('*') {
				Symbol::Pow
			} else {
				Symbol::Mul
			}
		}
		'/' | '\u{f7}' => Symbol::Div,
		'%' => Symbol::Mod,
		'&' => Symbol::BitwiseAnd,
		'|' => Symbol::BitwiseOr,
		'^' => Symbol::BitwiseXor,
		'~' => Symbol::BitwiseNot,
		'=' => Symbol::Equals,
		'<' => {
			if test_next('<') {
				Symbol::ShiftLeft
			} else {
				return Err(CowintError::UnexpectedChar(ch));
			}
		}
		'>' => {
			if test_next('>') {
				Symbol::ShiftRight
			} else {
				return Err(CowintError::UnexpectedChar(ch));
			}
		}
		_ => return Err(CowintError::UnexpectedChar(ch)),
	}))
}

fn skip_whitespace_and_comments(input: &mut &str) {
	while let Some(ch) = input.chars().next() {
		if ch == '#' {
			let rest: &str = *input;
			*input = rest.find('\n').map_or("", |idx| &rest[idx..]);
		} else if ch.is_whitespace() {
			let (_, remaining) = input.split_at(ch.len_utf8());
			*input = remaining;
		} else {
			break;
		}
	}
}

pub(crate) struct Lexer<'a, 'b, I: Interrupt> {
	input: &'a str,
	int: &'b I,
}

impl<I: Interrupt> Lexer<'_, '_, I> {
	fn next_token(&mut self) -> CowintResult<Option<Token>> {
		skip_whitespace_and_comments(&mut self.input);
		let Some(ch) = self.input.chars().next() else {
			return Ok(None);
		};
		test_int(self.int)?;
		Ok(Some(if ch.is_ascii_digit() {
			let (num, remaining) = parse_integer(self.input)?;
			self.input = remaining;
			Token::Num(num)
		} else if is_valid_in_ident(ch) {
			let (ident, remaining) = parse_ident(self.input);
			self.input = remaining;
			ident
		} else {
			let (_, remaining) = self.input.split_at(ch.len_utf8());
			self.input = remaining;
			parse_symbol(ch, &mut self.input)?
		}))
	}
}

impl<I: Interrupt> Iterator for Lexer<'_, '_, I> {
	type Item = CowintResult<Token>;

	fn next(&mut self) -> Option<Self::Item> {
		self.next_token().transpose()
	}
}

pub(crate) fn lex<'a, 'b, I: Interrupt>(input: &'a str, int: &'b I) -> Lexer<'a, 'b, I> {
	Lexer { input, int }
}
