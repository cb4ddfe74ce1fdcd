use crate::error::CowintError;
use crate::interrupt::{test_int, Interrupt};
use crate::num::words::WordStore;
use crate::result::CowintResult;
use std::cmp::{max, Ordering};
use std::hash::{Hash, Hasher};

pub(crate) const WORD_BITS: usize = 32;
const SIGN_BIT: u32 = 1 << 31;

#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
pub(crate) const fn truncate(n: u64) -> u32 {
	n as u32
}

fn is_negative_word(word: u32) -> bool {
	word & SIGN_BIT != 0
}

fn word_or_fill(words: &[u32], idx: usize, fill: u32) -> u32 {
	words.get(idx).copied().unwrap_or(fill)
}

/// Arbitrary-precision signed integer.
///
/// Stored as little-endian 32-bit words in two's complement. The sequence is
/// always trimmed: the top word is never a redundant sign extension of the
/// word below it, and at least one word is present.
#[derive(Clone)]
pub struct BigInt {
	words: WordStore,
}

impl BigInt {
	pub fn zero() -> Self {
		Self {
			words: WordStore::from_slice(&[0]),
		}
	}

	/// Builds a value from raw two's-complement words, least significant first.
	/// An empty slice is zero.
	pub fn from_words(words: &[u32]) -> Self {
		let mut res = Self {
			words: WordStore::from_slice(words),
		};
		if res.words.is_empty() {
			res.words.push(0);
		}
		res.trim();
		res
	}

	pub fn words(&self) -> &[u32] {
		self.words.as_slice()
	}

	pub fn word_store(&self) -> &WordStore {
		&self.words
	}

	pub fn word_count(&self) -> usize {
		self.words.len()
	}

	fn top(&self) -> u32 {
		self.words.last().unwrap_or(0)
	}

	pub fn is_negative(&self) -> bool {
		is_negative_word(self.top())
	}

	pub fn is_zero(&self) -> bool {
		self.words() == [0]
	}

	fn fill(&self) -> u32 {
		if self.is_negative() {
			u32::MAX
		} else {
			0
		}
	}

	/// Returns word `idx` of the infinitely sign-extended encoding: the stored
	/// word when in range, otherwise 0 for non-negative values and `u32::MAX`
	/// for negative ones.
	pub fn word_at(&self, idx: usize) -> u32 {
		word_or_fill(self.words(), idx, self.fill())
	}

	pub(crate) fn trim(&mut self) {
		while self.words.len() > 1 {
			let len = self.words.len();
			let top = self.words[len - 1];
			let below_negative = is_negative_word(self.words[len - 2]);
			if (top == 0 && !below_negative) || (top == u32::MAX && below_negative) {
				self.words.pop();
			} else {
				break;
			}
		}
	}

	#[cfg(test)]
	pub(crate) fn is_trimmed(&self) -> bool {
		let mut copy = self.clone();
		copy.trim();
		copy.word_count() == self.word_count()
	}

	fn extend_sign(&mut self, len: usize) {
		if self.words.len() < len {
			let fill = self.fill();
			self.words.resize_with_fill(len, fill);
		}
	}

	// word count of a non-negative value without its zero guard word
	fn significant_len(&self) -> usize {
		let len = self.words.len();
		if len > 1 && self.words[len - 1] == 0 {
			len - 1
		} else {
			len
		}
	}

	/// computes `self += (transform(rhs) + carry_in) << (32 * pos)`, where
	/// `rhs` is sign-extended with `rhs_fill`
	fn shifted_apply(
		&mut self,
		rhs: &[u32],
		rhs_fill: u32,
		pos: usize,
		carry_in: u32,
		transform: fn(u32) -> u32,
	) {
		let new_len = max(self.words.len(), rhs.len() + pos) + 1;
		self.extend_sign(new_len);
		let mut carry = u64::from(carry_in);
		for (i, word) in self.words.as_mut_slice().iter_mut().enumerate().skip(pos) {
			carry += u64::from(*word) + u64::from(transform(word_or_fill(rhs, i - pos, rhs_fill)));
			*word = truncate(carry);
			carry >>= 32;
		}
		self.trim();
	}

	fn shifted_add(&mut self, rhs: &Self, pos: usize) {
		self.shifted_apply(rhs.words(), rhs.fill(), pos, 0, |w| w);
	}

	fn shifted_sub(&mut self, rhs: &Self, pos: usize) {
		self.shifted_apply(rhs.words(), rhs.fill(), pos, 1, |w| !w);
	}

	pub(crate) fn add_assign_internal(&mut self, rhs: &Self) {
		self.shifted_add(rhs, 0);
	}

	pub(crate) fn sub_assign_internal(&mut self, rhs: &Self) {
		self.shifted_sub(rhs, 0);
	}

	pub(crate) fn negate_in_place(&mut self) {
		let len = self.words.len();
		self.extend_sign(len + 1);
		let mut carry = 1_u64;
		for word in self.words.as_mut_slice() {
			carry += u64::from(!*word);
			*word = truncate(carry);
			carry >>= 32;
		}
		self.trim();
	}

	pub(crate) fn invert_in_place(&mut self) {
		for word in self.words.as_mut_slice() {
			*word = !*word;
		}
		self.trim();
	}

	pub fn abs(&self) -> Self {
		let mut res = self.clone();
		if res.is_negative() {
			res.negate_in_place();
		}
		res
	}

	pub fn signum(&self) -> Self {
		if self.is_negative() {
			Self::from(-1)
		} else if self.is_zero() {
			Self::zero()
		} else {
			Self::from(1)
		}
	}

	/// Number of bits in the absolute value, 0 for zero.
	pub fn bit_length(&self) -> usize {
		let abs = self.abs();
		let len = abs.significant_len();
		let top = abs.words[len - 1];
		if len == 1 && top == 0 {
			return 0;
		}
		WORD_BITS * len - top.leading_zeros() as usize
	}

	pub(crate) fn mul_internal(&self, rhs: &Self) -> Self {
		let a = self.words();
		let b = rhs.words();
		let mut product = WordStore::new();
		product.resize(a.len() + b.len() + 1);
		let out = product.as_mut_slice();
		for (i, &x) in a.iter().enumerate() {
			let mut carry = 0_u64;
			for (j, &y) in b.iter().enumerate() {
				carry += u64::from(x) * u64::from(y) + u64::from(out[i + j]);
				out[i + j] = truncate(carry);
				carry >>= 32;
			}
			out[i + b.len()] = truncate(carry);
		}
		// the raw product treats both word sequences as unsigned; negative
		// operands need the excess 2^(32n) terms taken back out
		let mut res = Self { words: product };
		if rhs.is_negative() {
			res.shifted_apply(a, 0, b.len(), 1, |w| !w);
		}
		if self.is_negative() {
			res.shifted_apply(b, 0, a.len(), 1, |w| !w);
		}
		if self.is_negative() && rhs.is_negative() {
			res.shifted_apply(&[1], 0, a.len() + b.len(), 0, |w| w);
		}
		res.trim();
		res
	}

	pub(crate) fn mul_assign_internal(&mut self, rhs: &Self) {
		*self = self.mul_internal(rhs);
	}

	/// computes `self = self * factor + addend` for non-negative `self`
	pub(crate) fn mul_word_add_in_place(&mut self, factor: u32, addend: u32) {
		debug_assert!(!self.is_negative());
		let mut carry = u64::from(addend);
		for word in self.words.as_mut_slice() {
			carry += u64::from(*word) * u64::from(factor);
			*word = truncate(carry);
			carry >>= 32;
		}
		if carry != 0 {
			self.words.push(truncate(carry));
		}
		if self.is_negative() {
			self.words.push(0);
		}
		self.trim();
	}

	/// divides non-negative `self` by `divisor` in place, returning the remainder
	pub(crate) fn div_word_in_place(&mut self, divisor: u32) -> u32 {
		debug_assert!(!self.is_negative());
		let divisor = u64::from(divisor);
		let mut rem = 0_u64;
		for word in self.words.as_mut_slice().iter_mut().rev() {
			let cur = (rem << 32) | u64::from(*word);
			*word = truncate(cur / divisor);
			rem = cur % divisor;
		}
		self.trim();
		truncate(rem)
	}

	// both operands non-negative, divisor non-zero
	fn div_rem_abs(mut rem: Self, mut divisor: Self) -> (Self, Self) {
		let divisor_len = divisor.significant_len();
		if divisor_len == 1 {
			let r = rem.div_word_in_place(divisor.words[0]);
			return (rem, Self::from(r));
		}
		if rem < divisor {
			return (Self::zero(), rem);
		}

		// normalize so that the top divisor word has its high bit set
		let shift = divisor.words[divisor_len - 1].leading_zeros() as usize;
		divisor.shl_in_place(shift);
		rem.shl_in_place(shift);
		let v1 = u128::from(divisor.words[divisor_len - 1]);
		let v2 = u128::from(divisor.words[divisor_len - 2]);
		let word_max = u128::from(u32::MAX);

		let rem_len = rem.significant_len();
		let mut quotient = WordStore::new();
		quotient.resize(rem_len - divisor_len + 2);
		for k in (0..=rem_len - divisor_len).rev() {
			let u0 = u128::from(rem.word_at(k + divisor_len));
			let u1 = u128::from(rem.word_at(k + divisor_len - 1));
			let u2 = u128::from(rem.word_at(k + divisor_len - 2));
			let top = (u0 << 32) | u1;
			let mut q_hat = top / v1;
			let mut r_hat = top % v1;
			while q_hat > word_max || q_hat * v2 > ((r_hat << 32) | u2) {
				q_hat -= 1;
				r_hat += v1;
				if r_hat > word_max {
					break;
				}
			}
			#[allow(clippy::cast_possible_truncation)]
			let mut digit = q_hat as u32;
			rem.shifted_sub(&divisor.mul_internal(&Self::from(digit)), k);
			// the estimate is at most two too large
			while rem.is_negative() {
				rem.shifted_add(&divisor, k);
				digit -= 1;
			}
			quotient.set(k, digit);
		}
		let mut quotient = Self { words: quotient };
		quotient.trim();
		rem.shr_in_place(shift);
		(quotient, rem)
	}

	/// Truncating division. `rhs` must be non-zero.
	pub(crate) fn div_rem_nonzero(&self, rhs: &Self) -> (Self, Self) {
		let quotient_negative = self.is_negative() != rhs.is_negative();
		let (mut quotient, mut remainder) = Self::div_rem_abs(self.abs(), rhs.abs());
		if quotient_negative {
			quotient.negate_in_place();
		}
		if self.is_negative() {
			remainder.negate_in_place();
		}
		(quotient, remainder)
	}

	/// Returns the truncated quotient and the remainder, which has the sign
	/// of `self`.
	pub fn div_rem(&self, rhs: &Self) -> CowintResult<(Self, Self)> {
		if rhs.is_zero() {
			return Err(CowintError::DivideByZero);
		}
		Ok(self.div_rem_nonzero(rhs))
	}

	pub fn checked_div(&self, rhs: &Self) -> CowintResult<Self> {
		Ok(self.div_rem(rhs)?.0)
	}

	pub fn checked_rem(&self, rhs: &Self) -> CowintResult<Self> {
		Ok(self.div_rem(rhs)?.1)
	}

	pub(crate) fn bitwise_in_place(&mut self, rhs: &Self, op: fn(u32, u32) -> u32) {
		let len = max(self.words.len(), rhs.words.len());
		self.extend_sign(len);
		let fill = rhs.fill();
		for (i, word) in self.words.as_mut_slice().iter_mut().enumerate() {
			*word = op(*word, word_or_fill(rhs.words(), i, fill));
		}
		self.trim();
	}

	pub(crate) fn shl_in_place(&mut self, bits: usize) {
		if bits == 0 || self.is_zero() {
			return;
		}
		let word_shift = bits / WORD_BITS;
		let bit_shift = bits % WORD_BITS;
		let new_len = self.words.len() + word_shift + 1;
		let mut shifted = WordStore::new();
		shifted.resize(new_len);
		for (i, word) in shifted.as_mut_slice().iter_mut().enumerate().skip(word_shift) {
			let high = self.word_at(i - word_shift) << bit_shift;
			let low = if bit_shift > 0 && i > word_shift {
				self.word_at(i - word_shift - 1) >> (WORD_BITS - bit_shift)
			} else {
				0
			};
			*word = high | low;
		}
		self.words = shifted;
		self.trim();
	}

	/// Arithmetic shift: rounds towards negative infinity.
	pub(crate) fn shr_in_place(&mut self, bits: usize) {
		if bits == 0 {
			return;
		}
		let word_shift = bits / WORD_BITS;
		let bit_shift = bits % WORD_BITS;
		let len = self.words.len();
		if word_shift >= len {
			*self = if self.is_negative() {
				Self::from(-1)
			} else {
				Self::zero()
			};
			return;
		}
		let mut shifted = WordStore::new();
		shifted.resize(len - word_shift);
		for (i, word) in shifted.as_mut_slice().iter_mut().enumerate() {
			let low = self.word_at(i + word_shift) >> bit_shift;
			let high = if bit_shift > 0 {
				self.word_at(i + word_shift + 1) << (WORD_BITS - bit_shift)
			} else {
				0
			};
			*word = low | high;
		}
		self.words = shifted;
		self.trim();
	}

	pub fn try_as_u64(&self) -> CowintResult<u64> {
		if self.is_negative() {
			return Err(CowintError::NegativeNumbersNotAllowed);
		}
		if self.significant_len() > 2 {
			return Err(CowintError::ValueTooLarge);
		}
		Ok(u64::from(self.word_at(0)) | (u64::from(self.word_at(1)) << 32))
	}

	pub fn try_as_usize(&self) -> CowintResult<usize> {
		usize::try_from(self.try_as_u64()?).map_err(|_| CowintError::ValueTooLarge)
	}

	pub fn try_as_i64(&self) -> CowintResult<i64> {
		if self.word_count() > 2 {
			return Err(CowintError::ValueTooLarge);
		}
		let raw = u64::from(self.word_at(0)) | (u64::from(self.word_at(1)) << 32);
		Ok(i64::from_le_bytes(raw.to_le_bytes()))
	}

	pub fn pow<I: Interrupt>(&self, exponent: &Self, int: &I) -> CowintResult<Self> {
		if exponent.is_negative() {
			return Err(CowintError::NegativeExponent);
		}
		if self.is_zero() && exponent.is_zero() {
			return Err(CowintError::ZeroToThePowerOfZero);
		}
		if exponent.is_zero() {
			return Ok(Self::from(1));
		}
		// these stay small no matter how large the exponent is
		if self.is_zero() || *self == Self::from(1) {
			return Ok(self.clone());
		}
		if *self == Self::from(-1) {
			return Ok(if exponent.word_at(0) & 1 == 0 {
				Self::from(1)
			} else {
				self.clone()
			});
		}
		let mut exponent = exponent
			.try_as_u64()
			.map_err(|_| CowintError::ExponentTooLarge)?;
		let mut result = Self::from(1);
		let mut base = self.clone();
		while exponent > 0 {
			test_int(int)?;
			if exponent % 2 == 1 {
				result.mul_assign_internal(&base);
			}
			exponent >>= 1;
			if exponent > 0 {
				base = base.mul_internal(&base);
			}
		}
		Ok(result)
	}

	/// Greatest common divisor of the absolute values.
	pub fn gcd<I: Interrupt>(a: &Self, b: &Self, int: &I) -> CowintResult<Self> {
		let mut a = a.abs();
		let mut b = b.abs();
		while !b.is_zero() {
			test_int(int)?;
			let r = a.div_rem_nonzero(&b).1;
			a = b;
			b = r;
		}
		Ok(a)
	}

	// Note: 0! = 1, 1! = 1
	pub fn factorial<I: Interrupt>(&self, int: &I) -> CowintResult<Self> {
		if self.is_negative() {
			return Err(CowintError::NegativeNumbersNotAllowed);
		}
		let mut res = Self::from(1);
		let mut n = self.clone();
		let one = Self::from(1);
		while n > one {
			test_int(int)?;
			res.mul_assign_internal(&n);
			n.sub_assign_internal(&one);
		}
		Ok(res)
	}
}

impl Default for BigInt {
	fn default() -> Self {
		Self::zero()
	}
}

impl From<i64> for BigInt {
	fn from(value: i64) -> Self {
		let raw = u64::from_le_bytes(value.to_le_bytes());
		Self::from_words(&[truncate(raw), truncate(raw >> 32)])
	}
}

impl From<u64> for BigInt {
	fn from(value: u64) -> Self {
		// the zero guard word keeps values with bit 63 set non-negative
		Self::from_words(&[truncate(value), truncate(value >> 32), 0])
	}
}

impl From<i32> for BigInt {
	fn from(value: i32) -> Self {
		Self::from(i64::from(value))
	}
}

impl From<u32> for BigInt {
	fn from(value: u32) -> Self {
		Self::from(u64::from(value))
	}
}

impl From<usize> for BigInt {
	#[allow(clippy::as_conversions)]
	fn from(value: usize) -> Self {
		Self::from(value as u64)
	}
}

impl Ord for BigInt {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self.is_negative(), other.is_negative()) {
			(true, false) => return Ordering::Less,
			(false, true) => return Ordering::Greater,
			_ => (),
		}
		let a = self.words();
		let b = other.words();
		if a.len() != b.len() {
			// trimmed: a longer encoding has a larger magnitude
			let by_len = a.len().cmp(&b.len());
			return if self.is_negative() {
				by_len.reverse()
			} else {
				by_len
			};
		}
		a.iter().rev().cmp(b.iter().rev())
	}
}

impl PartialOrd for BigInt {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for BigInt {
	fn eq(&self, other: &Self) -> bool {
		self.words() == other.words()
	}
}

impl Eq for BigInt {}

impl Hash for BigInt {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.words().hash(state);
	}
}
