use crate::num::BigInt;
use std::ops::{
	Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
	DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
	SubAssign,
};

impl BigInt {
	fn div_assign_internal(&mut self, rhs: &Self) {
		assert!(!rhs.is_zero(), "attempt to divide by zero");
		*self = self.div_rem_nonzero(rhs).0;
	}

	fn rem_assign_internal(&mut self, rhs: &Self) {
		assert!(
			!rhs.is_zero(),
			"attempt to calculate the remainder with a divisor of zero"
		);
		*self = self.div_rem_nonzero(rhs).1;
	}

	fn bitand_assign_internal(&mut self, rhs: &Self) {
		self.bitwise_in_place(rhs, |a, b| a & b);
	}

	fn bitor_assign_internal(&mut self, rhs: &Self) {
		self.bitwise_in_place(rhs, |a, b| a | b);
	}

	fn bitxor_assign_internal(&mut self, rhs: &Self) {
		self.bitwise_in_place(rhs, |a, b| a ^ b);
	}

	/// Prefix increment: adds one in place.
	pub fn inc(&mut self) -> &mut Self {
		self.add_assign_internal(&Self::from(1));
		self
	}

	/// Prefix decrement: subtracts one in place.
	pub fn dec(&mut self) -> &mut Self {
		self.sub_assign_internal(&Self::from(1));
		self
	}

	/// Postfix increment: adds one in place and returns the previous value.
	pub fn post_inc(&mut self) -> Self {
		let previous = self.clone();
		self.inc();
		previous
	}

	/// Postfix decrement: subtracts one in place and returns the previous value.
	pub fn post_dec(&mut self) -> Self {
		let previous = self.clone();
		self.dec();
		previous
	}
}

macro_rules! impl_binary_op {
	($op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $internal:ident) => {
		impl $op_assign<&BigInt> for BigInt {
			fn $method_assign(&mut self, rhs: &BigInt) {
				self.$internal(rhs);
			}
		}

		impl $op_assign for BigInt {
			fn $method_assign(&mut self, rhs: BigInt) {
				self.$internal(&rhs);
			}
		}

		impl $op<&BigInt> for BigInt {
			type Output = BigInt;

			fn $method(mut self, rhs: &BigInt) -> BigInt {
				self.$internal(rhs);
				self
			}
		}

		impl $op for BigInt {
			type Output = BigInt;

			fn $method(mut self, rhs: BigInt) -> BigInt {
				self.$internal(&rhs);
				self
			}
		}

		impl $op<&BigInt> for &BigInt {
			type Output = BigInt;

			fn $method(self, rhs: &BigInt) -> BigInt {
				let mut res = self.clone();
				res.$internal(rhs);
				res
			}
		}

		impl $op<BigInt> for &BigInt {
			type Output = BigInt;

			fn $method(self, rhs: BigInt) -> BigInt {
				let mut res = self.clone();
				res.$internal(&rhs);
				res
			}
		}
	};
}

impl_binary_op!(Add, add, AddAssign, add_assign, add_assign_internal);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, sub_assign_internal);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, mul_assign_internal);
impl_binary_op!(Div, div, DivAssign, div_assign, div_assign_internal);
impl_binary_op!(Rem, rem, RemAssign, rem_assign, rem_assign_internal);
impl_binary_op!(BitAnd, bitand, BitAndAssign, bitand_assign, bitand_assign_internal);
impl_binary_op!(BitOr, bitor, BitOrAssign, bitor_assign, bitor_assign_internal);
impl_binary_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, bitxor_assign_internal);

macro_rules! impl_shift_op {
	($amount:ty, $to_bits:path) => {
		impl ShlAssign<$amount> for BigInt {
			fn shl_assign(&mut self, rhs: $amount) {
				self.shl_in_place($to_bits(rhs));
			}
		}

		impl ShrAssign<$amount> for BigInt {
			fn shr_assign(&mut self, rhs: $amount) {
				self.shr_in_place($to_bits(rhs));
			}
		}

		impl Shl<$amount> for BigInt {
			type Output = BigInt;

			fn shl(mut self, rhs: $amount) -> BigInt {
				self <<= rhs;
				self
			}
		}

		impl Shr<$amount> for BigInt {
			type Output = BigInt;

			fn shr(mut self, rhs: $amount) -> BigInt {
				self >>= rhs;
				self
			}
		}

		impl Shl<$amount> for &BigInt {
			type Output = BigInt;

			fn shl(self, rhs: $amount) -> BigInt {
				self.clone() << rhs
			}
		}

		impl Shr<$amount> for &BigInt {
			type Output = BigInt;

			fn shr(self, rhs: $amount) -> BigInt {
				self.clone() >> rhs
			}
		}
	};
}

#[allow(clippy::as_conversions)]
fn u32_to_bits(n: u32) -> usize {
	n as usize
}

impl_shift_op!(u32, u32_to_bits);
impl_shift_op!(usize, std::convert::identity);

impl Neg for BigInt {
	type Output = BigInt;

	fn neg(mut self) -> BigInt {
		self.negate_in_place();
		self
	}
}

impl Neg for &BigInt {
	type Output = BigInt;

	fn neg(self) -> BigInt {
		-self.clone()
	}
}

/// Bitwise complement, `!a == -a - 1`.
impl Not for BigInt {
	type Output = BigInt;

	fn not(mut self) -> BigInt {
		self.invert_in_place();
		self
	}
}

impl Not for &BigInt {
	type Output = BigInt;

	fn not(self) -> BigInt {
		!self.clone()
	}
}

#[cfg(test)]
mod tests {
	use crate::num::BigInt;

	fn big(s: &str) -> BigInt {
		s.parse().unwrap()
	}

	#[test]
	fn test_addition() {
		assert_eq!(BigInt::from(2) + BigInt::from(2), BigInt::from(4));
		assert_eq!(BigInt::from(-5) + &BigInt::from(3), BigInt::from(-2));
		assert_eq!(
			big("340282366920938463463374607431768211456") + BigInt::from(1),
			big("340282366920938463463374607431768211457")
		);
		assert_eq!(
			BigInt::from(i32::MAX) + BigInt::from(1),
			big("2147483648")
		);
		assert_eq!(
			BigInt::from(u64::MAX) + BigInt::from(1),
			big("18446744073709551616")
		);
	}

	#[test]
	fn test_sub() {
		assert_eq!(BigInt::from(5) - BigInt::from(3), BigInt::from(2));
		assert_eq!(BigInt::from(3) - BigInt::from(5), BigInt::from(-2));
		assert_eq!(BigInt::from(i32::MIN) - BigInt::from(1), big("-2147483649"));
		let a = big("-98765432109876543210987654321");
		let b = big("12345678901234567890");
		assert_eq!(&(&a + &b) - &b, a);
	}

	#[test]
	fn test_compound_assignment() {
		let mut n = BigInt::from(10);
		n += BigInt::from(5);
		n -= &BigInt::from(3);
		n *= BigInt::from(-4);
		assert_eq!(n, BigInt::from(-48));
		n /= BigInt::from(5);
		assert_eq!(n, BigInt::from(-9));
		n %= BigInt::from(4);
		assert_eq!(n, BigInt::from(-1));
		n <<= 40_u32;
		n >>= 38_usize;
		assert_eq!(n, BigInt::from(-4));
		n &= BigInt::from(0xff);
		assert_eq!(n, BigInt::from(0xfc));
		n |= BigInt::from(1);
		n ^= BigInt::from(0x0f);
		assert_eq!(n, BigInt::from(0xf2));
	}

	#[test]
	fn test_division_example() {
		assert_eq!(BigInt::from(-7) / BigInt::from(2), BigInt::from(-3));
		assert_eq!(BigInt::from(-7) % BigInt::from(2), BigInt::from(-1));
		assert_eq!(BigInt::from(2) * BigInt::from(-3), BigInt::from(-6));
	}

	#[test]
	#[should_panic(expected = "attempt to divide by zero")]
	fn test_div_operator_by_zero_panics() {
		let _ = BigInt::from(1) / BigInt::zero();
	}

	#[test]
	#[should_panic(expected = "divisor of zero")]
	fn test_rem_operator_by_zero_panics() {
		let _ = BigInt::from(1) % BigInt::zero();
	}

	#[test]
	fn test_bitwise_sign_extension() {
		// -1 is all ones at every width
		let wide = big("123456789012345678901234567890");
		assert_eq!(&wide & &BigInt::from(-1), wide);
		assert_eq!(&wide | &BigInt::from(-1), BigInt::from(-1));
		assert_eq!(&wide ^ &BigInt::from(-1), !&wide);
		assert_eq!(BigInt::from(-8) & BigInt::from(12), BigInt::from(8));
		assert_eq!(BigInt::from(-8) | BigInt::from(3), BigInt::from(-5));
	}

	#[test]
	fn test_not_and_neg() {
		for n in [0_i64, 1, -1, 42, i64::MIN, i64::MAX] {
			let a = BigInt::from(n);
			assert_eq!(!&a, -&a - BigInt::from(1));
			assert_eq!(&a + &!&a, BigInt::from(-1));
		}
		assert_eq!(-BigInt::from(i64::MIN), big("9223372036854775808"));
	}

	#[test]
	fn test_shift_operators() {
		let one = BigInt::from(1);
		let shifted = &one << 32_u32;
		assert_eq!(shifted.words(), &[0, 1]);
		assert_eq!(&shifted >> 32_u32, one);
		assert_eq!(BigInt::from(-1) >> 5_u32, BigInt::from(-1));
		assert_eq!(BigInt::from(5) << 0_u32, BigInt::from(5));
		assert_eq!(BigInt::from(0x8000_0000_u32) >> 31_u32, BigInt::from(1));
	}

	#[test]
	fn test_inc_dec() {
		let mut n = BigInt::from(-1);
		assert_eq!(*n.inc(), BigInt::zero());
		assert_eq!(n.post_inc(), BigInt::zero());
		assert_eq!(n, BigInt::from(1));
		assert_eq!(n.post_dec(), BigInt::from(1));
		n.dec().dec();
		assert_eq!(n, BigInt::from(-2));
		let mut m = BigInt::from(u32::MAX);
		m.inc();
		assert_eq!(m.words(), &[0, 1]);
	}
}
