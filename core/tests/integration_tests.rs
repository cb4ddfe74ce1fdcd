use cowint_core::{evaluate, BigInt, Context, INLINE_WORDS};

#[track_caller]
pub fn test_evaluation(input: &str, expected: &str) {
	let mut context = Context::new();
	assert_eq!(
		evaluate(input, &mut context).unwrap().get_main_result(),
		expected.to_string()
	);
	// try parsing the output again, and make sure it matches
	assert_eq!(
		evaluate(expected, &mut context).unwrap().get_main_result(),
		expected.to_string()
	);
}

#[track_caller]
fn test_eval_simple(input: &str, expected: &str) {
	let mut context = Context::new();
	assert_eq!(
		evaluate(input, &mut context).unwrap().get_main_result(),
		expected.to_string()
	);
}

#[track_caller]
fn expect_error(input: &str) {
	let mut context = Context::new();
	assert!(evaluate(input, &mut context).is_err());
}

#[track_caller]
fn assert_err_msg(input: &str, error: &str) {
	let mut context = Context::new();
	assert_eq!(evaluate(input, &mut context), Err(error.to_string()));
}

fn big(s: &str) -> BigInt {
	s.parse().unwrap()
}

// deterministic operands of varying width and sign
fn sample_values() -> Vec<BigInt> {
	let mut values = vec![
		BigInt::zero(),
		BigInt::from(1),
		BigInt::from(-1),
		BigInt::from(i32::MAX),
		BigInt::from(i32::MIN),
		BigInt::from(u32::MAX),
		BigInt::from(u64::MAX),
		BigInt::from(i64::MIN),
		big("340282366920938463463374607431768211456"),
		big("-340282366920938463463374607431768211455"),
	];
	let mut state = 0x2545_f491_4f6c_dd1d_u64;
	for len in [1, 2, 3, 5, 8, 9, 13] {
		let mut words = vec![];
		for _ in 0..len {
			state ^= state << 13;
			state ^= state >> 7;
			state ^= state << 17;
			words.push(u32::try_from(state >> 32).unwrap());
		}
		values.push(BigInt::from_words(&words));
	}
	values
}

#[test]
fn test_basic_integers() {
	test_evaluation("2", "2");
	test_evaluation("10", "10");
	test_evaluation("39456720983475234523452345", "39456720983475234523452345");
	test_evaluation(" 10\n\r\n", "10");
	test_evaluation("1_000_000", "1000000");
	test_evaluation("-0", "0");
}

#[test]
fn test_blank_input() {
	test_evaluation("", "");
	test_evaluation("   ", "");
}

#[test]
fn test_concrete_scenarios() {
	assert_eq!(BigInt::from(2) * BigInt::from(-3), BigInt::from(-6));
	assert_eq!(
		(big("340282366920938463463374607431768211456") + BigInt::from(1)).to_string(),
		"340282366920938463463374607431768211457"
	);
	assert_eq!(BigInt::from(-7) / BigInt::from(2), BigInt::from(-3));
	assert_eq!(BigInt::from(-7) % BigInt::from(2), BigInt::from(-1));
	assert_eq!((BigInt::from(1) << 32_u32).words(), &[0, 1]);
}

#[test]
fn test_arithmetic_identities() {
	let values = sample_values();
	for a in &values {
		for b in &values {
			assert_eq!(&(a + b) - b, *a, "({a} + {b}) - {b}");
			assert_eq!(a * b, b * a, "{a} * {b}");
			if !b.is_zero() {
				let (q, r) = a.div_rem(b).unwrap();
				assert_eq!(&(&q * b) + &r, *a, "{a} / {b}");
				assert!(r.abs() < b.abs());
				assert!(r.is_zero() || r.is_negative() == a.is_negative());
			}
		}
	}
}

#[test]
fn test_twos_complement_identities() {
	for a in sample_values() {
		assert_eq!(!&a, -&a - BigInt::from(1));
		assert_eq!(&a + &!&a, BigInt::from(-1));
	}
}

#[test]
fn test_shift_round_trip() {
	for a in sample_values() {
		let a = a.abs();
		for k in [0_usize, 1, 31, 32, 33, 64, 100] {
			assert_eq!((&a << k) >> k, a, "({a} << {k}) >> {k}");
		}
	}
}

#[test]
fn test_results_stay_trimmed() {
	for a in sample_values() {
		for b in sample_values() {
			let sum = &a + &b;
			assert_eq!(BigInt::from_words(sum.words()).words(), sum.words());
			let product = &a * &b;
			assert_eq!(BigInt::from_words(product.words()).words(), product.words());
		}
	}
}

#[test]
fn test_copy_independence() {
	let small = BigInt::from(12345);
	let mut small_copy = small.clone();
	small_copy += BigInt::from(1);
	assert_eq!(small, BigInt::from(12345));
	assert_eq!(small_copy, BigInt::from(12346));

	let wide = BigInt::from(1) << 400_u32;
	assert!(wide.word_count() > INLINE_WORDS);
	let mut wide_copy = wide.clone();
	assert!(wide.word_store().is_shared());
	wide_copy.inc();
	assert!(!wide.word_store().is_shared());
	assert_eq!(&wide_copy - &wide, BigInt::from(1));
	assert_eq!(wide.bit_length(), 401);
}

#[test]
fn test_decimal_round_trip() {
	for (input, expected) in [
		("+42", "42"),
		("-000017", "-17"),
		("00000000000000000000001", "1"),
		("123456789012345678901234567890", "123456789012345678901234567890"),
		("-99999999999999999999", "-99999999999999999999"),
	] {
		assert_eq!(big(input).to_string(), expected);
	}
	for a in sample_values() {
		assert_eq!(big(&a.to_string()), a);
	}
}

#[test]
fn test_operator_precedence() {
	test_eval_simple("1 + 2 * 3", "7");
	test_eval_simple("(1 + 2) * 3", "9");
	test_eval_simple("2 ** 3 ** 2", "512");
	test_eval_simple("-2 ** 2", "-4");
	test_eval_simple("1 << 4 + 1", "32");
	test_eval_simple("6 & 3 | 8", "10");
	test_eval_simple("5 ^ 1 & 3", "4");
	test_eval_simple("~0", "-1");
	test_eval_simple("-7 / 2", "-3");
	test_eval_simple("-7 % 2", "-1");
	test_eval_simple("7 % -2", "1");
}

#[test]
fn test_large_values() {
	test_eval_simple("2 ** 128", "340282366920938463463374607431768211456");
	test_eval_simple("2 ** 128 + 1", "340282366920938463463374607431768211457");
	test_eval_simple("(2 ** 200) / (2 ** 100)", "1267650600228229401496703205376");
	test_eval_simple("(2 ** 100 + 7) % 2 ** 64", "7");
	test_eval_simple("-(1 << 70) >> 69", "-2");
	test_eval_simple(
		"factorial(30)",
		"265252859812191058636308480000000",
	);
	test_eval_simple("bits(2 ** 1000)", "1001");
}

#[test]
fn test_functions() {
	test_eval_simple("abs(-12)", "12");
	test_eval_simple("gcd(2 ** 40, 6 ** 20)", "1048576");
	test_eval_simple("sign(-(10 ** 30))", "-1");
	test_eval_simple("sign(0)", "0");
	assert_err_msg("gcd(1)", "gcd expects 2 arguments, found 1");
	assert_err_msg("abs(1, 2)", "abs expects 1 argument, found 2");
	assert_err_msg("frobnicate(1)", "unknown function 'frobnicate'");
}

#[test]
fn test_variables() {
	let mut context = Context::new();
	evaluate("x = 2 ** 64", &mut context).unwrap();
	evaluate("y = x - 1", &mut context).unwrap();
	assert_eq!(
		evaluate("y", &mut context).unwrap().get_main_result(),
		"18446744073709551615"
	);
	assert_eq!(
		evaluate("_ * 2 + 2", &mut context).unwrap().get_main_result(),
		"36893488147419103232"
	);
	assert_eq!(context.get_variable("x"), Some(&(BigInt::from(1) << 64_u32)));
	assert_err_msg("z + 1", "unknown identifier 'z'");
}

#[test]
fn test_errors() {
	assert_err_msg("1 / 0", "division by zero");
	assert_err_msg("1 % (2 - 2)", "division by zero");
	assert_err_msg("2 ** -1", "negative exponents are not supported");
	assert_err_msg("0 ** 0", "zero to the power of zero is undefined");
	assert_err_msg("1 << -1", "negative numbers are not allowed");
	assert_err_msg("1 << (1 << 40)", "shift amount too large");
	assert_err_msg("1 << 4000000000", "shift amount too large");
	assert_err_msg("factorial(-1)", "negative numbers are not allowed");
	assert_err_msg("1 $ 1", "unexpected character '$'");
	assert_err_msg("1__0", "digit separators can only occur between digits");
	expect_error("1 +");
	expect_error("1 2");
	expect_error("(1 + 2))");
	expect_error("1 = 2");
}
