//! The signed arbitrary-precision integer type.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};
use std::borrow::Cow;
use std::sync::OnceLock;

use num_integer::Integer;
use num_traits::{FromPrimitive, Num, One, Signed, ToPrimitive, Zero};
use rand::Rng;

use crate::algorithms::{
    add2, bit_len, cmp_slice, div_rem_in_place, mod_inverse, mont_quote, monty_modpow, mul3,
    rem_digit, rem_in_place, shift_left, sqr, sub2,
};
use crate::big_digit::{self, BigDigit};
use crate::prime;
use crate::ParseBigIntError;

#[cfg(feature = "zeroize")]
mod zeroize;

/// The sign of a [`BigInt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Minus,
    NoSign,
    Plus,
}

impl Neg for Sign {
    type Output = Sign;

    #[inline]
    fn neg(self) -> Sign {
        match self {
            Sign::Minus => Sign::Plus,
            Sign::NoSign => Sign::NoSign,
            Sign::Plus => Sign::Minus,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;

    #[inline]
    fn mul(self, other: Sign) -> Sign {
        match (self, other) {
            (Sign::NoSign, _) | (_, Sign::NoSign) => Sign::NoSign,
            (Sign::Plus, Sign::Plus) | (Sign::Minus, Sign::Minus) => Sign::Plus,
            _ => Sign::Minus,
        }
    }
}

/// An immutable arbitrary-precision signed integer.
///
/// The value is a sign plus a magnitude of 32-bit words, most significant
/// first, in canonical form: no leading zero word, and an empty magnitude
/// exactly when the sign is [`Sign::NoSign`]. Every operation returns a
/// fresh canonical value; nothing mutates its operands.
///
/// Three derived facts are memoized on first use — the two's-complement bit
/// length, the population count, and the Montgomery quotient when the value
/// serves as an odd modulus. The cells hold pure functions of the value, so
/// concurrent first computations are redundant but harmless, and the type
/// stays freely shareable across threads.
pub struct BigInt {
    sign: Sign,
    data: Vec<BigDigit>,
    bit_len: OnceLock<u64>,
    bit_count: OnceLock<u64>,
    m_quote: OnceLock<BigDigit>,
}

impl BigInt {
    #[inline]
    fn raw(sign: Sign, data: Vec<BigDigit>) -> BigInt {
        debug_assert!((sign == Sign::NoSign) == data.is_empty());
        debug_assert!(data.first() != Some(&0));
        BigInt {
            sign,
            data,
            bit_len: OnceLock::new(),
            bit_count: OnceLock::new(),
            m_quote: OnceLock::new(),
        }
    }

    /// The canonicalizing constructor every operation funnels through:
    /// strips leading zero words and maps an empty magnitude to zero.
    pub(crate) fn from_digits(sign: Sign, mut data: Vec<BigDigit>) -> BigInt {
        match data.iter().position(|&w| w != 0) {
            None => BigInt::zero(),
            Some(0) => BigInt::raw(sign, data),
            Some(i) => {
                data.drain(..i);
                BigInt::raw(sign, data)
            }
        }
    }

    #[inline]
    pub(crate) fn digits(&self) -> &[BigDigit] {
        &self.data
    }

    /// The sign of this value.
    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Two's-complement bit length: zero for 0, and one less than the
    /// magnitude's bit length for a negative power of two, whose boundary
    /// bit the sign extension makes implicit.
    pub fn bits(&self) -> u64 {
        *self.bit_len.get_or_init(|| {
            if self.sign == Sign::NoSign {
                return 0;
            }
            let mut n = 32 * (self.data.len() as u64 - 1) + u64::from(bit_len(self.data[0]));
            if self.sign == Sign::Minus
                && self.data[0].is_power_of_two()
                && self.data[1..].iter().all(|&w| w == 0)
            {
                n -= 1;
            }
            n
        })
    }

    /// Population count of the conceptual two's-complement bit pattern;
    /// negative values count the ones of their complement.
    pub fn count_ones(&self) -> u64 {
        *self.bit_count.get_or_init(|| {
            if self.sign == Sign::Minus {
                (!self).count_ones()
            } else {
                self.data.iter().map(|w| u64::from(w.count_ones())).sum()
            }
        })
    }

    /// Index of the lowest set bit, or `None` for zero.
    pub fn trailing_zeros(&self) -> Option<u64> {
        if self.is_zero() {
            return None;
        }
        let mut zeros = 0u64;
        for &w in self.data.iter().rev() {
            if w == 0 {
                zeros += 32;
            } else {
                zeros += u64::from(w.trailing_zeros());
                break;
            }
        }
        Some(zeros)
    }

    /// Whether the value is a positive power of two, answered from the
    /// cached population count.
    #[inline]
    pub(crate) fn quick_pow2_check(&self) -> bool {
        self.sign == Sign::Plus && self.count_ones() == 1
    }

    /// Montgomery quotient `-m⁻¹ mod 2³²` of this value as a modulus;
    /// meaningful only for odd positive values.
    pub(crate) fn mont_quote(&self) -> BigDigit {
        debug_assert!(self.sign == Sign::Plus && self.is_odd());
        *self
            .m_quote
            .get_or_init(|| mont_quote(self.data[self.data.len() - 1]))
    }

    /// Bit `n` of the infinite-precision two's-complement representation.
    pub fn test_bit(&self, n: u64) -> bool {
        if self.sign == Sign::Minus {
            return !(!self).test_bit(n);
        }
        let word = (n / 32) as usize;
        if word >= self.data.len() {
            return false;
        }
        let w = self.data[self.data.len() - 1 - word];
        (w >> (n % 32)) & 1 == 1
    }

    /// A copy of this value with bit `n` set.
    pub fn set_bit(&self, n: u64) -> BigInt {
        if self.test_bit(n) {
            return self.clone();
        }
        if self.sign == Sign::Plus && n + 1 < self.bits() {
            return self.flip_existing_bit(n);
        }
        self | &(&BigInt::one() << n as usize)
    }

    /// A copy of this value with bit `n` cleared.
    pub fn clear_bit(&self, n: u64) -> BigInt {
        if !self.test_bit(n) {
            return self.clone();
        }
        if self.sign == Sign::Plus && n + 1 < self.bits() {
            return self.flip_existing_bit(n);
        }
        self.and_not(&(&BigInt::one() << n as usize))
    }

    /// A copy of this value with bit `n` inverted.
    pub fn flip_bit(&self, n: u64) -> BigInt {
        if self.sign == Sign::Plus && n + 1 < self.bits() {
            return self.flip_existing_bit(n);
        }
        self ^ &(&BigInt::one() << n as usize)
    }

    // Positive receiver, bit strictly inside the magnitude: flip directly
    // on a cloned word array instead of routing through the boolean kernels.
    fn flip_existing_bit(&self, n: u64) -> BigInt {
        debug_assert!(self.sign == Sign::Plus && n + 1 < self.bits());
        let mut data = self.data.clone();
        let len = data.len();
        data[len - 1 - (n >> 5) as usize] ^= 1 << (n & 31);
        BigInt::from_digits(self.sign, data)
    }

    /// `self & !other`.
    pub fn and_not(&self, other: &BigInt) -> BigInt {
        self & &!other
    }

    /// Low `n` bits of the magnitude, as a (possibly non-canonical) word
    /// array.
    fn last_n_bits(&self, n: u64) -> Vec<BigDigit> {
        if n == 0 {
            return Vec::new();
        }
        if self.bits() <= n {
            return self.data.clone();
        }
        let num_words = n.div_ceil(32) as usize;
        let mut result = self.data[self.data.len() - num_words..].to_vec();
        let hi_bits = (n % 32) as u32;
        if hi_bits != 0 {
            result[0] &= (1 << hi_bits) - 1;
        }
        result
    }

    // Magnitude addition with matching signs. The result buffer grows by a
    // word only when the leading words show an overflow is structurally
    // possible.
    fn add_to_magnitude(&self, mag_to_add: &[BigDigit]) -> BigInt {
        let (big, small) = if self.data.len() < mag_to_add.len() {
            (mag_to_add, &self.data[..])
        } else {
            (&self.data[..], mag_to_add)
        };

        let mut limit = BigDigit::MAX;
        if big.len() == small.len() {
            limit -= small[0];
        }
        let possible_overflow = big[0] >= limit;

        let mut big_copy;
        if possible_overflow {
            big_copy = vec![0; big.len() + 1];
            big_copy[1..].copy_from_slice(big);
        } else {
            big_copy = big.to_vec();
        }

        add2(&mut big_copy, small);
        BigInt::from_digits(self.sign, big_copy)
    }

    /// `self^exp` by square-and-multiply.
    pub fn pow(&self, exp: u32) -> BigInt {
        if exp == 0 {
            return BigInt::one();
        }
        if self.is_zero() || self.is_one() {
            return self.clone();
        }

        let mut y = BigInt::one();
        let mut z = self.clone();
        let mut e = exp;
        loop {
            if e & 1 == 1 {
                y = &y * &z;
            }
            e >>= 1;
            if e == 0 {
                break;
            }
            z = &z * &z;
        }
        y
    }

    /// `self^exponent mod modulus`.
    ///
    /// `modulus == 1` yields 0 and a zero exponent yields 1. A negative
    /// exponent raises to the positive power and then inverts modulo
    /// `modulus`. Odd moduli run on Montgomery multiplication; even moduli
    /// take the plain multiply-then-reduce path.
    ///
    /// # Panics
    ///
    /// Panics when `modulus` is not positive, or when the exponent is
    /// negative and the base is not invertible modulo `modulus`.
    pub fn modpow(&self, exponent: &BigInt, modulus: &BigInt) -> BigInt {
        assert!(modulus.sign == Sign::Plus, "modulus must be positive");

        if modulus.is_one() {
            return BigInt::zero();
        }
        if exponent.is_zero() {
            return BigInt::one();
        }
        if self.is_zero() {
            return BigInt::zero();
        }

        let result = monty_modpow(self, exponent, modulus);

        if exponent.sign == Sign::Plus {
            result
        } else {
            mod_inverse(Cow::Owned(result), Cow::Borrowed(modulus))
                .expect("base is not invertible modulo the modulus")
        }
    }

    /// Whether this value is probably prime, with false-positive probability
    /// at most `2^-certainty`; a certainty of zero or less asks for no
    /// verification and is vacuously true. Miller-Rabin witnesses are drawn
    /// from `rng`.
    pub fn is_probable_prime<R: Rng + ?Sized>(&self, certainty: i32, rng: &mut R) -> bool {
        prime::probably_prime(self, certainty, rng)
    }

    /// The first probable prime greater than this non-negative value.
    pub fn next_probable_prime<R: Rng + ?Sized>(&self, rng: &mut R) -> BigInt {
        prime::next_probable_prime(self, rng)
    }
}

impl Clone for BigInt {
    fn clone(&self) -> Self {
        let out = BigInt {
            sign: self.sign,
            data: self.data.clone(),
            bit_len: OnceLock::new(),
            bit_count: OnceLock::new(),
            m_quote: OnceLock::new(),
        };
        if let Some(&v) = self.bit_len.get() {
            let _ = out.bit_len.set(v);
        }
        if let Some(&v) = self.bit_count.get() {
            let _ = out.bit_count.set(v);
        }
        if let Some(&v) = self.m_quote.get() {
            let _ = out.m_quote.set(v);
        }
        out
    }
}

impl PartialEq for BigInt {
    #[inline]
    fn eq(&self, other: &BigInt) -> bool {
        self.sign == other.sign && self.data == other.data
    }
}

impl Eq for BigInt {}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sign.hash(state);
        self.data.hash(state);
    }
}

impl PartialOrd for BigInt {
    #[inline]
    fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &BigInt) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => {
                let m = cmp_slice(&self.data, &other.data);
                if self.sign == Sign::Minus {
                    m.reverse()
                } else {
                    m
                }
            }
            ord => ord,
        }
    }
}

impl Default for BigInt {
    #[inline]
    fn default() -> BigInt {
        BigInt::zero()
    }
}

impl Zero for BigInt {
    #[inline]
    fn zero() -> BigInt {
        BigInt::raw(Sign::NoSign, Vec::new())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.sign == Sign::NoSign
    }
}

impl One for BigInt {
    #[inline]
    fn one() -> BigInt {
        BigInt::raw(Sign::Plus, vec![1])
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.sign == Sign::Plus && self.data == [1]
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(self) -> BigInt {
        if self.is_zero() {
            self
        } else {
            BigInt::raw(-self.sign, self.data)
        }
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(self) -> BigInt {
        if self.is_zero() {
            BigInt::zero()
        } else {
            BigInt::raw(-self.sign, self.data.clone())
        }
    }
}

impl Not for BigInt {
    type Output = BigInt;

    #[inline]
    fn not(self) -> BigInt {
        !&self
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    /// `!x = -(x + 1)` in two's complement.
    fn not(self) -> BigInt {
        -(self + &BigInt::one())
    }
}

macro_rules! forward_binop {
    (impl $imp:ident, $method:ident) => {
        impl $imp<BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, other: BigInt) -> BigInt {
                $imp::$method(&self, &other)
            }
        }

        impl $imp<&BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, other: &BigInt) -> BigInt {
                $imp::$method(&self, other)
            }
        }

        impl $imp<BigInt> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, other: BigInt) -> BigInt {
                $imp::$method(self, &other)
            }
        }
    };
}

forward_binop!(impl Add, add);
forward_binop!(impl Sub, sub);
forward_binop!(impl Mul, mul);
forward_binop!(impl Div, div);
forward_binop!(impl Rem, rem);
forward_binop!(impl BitAnd, bitand);
forward_binop!(impl BitOr, bitor);
forward_binop!(impl BitXor, bitxor);

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;

    fn add(self, other: &BigInt) -> BigInt {
        if self.sign == Sign::NoSign {
            return other.clone();
        }
        if self.sign != other.sign {
            if other.sign == Sign::NoSign {
                return self.clone();
            }
            if other.sign == Sign::Minus {
                return self - &-other;
            }
            return other - &-self;
        }
        self.add_to_magnitude(&other.data)
    }
}

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;

    fn sub(self, other: &BigInt) -> BigInt {
        if other.is_zero() {
            return self.clone();
        }
        if self.is_zero() {
            return -other;
        }
        if self.sign != other.sign {
            return self + &-other;
        }

        let compare = cmp_slice(&self.data, &other.data);
        if compare == Ordering::Equal {
            return BigInt::zero();
        }

        let (bigun, lilun) = if compare == Ordering::Less {
            (other, self)
        } else {
            (self, other)
        };

        let mut res = bigun.data.clone();
        sub2(&mut res, &lilun.data);

        let sign = if compare == Ordering::Less {
            -self.sign
        } else {
            self.sign
        };
        BigInt::from_digits(sign, res)
    }
}

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mul(self, other: &BigInt) -> BigInt {
        if self.sign == Sign::NoSign || other.sign == Sign::NoSign {
            return BigInt::zero();
        }

        // A single set bit degrades multiplication to a shift.
        if other.quick_pow2_check() {
            return self << (other.bits() - 1) as usize;
        }
        if self.quick_pow2_check() {
            return other << (self.bits() - 1) as usize;
        }

        let res_len = ((self.bits() + other.bits()) / 32 + 1) as usize;
        let mut res = vec![0; res_len];

        if core::ptr::eq(self, other) {
            sqr(&mut res, &self.data);
        } else {
            mul3(&mut res, &self.data, &other.data);
        }

        BigInt::from_digits(self.sign * other.sign, res)
    }
}

impl Div<&BigInt> for &BigInt {
    type Output = BigInt;

    fn div(self, other: &BigInt) -> BigInt {
        assert!(!other.is_zero(), "attempt to divide by zero");

        if self.is_zero() {
            return BigInt::zero();
        }

        if other.quick_pow2_check() {
            let result = self.abs() >> (other.bits() - 1) as usize;
            return if other.sign == self.sign { result } else { -result };
        }

        let mut mag = self.data.clone();
        let quotient = div_rem_in_place(&mut mag, &other.data);
        BigInt::from_digits(self.sign * other.sign, quotient)
    }
}

impl Rem<&BigInt> for &BigInt {
    type Output = BigInt;

    fn rem(self, other: &BigInt) -> BigInt {
        assert!(!other.is_zero(), "attempt to divide by zero");

        if self.is_zero() {
            return BigInt::zero();
        }

        // Single-word divisors reduce in one linear pass.
        if other.data.len() == 1 {
            let d = other.data[0];
            if d == 1 {
                return BigInt::zero();
            }
            let r = rem_digit(&self.data, d);
            return if r == 0 {
                BigInt::zero()
            } else {
                BigInt::raw(self.sign, vec![r])
            };
        }

        if cmp_slice(&self.data, &other.data) == Ordering::Less {
            return self.clone();
        }

        let mag = if other.quick_pow2_check() {
            self.last_n_bits(other.bits() - 1)
        } else {
            let mut x = self.data.clone();
            rem_in_place(&mut x, &other.data);
            x
        };

        BigInt::from_digits(self.sign, mag)
    }
}

impl BitAnd<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitand(self, other: &BigInt) -> BigInt {
        if self.is_zero() || other.is_zero() {
            return BigInt::zero();
        }
        bitwise(self, other, BitwiseOp::And)
    }
}

impl BitOr<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitor(self, other: &BigInt) -> BigInt {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        bitwise(self, other, BitwiseOp::Or)
    }
}

impl BitXor<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitxor(self, other: &BigInt) -> BigInt {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        bitwise(self, other, BitwiseOp::Xor)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum BitwiseOp {
    And,
    Or,
    Xor,
}

// Limb-wise boolean combination over one's-complement views: a negative
// operand is re-expressed as the complement of `|x| - 1`, the words are
// combined, and a negative result is complemented back at the end.
fn bitwise(a: &BigInt, b: &BigInt, op: BitwiseOp) -> BigInt {
    let one = BigInt::one();
    let a_neg = a.sign == Sign::Minus;
    let b_neg = b.sign == Sign::Minus;

    let a_mag: Cow<'_, [BigDigit]> = if a_neg {
        Cow::Owned((a + &one).data)
    } else {
        Cow::Borrowed(&a.data)
    };
    let b_mag: Cow<'_, [BigDigit]> = if b_neg {
        Cow::Owned((b + &one).data)
    } else {
        Cow::Borrowed(&b.data)
    };

    let result_neg = match op {
        BitwiseOp::And => a_neg && b_neg,
        BitwiseOp::Or => a_neg || b_neg,
        BitwiseOp::Xor => a_neg != b_neg,
    };

    let result_len = a_mag.len().max(b_mag.len());
    let a_start = result_len - a_mag.len();
    let b_start = result_len - b_mag.len();
    let mut result_mag = vec![0; result_len];

    for (i, w) in result_mag.iter_mut().enumerate() {
        let mut a_word = if i >= a_start { a_mag[i - a_start] } else { 0 };
        let mut b_word = if i >= b_start { b_mag[i - b_start] } else { 0 };

        if a_neg {
            a_word = !a_word;
        }
        if b_neg {
            b_word = !b_word;
        }

        *w = match op {
            BitwiseOp::And => a_word & b_word,
            BitwiseOp::Or => a_word | b_word,
            BitwiseOp::Xor => a_word ^ b_word,
        };

        if result_neg {
            *w = !*w;
        }
    }

    let result = BigInt::from_digits(Sign::Plus, result_mag);
    if result_neg { !&result } else { result }
}

impl Shl<usize> for &BigInt {
    type Output = BigInt;

    fn shl(self, n: usize) -> BigInt {
        if self.is_zero() {
            return BigInt::zero();
        }
        if n == 0 {
            return self.clone();
        }

        let result = BigInt::raw(self.sign, shift_left(&self.data, n));

        // Both caches survive a left shift cheaply.
        if let Some(&b) = self.bit_len.get() {
            let _ = result.bit_len.set(b + n as u64);
        }
        if let Some(&c) = self.bit_count.get() {
            let _ = result.bit_count.set(if self.sign == Sign::Plus {
                c
            } else {
                c + n as u64
            });
        }

        result
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;

    #[inline]
    fn shl(self, n: usize) -> BigInt {
        &self << n
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    fn shr(self, n: usize) -> BigInt {
        if n == 0 {
            return self.clone();
        }
        if n as u64 >= self.bits() {
            return if self.sign == Sign::Minus {
                -BigInt::one()
            } else {
                BigInt::zero()
            };
        }

        let result_len = ((self.bits() - n as u64 + 31) >> 5) as usize;
        let mut res = vec![0; result_len];

        let num_ints = n >> 5;
        let num_bits = n & 31;

        if num_bits == 0 {
            res.copy_from_slice(&self.data[..result_len]);
        } else {
            let num_bits2 = 32 - num_bits;
            let mut mag_pos = self.data.len() as isize - 1 - num_ints as isize;
            for i in (0..result_len).rev() {
                res[i] = self.data[mag_pos as usize] >> num_bits;
                mag_pos -= 1;
                if mag_pos >= 0 {
                    res[i] |= self.data[mag_pos as usize] << num_bits2;
                }
            }
        }

        BigInt::from_digits(self.sign, res)
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;

    #[inline]
    fn shr(self, n: usize) -> BigInt {
        &self >> n
    }
}

impl Num for BigInt {
    type FromStrRadixErr = ParseBigIntError;

    #[inline]
    fn from_str_radix(s: &str, radix: u32) -> Result<BigInt, ParseBigIntError> {
        BigInt::from_str_radix(s, radix)
    }
}

impl Signed for BigInt {
    #[inline]
    fn abs(&self) -> BigInt {
        match self.sign {
            Sign::Minus => -self,
            _ => self.clone(),
        }
    }

    fn abs_sub(&self, other: &BigInt) -> BigInt {
        if self <= other {
            BigInt::zero()
        } else {
            self - other
        }
    }

    fn signum(&self) -> BigInt {
        match self.sign {
            Sign::Minus => -BigInt::one(),
            Sign::NoSign => BigInt::zero(),
            Sign::Plus => BigInt::one(),
        }
    }

    #[inline]
    fn is_positive(&self) -> bool {
        self.sign == Sign::Plus
    }

    #[inline]
    fn is_negative(&self) -> bool {
        self.sign == Sign::Minus
    }
}

impl Integer for BigInt {
    fn div_rem(&self, other: &BigInt) -> (BigInt, BigInt) {
        assert!(!other.is_zero(), "attempt to divide by zero");

        if self.is_zero() {
            return (BigInt::zero(), BigInt::zero());
        }

        if other.quick_pow2_check() {
            let e = other.bits() - 1;
            let quotient = self.abs() >> e as usize;
            let rem_mag = self.last_n_bits(e);
            let quotient = if other.sign == self.sign {
                quotient
            } else {
                -quotient
            };
            return (quotient, BigInt::from_digits(self.sign, rem_mag));
        }

        let mut rem_mag = self.data.clone();
        let quotient = div_rem_in_place(&mut rem_mag, &other.data);
        (
            BigInt::from_digits(self.sign * other.sign, quotient),
            BigInt::from_digits(self.sign, rem_mag),
        )
    }

    fn div_floor(&self, other: &BigInt) -> BigInt {
        let (q, r) = self.div_rem(other);
        if r.is_zero() || r.sign == other.sign {
            q
        } else {
            q - BigInt::one()
        }
    }

    fn mod_floor(&self, other: &BigInt) -> BigInt {
        let r = self % other;
        if r.is_zero() || r.sign == other.sign {
            r
        } else {
            r + other
        }
    }

    fn gcd(&self, other: &BigInt) -> BigInt {
        crate::algorithms::gcd(self, other)
    }

    fn lcm(&self, other: &BigInt) -> BigInt {
        if self.is_zero() || other.is_zero() {
            return BigInt::zero();
        }
        (self / &self.gcd(other) * other).abs()
    }

    #[inline]
    fn is_multiple_of(&self, other: &BigInt) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        (self % other).is_zero()
    }

    #[inline]
    fn is_even(&self) -> bool {
        match self.data.last() {
            Some(w) => w & 1 == 0,
            None => true,
        }
    }

    #[inline]
    fn is_odd(&self) -> bool {
        !self.is_even()
    }
}

impl ToPrimitive for BigInt {
    fn to_i64(&self) -> Option<i64> {
        match self.sign {
            Sign::NoSign => Some(0),
            Sign::Plus => self.magnitude_u64().and_then(|v| i64::try_from(v).ok()),
            Sign::Minus => {
                let m = self.magnitude_u64()?;
                if m <= 1 << 63 {
                    Some((m as i64).wrapping_neg())
                } else {
                    None
                }
            }
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match self.sign {
            Sign::NoSign => Some(0),
            Sign::Plus => self.magnitude_u64(),
            Sign::Minus => None,
        }
    }
}

impl BigInt {
    fn magnitude_u64(&self) -> Option<u64> {
        match self.data.len() {
            0 => Some(0),
            1 => Some(u64::from(self.data[0])),
            2 => Some(big_digit::to_doublebigdigit(self.data[0], self.data[1])),
            _ => None,
        }
    }
}

impl FromPrimitive for BigInt {
    #[inline]
    fn from_i64(n: i64) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    #[inline]
    fn from_u64(n: u64) -> Option<BigInt> {
        Some(BigInt::from(n))
    }
}

impl From<u64> for BigInt {
    fn from(n: u64) -> BigInt {
        let (hi, lo) = big_digit::from_doublebigdigit(n);
        if hi != 0 {
            BigInt::raw(Sign::Plus, vec![hi, lo])
        } else if lo != 0 {
            BigInt::raw(Sign::Plus, vec![lo])
        } else {
            BigInt::zero()
        }
    }
}

impl From<i64> for BigInt {
    fn from(n: i64) -> BigInt {
        if n < 0 {
            -BigInt::from(n.unsigned_abs())
        } else {
            BigInt::from(n as u64)
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                #[inline]
                fn from(n: $t) -> BigInt {
                    BigInt::from(n as u64)
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                #[inline]
                fn from(n: $t) -> BigInt {
                    BigInt::from(n as i64)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, usize);
impl_from_signed!(i8, i16, i32, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_zero() {
        assert_eq!(BigInt::from_digits(Sign::Plus, vec![0, 0]), BigInt::zero());
        assert_eq!(BigInt::from(0u32), BigInt::zero());
        assert_eq!(BigInt::zero().sign(), Sign::NoSign);
    }

    #[test]
    fn test_canonical_strip() {
        let a = BigInt::from_digits(Sign::Plus, vec![0, 0, 5]);
        assert_eq!(a, BigInt::from(5u32));
        assert_eq!(a.digits(), [5]);
    }

    #[test]
    fn test_cmp_signs() {
        let neg = BigInt::from(-3i32);
        let pos = BigInt::from(2u32);
        assert!(neg < BigInt::zero());
        assert!(BigInt::zero() < pos);
        assert!(neg < pos);
        assert!(BigInt::from(-2i32) > BigInt::from(-3i32));
    }

    #[test]
    fn test_hash_equal_values() {
        use std::collections::hash_map::DefaultHasher;

        fn h(v: &BigInt) -> u64 {
            let mut hasher = DefaultHasher::new();
            v.hash(&mut hasher);
            hasher.finish()
        }

        let a = BigInt::from_digits(Sign::Plus, vec![0, 123]);
        let b = BigInt::from(123u32);
        assert_eq!(a, b);
        assert_eq!(h(&a), h(&b));
    }

    #[test]
    fn test_add_carry_growth() {
        let a = BigInt::from(u64::MAX);
        let b = &a + &BigInt::one();
        assert_eq!(b.digits(), [1, 0, 0]);
        assert_eq!(b.bits(), 65);
    }

    #[test]
    fn test_mixed_sign_arithmetic() {
        let a = BigInt::from(100i32);
        let b = BigInt::from(-42i32);
        assert_eq!(&a + &b, BigInt::from(58i32));
        assert_eq!(&b + &a, BigInt::from(58i32));
        assert_eq!(&a - &b, BigInt::from(142i32));
        assert_eq!(&b - &a, BigInt::from(-142i32));
        assert_eq!(&a * &b, BigInt::from(-4200i32));
    }

    #[test]
    fn test_pow2_mul_uses_shift() {
        let a = BigInt::from(12345u32);
        let p = BigInt::from(1u32) << 40;
        assert!(p.quick_pow2_check());
        assert_eq!(&a * &p, BigInt::from(12345u64 << 40));
    }

    #[test]
    fn test_div_rem_signs() {
        let cases: [(i64, i64); 8] = [
            (7, 3),
            (-7, 3),
            (7, -3),
            (-7, -3),
            (6, 3),
            (-6, 3),
            (0, 5),
            (12345678901234567, -987654321),
        ];
        for (a, b) in cases {
            let (q, r) = BigInt::from(a).div_rem(&BigInt::from(b));
            assert_eq!(q, BigInt::from(a / b));
            assert_eq!(r, BigInt::from(a % b));
        }
    }

    #[test]
    fn test_mod_floor_range() {
        let m = BigInt::from(7u32);
        for a in -20i32..20 {
            let r = BigInt::from(a).mod_floor(&m);
            assert!(r >= BigInt::zero() && r < m, "mod_floor({a}, 7) = {r}");
            assert_eq!(r, BigInt::from(a.rem_euclid(7)));
        }
    }

    #[test]
    fn test_shr_negative_saturates() {
        let a = BigInt::from(-5i32);
        assert_eq!(&a >> 16, -BigInt::one());
        assert_eq!(BigInt::from(5u32) >> 16, BigInt::zero());
    }

    #[test]
    fn test_not() {
        assert_eq!(!BigInt::zero(), BigInt::from(-1i32));
        assert_eq!(!BigInt::from(1u32), BigInt::from(-2i32));
        assert_eq!(!BigInt::from(-1i32), BigInt::zero());
    }

    #[test]
    fn test_bitwise_against_primitives() {
        let samples: [i64; 9] = [0, 1, -1, 7, -7, 255, -256, 0x1234_5678, -0x1234_5678];
        for &a in &samples {
            for &b in &samples {
                let ba = BigInt::from(a);
                let bb = BigInt::from(b);
                assert_eq!(&ba & &bb, BigInt::from(a & b), "{a} & {b}");
                assert_eq!(&ba | &bb, BigInt::from(a | b), "{a} | {b}");
                assert_eq!(&ba ^ &bb, BigInt::from(a ^ b), "{a} ^ {b}");
                assert_eq!(ba.and_not(&bb), BigInt::from(a & !b), "{a} &! {b}");
            }
        }
    }

    #[test]
    fn test_bits_of_negative_pow2() {
        assert_eq!(BigInt::from(-1i32).bits(), 0);
        assert_eq!(BigInt::from(-2i32).bits(), 1);
        assert_eq!(BigInt::from(-256i32).bits(), 8);
        assert_eq!(BigInt::from(-255i32).bits(), 8);
        assert_eq!(BigInt::from(255u32).bits(), 8);
    }

    #[test]
    fn test_count_ones_two_complement() {
        assert_eq!(BigInt::from(0b1011u32).count_ones(), 3);
        // -2 = ...11110, complement 1
        assert_eq!(BigInt::from(-2i32).count_ones(), 1);
        assert_eq!(BigInt::zero().count_ones(), 0);
    }

    #[test]
    fn test_to_from_primitives() {
        assert_eq!(BigInt::from(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(BigInt::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!(BigInt::from(u64::MAX).to_i64(), None);
        assert_eq!(BigInt::from(-1i32).to_u64(), None);
        assert_eq!((BigInt::from(u64::MAX) + BigInt::one()).to_u64(), None);
    }

    #[test]
    fn test_pow() {
        assert_eq!(BigInt::from(3u32).pow(0), BigInt::one());
        assert_eq!(BigInt::from(3u32).pow(5), BigInt::from(243u32));
        assert_eq!(
            BigInt::from(2u32).pow(100),
            BigInt::one() << 100
        );
        assert_eq!(BigInt::from(-2i32).pow(3), BigInt::from(-8i32));
    }

    #[test]
    fn test_lcm_gcd() {
        let a = BigInt::from(12u32);
        let b = BigInt::from(18u32);
        assert_eq!(a.gcd(&b), BigInt::from(6u32));
        assert_eq!(a.lcm(&b), BigInt::from(36u32));
        assert_eq!(BigInt::from(17u32).gcd(&BigInt::from(5u32)), BigInt::one());
    }
}
