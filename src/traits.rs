use std::borrow::Cow;

use num_traits::{Signed, Zero};

use crate::algorithms::{extended_gcd, mod_inverse};
use crate::BigInt;

/// Generic trait for modular multiplicative inverse.
///
/// Computes the [modular multiplicative inverse](https://en.wikipedia.org/wiki/Modular_multiplicative_inverse)
/// of an integer *a* modulo *m*, normalized into `[0, m)`.
///
/// Returns `None` if the inverse does not exist (i.e., `gcd(a, m) != 1`).
pub trait ModInverse<R: Sized>: Sized {
    /// The output type of the modular inverse.
    type Output: Sized;

    /// Returns the modular inverse of `self` modulo `m`, or `None` if it
    /// does not exist.
    fn mod_inverse(self, m: R) -> Option<Self::Output>;
}

/// Generic trait for the extended Euclidean algorithm.
///
/// Computes the [extended GCD](https://en.wikipedia.org/wiki/Extended_Euclidean_algorithm),
/// returning `(gcd, x, y)` such that `self * x + other * y = gcd`.
pub trait ExtendedGcd<R: Sized>: Sized {
    /// Returns `(gcd, x, y)` such that `self * x + other * y = gcd`.
    fn extended_gcd(self, other: R) -> (BigInt, BigInt, BigInt);
}

// --- ModInverse impls ---

impl ModInverse<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mod_inverse(self, m: &BigInt) -> Option<BigInt> {
        mod_inverse(Cow::Borrowed(self), Cow::Borrowed(m))
    }
}

impl ModInverse<BigInt> for &BigInt {
    type Output = BigInt;

    fn mod_inverse(self, m: BigInt) -> Option<BigInt> {
        mod_inverse(Cow::Borrowed(self), Cow::Owned(m))
    }
}

impl ModInverse<&BigInt> for BigInt {
    type Output = BigInt;

    fn mod_inverse(self, m: &BigInt) -> Option<BigInt> {
        mod_inverse(Cow::Owned(self), Cow::Borrowed(m))
    }
}

impl ModInverse<BigInt> for BigInt {
    type Output = BigInt;

    fn mod_inverse(self, m: BigInt) -> Option<BigInt> {
        mod_inverse(Cow::Owned(self), Cow::Owned(m))
    }
}

// --- ExtendedGcd impls ---

fn xgcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if b.is_zero() {
        // a * signum(a) + b * 0 = |a|
        return (a.abs(), a.signum(), BigInt::zero());
    }

    let (mut g, mut x) = extended_gcd(a, b);
    if g.is_negative() {
        g = -g;
        x = -x;
    }
    let y = (&g - &(a * &x)) / b;
    (g, x, y)
}

impl ExtendedGcd<&BigInt> for &BigInt {
    fn extended_gcd(self, other: &BigInt) -> (BigInt, BigInt, BigInt) {
        xgcd(self, other)
    }
}

impl ExtendedGcd<BigInt> for &BigInt {
    fn extended_gcd(self, other: BigInt) -> (BigInt, BigInt, BigInt) {
        xgcd(self, &other)
    }
}

impl ExtendedGcd<&BigInt> for BigInt {
    fn extended_gcd(self, other: &BigInt) -> (BigInt, BigInt, BigInt) {
        xgcd(&self, other)
    }
}

impl ExtendedGcd<BigInt> for BigInt {
    fn extended_gcd(self, other: BigInt) -> (BigInt, BigInt, BigInt) {
        xgcd(&self, &other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_inverse_trait_forms() {
        let a = BigInt::from(3u32);
        let m = BigInt::from(7u32);
        let expected = BigInt::from(5u32);

        assert_eq!((&a).mod_inverse(&m), Some(expected.clone()));
        assert_eq!((&a).mod_inverse(m.clone()), Some(expected.clone()));
        assert_eq!(a.clone().mod_inverse(&m), Some(expected.clone()));
        assert_eq!(a.mod_inverse(m), Some(expected));
    }

    #[test]
    fn test_extended_gcd_identity() {
        let cases: [(i64, i64); 6] = [(240, 46), (-240, 46), (240, -46), (0, 9), (9, 0), (7, 1)];
        for (a, b) in cases {
            let (a, b) = (BigInt::from(a), BigInt::from(b));
            let (g, x, y) = (&a).extended_gcd(&b);
            assert!(!g.is_negative());
            assert_eq!(&(&a * &x) + &(&b * &y), g, "Bezout identity for {a}, {b}");
        }
    }
}
