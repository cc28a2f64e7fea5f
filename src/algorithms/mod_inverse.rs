use std::borrow::Cow;

use num_integer::Integer;
use num_traits::One;

use crate::bigint::Sign;
use crate::BigInt;

use super::extended_gcd;

/// Modular multiplicative inverse of `g` modulo `m`, or `None` when
/// `gcd(g, m) != 1`. The result is normalized into `[0, m)`.
///
/// # Panics
///
/// Panics when `m` is not positive.
pub fn mod_inverse(g: Cow<'_, BigInt>, m: Cow<'_, BigInt>) -> Option<BigInt> {
    assert!(m.sign() == Sign::Plus, "modulus must be positive");

    let a = g.mod_floor(&m);
    let (gcd, mut x) = extended_gcd(&a, &m);

    if !gcd.is_one() {
        return None;
    }

    if x.sign() == Sign::Minus {
        x = &x + &*m;
    }

    Some(x)
}
