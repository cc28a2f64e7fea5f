use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::BigInt;

/// Extended Euclidean algorithm, Knuth Vol. 2, Section 4.5.2.
///
/// Returns `(g, x)` with `g = gcd(a, b)` and `x` the Bézout coefficient of
/// `a`, i.e. `a*x ≡ g (mod b)`. For non-negative inputs `g` is non-negative;
/// the companion coefficient of `b` is `(g - a*x) / b` when `b != 0`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
    let mut u1 = BigInt::one();
    let mut u3 = a.clone();
    let mut v1 = BigInt::zero();
    let mut v3 = b.clone();

    while !v3.is_zero() {
        let (q, r) = u3.div_rem(&v3);

        let tn = &u1 - &(&v1 * &q);
        u1 = v1;
        v1 = tn;

        u3 = v3;
        v3 = r;
    }

    (u3, u1)
}

/// Plain Euclid by repeated remainder; always non-negative.
pub(crate) fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut u = a.abs();
    let mut v = b.abs();
    while !v.is_zero() {
        let r = &u % &v;
        u = v;
        v = r;
    }
    u
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    use crate::bigrand::RandBigInt;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn test_extended_gcd_example() {
        let a = BigInt::from(240u32);
        let b = BigInt::from(46u32);
        let (g, x) = extended_gcd(&a, &b);

        assert_eq!(g, BigInt::from(2u32));
        assert_eq!(x, BigInt::from(-9i32));
        // companion coefficient of b
        assert_eq!((&g - &(&a * &x)) / &b, BigInt::from(47u32));
    }

    #[test]
    fn test_extended_gcd_zero_operand() {
        let (g, x) = extended_gcd(&BigInt::zero(), &BigInt::from(7u32));
        assert_eq!(g, BigInt::from(7u32));
        assert_eq!(x, BigInt::zero());

        let (g, x) = extended_gcd(&BigInt::from(7u32), &BigInt::zero());
        assert_eq!(g, BigInt::from(7u32));
        assert_eq!(x, BigInt::one());
    }

    #[test]
    fn test_extended_gcd_large() {
        let a = BigInt::from_str(
            "98920366548084643601728869055592650835572950932266967461790948584315647051443",
        )
        .unwrap();
        let b = BigInt::from_str(
            "22059940471369027483332068679400581064239780177629666810348940098015901108344",
        )
        .unwrap();

        let (g, x) = extended_gcd(&a, &b);
        assert_eq!(g, BigInt::one());
        let y = (&g - &(&a * &x)) / &b;
        assert_eq!(&(&a * &x) + &(&b * &y), g);
    }

    #[test]
    fn test_extended_gcd_assumptions() {
        let mut rng = XorShiftRng::from_seed([1u8; 16]);

        for i in 1usize..60 {
            for j in &[1usize, 31, 64, 129] {
                let a = rng.gen_bigint((i * j) as u64);
                let b = rng.gen_bigint((i * j) as u64);
                let (g, x) = extended_gcd(&a, &b);

                if b.is_zero() {
                    assert_eq!(g, a);
                    continue;
                }
                let y = (&g - &(&a * &x)) / &b;
                assert_eq!(g, &(&a * &x) + &(&b * &y), "{} {} {}", a, b, g);
                assert_eq!(g, gcd(&a, &b));
            }
        }
    }

    #[test]
    fn test_gcd_plain() {
        let cases = [
            ["0", "0", "0"],
            ["7", "0", "7"],
            ["0", "7", "7"],
            ["-7", "35", "7"],
            ["64515", "24310", "935"],
            [
                "64515000000000000000",
                "24310000000000000000",
                "935000000000000000",
            ],
        ];
        for case in &cases {
            let a = BigInt::from_str(case[0]).unwrap();
            let b = BigInt::from_str(case[1]).unwrap();
            let g = BigInt::from_str(case[2]).unwrap();
            assert_eq!(gcd(&a, &b), g);
        }
    }
}
