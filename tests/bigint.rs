use std::str::FromStr;

use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use pgp_bignum::{BigInt, RandBigInt, Sign};

const SAMPLE_BITS: &[u64] = &[1, 7, 31, 32, 33, 64, 96, 192];

fn samples(rng: &mut XorShiftRng) -> Vec<BigInt> {
    let mut out = vec![
        BigInt::zero(),
        BigInt::one(),
        -BigInt::one(),
        BigInt::one() << 31,
        BigInt::one() << 64,
        -(BigInt::one() << 64),
    ];
    for &bits in SAMPLE_BITS {
        for _ in 0..4 {
            let v = rng.gen_bigint(bits);
            out.push(if rng.random() { -&v } else { v });
        }
    }
    out
}

#[test]
fn addition_and_multiplication_laws() {
    let mut rng = XorShiftRng::from_seed([42u8; 16]);
    let xs = samples(&mut rng);

    for a in &xs {
        for b in &xs {
            assert_eq!(a + b, b + a, "{a} + {b}");
            assert_eq!(a * b, b * a, "{a} * {b}");
            assert_eq!(&(a + b) - b, *a, "({a} + {b}) - {b}");
        }
    }

    for chunk in xs.chunks(3) {
        if let [a, b, c] = chunk {
            assert_eq!(&(a + b) + c, a + &(b + c), "associativity {a} {b} {c}");
            assert_eq!(&(a * b) * c, a * &(b * c), "associativity {a} {b} {c}");
            assert_eq!(a * &(b + c), &(a * b) + &(a * c), "distributivity");
        }
    }
}

#[test]
fn division_law() {
    let mut rng = XorShiftRng::from_seed([43u8; 16]);
    let xs = samples(&mut rng);

    for a in &xs {
        for b in &xs {
            if b.is_zero() {
                continue;
            }
            let (q, r) = a.div_rem(b);
            assert_eq!(&(&q * b) + &r, *a, "{a} = ({a}/{b})*{b} + rem");
            assert!(r.abs() < b.abs(), "|{r}| < |{b}|");
            if !r.is_zero() {
                assert_eq!(r.sign(), a.sign(), "remainder takes the dividend sign");
            }
            assert_eq!(a / b, q);
            assert_eq!(a % b, r);

            if b.is_positive() {
                let m = a.mod_floor(b);
                assert!(m >= BigInt::zero() && m < *b, "mod_floor in [0, m)");
                assert_eq!(&(a - &m) % b, BigInt::zero());
            }
        }
    }
}

#[test]
fn radix_round_trip() {
    let mut rng = XorShiftRng::from_seed([44u8; 16]);
    let xs = samples(&mut rng);

    for x in &xs {
        for radix in [2u32, 10, 16] {
            let s = x.to_str_radix(radix);
            let back = BigInt::from_str_radix(&s, radix).unwrap();
            assert_eq!(back, *x, "parse(format({x}, {radix}))");
        }
    }
}

#[test]
fn signed_byte_round_trip() {
    let mut rng = XorShiftRng::from_seed([45u8; 16]);
    let xs = samples(&mut rng);

    for x in &xs {
        let bytes = x.to_signed_bytes_be();
        assert_eq!(BigInt::from_signed_bytes_be(&bytes), *x, "roundtrip {x}");

        // minimal length: no redundant sign-extension byte
        if bytes.len() > 1 {
            let head = bytes[0];
            let next_top = bytes[1] & 0x80;
            assert!(
                !(head == 0x00 && next_top == 0) && !(head == 0xff && next_top != 0),
                "non-minimal encoding for {x}: {bytes:02x?}"
            );
        }

        if !x.is_negative() {
            let mag = x.to_bytes_be();
            assert_eq!(BigInt::from_bytes_be(Sign::Plus, &mag), *x);
            if let Some(first) = mag.first() {
                assert_ne!(*first, 0, "leading zero byte in magnitude of {x}");
            }
        }
    }
}

#[test]
fn bit_accessor_laws() {
    let mut rng = XorShiftRng::from_seed([46u8; 16]);
    let xs = samples(&mut rng);

    for x in &xs {
        for n in [0u64, 1, 5, 31, 32, 63, 64, 150] {
            assert!(x.set_bit(n).test_bit(n), "set_bit({n}) on {x}");
            assert!(!x.clear_bit(n).test_bit(n), "clear_bit({n}) on {x}");
            assert_eq!(x.flip_bit(n).flip_bit(n), *x, "double flip_bit({n}) on {x}");
            assert_eq!(
                x.flip_bit(n).test_bit(n),
                !x.test_bit(n),
                "flip_bit({n}) on {x}"
            );
            assert_eq!(&x.set_bit(n) | x, x.set_bit(n));
            assert_eq!(&x.clear_bit(n) & x, x.clear_bit(n));
        }
    }
}

#[test]
fn bit_lengths_match_primitives() {
    for v in [0i64, 1, -1, 2, -2, 255, 256, -255, -256, 1024, i64::MAX] {
        let big = BigInt::from(v);
        let pattern = if v < 0 { !v } else { v };
        let expected = 64 - u64::from(pattern.leading_zeros());
        assert_eq!(big.bits(), expected, "bits({v})");
    }
}

#[test]
fn shifts_match_primitives() {
    for v in [1u64, 3, 0xdead_beef, 0x8000_0000_0000_0000] {
        let big = BigInt::from(v);
        for n in [0usize, 1, 13, 32, 45] {
            let expected = format!("{}", (v as u128) << n);
            assert_eq!((&big << n).to_str_radix(10), expected, "{v} << {n}");
            assert_eq!(&big >> n, BigInt::from(v >> n), "{v} >> {n}");
        }
    }
    // sign-preserving magnitude shift
    assert_eq!(BigInt::from(-12i32) >> 1, BigInt::from(-6i32));
    assert_eq!(BigInt::from(-12i32) >> 10, -BigInt::one());
}

#[test]
fn scenario_hex_carry() {
    let a = BigInt::from_str_radix("FFFFFFFF", 16).unwrap();
    let b = &a + &BigInt::one();
    assert_eq!(b, BigInt::from_str_radix("100000000", 16).unwrap());
}

#[test]
fn scenario_carmichael_fermat_witness() {
    let seven = BigInt::from_str("7").unwrap();
    let e = BigInt::from_str("560").unwrap();
    let m = BigInt::from_str("561").unwrap();
    assert_eq!(seven.modpow(&e, &m), BigInt::one());
}

#[test]
fn scenario_minus_one_bytes() {
    assert_eq!(BigInt::from_str("-1").unwrap().to_signed_bytes_be(), [0xff]);
}

#[test]
fn scenario_gcd() {
    let a = BigInt::from_str("17").unwrap();
    let b = BigInt::from_str("5").unwrap();
    assert_eq!(a.gcd(&b), BigInt::one());
}

#[test]
fn scenario_bit_queries() {
    let v = BigInt::from_str("1024").unwrap();
    assert_eq!(v.bits(), 11);
    assert_eq!(v.trailing_zeros(), Some(10));
    assert_eq!(BigInt::zero().trailing_zeros(), None);
}

#[test]
fn comparison_is_total_and_consistent() {
    let mut rng = XorShiftRng::from_seed([47u8; 16]);
    let mut xs = samples(&mut rng);
    xs.sort();
    for pair in xs.windows(2) {
        assert!(pair[0] <= pair[1]);
        assert_eq!(pair[0] == pair[1], (&pair[0] - &pair[1]).is_zero());
    }
}

#[test]
fn values_are_shareable_across_threads() {
    let v = std::sync::Arc::new(BigInt::from_str("123456789123456789123456789").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let v = v.clone();
            std::thread::spawn(move || (v.bits(), v.count_ones(), v.to_str_radix(10)))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for w in results.windows(2) {
        assert_eq!(w[0], w[1]);
    }
}
