//! Primality testing and probable-prime search.

use std::sync::LazyLock;

use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive};
use rand::Rng;

use crate::algorithms::rem_digit;
use crate::bigint::Sign;
use crate::bigrand::RandBigInt;
use crate::BigInt;

/// The primes between 3 and 1031, grouped so each group's product stays
/// below 2^31 and one machine-word remainder covers the whole group.
const PRIME_LISTS: &[&[u32]] = &[
    &[3, 5, 7, 11, 13, 17, 19, 23],
    &[29, 31, 37, 41, 43],
    &[47, 53, 59, 61, 67],
    &[71, 73, 79, 83],
    &[89, 97, 101, 103],
    &[107, 109, 113, 127],
    &[131, 137, 139, 149],
    &[151, 157, 163, 167],
    &[173, 179, 181, 191],
    &[193, 197, 199, 211],
    &[223, 227, 229],
    &[233, 239, 241],
    &[251, 257, 263],
    &[269, 271, 277],
    &[281, 283, 293],
    &[307, 311, 313],
    &[317, 331, 337],
    &[347, 349, 353],
    &[359, 367, 373],
    &[379, 383, 389],
    &[397, 401, 409],
    &[419, 421, 431],
    &[433, 439, 443],
    &[449, 457, 461],
    &[463, 467, 479],
    &[487, 491, 499],
    &[503, 509, 521],
    &[523, 541, 547],
    &[557, 563, 569],
    &[571, 577, 587],
    &[593, 599, 601],
    &[607, 613, 617],
    &[619, 631, 641],
    &[643, 647, 653],
    &[659, 661, 673],
    &[677, 683, 691],
    &[701, 709, 719],
    &[727, 733, 739],
    &[743, 751, 757],
    &[761, 769, 773],
    &[787, 797, 809],
    &[811, 821, 823],
    &[827, 829, 839],
    &[853, 857, 859],
    &[863, 877, 881],
    &[883, 887, 907],
    &[911, 919, 929],
    &[937, 941, 947],
    &[953, 967, 971],
    &[977, 983, 991],
    &[997, 1009, 1013],
    &[1019, 1021, 1031],
];

static PRIME_PRODUCTS: LazyLock<Vec<u32>> =
    LazyLock::new(|| PRIME_LISTS.iter().map(|list| list.iter().product()).collect());

const RND_MASK: [u8; 8] = [255, 127, 63, 31, 15, 7, 3, 1];

/// Whether `|n|` is probably prime with false-positive probability at most
/// `2^-certainty`. A certainty of zero or less performs no verification and
/// is vacuously true. From Knuth Vol. 2, pg. 395.
pub fn probably_prime<R: Rng + ?Sized>(n: &BigInt, certainty: i32, rng: &mut R) -> bool {
    if certainty <= 0 {
        return true;
    }

    let n = n.abs();

    if n.is_even() {
        return n == BigInt::from(2u32);
    }
    if n.is_one() {
        return false;
    }

    check_probable_prime(&n, certainty, rng)
}

// n is odd and greater than two.
fn check_probable_prime<R: Rng + ?Sized>(n: &BigInt, certainty: i32, rng: &mut R) -> bool {
    debug_assert!(certainty > 0);
    debug_assert!(n.is_odd() && *n > BigInt::from(2u32));

    // Trial division against grouped products; small candidates skip the
    // large-prime groups entirely.
    let num_lists = (n.bits() - 1).min(PRIME_LISTS.len() as u64) as usize;
    for i in 0..num_lists {
        let test = rem_digit(n.digits(), PRIME_PRODUCTS[i]);
        for &prime in PRIME_LISTS[i] {
            if test % prime == 0 {
                // the candidate itself may be one of the table primes
                return n.bits() < 16 && n.to_u64() == Some(u64::from(prime));
            }
        }
    }

    rabin_miller_test(n, certainty, rng)
}

/// Miller-Rabin: write `n - 1 = r * 2^s`, then for random witnesses
/// `a in (1, n-1)` square `a^r` up to `s - 1` times looking for `n - 1`.
/// Each passing round costs a composite at least a 3/4 chance of exposure,
/// so the remaining certainty budget drops by two per round. No false
/// negative is possible.
pub(crate) fn rabin_miller_test<R: Rng + ?Sized>(
    n: &BigInt,
    mut certainty: i32,
    rng: &mut R,
) -> bool {
    debug_assert!(n.is_odd() && n.bits() > 2);

    let one = BigInt::one();
    let two = BigInt::from(2u32);
    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap();
    let r = &n_minus_one >> s as usize;

    loop {
        let a = rng.gen_bigint_range(&two, &n_minus_one);
        let mut y = a.modpow(&r, n);

        if !y.is_one() {
            let mut j = 0;
            while y != n_minus_one {
                j += 1;
                if j == s {
                    return false;
                }
                y = (&y * &y).mod_floor(n);
                if y.is_one() {
                    return false;
                }
            }
        }

        certainty -= 2;
        if certainty <= 0 {
            return true;
        }
    }
}

/// The first probable prime greater than the non-negative `n`, verified at
/// certainty 100.
///
/// # Panics
///
/// Panics when `n` is negative.
pub fn next_probable_prime<R: Rng + ?Sized>(n: &BigInt, rng: &mut R) -> BigInt {
    assert!(
        n.sign() != Sign::Minus,
        "next_probable_prime on a negative value"
    );

    let two = BigInt::from(2u32);
    if *n < two {
        return two;
    }

    let mut candidate = (n + &BigInt::one()).set_bit(0);
    while !check_probable_prime(&candidate, 100, rng) {
        candidate = &candidate + &two;
    }
    candidate
}

/// A random probable prime of exactly `bit_length` bits. The top bit is
/// forced on so the length is exact and the low bit forced on so the
/// candidate is odd. A failed candidate has a bounded number of interior
/// bits flipped and is retested before a full regeneration.
pub(crate) fn probable_prime<R: Rng + ?Sized>(
    bit_length: u64,
    certainty: i32,
    rng: &mut R,
) -> BigInt {
    assert!(bit_length >= 2, "prime bit length must be at least 2");

    if bit_length == 2 {
        return if rng.random::<bool>() {
            BigInt::from(2u32)
        } else {
            BigInt::from(3u32)
        };
    }

    let n_bytes = bit_length.div_ceil(8) as usize;
    let x_bits = (8 * n_bytes as u64 - bit_length) as u32;
    let mask = RND_MASK[x_bits as usize];
    let mut bytes = vec![0u8; n_bytes];

    loop {
        rng.fill_bytes(&mut bytes);

        bytes[0] &= mask;
        bytes[0] |= 1 << (7 - x_bits);
        bytes[n_bytes - 1] |= 1;

        let candidate = BigInt::from_bytes_be(Sign::Plus, &bytes);
        debug_assert_eq!(candidate.bits(), bit_length);

        if certainty < 1 {
            return candidate;
        }
        if check_probable_prime(&candidate, certainty, rng) {
            return candidate;
        }

        if bit_length > 34 {
            // Flip interior bits rather than regenerating wholesale; the
            // forced top bit stays put, so the length cannot drift.
            let mut data = candidate.digits().to_vec();
            let len = data.len();
            for _ in 0..10_000 {
                let bit = 33 + rng.random_range(0..bit_length - 34);
                data[len - 1 - (bit >> 5) as usize] ^= 1 << (bit & 31);
                data[len - 1] ^= ((rng.random::<u32>() >> 1) | 1) << 1;

                let flipped = BigInt::from_digits(Sign::Plus, data.clone());
                debug_assert_eq!(flipped.bits(), bit_length);
                if check_probable_prime(&flipped, certainty, rng) {
                    return flipped;
                }
            }
        }
    }
}
