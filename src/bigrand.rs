//! Randomization of big integers.
//!
//! Nothing here owns a random source: every operation draws from the
//! [`Rng`] the caller supplies, so a seeded generator gives reproducible
//! values.

use rand::distr::uniform::{Error, SampleBorrow, SampleUniform, UniformSampler};
use rand::prelude::*;

use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::bigint::Sign;
use crate::prime;
use crate::BigInt;

/// A trait for sampling random big integers.
pub trait RandBigInt {
    /// Generate a random non-negative [`BigInt`], uniform over
    /// `[0, 2^bit_size)`.
    fn gen_bigint(&mut self, bit_size: u64) -> BigInt;

    /// Generate a random [`BigInt`] less than the given bound. Fails when
    /// the bound is not positive.
    fn gen_bigint_below(&mut self, bound: &BigInt) -> BigInt;

    /// Generate a random [`BigInt`] within the given range. The lower
    /// bound is inclusive; the upper bound is exclusive. Fails when the
    /// upper bound is not greater than the lower bound.
    fn gen_bigint_range(&mut self, lbound: &BigInt, ubound: &BigInt) -> BigInt;
}

fn gen_bits<R: Rng + ?Sized>(rng: &mut R, data: &mut [u32], rem: u64) {
    // `fill` is faster than many `random::<u32>` calls
    rng.fill(data);
    if rem > 0 {
        data[0] >>= 32 - rem;
    }
}

impl<R: Rng + ?Sized> RandBigInt for R {
    fn gen_bigint(&mut self, bit_size: u64) -> BigInt {
        if bit_size == 0 {
            return BigInt::zero();
        }
        let (digits, rem) = bit_size.div_rem(&32);
        let len = (digits + (rem > 0) as u64)
            .to_usize()
            .expect("capacity overflow");
        let mut data = vec![0u32; len];
        gen_bits(self, &mut data, rem);
        BigInt::from_digits(Sign::Plus, data)
    }

    fn gen_bigint_below(&mut self, bound: &BigInt) -> BigInt {
        assert!(bound.sign() == Sign::Plus);
        let bits = bound.bits();
        loop {
            let n = self.gen_bigint(bits);
            if n < *bound {
                return n;
            }
        }
    }

    fn gen_bigint_range(&mut self, lbound: &BigInt, ubound: &BigInt) -> BigInt {
        assert!(*lbound < *ubound);
        if lbound.is_zero() {
            self.gen_bigint_below(ubound)
        } else {
            lbound + self.gen_bigint_below(&(ubound - lbound))
        }
    }
}

/// The back-end implementing rand's [`UniformSampler`] for [`BigInt`].
#[derive(Clone, Debug)]
pub struct UniformBigInt {
    base: BigInt,
    len: BigInt,
}

impl UniformSampler for UniformBigInt {
    type X = BigInt;

    #[inline]
    fn new<B1, B2>(low_b: B1, high_b: B2) -> Result<Self, Error>
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        let low = low_b.borrow();
        let high = high_b.borrow();
        if low >= high {
            return Err(Error::EmptyRange);
        }
        Ok(UniformBigInt {
            len: high - low,
            base: low.clone(),
        })
    }

    #[inline]
    fn new_inclusive<B1, B2>(low_b: B1, high_b: B2) -> Result<Self, Error>
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        let low = low_b.borrow();
        let high = high_b.borrow();
        if low > high {
            return Err(Error::EmptyRange);
        }
        Self::new(low, high + &BigInt::one())
    }

    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::X {
        &self.base + rng.gen_bigint_below(&self.len)
    }

    #[inline]
    fn sample_single<R: Rng + ?Sized, B1, B2>(
        low: B1,
        high: B2,
        rng: &mut R,
    ) -> Result<Self::X, Error>
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        let low = low.borrow();
        let high = high.borrow();
        if low >= high {
            return Err(Error::EmptyRange);
        }
        Ok(rng.gen_bigint_range(low, high))
    }
}

impl SampleUniform for BigInt {
    type Sampler = UniformBigInt;
}

/// A random distribution for [`BigInt`] values of a particular bit size.
#[derive(Clone, Copy, Debug)]
pub struct RandomBits {
    bits: u64,
}

impl RandomBits {
    #[inline]
    pub fn new(bits: u64) -> RandomBits {
        RandomBits { bits }
    }
}

impl Distribution<BigInt> for RandomBits {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BigInt {
        rng.gen_bigint(self.bits)
    }
}

/// A generic trait for generating random probable primes.
///
/// *Warning*: This is highly dependent on the provided random number
/// generator, to provide actually random primes.
///
/// # Example
///
/// ```
/// use pgp_bignum::RandPrime;
///
/// let mut rng = rand::rng();
/// let p = rng.gen_prime(128, 100);
/// assert_eq!(p.bits(), 128);
/// ```
pub trait RandPrime {
    /// Generate a random probable prime of exactly `bit_size` bits, with
    /// false-positive probability at most `2^-certainty`.
    fn gen_prime(&mut self, bit_size: u64, certainty: i32) -> BigInt;
}

impl<R: Rng + ?Sized> RandPrime for R {
    fn gen_prime(&mut self, bit_size: u64, certainty: i32) -> BigInt {
        prime::probable_prime(bit_size, certainty, self)
    }
}
