//! Arbitrary-precision signed integers for cryptographic key material.
//!
//! The central type is [`BigInt`], an immutable sign-and-magnitude integer
//! sized for the quantities RSA, DSA, and OpenPGP encodings work with. On
//! top of the usual arithmetic operators it provides the modular toolbox
//! those algorithms need: [`BigInt::modpow`] (Montgomery multiplication for
//! odd moduli), [`ModInverse`], [`BigInt::is_probable_prime`], and canonical
//! two's-complement byte (de)serialization.
//!
//! Randomized operations never touch a process-wide generator; they draw
//! from whatever [`rand::Rng`] the caller passes in, so tests can substitute
//! a seeded generator.
//!
//! ```
//! use pgp_bignum::{BigInt, RandBigInt};
//! use num_integer::Integer;
//!
//! let p = BigInt::from_str_radix("ffffffff", 16).unwrap();
//! assert_eq!(&p + &BigInt::from(1u32), BigInt::from(0x1_0000_0000u64));
//!
//! let mut rng = rand::rng();
//! let a = rng.gen_bigint(256);
//! let b = rng.gen_bigint(256);
//! assert_eq!(a.gcd(&b), b.gcd(&a));
//! ```

use core::fmt;

pub mod algorithms;
mod bigint;
mod bigrand;
mod convert;
mod prime;
mod traits;

pub use crate::bigint::{BigInt, Sign};
pub use crate::bigrand::{RandBigInt, RandPrime, RandomBits, UniformBigInt};
pub use crate::prime::{next_probable_prime, probably_prime};
pub use crate::traits::{ExtendedGcd, ModInverse};

/// The digit type and helpers shared by the magnitude kernels.
pub mod big_digit {
    /// A single magnitude word.
    pub type BigDigit = u32;
    /// A double-width accumulator holding the product or sum of two digits.
    pub type DoubleBigDigit = u64;

    /// Bits per magnitude word.
    pub const BITS: usize = 32;
    /// Mask selecting the low word of a [`DoubleBigDigit`].
    pub const MASK: DoubleBigDigit = 0xffff_ffff;

    #[inline]
    pub fn to_doublebigdigit(hi: BigDigit, lo: BigDigit) -> DoubleBigDigit {
        (DoubleBigDigit::from(hi) << BITS) | DoubleBigDigit::from(lo)
    }

    #[inline]
    pub fn from_doublebigdigit(n: DoubleBigDigit) -> (BigDigit, BigDigit) {
        ((n >> BITS) as BigDigit, n as BigDigit)
    }
}

/// An error that can occur when parsing a [`BigInt`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBigIntError {
    kind: ErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    Empty,
    InvalidDigit,
    UnsupportedRadix,
}

impl ParseBigIntError {
    pub(crate) fn empty() -> Self {
        ParseBigIntError {
            kind: ErrorKind::Empty,
        }
    }

    pub(crate) fn invalid_digit() -> Self {
        ParseBigIntError {
            kind: ErrorKind::InvalidDigit,
        }
    }

    pub(crate) fn unsupported_radix() -> Self {
        ParseBigIntError {
            kind: ErrorKind::UnsupportedRadix,
        }
    }
}

impl fmt::Display for ParseBigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ErrorKind::Empty => "cannot parse integer from empty string",
            ErrorKind::InvalidDigit => "invalid digit found in string",
            ErrorKind::UnsupportedRadix => "radix must be one of 2, 10 or 16",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ParseBigIntError {}
