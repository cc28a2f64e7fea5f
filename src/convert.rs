//! Radix conversion and byte-level (de)serialization.

use core::fmt::{self, Write as _};
use core::str::FromStr;

use num_traits::Zero;

use crate::algorithms::{div_rem_digit, scalar_mul_add};
use crate::big_digit::BigDigit;
use crate::bigint::Sign;
use crate::{BigInt, ParseBigIntError};

impl BigInt {
    /// Parses a string in radix 2, 10, or 16; any other radix is rejected.
    /// A single leading `-` marks a negative value.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<BigInt, ParseBigIntError> {
        if !matches!(radix, 2 | 10 | 16) {
            return Err(ParseBigIntError::unsupported_radix());
        }

        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return Err(ParseBigIntError::empty());
        }

        let (sign, digits) = match bytes[0] {
            b'-' => (Sign::Minus, &bytes[1..]),
            _ => (Sign::Plus, bytes),
        };
        if digits.is_empty() {
            return Err(ParseBigIntError::empty());
        }

        let mut vals = Vec::with_capacity(digits.len());
        for &c in digits {
            match char::from(c).to_digit(radix) {
                Some(d) => vals.push(d),
                None => return Err(ParseBigIntError::invalid_digit()),
            }
        }

        // strip leading zero digits
        let vals = match vals.iter().position(|&d| d != 0) {
            None => return Ok(BigInt::zero()),
            Some(i) => &vals[i..],
        };

        let mag = match radix {
            // Power-of-two radices pack digit bits straight into words.
            2 | 16 => {
                let bits_per = if radix == 2 { 1 } else { 4 };
                let words = (vals.len() * bits_per).div_ceil(32);
                let mut mag = vec![0; words];
                let mut bit_pos = 0;
                for &d in vals.iter().rev() {
                    mag[words - 1 - bit_pos / 32] |= d << (bit_pos % 32);
                    bit_pos += bits_per;
                }
                mag
            }
            // Base 10 consumes nine-digit chunks, each fitting one word:
            // accumulator * 10^chunk + chunk value.
            _ => {
                let mut mag: Vec<BigDigit> = Vec::new();
                for chunk in vals.chunks(9) {
                    let v = chunk.iter().fold(0, |acc, &d| acc * 10 + d);
                    scalar_mul_add(&mut mag, 10u32.pow(chunk.len() as u32), v);
                }
                mag
            }
        };

        Ok(BigInt::from_digits(sign, mag))
    }

    /// Renders in radix 2, 10, or 16 with a leading `-` for negative values.
    ///
    /// # Panics
    ///
    /// Panics on any other radix.
    pub fn to_str_radix(&self, radix: u32) -> String {
        assert!(
            matches!(radix, 2 | 10 | 16),
            "radix must be one of 2, 10 or 16"
        );

        let mut s = String::new();
        if self.sign() == Sign::Minus {
            s.push('-');
        }
        s.push_str(&self.abs_to_str_radix(radix));
        s
    }

    // Magnitude rendering without a sign.
    fn abs_to_str_radix(&self, radix: u32) -> String {
        if self.is_zero() {
            return "0".to_owned();
        }

        let mag = self.digits();
        let mut s = String::new();
        match radix {
            16 => {
                write!(s, "{:x}", mag[0]).unwrap();
                for &w in &mag[1..] {
                    write!(s, "{:08x}", w).unwrap();
                }
            }
            2 => {
                write!(s, "{:b}", mag[0]).unwrap();
                for &w in &mag[1..] {
                    write!(s, "{:032b}", w).unwrap();
                }
            }
            // Peel nine decimal digits per division by 10^9, then emit the
            // collected chunks most significant first.
            _ => {
                let mut work = mag.to_vec();
                let mut start = 0;
                let mut chunks: Vec<BigDigit> = Vec::new();
                while start < work.len() {
                    chunks.push(div_rem_digit(&mut work[start..], 1_000_000_000));
                    while start < work.len() && work[start] == 0 {
                        start += 1;
                    }
                }
                let (&top, rest) = chunks.split_last().unwrap();
                write!(s, "{}", top).unwrap();
                for &c in rest.iter().rev() {
                    write!(s, "{:09}", c).unwrap();
                }
            }
        }
        s
    }

    /// Decodes a big-endian two's-complement buffer; a set high bit means
    /// negative. An empty buffer decodes to zero.
    pub fn from_signed_bytes_be(bytes: &[u8]) -> BigInt {
        if bytes.is_empty() {
            return BigInt::zero();
        }

        if bytes[0] & 0x80 != 0 {
            // negate the buffer: invert, then increment
            let mut inverse: Vec<u8> = bytes.iter().map(|b| !b).collect();
            for b in inverse.iter_mut().rev() {
                let (v, overflow) = b.overflowing_add(1);
                *b = v;
                if !overflow {
                    break;
                }
            }
            BigInt::from_digits(Sign::Minus, make_magnitude(&inverse))
        } else {
            BigInt::from_digits(Sign::Plus, make_magnitude(bytes))
        }
    }

    /// Builds a value from an explicit sign and big-endian magnitude bytes.
    /// [`Sign::NoSign`] produces zero regardless of the bytes.
    pub fn from_bytes_be(sign: Sign, bytes: &[u8]) -> BigInt {
        match sign {
            Sign::NoSign => BigInt::zero(),
            _ => BigInt::from_digits(sign, make_magnitude(bytes)),
        }
    }

    /// Minimal-length big-endian two's-complement encoding; zero encodes as
    /// a single zero byte, and no redundant sign-extension byte is emitted.
    pub fn to_signed_bytes_be(&self) -> Vec<u8> {
        self.to_byte_array(false)
    }

    /// Minimal-length big-endian magnitude bytes; zero encodes as an empty
    /// buffer.
    ///
    /// # Panics
    ///
    /// Panics on negative values, which have no unsigned encoding.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        assert!(
            self.sign() != Sign::Minus,
            "negative value has no unsigned encoding"
        );
        self.to_byte_array(true)
    }

    fn to_byte_array(&self, unsigned: bool) -> Vec<u8> {
        if self.is_zero() {
            return if unsigned { Vec::new() } else { vec![0] };
        }

        let n_bits = if unsigned && self.sign() == Sign::Plus {
            self.bits()
        } else {
            self.bits() + 1
        };
        let n_bytes = n_bits.div_ceil(8) as usize;
        let mut bytes = vec![0u8; n_bytes];

        let mag = self.digits();
        let mut mag_index = mag.len();
        let mut bytes_index = bytes.len();

        if self.sign() == Sign::Plus {
            while mag_index > 1 {
                mag_index -= 1;
                let m = mag[mag_index];
                bytes[bytes_index - 1] = m as u8;
                bytes[bytes_index - 2] = (m >> 8) as u8;
                bytes[bytes_index - 3] = (m >> 16) as u8;
                bytes[bytes_index - 4] = (m >> 24) as u8;
                bytes_index -= 4;
            }

            let mut last_mag = mag[0];
            while last_mag > 0xff {
                bytes_index -= 1;
                bytes[bytes_index] = last_mag as u8;
                last_mag >>= 8;
            }
            bytes_index -= 1;
            bytes[bytes_index] = last_mag as u8;
        } else {
            let mut carry = true;

            while mag_index > 1 {
                mag_index -= 1;
                let mut m = !mag[mag_index];
                if carry {
                    let (v, overflow) = m.overflowing_add(1);
                    m = v;
                    carry = overflow;
                }
                bytes[bytes_index - 1] = m as u8;
                bytes[bytes_index - 2] = (m >> 8) as u8;
                bytes[bytes_index - 3] = (m >> 16) as u8;
                bytes[bytes_index - 4] = (m >> 24) as u8;
                bytes_index -= 4;
            }

            let mut last_mag = mag[0];
            if carry {
                // cannot wrap: the top word of a canonical magnitude is nonzero
                last_mag -= 1;
            }

            while last_mag > 0xff {
                bytes_index -= 1;
                bytes[bytes_index] = !(last_mag as u8);
                last_mag >>= 8;
            }
            bytes_index -= 1;
            bytes[bytes_index] = !(last_mag as u8);

            if bytes_index > 0 {
                bytes_index -= 1;
                bytes[bytes_index] = 0xff;
            }
        }

        bytes
    }
}

/// Packs big-endian bytes into magnitude words, stripping leading zeros; the
/// ragged leading bytes land in the first word.
pub(crate) fn make_magnitude(bytes: &[u8]) -> Vec<BigDigit> {
    let first = bytes.iter().position(|&b| b != 0);
    let sig = match first {
        None => return Vec::new(),
        Some(i) => &bytes[i..],
    };

    let n_ints = sig.len().div_ceil(4);
    let mut b_count = sig.len() % 4;
    if b_count == 0 {
        b_count = 4;
    }

    let mut mag = vec![0; n_ints];
    let mut v: BigDigit = 0;
    let mut mag_index = 0;
    for &b in sig {
        v = (v << 8) | BigDigit::from(b);
        b_count -= 1;
        if b_count == 0 {
            mag[mag_index] = v;
            mag_index += 1;
            b_count = 4;
            v = 0;
        }
    }
    debug_assert_eq!(mag_index, mag.len());

    mag
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    #[inline]
    fn from_str(s: &str) -> Result<BigInt, ParseBigIntError> {
        BigInt::from_str_radix(s, 10)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(self.sign() != Sign::Minus, "", &self.abs_to_str_radix(10))
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Binary for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(self.sign() != Sign::Minus, "0b", &self.abs_to_str_radix(2))
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(self.sign() != Sign::Minus, "0x", &self.abs_to_str_radix(16))
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = self.abs_to_str_radix(16);
        s.make_ascii_uppercase();
        f.pad_integral(self.sign() != Sign::Minus, "0x", &s)
    }
}
