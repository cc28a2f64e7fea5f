use core::cmp::Ordering;

use num_integer::Integer;

use crate::big_digit::{BigDigit, DoubleBigDigit, MASK};
use crate::bigint::Sign;
use crate::BigInt;

use super::{cmp_slice_skip, mul3, rem_in_place, sqr, sub2};

/// Montgomery quotient `-m⁻¹ mod 2³²` for an odd least significant modulus
/// word, computed by a fixed-width extended Euclid on machine integers.
pub(crate) fn mont_quote(m_lsw: BigDigit) -> BigDigit {
    debug_assert!(m_lsw & 1 == 1);

    // -m mod 2^32; odd input makes it invertible
    let v = (!m_lsw).wrapping_add(1);
    fast_mod_inverse(i64::from(v), 0x1_0000_0000) as BigDigit
}

fn fast_ext_euclid(a: i64, b: i64) -> (i64, i64) {
    let mut u1: i64 = 1;
    let mut u3 = a;
    let mut v1: i64 = 0;
    let mut v3 = b;

    while v3 > 0 {
        let q = u3 / v3;

        let tn = u1 - v1 * q;
        u1 = v1;
        v1 = tn;

        let tn = u3 - v3 * q;
        u3 = v3;
        v3 = tn;
    }

    (u3, u1)
}

fn fast_mod_inverse(v: i64, m: i64) -> i64 {
    let (gcd, mut x) = fast_ext_euclid(v, m);
    debug_assert_eq!(gcd, 1);
    if x < 0 {
        x += m;
    }
    x
}

/// Montgomery multiplication `a = x * y * R⁻¹ mod m` with `R = 2^(32n)`,
/// algorithm 14.36 of the Handbook of Applied Cryptography. `x` and `y` hold
/// `n` words, `a` holds `n + 1`; the reduced product lands in `a[1..]`.
fn monty_mul_into(
    a: &mut [BigDigit],
    x: &[BigDigit],
    y: &[BigDigit],
    m: &[BigDigit],
    m_quote: BigDigit,
) {
    let n = m.len();
    debug_assert!(a.len() == n + 1 && x.len() == n && y.len() == n);

    if n == 1 {
        a[0] = 0;
        a[1] = monty_mul_digit(x[0], y[0], m[0], m_quote);
        return;
    }

    let n_minus_1 = n - 1;
    let y_0 = DoubleBigDigit::from(y[n_minus_1]);

    a.fill(0);

    for i in (0..n).rev() {
        let x_i = DoubleBigDigit::from(x[i]);

        // u = ((a[n] + x_i * y_0) mod b) * m_quote mod b
        let t0 = (DoubleBigDigit::from(a[n]) + ((x_i * y_0) & MASK)) & MASK;
        let u = (t0 * DoubleBigDigit::from(m_quote)) & MASK;

        // a = (a + x_i * y + u * m) / b
        let prod1 = x_i * y_0;
        let prod2 = u * DoubleBigDigit::from(m[n_minus_1]);
        let tmp = DoubleBigDigit::from(a[n]) + (prod1 & MASK) + (prod2 & MASK);
        let mut carry = (prod1 >> 32) + (prod2 >> 32) + (tmp >> 32);
        for j in (1..n).rev() {
            let prod1 = x_i * DoubleBigDigit::from(y[j - 1]);
            let prod2 = u * DoubleBigDigit::from(m[j - 1]);
            let t = DoubleBigDigit::from(a[j]) + (prod1 & MASK) + (prod2 & MASK) + (carry & MASK);
            carry = (carry >> 32) + (prod1 >> 32) + (prod2 >> 32) + (t >> 32);
            a[j + 1] = t as BigDigit;
        }
        carry += DoubleBigDigit::from(a[0]);
        a[1] = carry as BigDigit;
        a[0] = (carry >> 32) as BigDigit;
    }

    if cmp_slice_skip(a, m) != Ordering::Less {
        sub2(a, m);
    }
}

fn monty_mul_digit(x: BigDigit, y: BigDigit, m: BigDigit, m_quote: BigDigit) -> BigDigit {
    let um = DoubleBigDigit::from(m);
    let prod1 = DoubleBigDigit::from(x) * DoubleBigDigit::from(y);
    let u = prod1.wrapping_mul(DoubleBigDigit::from(m_quote)) & MASK;
    let prod2 = u * um;
    let tmp = (prod1 & MASK) + (prod2 & MASK);
    let mut carry = (prod1 >> 32) + (prod2 >> 32) + (tmp >> 32);

    if carry >= um {
        carry -= um;
    }

    carry as BigDigit
}

/// Modular exponentiation core: square-and-multiply over the exponent
/// magnitude, using Montgomery multiplication when the modulus is odd and
/// the converted base fits the modulus width, and plain multiply-then-reduce
/// otherwise.
///
/// The caller guarantees `modulus > 1`, a nonzero exponent magnitude, and a
/// nonzero base; the exponent's sign is ignored here. The result is
/// `base^|exp| mod modulus`, in `[0, modulus)`.
pub fn monty_modpow(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> BigInt {
    let m_mag = modulus.digits();
    let n = m_mag.len();

    let mut z_val: Vec<BigDigit> = Vec::new();
    let mut y_accum: Vec<BigDigit> = Vec::new();
    let mut m_quote: BigDigit = 0;

    let mut use_monty = m_mag[n - 1] & 1 == 1;
    if use_monty {
        m_quote = modulus.mont_quote();

        // base * R mod m
        let tmp = (base << (32 * n)).mod_floor(modulus);
        z_val = tmp.digits().to_vec();

        use_monty = z_val.len() <= n;
        if use_monty {
            y_accum = vec![0; n + 1];
            if z_val.len() < n {
                let mut long_z = vec![0; n];
                let at = n - z_val.len();
                long_z[at..].copy_from_slice(&z_val);
                z_val = long_z;
            }
        }
    }

    if !use_monty {
        let tmp = base.mod_floor(modulus);
        let mag = tmp.digits();
        z_val = vec![0; n];
        let at = n - mag.len();
        z_val[at..].copy_from_slice(mag);

        y_accum = vec![0; n * 2];
    }

    let exp_mag = exponent.digits();
    let mut y_val: Vec<BigDigit> = vec![0; n];

    for (i, &word) in exp_mag.iter().enumerate() {
        let mut v = word;
        let mut bits_done = 0u32;

        if i == 0 {
            // skip the top word's leading zeros and consume its leading one
            while v & 0x8000_0000 == 0 {
                v <<= 1;
                bits_done += 1;
            }
            y_val.copy_from_slice(&z_val);
            v <<= 1;
            bits_done += 1;
        }

        while v != 0 {
            if use_monty {
                // A dedicated Montgomery squaring buys little over a
                // Montgomery multiply, so squares reuse the multiply.
                monty_mul_into(&mut y_accum, &y_val, &y_val, m_mag, m_quote);
                y_val.copy_from_slice(&y_accum[1..]);
            } else {
                y_accum.fill(0);
                sqr(&mut y_accum, &y_val);
                rem_in_place(&mut y_accum, m_mag);
                let at = y_accum.len() - n;
                y_val.copy_from_slice(&y_accum[at..]);
            }
            bits_done += 1;

            if v & 0x8000_0000 != 0 {
                if use_monty {
                    monty_mul_into(&mut y_accum, &y_val, &z_val, m_mag, m_quote);
                    y_val.copy_from_slice(&y_accum[1..]);
                } else {
                    y_accum.fill(0);
                    mul3(&mut y_accum, &y_val, &z_val);
                    rem_in_place(&mut y_accum, m_mag);
                    let at = y_accum.len() - n;
                    y_val.copy_from_slice(&y_accum[at..]);
                }
            }

            v <<= 1;
        }

        while bits_done < 32 {
            if use_monty {
                monty_mul_into(&mut y_accum, &y_val, &y_val, m_mag, m_quote);
                y_val.copy_from_slice(&y_accum[1..]);
            } else {
                y_accum.fill(0);
                sqr(&mut y_accum, &y_val);
                rem_in_place(&mut y_accum, m_mag);
                let at = y_accum.len() - n;
                y_val.copy_from_slice(&y_accum[at..]);
            }
            bits_done += 1;
        }
    }

    if use_monty {
        // convert out of Montgomery form: y * 1 * R⁻¹ mod m
        z_val.fill(0);
        z_val[n - 1] = 1;
        monty_mul_into(&mut y_accum, &y_val, &z_val, m_mag, m_quote);
        y_val.copy_from_slice(&y_accum[1..]);
    }

    BigInt::from_digits(Sign::Plus, y_val)
}
