#![cfg(feature = "zeroize")]

use super::{BigInt, Sign};

impl zeroize::Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.data.zeroize();
        self.data.clear();
        self.sign = Sign::NoSign;
        let _ = self.bit_len.take();
        let _ = self.bit_count.take();
        let _ = self.m_quote.take();
    }
}
