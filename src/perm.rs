// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use thiserror::Error;

/// Errors from permutation generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermError {
    /// There are no rows to permute.
    #[error("cannot permute zero rows")]
    ZeroSize,

    /// The key's high bits are all zero, so the derived modulus is zero.
    #[error("key {key} is below 128, derived modulus is zero")]
    ZeroModulus {
        /// The masked key value.
        key: u16,
    },

    /// The key does not yield a bijection for this row count.
    #[error(
        "key {key} does not permute {size} rows: rows {first} and {second} both land on row {dest}"
    )]
    NotBijective {
        /// The masked key value.
        key: u16,
        /// Number of rows.
        size: usize,
        /// First source row mapped to `dest`.
        first: usize,
        /// Second source row mapped to `dest`.
        second: usize,
        /// The colliding destination row.
        dest: usize,
    },
}

/// A scramble key, masked to its low 15 bits.
///
/// Masking happens here, at the boundary with caller input; the
/// permutation formula itself never sees unmasked values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Key(u16);

impl Key {
    /// Only the low 15 bits of a raw key are significant.
    pub const MASK: u16 = 0x7FFF;

    /// Masks a raw integer down to a 15-bit key.
    ///
    /// Accepts any integer; negative values contribute their
    /// two's-complement low bits, same as `raw & 0x7FFF` on a Java `int`.
    pub fn new(raw: i64) -> Self {
        Key((raw & i64::from(Self::MASK)) as u16)
    }

    /// The masked key value, in `[0, 32767]`.
    pub fn value(self) -> u16 {
        self.0
    }
}

/// A verified bijection on `[0, size)`, mapping source rows to
/// destination rows.
///
/// Position `i` of the forward table holds the destination of source row
/// `i`. The inverse table is filled during generation and doubles as the
/// collision detector: a key whose multiplier shares a factor with `size`
/// is rejected instead of producing a lossy mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Generates the permutation for `size` rows under `key`.
    ///
    /// The destination of source row `i` is
    /// `(r + (2*s + 1) * i) mod size`, with `r = key >> 7` and
    /// `s = key mod (r << 7)`.
    ///
    /// # Errors
    ///
    /// * [`PermError::ZeroSize`] if `size` is zero.
    /// * [`PermError::ZeroModulus`] if the masked key is below 128.
    /// * [`PermError::NotBijective`] if two rows collide.
    pub fn generate(size: usize, key: Key) -> Result<Self, PermError> {
        if size == 0 {
            return Err(PermError::ZeroSize);
        }

        let r = u64::from(key.value() >> 7);
        if r == 0 {
            return Err(PermError::ZeroModulus { key: key.value() });
        }
        let s = u64::from(key.value()) % (r << 7);
        let mult = 2 * s + 1;
        let n = size as u64;

        let mut forward = vec![0usize; size];
        // usize::MAX marks a destination row nothing has claimed yet.
        let mut inverse = vec![usize::MAX; size];
        for (i, slot) in forward.iter_mut().enumerate() {
            let dest = ((r + mult * i as u64) % n) as usize;
            if inverse[dest] != usize::MAX {
                return Err(PermError::NotBijective {
                    key: key.value(),
                    size,
                    first: inverse[dest],
                    second: i,
                    dest,
                });
            }
            inverse[dest] = i;
            *slot = dest;
        }

        Ok(Permutation { forward, inverse })
    }

    /// Number of rows covered.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Destination row per source row.
    pub fn forward(&self) -> &[usize] {
        &self.forward
    }

    /// Source row per destination row.
    pub fn inverse(&self) -> &[usize] {
        &self.inverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gcd(mut a: u64, mut b: u64) -> u64 {
        while b != 0 {
            (a, b) = (b, a % b);
        }
        a
    }

    #[test]
    fn key_masks_to_low_15_bits() {
        assert_eq!(Key::new(300), Key::new(300 + 0x8000));
        assert_eq!(Key::new(0x7FFF).value(), 0x7FFF);
        assert_eq!(Key::new(0x8000).value(), 0);
        assert_eq!(Key::new(-1).value(), 0x7FFF);
    }

    #[test]
    fn reference_tables_for_key_300() {
        let perm = Permutation::generate(4, Key::new(300)).unwrap();
        assert_eq!(perm.forward(), &[2, 3, 0, 1]);

        let perm = Permutation::generate(7, Key::new(300)).unwrap();
        assert_eq!(perm.forward(), &[2, 0, 5, 3, 1, 6, 4]);
    }

    #[test]
    fn single_row_is_identity() {
        for raw in [128, 300, 0x7FFF] {
            let perm = Permutation::generate(1, Key::new(raw)).unwrap();
            assert_eq!(perm.forward(), &[0]);
            assert_eq!(perm.inverse(), &[0]);
        }
    }

    #[test]
    fn keys_below_128_are_rejected() {
        for raw in [0, 1, 127] {
            assert_eq!(
                Permutation::generate(16, Key::new(raw)),
                Err(PermError::ZeroModulus { key: raw as u16 }),
            );
        }
        // 0x8000 masks down to 0, so it is rejected too.
        assert!(matches!(
            Permutation::generate(16, Key::new(0x8000)),
            Err(PermError::ZeroModulus { key: 0 }),
        ));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(
            Permutation::generate(0, Key::new(300)),
            Err(PermError::ZeroSize),
        );
    }

    #[test]
    fn collision_is_reported_with_both_rows() {
        // key 300 gives multiplier 89; at size 89 every row lands on row 2.
        match Permutation::generate(89, Key::new(300)) {
            Err(PermError::NotBijective {
                key: 300,
                size: 89,
                first: 0,
                second: 1,
                dest: 2,
            }) => {}
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn coprime_multipliers_permute_and_others_fail() {
        for size in [2usize, 3, 5, 8, 16, 89, 240, 255] {
            for raw in [128i64, 300, 5000, 12345, 0x7FFF] {
                let key = Key::new(raw);
                let r = u64::from(key.value() >> 7);
                let s = u64::from(key.value()) % (r << 7);
                let mult = 2 * s + 1;

                match Permutation::generate(size, key) {
                    Ok(perm) => {
                        assert_eq!(gcd(mult, size as u64), 1, "size {size} key {raw}");
                        let mut seen = perm.forward().to_vec();
                        seen.sort_unstable();
                        let expect: Vec<_> = (0..size).collect();
                        assert_eq!(seen, expect, "size {size} key {raw}");
                    }
                    Err(PermError::NotBijective { .. }) => {
                        assert_ne!(gcd(mult, size as u64), 1, "size {size} key {raw}");
                    }
                    Err(e) => panic!("unexpected error for size {size} key {raw}: {e}"),
                }
            }
        }
    }

    #[test]
    fn inverse_undoes_forward() {
        let perm = Permutation::generate(240, Key::new(300)).unwrap();
        for (i, &dest) in perm.forward().iter().enumerate() {
            assert_eq!(perm.inverse()[dest], i);
        }
    }
}
