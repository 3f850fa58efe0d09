//! Library to scramble image lines with a numeric key.
//!
//! This library derives a row permutation from a 15-bit [Key] and applies
//! it to pixel data, such that:
//!
//! * No row is duplicated nor removed — generation fails for keys that
//!   would not permute the given row count.
//! * Scrambling with a key and unscrambling with the same key recovers
//!   the input exactly, pixel for pixel.
//! * Columns and per-pixel values are untouched; only rows move.
//!
//! This is visual obfuscation, not encryption: the keyspace is 15 bits
//! and pixel values are never diffused.

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

mod perm;
mod scramble;

#[doc(inline)]
pub use crate::perm::{Key, PermError, Permutation};
#[doc(inline)]
pub use crate::scramble::{scramble_rows, unscramble_rows, ScrambleError};
