//! Board coordinates and their algebraic names.

use std::fmt;

/// A (file, rank) coordinate, both zero-based. File 0 is `a`, rank 0 is `1`.
///
/// A `Square` is only a coordinate; whether it lies on a particular board is
/// decided by [`Board::square`](crate::Board::square).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Create a square from a file and rank.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Square {
        Square { rank, file }
    }

    /// Return the zero-based file.
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Return the zero-based rank.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Parse an algebraic name such as `e4` or `aa12`.
    ///
    /// Returns `None` for anything that is not letters followed by a 1-based
    /// rank number, or that does not fit in a `u8` coordinate.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let split = s.find(|c: char| !c.is_ascii_lowercase())?;
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let file = file_from_letters(letters)?;
        let rank: u32 = digits.parse().ok()?;
        if rank == 0 || digits.starts_with('0') {
            return None;
        }
        let rank = u8::try_from(rank - 1).ok()?;
        Some(Square::new(file, rank))
    }
}

/// Name a zero-based file in bijective base 26: a..z, aa, ab, ...
pub fn file_letters(file: u8) -> String {
    let mut n = file as u32 + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    out.iter().rev().collect()
}

fn file_from_letters(letters: &str) -> Option<u8> {
    let mut n: u32 = 0;
    for b in letters.bytes() {
        n = n.checked_mul(26)?.checked_add((b - b'a') as u32 + 1)?;
    }
    u8::try_from(n - 1).ok()
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", file_letters(self.file), self.rank as u32 + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}
