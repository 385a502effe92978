//! Fixed-length circular storage for binary cells.

use std::fmt;
use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{AutomataError, Result};

/// A fixed-length ring of binary cells.
///
/// Every integer index is valid: indices are reduced modulo the length, so
/// `-1` is the last cell and `len()` is the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    cells: Vec<u8>,
}

impl Ring {
    /// Creates a ring from a sequence of 0/1 cells.
    ///
    /// Fails with [`AutomataError::InvalidLength`] for an empty sequence and
    /// [`AutomataError::InvalidValue`] for any cell other than 0 or 1.
    pub fn new(cells: Vec<u8>) -> Result<Self> {
        if cells.is_empty() {
            return Err(AutomataError::InvalidLength);
        }
        check_binary(&cells)?;
        Ok(Self { cells })
    }

    /// Creates a ring, coercing each element to 0/1 by truthiness.
    ///
    /// Anything that differs from `T::default()` becomes 1, so this accepts
    /// `bool`s, integers and floats alike.
    pub fn from_truthy<T, I>(seed: I) -> Result<Self>
    where
        T: Copy + Default + PartialEq,
        I: IntoIterator<Item = T>,
    {
        let cells = seed
            .into_iter()
            .map(|c| u8::from(c != T::default()))
            .collect();
        Self::new(cells)
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the ring has no cells (never, after construction).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Maps any integer index onto `0..len()`.
    pub fn normalize(&self, index: isize) -> usize {
        index.rem_euclid(self.cells.len() as isize) as usize
    }

    /// Gets the cell at a (wrapping) index.
    pub fn get(&self, index: isize) -> u8 {
        self.cells[self.normalize(index)]
    }

    /// Sets the cell at a (wrapping) index.
    pub fn set(&mut self, index: isize, value: u8) -> Result<()> {
        if value > 1 {
            return Err(AutomataError::InvalidValue(value));
        }
        let i = self.normalize(index);
        self.cells[i] = value;
        Ok(())
    }

    /// Replaces every cell at once.
    ///
    /// The ring is left untouched if `cells` has the wrong length or holds a
    /// non-binary value.
    pub fn replace(&mut self, cells: Vec<u8>) -> Result<()> {
        if cells.len() != self.cells.len() {
            return Err(AutomataError::LengthMismatch {
                expected: self.cells.len(),
                got: cells.len(),
            });
        }
        check_binary(&cells)?;
        self.cells = cells;
        Ok(())
    }

    /// Returns an immutable copy of the current cells.
    pub fn snapshot(&self) -> Generation {
        Generation(self.cells.clone().into_boxed_slice())
    }

    /// Sums the cells in `[center - radius, center + radius]`.
    ///
    /// Each index wraps independently, so a window wider than the ring counts
    /// some cells more than once.
    ///
    /// Any center and radius are accepted. Sums too large for `usize`
    /// saturate.
    pub fn range_sum(&self, center: isize, radius: usize) -> usize {
        let len = self.cells.len() as u128;
        let span = 2 * radius as u128 + 1;
        let laps = span / len;
        let rest = (span % len) as usize;

        let start = (self.normalize(center) as i128 - radius as i128).rem_euclid(len as i128);
        let partial: usize = (0..rest)
            .map(|k| self.cells[(start as usize + k) % self.cells.len()] as usize)
            .sum();

        let full = if laps == 0 {
            0
        } else {
            laps * self.population() as u128
        };
        let total = full + partial as u128;
        usize::try_from(total).unwrap_or(usize::MAX)
    }

    /// Returns the cells at wrapping indices `start..stop`.
    pub fn window(&self, start: isize, stop: isize) -> Vec<u8> {
        (start..stop).map(|i| self.get(i)).collect()
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Iterates over cells in order.
    pub fn iter(&self) -> std::slice::Iter<'_, u8> {
        self.cells.iter()
    }

    /// Returns the cells as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// Swaps in a generation built from this ring's own length.
    pub(crate) fn install(&mut self, cells: Vec<u8>) -> Generation {
        debug_assert_eq!(cells.len(), self.cells.len());
        let previous = std::mem::replace(&mut self.cells, cells);
        Generation(previous.into_boxed_slice())
    }
}

impl<'a> IntoIterator for &'a Ring {
    type Item = &'a u8;
    type IntoIter = std::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_binary(cells: &[u8]) -> Result<()> {
    match cells.iter().find(|&&c| c > 1) {
        Some(&bad) => Err(AutomataError::InvalidValue(bad)),
        None => Ok(()),
    }
}

/// An immutable snapshot of one generation.
///
/// Detached from the ring it came from; later mutation of the ring does not
/// affect it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Generation(Box<[u8]>);

impl Generation {
    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.0.iter().filter(|&&c| c == 1).count()
    }

    /// Returns the cells as a vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl Deref for Generation {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8]> for Generation {
    fn eq(&self, other: &[u8]) -> bool {
        &*self.0 == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Generation {
    fn eq(&self, other: &[u8; N]) -> bool {
        &*self.0 == other.as_slice()
    }
}

impl PartialEq<Vec<u8>> for Generation {
    fn eq(&self, other: &Vec<u8>) -> bool {
        &*self.0 == other.as_slice()
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.0.iter() {
            write!(f, "{} ", cell)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ring_rejects_empty() {
        assert_eq!(Ring::new(vec![]), Err(AutomataError::InvalidLength));
        assert_eq!(
            Ring::from_truthy(Vec::<bool>::new()),
            Err(AutomataError::InvalidLength)
        );
        assert!(!Ring::new(vec![0]).unwrap().is_empty());
    }

    #[test]
    fn test_ring_rejects_non_binary() {
        assert_eq!(
            Ring::new(vec![0, 1, 2]),
            Err(AutomataError::InvalidValue(2))
        );
    }

    #[test]
    fn test_from_truthy_coerces() {
        let ring = Ring::from_truthy([0, 3, -1, 0, 7]).unwrap();
        assert_eq!(ring.as_slice(), &[0, 1, 1, 0, 1]);

        let ring = Ring::from_truthy([true, false, true]).unwrap();
        assert_eq!(ring.as_slice(), &[1, 0, 1]);

        let ring = Ring::from_truthy([0.0, 0.5]).unwrap();
        assert_eq!(ring.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_wrapping_get() {
        let ring = Ring::new(vec![1, 0, 0, 0, 1, 0]).unwrap();
        assert_eq!(ring.get(-1), 0);
        assert_eq!(ring.get(-2), 1);
        assert_eq!(ring.get(6), 1);
        assert_eq!(ring.get(10), 1);
        assert_eq!(ring.get(-12), 1);
    }

    #[test]
    fn test_set_wraps_and_validates() {
        let mut ring = Ring::new(vec![0; 4]).unwrap();
        ring.set(-1, 1).unwrap();
        ring.set(4, 1).unwrap();
        assert_eq!(ring.as_slice(), &[1, 0, 0, 1]);

        assert_eq!(ring.set(2, 5), Err(AutomataError::InvalidValue(5)));
        assert_eq!(ring.as_slice(), &[1, 0, 0, 1]);
    }

    #[test]
    fn test_replace_length_mismatch_leaves_cells() {
        let mut ring = Ring::new(vec![1, 0, 1]).unwrap();
        let before = ring.snapshot();

        assert_eq!(
            ring.replace(vec![0, 0]),
            Err(AutomataError::LengthMismatch {
                expected: 3,
                got: 2
            })
        );
        assert_eq!(ring.snapshot(), before);

        assert_eq!(
            ring.replace(vec![0, 9, 0]),
            Err(AutomataError::InvalidValue(9))
        );
        assert_eq!(ring.snapshot(), before);

        ring.replace(vec![0, 1, 0]).unwrap();
        assert_eq!(ring.as_slice(), &[0, 1, 0]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut ring = Ring::new(vec![0, 0, 0]).unwrap();
        let snap = ring.snapshot();
        ring.set(1, 1).unwrap();
        assert_eq!(snap, [0, 0, 0]);
        assert_eq!(ring.snapshot(), [0, 1, 0]);
    }

    #[test]
    fn test_range_sum_wraps() {
        let ring = Ring::new(vec![1, 0, 0, 0, 0, 0, 0, 1]).unwrap();
        assert_eq!(ring.range_sum(0, 1), 2);
        assert_eq!(ring.range_sum(7, 1), 2);
        assert_eq!(ring.range_sum(3, 1), 0);
        assert_eq!(ring.range_sum(3, 0), 0);
    }

    #[test]
    fn test_range_sum_wider_than_ring() {
        // 11 indices over 3 cells: cell 0 appears 4 times, cells 1 and 2 three times each.
        let ring = Ring::new(vec![1, 0, 1]).unwrap();
        assert_eq!(ring.range_sum(0, 5), 4 + 3);
    }

    #[test]
    fn test_range_sum_extreme_centers() {
        let ring = Ring::new(vec![1, 1, 1]).unwrap();
        assert_eq!(ring.get(isize::MAX), 1);
        assert_eq!(ring.range_sum(isize::MAX, 1), 3);
        assert_eq!(ring.range_sum(isize::MIN, 1), 3);

        let ring = Ring::new(vec![1, 0, 0, 0, 0]).unwrap();
        let last = isize::MAX;
        let expected: usize = [-1, 0, 1].iter().map(|d| ring.get(last + d - 1) as usize).sum();
        assert_eq!(ring.range_sum(last - 1, 1), expected);
    }

    #[test]
    fn test_range_sum_huge_radius() {
        let ring = Ring::new(vec![1, 1, 1]).unwrap();
        assert_eq!(ring.range_sum(0, usize::MAX), usize::MAX);

        let ring = Ring::new(vec![1, 0, 0, 0]).unwrap();
        // 2^20 + 1 indices: 2^18 full laps plus one extra cell at the start.
        let radius = 1 << 19;
        let start = ring.normalize(-(radius as isize));
        assert_eq!(ring.range_sum(0, radius), (1 << 18) + ring.get(start as isize) as usize);
    }

    #[test]
    fn test_window() {
        let ring = Ring::new(vec![1, 1, 0, 0]).unwrap();
        assert_eq!(ring.window(-1, 2), vec![0, 1, 1]);
        assert_eq!(ring.window(2, 2), Vec::<u8>::new());
    }

    #[test]
    fn test_generation_display() {
        let ring = Ring::new(vec![1, 0, 1]).unwrap();
        assert_eq!(ring.snapshot().to_string(), "1 0 1 ");
        assert_eq!(ring.snapshot().population(), 2);
    }

    proptest! {
        #[test]
        fn prop_wraparound(cells in prop::collection::vec(0u8..=1, 1..64)) {
            let ring = Ring::new(cells.clone()).unwrap();
            let len = ring.len() as isize;
            prop_assert_eq!(ring.get(-1), ring.get(len - 1));
            prop_assert_eq!(ring.get(len), ring.get(0));
            prop_assert_eq!(ring.snapshot().to_vec(), cells);
        }

        #[test]
        fn prop_replace_wrong_length_fails(
            cells in prop::collection::vec(0u8..=1, 1..32),
            other in prop::collection::vec(0u8..=1, 0..32),
        ) {
            prop_assume!(cells.len() != other.len());
            let mut ring = Ring::new(cells.clone()).unwrap();
            let err = ring.replace(other).unwrap_err();
            let is_mismatch = matches!(err, AutomataError::LengthMismatch { .. });
            prop_assert!(is_mismatch);
            prop_assert_eq!(ring.as_slice(), cells.as_slice());
        }
    }
}
