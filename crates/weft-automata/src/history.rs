//! Consumers of generations: cell sinks and activation history.
//!
//! A renderer does not color raw cells. It colors how recently each cell
//! fired. [`ActivationTracker`] keeps that countdown per cell.

/// Receives `(generation, cell, value)` triples from [`Automaton::drive`].
///
/// Implemented for any `FnMut(usize, usize, u8)`.
///
/// [`Automaton::drive`]: crate::Automaton::drive
pub trait CellSink {
    /// Accepts one cell of one generation.
    fn accept(&mut self, generation: usize, index: usize, value: u8);
}

impl<F: FnMut(usize, usize, u8)> CellSink for F {
    fn accept(&mut self, generation: usize, index: usize, value: u8) {
        self(generation, index, value)
    }
}

/// Default number of ticks a cell stays visible after it fires.
pub const DEFAULT_LIFETIME: u32 = 10;

/// Per-cell activation countdown.
///
/// A live cell whose countdown has run out is re-armed to `lifetime`. Each
/// observed row reports every running countdown and then decrements it, so a
/// cell that fires once is reported with ages `lifetime, lifetime - 1, ..., 1`
/// over consecutive rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationTracker {
    lifetime: u32,
    ages: Vec<u32>,
    pending: Vec<u8>,
    generation: Option<usize>,
    reported: Vec<Vec<u32>>,
}

impl ActivationTracker {
    /// Creates a tracker for rows of `width` cells.
    pub fn new(width: usize, lifetime: u32) -> Self {
        Self {
            lifetime,
            ages: vec![0; width],
            pending: Vec::with_capacity(width),
            generation: None,
            reported: Vec::new(),
        }
    }

    /// Creates a tracker with [`DEFAULT_LIFETIME`].
    pub fn with_default_lifetime(width: usize) -> Self {
        Self::new(width, DEFAULT_LIFETIME)
    }

    /// Ticks a cell stays visible after firing.
    pub fn lifetime(&self) -> u32 {
        self.lifetime
    }

    /// Current countdown per cell.
    pub fn ages(&self) -> &[u32] {
        &self.ages
    }

    /// Observes one row and returns the age reported for each cell.
    ///
    /// A reported age of 0 means the cell is not visible this tick. Rows of
    /// a different width resize the tracker, new cells starting idle.
    pub fn observe(&mut self, row: &[u8]) -> Vec<u32> {
        if row.len() != self.ages.len() {
            self.ages.resize(row.len(), 0);
        }
        let lifetime = self.lifetime;
        row.iter()
            .zip(self.ages.iter_mut())
            .map(|(&cell, age)| {
                if cell == 1 && *age == 0 {
                    *age = lifetime;
                }
                let reported = *age;
                *age = age.saturating_sub(1);
                reported
            })
            .collect()
    }

    /// Fraction of the lifetime remaining for a reported age, in `[0, 1]`.
    pub fn fade(&self, age: u32) -> f64 {
        if self.lifetime == 0 {
            return 0.0;
        }
        (age.min(self.lifetime) as f64) / (self.lifetime as f64)
    }

    /// Rows reported so far through [`CellSink`].
    ///
    /// A row is committed as soon as its last cell (index `width - 1`)
    /// arrives. A shorter row is committed when the next generation starts
    /// or [`finish`](Self::finish) is called.
    pub fn reported(&self) -> &[Vec<u32>] {
        &self.reported
    }

    /// Drains the rows reported so far.
    pub fn take_reported(&mut self) -> Vec<Vec<u32>> {
        std::mem::take(&mut self.reported)
    }

    /// Commits the row assembled through [`CellSink`], if any.
    pub fn finish(&mut self) {
        if self.generation.take().is_some() {
            let row = std::mem::take(&mut self.pending);
            let ages = self.observe(&row);
            self.reported.push(ages);
        }
    }
}

impl CellSink for ActivationTracker {
    fn accept(&mut self, generation: usize, index: usize, value: u8) {
        if self.generation != Some(generation) {
            self.finish();
            self.generation = Some(generation);
        }
        if index >= self.pending.len() {
            self.pending.resize(index + 1, 0);
        }
        self.pending[index] = value;
        if index + 1 == self.ages.len() {
            self.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Automaton, FnSource, Perturbation};

    #[test]
    fn test_single_activation_fades() {
        let mut tracker = ActivationTracker::new(1, 3);
        assert_eq!(tracker.observe(&[1]), vec![3]);
        assert_eq!(tracker.observe(&[0]), vec![2]);
        assert_eq!(tracker.observe(&[0]), vec![1]);
        assert_eq!(tracker.observe(&[0]), vec![0]);
        assert_eq!(tracker.observe(&[0]), vec![0]);
    }

    #[test]
    fn test_live_cell_does_not_rearm_until_expired() {
        let mut tracker = ActivationTracker::new(1, 2);
        let ages: Vec<u32> = (0..5).map(|_| tracker.observe(&[1])[0]).collect();
        assert_eq!(ages, vec![2, 1, 2, 1, 2]);
    }

    #[test]
    fn test_observe_resizes() {
        let mut tracker = ActivationTracker::with_default_lifetime(2);
        assert_eq!(tracker.observe(&[1, 0, 1]), vec![10, 0, 10]);
        assert_eq!(tracker.ages(), &[9, 0, 9]);
    }

    #[test]
    fn test_fade() {
        let tracker = ActivationTracker::new(4, 10);
        assert_eq!(tracker.fade(10), 1.0);
        assert_eq!(tracker.fade(5), 0.5);
        assert_eq!(tracker.fade(0), 0.0);
        assert_eq!(tracker.fade(20), 1.0);
        assert_eq!(ActivationTracker::new(1, 0).fade(3), 0.0);
    }

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        let mut sink = |_g: usize, _i: usize, v: u8| count += v as usize;
        sink.accept(0, 0, 1);
        sink.accept(0, 1, 1);
        sink.accept(0, 2, 0);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_tracker_as_sink() {
        let seed = [1, 0, 1, 1, 0, 0, 1, 0, 1, 0];
        let mut automaton =
            Automaton::from_seed(seed, Perturbation::NONE, FnSource(|| 0.5)).unwrap();
        let mut tracker = ActivationTracker::new(10, 3);
        automaton.drive(2, &mut tracker);

        let reported = tracker.reported();
        assert_eq!(reported.len(), 2);
        assert_eq!(reported[0], vec![3, 0, 3, 3, 0, 0, 3, 0, 3, 0]);
        // Second row [1, 0, 1, 0, 1, 1, 1, 0, 1, 0]: armed cells keep counting down.
        assert_eq!(reported[1], vec![2, 0, 2, 2, 3, 3, 2, 0, 2, 0]);
    }

    #[test]
    fn test_drive_commits_every_row() {
        let mut automaton =
            Automaton::from_sha256(b"Input Test", Some(50), Perturbation::NONE, FnSource(|| 0.5))
                .unwrap();
        let mut tracker = ActivationTracker::with_default_lifetime(50);
        automaton.drive(3, &mut tracker);
        assert_eq!(tracker.reported().len(), 3);

        let rows = tracker.take_reported();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == 50));
        assert!(tracker.reported().is_empty());

        automaton.drive(2, &mut tracker);
        assert_eq!(tracker.reported().len(), 2);
    }

    #[test]
    fn test_sink_places_cells_by_index() {
        let mut tracker = ActivationTracker::new(3, 4);
        tracker.accept(0, 1, 1);
        tracker.accept(0, 0, 0);
        tracker.accept(0, 2, 1);
        assert_eq!(tracker.reported(), &[vec![0, 4, 4]]);
    }

    #[test]
    fn test_finish_commits_short_row() {
        let mut tracker = ActivationTracker::new(4, 2);
        tracker.accept(0, 0, 1);
        tracker.accept(0, 1, 0);
        assert!(tracker.reported().is_empty());
        tracker.finish();
        assert_eq!(tracker.reported(), &[vec![2, 0]]);
        tracker.finish();
        assert_eq!(tracker.reported().len(), 1);
    }
}
