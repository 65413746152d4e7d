use std::ops::RangeInclusive;

/// Widest the viewable window is allowed to grow.
pub const MAX_VIEWABLE: usize = 5;

/// Selection index plus the sliding viewable window over the record list.
///
/// Pure value state: navigation events mutate it between frames, the
/// render loop only reads it.
///
/// Invariants: `lower <= selected <= upper` and the window never exceeds
/// [`MAX_VIEWABLE`] records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarouselState {
    selected: usize,
    lower: usize,
    upper: usize,
    max_selectable: usize,
}

impl CarouselState {
    /// `item_count` must be non-zero; the feed loader guarantees this.
    pub fn new(item_count: usize) -> Self {
        debug_assert!(item_count > 0);
        let max_selectable = item_count.saturating_sub(1);
        Self {
            selected: 0,
            lower: 0,
            upper: max_selectable.min(MAX_VIEWABLE - 1),
            max_selectable,
        }
    }

    /// Moves the selection one record left; no-op at the first record.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;

            if self.selected < self.lower {
                self.lower -= 1;
                self.upper -= 1;
            }
        }
    }

    /// Moves the selection one record right; no-op at the last record.
    pub fn select_next(&mut self) {
        if self.selected < self.max_selectable {
            self.selected += 1;

            if self.selected > self.upper {
                self.lower += 1;
                self.upper += 1;
            }
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn lower(&self) -> usize {
        self.lower
    }

    pub fn upper(&self) -> usize {
        self.upper
    }

    /// Number of records inside the viewable window.
    pub fn viewable_count(&self) -> usize {
        self.upper - self.lower + 1
    }

    /// Indices drawn each frame: the viewable window plus one partially
    /// visible record beyond each edge, clamped to the record list.
    pub fn render_range(&self) -> RangeInclusive<usize> {
        self.lower.saturating_sub(1)..=(self.upper + 1).min(self.max_selectable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(state: &CarouselState) {
        assert!(state.lower() <= state.selected());
        assert!(state.selected() <= state.upper());
        assert!(state.viewable_count() <= MAX_VIEWABLE);
    }

    #[test]
    fn initial_window_spans_at_most_max_viewable() {
        let state = CarouselState::new(12);
        assert_eq!(state.selected(), 0);
        assert_eq!(state.lower(), 0);
        assert_eq!(state.upper(), 4);

        let small = CarouselState::new(3);
        assert_eq!(small.upper(), 2);
        assert_invariants(&small);
    }

    #[test]
    fn seven_nexts_over_twelve_records() {
        let mut state = CarouselState::new(12);
        for _ in 0..7 {
            state.select_next();
            assert_invariants(&state);
        }
        assert_eq!(state.selected(), 7);
        assert_eq!(state.lower(), 3);
        assert_eq!(state.upper(), 7);
    }

    #[test]
    fn previous_at_first_record_is_a_noop() {
        let mut state = CarouselState::new(4);
        let before = state;
        state.select_previous();
        assert_eq!(state, before);
    }

    #[test]
    fn next_at_last_record_is_a_noop() {
        let mut state = CarouselState::new(4);
        for _ in 0..10 {
            state.select_next();
        }
        assert_eq!(state.selected(), 3);
        let before = state;
        state.select_next();
        assert_eq!(state, before);
    }

    #[test]
    fn window_tracks_selection_through_a_long_walk() {
        let mut state = CarouselState::new(9);
        // Zig-zag across the whole list a few times
        let steps: [i32; 7] = [7, -3, 5, -9, 2, 8, -4];
        for &step in &steps {
            for _ in 0..step.abs() {
                if step > 0 {
                    state.select_next();
                } else {
                    state.select_previous();
                }
                assert_invariants(&state);
            }
        }
    }

    #[test]
    fn render_range_extends_one_past_each_edge() {
        let mut state = CarouselState::new(12);
        assert_eq!(state.render_range(), 0..=5);

        for _ in 0..7 {
            state.select_next();
        }
        // lower=3, upper=7
        assert_eq!(state.render_range(), 2..=8);

        for _ in 0..4 {
            state.select_next();
        }
        // pinned to the right edge
        assert_eq!(state.render_range(), 6..=11);
    }

    #[test]
    fn single_record_never_moves() {
        let mut state = CarouselState::new(1);
        state.select_next();
        state.select_previous();
        assert_eq!(state.selected(), 0);
        assert_eq!(state.render_range(), 0..=0);
    }
}
