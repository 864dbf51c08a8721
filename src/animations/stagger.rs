//! Per-element delays for cascading one animation across a group of targets.

use std::sync::{Arc, Mutex, PoisonError};

use super::easing::Easing;

/// Delay per step, or a `[min, max]` range spread across the group
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaggerValue {
    Fixed(f64),
    Range(f64, f64),
}

impl From<f64> for StaggerValue {
    fn from(delay: f64) -> Self {
        StaggerValue::Fixed(delay)
    }
}

impl From<[f64; 2]> for StaggerValue {
    fn from([min, max]: [f64; 2]) -> Self {
        StaggerValue::Range(min, max)
    }
}

impl From<(f64, f64)> for StaggerValue {
    fn from((min, max): (f64, f64)) -> Self {
        StaggerValue::Range(min, max)
    }
}

/// Element the cascade starts from
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StaggerFrom {
    #[default]
    First,
    Last,
    Center,
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaggerDirection {
    #[default]
    Normal,
    Reverse,
    /// Every other element runs in reverse
    Alternate,
}

/// Traversal order across a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridOrder {
    #[default]
    RowFirst,
    ColumnFirst,
    Diagonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaggerGrid {
    pub cols: usize,
    pub order: GridOrder,
}

#[derive(Debug, Clone)]
pub struct StaggerOptions {
    /// Base delay added to every element
    pub start: f64,
    pub from: StaggerFrom,
    pub direction: StaggerDirection,
    pub grid: Option<StaggerGrid>,
    /// Applied to the normalized distance from the anchor
    pub easing: Easing,
}

impl Default for StaggerOptions {
    fn default() -> Self {
        Self {
            start: 0.0,
            from: StaggerFrom::First,
            direction: StaggerDirection::Normal,
            grid: None,
            easing: Easing::linear(),
        }
    }
}

impl StaggerOptions {
    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn with_from(mut self, from: StaggerFrom) -> Self {
        self.from = from;
        self
    }

    pub fn with_direction(mut self, direction: StaggerDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_grid(mut self, cols: usize, order: GridOrder) -> Self {
        self.grid = Some(StaggerGrid { cols, order });
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Diagonal ranks for the last `total` seen
type RankCache = Arc<Mutex<Option<(usize, Arc<[usize]>)>>>;

#[derive(Debug, Clone)]
pub struct Stagger {
    value: StaggerValue,
    options: StaggerOptions,
    diagonal_ranks: RankCache,
}

impl Stagger {
    pub fn new(value: impl Into<StaggerValue>, options: StaggerOptions) -> Self {
        Self {
            value: value.into(),
            options,
            diagonal_ranks: RankCache::default(),
        }
    }

    /// Delay in milliseconds for element `index` of `total`
    pub fn delay(&self, index: usize, total: usize) -> f64 {
        let start = self.options.start;
        if total <= 1 {
            return start;
        }

        let last = total - 1;
        let diagonal = self.diagonal_ranks(total);
        let rank_of = |i: usize| {
            let i = i.min(last);
            let rank = match &diagonal {
                Some(ranks) => ranks[i],
                None => self.rank(i, total),
            };
            rank as f64
        };

        let rank = rank_of(index);
        let anchor = match self.options.from {
            StaggerFrom::First => 0.0,
            StaggerFrom::Last => last as f64,
            StaggerFrom::Center => last as f64 / 2.0,
            StaggerFrom::Index(i) => rank_of(i),
        };

        let max_distance = anchor.max(last as f64 - anchor);
        if max_distance <= 0.0 {
            return start;
        }

        let distance = (rank - anchor).abs();
        let distance = match self.options.direction {
            StaggerDirection::Normal => distance,
            StaggerDirection::Reverse => max_distance - distance,
            StaggerDirection::Alternate if rank as usize % 2 == 1 => max_distance - distance,
            StaggerDirection::Alternate => distance,
        };

        let eased = self.options.easing.apply(distance / max_distance);
        match self.value {
            StaggerValue::Fixed(step) => start + eased * max_distance * step,
            StaggerValue::Range(min, max) => start + min + eased * (max - min),
        }
    }

    /// Position of `index` in row-first or column-first traversal
    fn rank(&self, index: usize, total: usize) -> usize {
        match self.options.grid.filter(|g| g.cols > 0) {
            Some(StaggerGrid {
                cols,
                order: GridOrder::ColumnFirst,
            }) => {
                let (row, col) = (index / cols, index % cols);
                let (full_rows, last_row_len) = (total / cols, total % cols);
                col * full_rows + col.min(last_row_len) + row
            }
            _ => index,
        }
    }

    /// Diagonal traversal has no closed form, so its ranks are sorted once
    /// per group size
    fn diagonal_ranks(&self, total: usize) -> Option<Arc<[usize]>> {
        let grid = self
            .options
            .grid
            .filter(|g| g.cols > 0 && g.order == GridOrder::Diagonal)?;

        let mut cache = self
            .diagonal_ranks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_total, ranks)) = cache.as_ref() {
            if *cached_total == total {
                return Some(ranks.clone());
            }
        }

        let cell = |i: usize| (i / grid.cols, i % grid.cols);
        let mut order: Vec<usize> = (0..total).collect();
        order.sort_by_key(|&i| {
            let (row, col) = cell(i);
            (row + col, row)
        });

        let mut ranks = vec![0; total];
        for (rank, index) in order.into_iter().enumerate() {
            ranks[index] = rank;
        }
        let ranks: Arc<[usize]> = ranks.into();
        *cache = Some((total, ranks.clone()));
        Some(ranks)
    }
}

/// Build a `(index, total) -> delay` function.
///
/// Delays depend only on an element's position in the group, so the
/// callback takes no target argument.
pub fn stagger(
    value: impl Into<StaggerValue>,
    options: StaggerOptions,
) -> impl Fn(usize, usize) -> f64 + Clone + Send + Sync {
    let stagger = Stagger::new(value, options);
    move |index, total| stagger.delay(index, total)
}
