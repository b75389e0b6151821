// Categorical 2D grid for ARC-AGI.
//
// Cells are addressed as (x, y) = (column, row), so `get(x, y)` reads
// `rows[y][x]`. Access is bounds-checked: `get`/`set` return an error
// outside the grid, `try_get` takes signed coordinates and yields `None`
// for neighbour probing past the edges.

use std::cell::OnceCell;
use std::fmt;

use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GridError, GridPoint, GridRegion, Result};
use super::objects::{detect_objects, DetectConfig, DetectedObject};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    rows: Vec<Vec<u8>>,
    width: usize,
    background: Option<u8>,
    background_cache: OnceCell<u8>,
}

impl Grid {
    /// Builds a grid, rejecting rows of unequal length.
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::Shape { row, expected: width, found: r.len() });
        }
        Ok(Self {
            rows,
            width,
            background: None,
            background_cache: OnceCell::new(),
        })
    }

    pub fn with_background(rows: Vec<Vec<u8>>, background: u8) -> Result<Self> {
        let mut grid = Self::new(rows)?;
        grid.background = Some(background);
        Ok(grid)
    }

    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            rows: vec![vec![value; width]; height],
            width: if height == 0 { 0 } else { width },
            background: None,
            background_cache: OnceCell::new(),
        }
    }

    pub fn height(&self) -> usize { self.rows.len() }
    pub fn width(&self) -> usize { self.width }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width == 0
    }

    pub fn get(&self, x: usize, y: usize) -> Result<u8> {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Lenient lookup: `None` for any coordinate off the grid, negatives included.
    pub fn try_get(&self, x: isize, y: isize) -> Option<u8> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) -> Result<()> {
        let err = self.out_of_bounds(x, y);
        let cell = self
            .rows
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(err)?;
        *cell = value;
        self.background_cache.take();
        Ok(())
    }

    /// Writes a cell the caller already knows is in range.
    pub(crate) fn paint(&mut self, x: usize, y: usize, value: u8) {
        self.rows[y][x] = value;
        self.background_cache.take();
    }

    pub fn row(&self, y: usize) -> Option<&[u8]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    pub fn column(&self, x: usize) -> Option<Vec<u8>> {
        if x >= self.width { return None; }
        Some(self.rows.iter().map(|row| row[x]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, &value)| GridPoint::new(x, y, value))
        })
    }

    /// Explicit background if one was set, otherwise the most frequent
    /// color (lowest value on ties). Computed once and cached until the
    /// next mutation.
    pub fn background_color(&self) -> u8 {
        if let Some(bg) = self.background {
            return bg;
        }
        *self.background_cache.get_or_init(|| most_frequent(&self.rows))
    }

    pub fn set_background(&mut self, background: Option<u8>) {
        self.background = background;
    }

    pub fn background_override(&self) -> Option<u8> {
        self.background
    }

    pub fn color_counts(&self) -> FxHashMap<u8, usize> {
        let mut counts = FxHashMap::default();
        for row in &self.rows {
            for &c in row {
                *counts.entry(c).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn unique_colors(&self) -> Vec<u8> {
        let mut colors: Vec<u8> = self.color_counts().into_keys().collect();
        colors.sort_unstable();
        colors
    }

    /// True iff both grids have the same shape and cells. Unless `silent`,
    /// a mismatch is reported at warn level.
    pub fn compare(&self, other: &Grid, silent: bool) -> bool {
        if self.width != other.width || self.height() != other.height() {
            if !silent {
                warn!(
                    "grid size mismatch: {}x{} vs {}x{}",
                    self.width, self.height(), other.width, other.height()
                );
            }
            return false;
        }
        let mut diffs = self
            .cells()
            .filter(|p| other.rows[p.y][p.x] != p.value);
        let Some(first) = diffs.next() else { return true };
        if !silent {
            warn!(
                "grids differ in {} cell(s), first at ({}, {}): {} vs {}",
                1 + diffs.count(),
                first.x,
                first.y,
                first.value,
                other.rows[first.y][first.x]
            );
        }
        false
    }

    /// Copy of the cells under `region`; the background override carries over.
    pub fn sub_grid(&self, region: &GridRegion) -> Result<Grid> {
        if region.x2 >= self.width || region.y2 >= self.height() {
            return Err(self.out_of_bounds(region.x2, region.y2));
        }
        let rows = self.rows[region.y1..=region.y2]
            .iter()
            .map(|row| row[region.x1..=region.x2].to_vec())
            .collect();
        Ok(Grid {
            rows,
            width: region.width(),
            background: self.background,
            background_cache: OnceCell::new(),
        })
    }

    pub fn detect_objects(&self, config: &DetectConfig) -> Vec<DetectedObject<'_>> {
        detect_objects(self, config)
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> GridError {
        GridError::OutOfBounds { x, y, width: self.width, height: self.height() }
    }
}

fn most_frequent(rows: &[Vec<u8>]) -> u8 {
    let mut counts = [0usize; 256];
    for row in rows {
        for &c in row {
            counts[c as usize] += 1;
        }
    }
    let mut best = 0u8;
    for c in 1..=255u8 {
        if counts[c as usize] > counts[best as usize] {
            best = c;
        }
    }
    best
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other, true)
    }
}

impl Eq for Grid {}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self> {
        Grid::new(rows)
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, c) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
