// Connected-component detection over a Grid.
//
// Cells passing the color filter are grouped into maximal connected
// components under 4- or 8-adjacency. Components are emitted in the
// row-major order of their seed cell, and each component's points are
// kept in the order the traversal reached them.

use log::debug;
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::core::{GridPoint, GridRegion, Result};
use super::grid::Grid;

const CARDINAL: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const ALL_DIRS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Never part of any component. Takes precedence over `required_colors`.
    pub ignore_colors: FxHashSet<u8>,
    /// When non-empty, only these colors may form components.
    pub required_colors: FxHashSet<u8>,
    /// Join neighbours only when they carry the seed's exact color.
    pub single_color_only: bool,
    /// 8-connectivity instead of 4.
    pub go_diagonal: bool,
}

impl DetectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-color components with the grid's background ignored.
    pub fn foreground(grid: &Grid) -> Self {
        Self::new().ignore([grid.background_color()]).single_color(true)
    }

    pub fn ignore(mut self, colors: impl IntoIterator<Item = u8>) -> Self {
        self.ignore_colors.extend(colors);
        self
    }

    pub fn require(mut self, colors: impl IntoIterator<Item = u8>) -> Self {
        self.required_colors.extend(colors);
        self
    }

    pub fn single_color(mut self, on: bool) -> Self {
        self.single_color_only = on;
        self
    }

    pub fn diagonal(mut self, on: bool) -> Self {
        self.go_diagonal = on;
        self
    }

    pub fn accepts(&self, color: u8) -> bool {
        !self.ignore_colors.contains(&color)
            && (self.required_colors.is_empty() || self.required_colors.contains(&color))
    }

    fn neighbours(&self) -> &'static [(isize, isize)] {
        if self.go_diagonal { &ALL_DIRS } else { &CARDINAL }
    }
}

/// One connected component. Borrows the grid it was found in.
#[derive(Debug, Clone)]
pub struct DetectedObject<'g> {
    grid: &'g Grid,
    pub region: GridRegion,
    pub points: Vec<GridPoint>,
    pub color: Option<u8>,
}

impl<'g> DetectedObject<'g> {
    fn from_points(grid: &'g Grid, points: Vec<GridPoint>) -> Option<Self> {
        let region = GridRegion::bounding(&points)?;
        let first = points[0].value;
        let color = points.iter().all(|p| p.value == first).then_some(first);
        Some(Self { grid, region, points, color })
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn size(&self) -> usize {
        self.points.len()
    }

    pub fn width(&self) -> usize { self.region.width() }
    pub fn height(&self) -> usize { self.region.height() }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.region.contains(x, y) && self.points.iter().any(|p| p.x == x && p.y == y)
    }

    /// Every cell under the bounding box, members or not, row-major.
    pub fn all_points(&self) -> Vec<GridPoint> {
        self.region
            .coords()
            .filter_map(|(x, y)| self.grid.get(x, y).ok().map(|v| GridPoint::new(x, y, v)))
            .collect()
    }

    pub fn colors(&self) -> Vec<u8> {
        let mut colors: Vec<u8> = self.points.iter().map(|p| p.value).collect();
        colors.sort_unstable();
        colors.dedup();
        colors
    }

    /// The parent grid's cells under the bounding box.
    pub fn sub_grid(&self) -> Result<Grid> {
        self.grid.sub_grid(&self.region)
    }

    /// The component alone, cut to its bounding box, non-members set to `fill`.
    pub fn to_grid(&self, fill: u8) -> Grid {
        let mut out = Grid::filled(self.width(), self.height(), fill);
        for p in &self.points {
            out.paint(p.x - self.region.x1, p.y - self.region.y1, p.value);
        }
        out
    }
}

/// Partitions the accepted cells of `grid` into connected components.
pub fn detect_objects<'g>(grid: &'g Grid, config: &DetectConfig) -> Vec<DetectedObject<'g>> {
    let (rows, cols) = (grid.height(), grid.width());
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let mut visited = vec![vec![false; cols]; rows];
    let mut objects = Vec::new();

    for seed in grid.cells() {
        if visited[seed.y][seed.x] || !config.accepts(seed.value) {
            continue;
        }
        visited[seed.y][seed.x] = true;
        let mut points = Vec::new();
        let mut stack = vec![seed];

        while let Some(p) = stack.pop() {
            points.push(p);
            for &(dx, dy) in config.neighbours() {
                let (nx, ny) = (p.x as isize + dx, p.y as isize + dy);
                let Some(value) = grid.try_get(nx, ny) else { continue };
                let (nx, ny) = (nx as usize, ny as usize);
                if visited[ny][nx] || !config.accepts(value) {
                    continue;
                }
                if config.single_color_only && value != seed.value {
                    continue;
                }
                visited[ny][nx] = true;
                stack.push(GridPoint::new(nx, ny, value));
            }
        }
        objects.extend(DetectedObject::from_points(grid, points));
    }

    debug!(
        "detected {} object(s) in {}x{} grid (diagonal={}, single_color={})",
        objects.len(), cols, rows, config.go_diagonal, config.single_color_only
    );
    objects
}
