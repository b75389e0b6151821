// Separator lines and grid-of-cells decomposition.
//
// Many ARC inputs are a lattice of rectangular cells divided by full rows
// and columns of one color. A full line counts as a separator when a line
// next to its run holds some other color. The separator color is often the
// most frequent one, so the inferred background is only rejected when it
// also shows up off its full lines; an explicit background never separates.
// The cells between consecutive lines are computed from
// `[-1] + indices + [length]` as half-open ranges `(b[i] + 1)..b[i + 1]`.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::core::{GridRegion, Result};
use super::grid::Grid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorLines {
    pub color: u8,
    /// Indices of rows made entirely of `color`, ascending.
    pub rows: Vec<usize>,
    /// Indices of columns made entirely of `color`, ascending.
    pub cols: Vec<usize>,
}

/// Colors filling at least one full row and one full column, ascending by
/// color value.
pub fn find_separator_lines(grid: &Grid) -> Vec<SeparatorLines> {
    full_lines(grid)
        .into_iter()
        .filter(|s| !s.rows.is_empty() && !s.cols.is_empty())
        .collect()
}

/// Like `find_separator_lines`, but a single full row or column is enough.
/// Covers grids split along one axis only.
pub fn find_axis_separator_lines(grid: &Grid) -> Vec<SeparatorLines> {
    full_lines(grid)
}

/// The lowest-numbered color from `find_separator_lines`.
pub fn primary_separator(grid: &Grid) -> Option<SeparatorLines> {
    find_separator_lines(grid).into_iter().next()
}

fn full_lines(grid: &Grid) -> Vec<SeparatorLines> {
    if grid.is_empty() {
        return Vec::new();
    }
    let mut by_color: BTreeMap<u8, SeparatorLines> = BTreeMap::new();

    for (y, row) in grid.rows().enumerate() {
        if let Some(c) = uniform(row.iter().copied()) {
            entry(&mut by_color, c).rows.push(y);
        }
    }
    for x in 0..grid.width() {
        let Some(col) = grid.column(x) else { continue };
        if let Some(c) = uniform(col.into_iter()) {
            entry(&mut by_color, c).cols.push(x);
        }
    }

    by_color
        .into_values()
        .filter_map(|mut lines| {
            let color = lines.color;
            if grid.background_override() == Some(color) {
                return None;
            }
            lines.rows = keep_flanked(&lines.rows, grid.height(), |y| {
                grid.row(y).is_some_and(|r| r.iter().any(|&c| c != color))
            });
            lines.cols = keep_flanked(&lines.cols, grid.width(), |x| {
                grid.column(x).is_some_and(|c| c.iter().any(|&v| v != color))
            });
            if lines.rows.is_empty() && lines.cols.is_empty() {
                return None;
            }
            if color == grid.background_color() && !covers_color(grid, &lines) {
                return None;
            }
            Some(lines)
        })
        .collect()
}

fn uniform(mut cells: impl Iterator<Item = u8>) -> Option<u8> {
    let c0 = cells.next()?;
    cells.all(|c| c == c0).then_some(c0)
}

/// Keeps each run of adjacent line indices whose flanking line on either
/// side holds another color.
fn keep_flanked(indices: &[usize], len: usize, differs: impl Fn(usize) -> bool) -> Vec<usize> {
    let mut kept = Vec::new();
    let mut start = 0;
    while start < indices.len() {
        let mut end = start;
        while end + 1 < indices.len() && indices[end + 1] == indices[end] + 1 {
            end += 1;
        }
        let (first, last) = (indices[start], indices[end]);
        if (first > 0 && differs(first - 1)) || (last + 1 < len && differs(last + 1)) {
            kept.extend_from_slice(&indices[start..=end]);
        }
        start = end + 1;
    }
    kept
}

/// Every cell of the separator color lies on one of its full lines.
fn covers_color(grid: &Grid, lines: &SeparatorLines) -> bool {
    grid.cells()
        .filter(|p| p.value == lines.color)
        .all(|p| lines.rows.contains(&p.y) || lines.cols.contains(&p.x))
}

fn entry(by_color: &mut BTreeMap<u8, SeparatorLines>, color: u8) -> &mut SeparatorLines {
    by_color.entry(color).or_insert_with(|| SeparatorLines {
        color,
        rows: Vec::new(),
        cols: Vec::new(),
    })
}

/// `[-1] + indices + [len]`.
pub fn boundaries(indices: &[usize], len: usize) -> Vec<isize> {
    let mut out = Vec::with_capacity(indices.len() + 2);
    out.push(-1);
    out.extend(indices.iter().map(|&i| i as isize));
    out.push(len as isize);
    out
}

/// Half-open spans between consecutive boundaries. Empty spans, from
/// adjacent separators or a separator on the edge, are dropped.
pub fn cell_ranges(bounds: &[isize]) -> Vec<Range<usize>> {
    bounds
        .windows(2)
        .filter_map(|w| {
            let start = (w[0] + 1) as usize;
            let end = w[1] as usize;
            (start < end).then_some(start..end)
        })
        .collect()
}

impl SeparatorLines {
    pub fn row_bounds(&self, height: usize) -> Vec<isize> {
        boundaries(&self.rows, height)
    }

    pub fn col_bounds(&self, width: usize) -> Vec<isize> {
        boundaries(&self.cols, width)
    }

    /// Regions of the cells between separators, indexed `[cell_row][cell_col]`.
    pub fn cell_regions(&self, grid: &Grid) -> Vec<Vec<GridRegion>> {
        let row_spans = cell_ranges(&self.row_bounds(grid.height()));
        let col_spans = cell_ranges(&self.col_bounds(grid.width()));
        row_spans
            .iter()
            .map(|r| {
                col_spans
                    .iter()
                    .map(|c| GridRegion::new(c.start, r.start, c.end - 1, r.end - 1))
                    .collect()
            })
            .collect()
    }

    /// The cells themselves as sub-grids, indexed `[cell_row][cell_col]`.
    pub fn split_cells(&self, grid: &Grid) -> Result<Vec<Vec<Grid>>> {
        self.cell_regions(grid)
            .iter()
            .map(|row| row.iter().map(|region| grid.sub_grid(region)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice() -> Grid {
        Grid::new(vec![
            vec![0, 1, 5, 0, 0],
            vec![0, 0, 5, 1, 0],
            vec![5, 5, 5, 5, 5],
            vec![0, 0, 5, 0, 0],
            vec![1, 0, 5, 0, 1],
        ])
        .unwrap()
    }

    #[test]
    fn detect_lattice() {
        let seps = find_separator_lines(&lattice());
        assert_eq!(
            seps,
            vec![SeparatorLines { color: 5, rows: vec![2], cols: vec![2] }]
        );
    }

    #[test]
    fn scattered_background_is_not_a_separator() {
        let g = Grid::new(vec![
            vec![0, 0, 0, 0],
            vec![0, 2, 0, 1],
            vec![0, 0, 0, 0],
            vec![0, 3, 3, 0],
        ])
        .unwrap();
        assert!(find_axis_separator_lines(&g).is_empty());
        assert!(primary_separator(&g).is_none());
    }

    fn dominant_lattice_rows() -> Vec<Vec<u8>> {
        let blocks = [[1, 2, 3], [4, 6, 7], [8, 9, 0]];
        let mut rows = vec![vec![5u8; 8]; 8];
        for (by, block_row) in blocks.iter().enumerate() {
            for (bx, &color) in block_row.iter().enumerate() {
                for dy in 0..2 {
                    for dx in 0..2 {
                        rows[by * 3 + dy][bx * 3 + dx] = color;
                    }
                }
            }
        }
        rows
    }

    #[test]
    fn dominant_separator_color() {
        let g = Grid::new(dominant_lattice_rows()).unwrap();
        assert_eq!(g.background_color(), 5);
        let sep = primary_separator(&g).unwrap();
        assert_eq!(sep, SeparatorLines { color: 5, rows: vec![2, 5], cols: vec![2, 5] });

        let cells = sep.split_cells(&g).unwrap();
        assert_eq!(cells.len(), 3);
        assert!(cells.iter().all(|row| row.len() == 3));
        assert_eq!(cells[1][1], Grid::filled(2, 2, 6));
        assert_eq!(cells[2][2], Grid::filled(2, 2, 0));
    }

    #[test]
    fn explicit_background_never_separates() {
        let g = Grid::with_background(dominant_lattice_rows(), 5).unwrap();
        assert!(find_axis_separator_lines(&g).is_empty());
    }

    #[test]
    fn uniform_grid_has_no_separators() {
        assert!(find_axis_separator_lines(&Grid::filled(3, 3, 5)).is_empty());
    }

    #[test]
    fn thick_band_kept_whole() {
        let g = Grid::new(vec![
            vec![1, 0, 2],
            vec![4, 4, 4],
            vec![4, 4, 4],
            vec![0, 3, 0],
        ])
        .unwrap();
        let axis = find_axis_separator_lines(&g);
        assert_eq!(axis.len(), 1);
        assert_eq!(axis[0].rows, vec![1, 2]);
        let spans = cell_ranges(&axis[0].row_bounds(g.height()));
        assert_eq!(spans, vec![0..1, 3..4]);
    }

    #[test]
    fn flanked_runs() {
        let differs = |i: usize| i != 3;
        assert_eq!(keep_flanked(&[1, 2], 5, differs), vec![1, 2]);
        assert_eq!(keep_flanked(&[0, 1, 2], 3, |_| true), Vec::<usize>::new());
        assert_eq!(keep_flanked(&[4], 5, |i| i != 3), Vec::<usize>::new());
    }

    #[test]
    fn strict_needs_both_axes() {
        let g = Grid::new(vec![
            vec![0, 1, 0],
            vec![4, 4, 4],
            vec![0, 0, 2],
        ])
        .unwrap();
        assert!(find_separator_lines(&g).is_empty());
        let axis = find_axis_separator_lines(&g);
        assert_eq!(axis.len(), 1);
        assert_eq!(axis[0].rows, vec![1]);
        assert!(axis[0].cols.is_empty());
    }

    #[test]
    fn axis_colors_sorted_ascending() {
        let g = Grid::new(vec![
            vec![0, 0, 0, 0],
            vec![8, 8, 8, 8],
            vec![0, 1, 0, 0],
            vec![3, 3, 3, 3],
            vec![0, 0, 0, 1],
        ])
        .unwrap();
        let colors: Vec<u8> = find_axis_separator_lines(&g).iter().map(|s| s.color).collect();
        assert_eq!(colors, vec![3, 8]);
    }

    #[test]
    fn primary_is_lowest_color() {
        let sep = primary_separator(&lattice()).unwrap();
        assert_eq!(sep.color, 5);
    }

    #[test]
    fn boundaries_wrap_indices() {
        assert_eq!(boundaries(&[2, 5], 8), vec![-1, 2, 5, 8]);
        assert_eq!(boundaries(&[], 3), vec![-1, 3]);
    }

    #[test]
    fn ranges_skip_edges_and_adjacent_lines() {
        assert_eq!(cell_ranges(&boundaries(&[0, 3], 5)), vec![1..3, 4..5]);
        assert_eq!(cell_ranges(&boundaries(&[1, 2], 4)), vec![0..1, 3..4]);
        assert_eq!(cell_ranges(&boundaries(&[], 3)), vec![0..3]);
    }

    #[test]
    fn lattice_cell_regions() {
        let g = lattice();
        let sep = primary_separator(&g).unwrap();
        let regions = sep.cell_regions(&g);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0], vec![GridRegion::new(0, 0, 1, 1), GridRegion::new(3, 0, 4, 1)]);
        assert_eq!(regions[1], vec![GridRegion::new(0, 3, 1, 4), GridRegion::new(3, 3, 4, 4)]);
    }

    #[test]
    fn lattice_split_cells() {
        let g = lattice();
        let cells = primary_separator(&g).unwrap().split_cells(&g).unwrap();
        assert_eq!(cells[0][0], Grid::new(vec![vec![0, 1], vec![0, 0]]).unwrap());
        assert_eq!(cells[0][1], Grid::new(vec![vec![0, 0], vec![1, 0]]).unwrap());
        assert_eq!(cells[1][1], Grid::new(vec![vec![0, 0], vec![0, 1]]).unwrap());
    }

    #[test]
    fn empty_grid_has_no_separators() {
        let g = Grid::new(Vec::new()).unwrap();
        assert!(find_axis_separator_lines(&g).is_empty());
    }
}
