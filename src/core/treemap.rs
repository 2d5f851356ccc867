use serde::{Deserialize, Serialize};

use crate::core::hierarchy::{Hierarchy, NodeId};
use crate::core::types::{ensure_non_negative, ensure_positive};
use crate::error::ChartResult;

/// Golden ratio target aspect used by the squarify tiling.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Rectangle assigned to one hierarchy node by [`TreemapLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TreemapCell {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl TreemapCell {
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y1 - self.y0
    }

    #[must_use]
    pub fn area(self) -> f64 {
        self.width() * self.height()
    }
}

/// Squarified treemap partition with uniform inner and outer padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreemapLayout {
    pub width: f64,
    pub height: f64,
    /// Gap between siblings.
    pub padding_inner: f64,
    /// Inset between a parent's edge and its children.
    pub padding_outer: f64,
    pub ratio: f64,
}

impl TreemapLayout {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding_inner: 0.0,
            padding_outer: 0.0,
            ratio: GOLDEN_RATIO,
        }
    }

    /// Sets inner and outer padding together.
    #[must_use]
    pub const fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding;
        self.padding_outer = padding;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_positive(self.width, "treemap width")?;
        ensure_positive(self.height, "treemap height")?;
        ensure_non_negative(self.padding_inner, "treemap inner padding")?;
        ensure_non_negative(self.padding_outer, "treemap outer padding")?;
        ensure_positive(self.ratio, "treemap ratio")
    }

    /// Returns one cell per hierarchy node, indexed by [`NodeId`].
    ///
    /// Children are tiled in their current order; call
    /// [`Hierarchy::sort_by_value_desc`] first for the usual layout.
    pub fn layout(self, hierarchy: &Hierarchy) -> ChartResult<Vec<TreemapCell>> {
        self.validate()?;
        let mut cells = vec![TreemapCell::default(); hierarchy.len()];
        cells[hierarchy.root()] = TreemapCell::new(0.0, 0.0, self.width, self.height);

        // Inset applied to every node at a given depth.
        let mut depth_padding = vec![0.0; hierarchy.len() + 1];
        for id in hierarchy.pre_order() {
            let entry = hierarchy.entry(id);
            let inset = depth_padding[entry.depth];
            let cell = collapse(TreemapCell::new(
                cells[id].x0 + inset,
                cells[id].y0 + inset,
                cells[id].x1 - inset,
                cells[id].y1 - inset,
            ));
            cells[id] = cell;

            if entry.is_leaf() {
                continue;
            }
            let half_inner = self.padding_inner / 2.0;
            depth_padding[entry.depth + 1] = half_inner;
            let offset = self.padding_outer - half_inner;
            let area = collapse(TreemapCell::new(
                cell.x0 + offset,
                cell.y0 + offset,
                cell.x1 - offset,
                cell.y1 - offset,
            ));
            self.squarify(hierarchy, id, area, &mut cells);
        }

        Ok(cells)
    }

    fn squarify(
        self,
        hierarchy: &Hierarchy,
        parent: NodeId,
        area: TreemapCell,
        cells: &mut [TreemapCell],
    ) {
        let nodes = &hierarchy.entry(parent).children;
        let value_of = |id: NodeId| hierarchy.entry(id).value;
        let n = nodes.len();
        let (mut x0, mut y0, x1, y1) = (area.x0, area.y0, area.x1, area.y1);
        let mut remaining = hierarchy.entry(parent).value;
        let (mut i0, mut i1) = (0usize, 0usize);

        while i0 < n {
            let dx = x1 - x0;
            let dy = y1 - y0;

            // Skip leading empty nodes so the row starts non-empty.
            let mut sum_value;
            loop {
                sum_value = value_of(nodes[i1]);
                i1 += 1;
                if sum_value != 0.0 || i1 >= n {
                    break;
                }
            }
            let mut min_value = sum_value;
            let mut max_value = sum_value;
            let alpha = (dy / dx).max(dx / dy) / (remaining * self.ratio);
            let mut beta = sum_value * sum_value * alpha;
            let mut min_ratio = (max_value / beta).max(beta / min_value);

            while i1 < n {
                let node_value = value_of(nodes[i1]);
                sum_value += node_value;
                min_value = min_value.min(node_value);
                max_value = max_value.max(node_value);
                beta = sum_value * sum_value * alpha;
                let new_ratio = (max_value / beta).max(beta / min_value);
                if new_ratio > min_ratio {
                    sum_value -= node_value;
                    break;
                }
                min_ratio = new_ratio;
                i1 += 1;
            }

            let row = &nodes[i0..i1];
            if dx < dy {
                let band_y1 = if remaining > 0.0 {
                    y0 + dy * sum_value / remaining
                } else {
                    y1
                };
                dice(row, &value_of, sum_value, (x0, y0, x1, band_y1), cells);
                if remaining > 0.0 {
                    y0 = band_y1;
                }
            } else {
                let band_x1 = if remaining > 0.0 {
                    x0 + dx * sum_value / remaining
                } else {
                    x1
                };
                slice(row, &value_of, sum_value, (x0, y0, band_x1, y1), cells);
                if remaining > 0.0 {
                    x0 = band_x1;
                }
            }
            remaining -= sum_value;
            i0 = i1;
        }
    }
}

type Band = (f64, f64, f64, f64);

/// Lays `row` out left-to-right inside the band.
fn dice(
    row: &[NodeId],
    value_of: &impl Fn(NodeId) -> f64,
    row_value: f64,
    (x0, y0, x1, y1): Band,
    cells: &mut [TreemapCell],
) {
    let k = if row_value > 0.0 {
        (x1 - x0) / row_value
    } else {
        0.0
    };
    let mut x = x0;
    for &id in row {
        let next_x = x + value_of(id) * k;
        cells[id] = TreemapCell::new(x, y0, next_x, y1);
        x = next_x;
    }
}

/// Lays `row` out top-to-bottom inside the band.
fn slice(
    row: &[NodeId],
    value_of: &impl Fn(NodeId) -> f64,
    row_value: f64,
    (x0, y0, x1, y1): Band,
    cells: &mut [TreemapCell],
) {
    let k = if row_value > 0.0 {
        (y1 - y0) / row_value
    } else {
        0.0
    };
    let mut y = y0;
    for &id in row {
        let next_y = y + value_of(id) * k;
        cells[id] = TreemapCell::new(x0, y, x1, next_y);
        y = next_y;
    }
}

fn collapse(mut cell: TreemapCell) -> TreemapCell {
    if cell.x1 < cell.x0 {
        let mid = (cell.x0 + cell.x1) / 2.0;
        cell.x0 = mid;
        cell.x1 = mid;
    }
    if cell.y1 < cell.y0 {
        let mid = (cell.y0 + cell.y1) / 2.0;
        cell.y0 = mid;
        cell.y1 = mid;
    }
    cell
}
