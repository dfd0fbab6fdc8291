//! TerrainField: per-column destructible heightmap.
//!
//! One height value per horizontal pixel column, in screen coordinates
//! (y down): a larger value means lower ground. Craters only ever push
//! heights down, so terrain never heals.

use barrage_core::constants::{TERRAIN_CEILING_FRAC, TERRAIN_FLOOR_MARGIN};

/// Destructible ground as an ordered sequence of column heights.
#[derive(Debug, Clone)]
pub struct TerrainField {
    heights: Vec<f64>,
    /// Field height in pixels (the bottom edge of the world).
    field_height: f64,
}

impl TerrainField {
    /// Wrap pre-computed heights. `heights.len()` is the field width.
    pub fn new(heights: Vec<f64>, field_height: f64) -> Self {
        debug_assert!(!heights.is_empty());
        Self {
            heights,
            field_height,
        }
    }

    /// Field width in columns.
    pub fn width(&self) -> usize {
        self.heights.len()
    }

    /// Field height in pixels.
    pub fn field_height(&self) -> f64 {
        self.field_height
    }

    /// All column heights, one per pixel column.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Ground height at `x`, sampling the column at `floor(x)`.
    /// Out-of-range positions clamp to the nearest edge column.
    pub fn height_at(&self, x: f64) -> f64 {
        let col = (x.floor() as isize).clamp(0, self.heights.len() as isize - 1) as usize;
        self.heights[col]
    }

    /// Carve a crater centered at the impact point: every column within
    /// `radius` of `cx` is pushed down to at least the lower semicircle
    /// boundary `cy + sqrt(radius² - dx²)`. Columns already below it are
    /// untouched.
    pub fn deform(&mut self, cx: f64, cy: f64, radius: f64) {
        let start = (cx - radius).floor() as isize;
        let end = (cx + radius).ceil() as isize;

        for i in start..=end {
            if i < 0 || i >= self.heights.len() as isize {
                continue;
            }
            let dx = i as f64 - cx;
            if dx * dx <= radius * radius {
                let dy = (radius * radius - dx * dx).sqrt();
                let floor_y = cy + dy;
                let col = &mut self.heights[i as usize];
                if floor_y > *col {
                    *col = floor_y;
                }
            }
        }
    }

    /// 3-point moving average, excluding the endpoints.
    pub(crate) fn smooth(&mut self, passes: usize) {
        for _ in 0..passes {
            for i in 1..self.heights.len() - 1 {
                self.heights[i] =
                    (self.heights[i - 1] + self.heights[i] + self.heights[i + 1]) / 3.0;
            }
        }
    }

    /// The band generated heights must stay inside: ceiling at 0.2·H,
    /// floor margin of 50 px above the bottom edge.
    pub(crate) fn clamp_band(field_height: f64) -> (f64, f64) {
        (
            field_height * TERRAIN_CEILING_FRAC,
            field_height - TERRAIN_FLOOR_MARGIN,
        )
    }
}
