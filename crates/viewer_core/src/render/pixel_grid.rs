//! Simulated raster map
//!
//! A fixed-size grid of [`Color`] cells with the classic scan-conversion
//! primitives: DDA lines anti-aliased by a 3x3 supersampling kernel, and
//! midpoint circles plotted through eight-way symmetry.
//!
//! Cells live in one contiguous buffer indexed `y * width + x`. Every
//! in-bounds write is stored and then forwarded to the grid's
//! [`PixelSink`] as a world-space quad; out-of-bounds writes are clipped
//! silently.

use serde::{Deserialize, Serialize};

use super::sink::{NullSink, PixelQuad, PixelSink};
use crate::core::config::RasterConfig;
use crate::foundation::math::{utils::round_half_up, Vec2};
use crate::foundation::Color;

/// Supersampling kernel, row-major over `dy` then `dx`, normalized by [`KERNEL_SUM`]
const KERNEL: [[f32; 3]; 3] = [
    [1.0, 2.0, 1.0],
    [2.0, 4.0, 2.0],
    [1.0, 2.0, 1.0],
];

const KERNEL_SUM: f32 = 16.0;

/// Which points the circle rasterizer plots for the "swapped" octants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircleReflection {
    /// True eight-way symmetry around the center
    #[default]
    Symmetric,
    /// Historic output: three of the four swapped-octant points take their
    /// row from the center's x coordinate, so circles off the main diagonal
    /// are drawn with stray arcs
    Legacy,
}

/// Fixed-size grid of colors with line and circle rasterization
pub struct PixelGrid<S: PixelSink = NullSink> {
    width: usize,
    height: usize,
    pixel_size: f32,
    cells: Vec<Color>,
    color: Color,
    circle_reflection: CircleReflection,
    sink: S,
}

impl PixelGrid<NullSink> {
    /// Create a grid whose writes are not presented anywhere
    pub fn new(width: usize, height: usize, pixel_size: f32, initial: Color) -> Self {
        Self::with_sink(width, height, pixel_size, initial, NullSink)
    }
}

impl<S: PixelSink> PixelGrid<S> {
    /// Create a grid that forwards written cells to `sink`
    pub fn with_sink(
        width: usize,
        height: usize,
        pixel_size: f32,
        initial: Color,
        sink: S,
    ) -> Self {
        log::debug!("Creating {}x{} pixel grid (pixel size {})", width, height, pixel_size);
        Self {
            width,
            height,
            pixel_size,
            cells: vec![initial; width * height],
            color: Color::default(),
            circle_reflection: CircleReflection::default(),
            sink,
        }
    }

    /// Create a grid from a raster configuration
    pub fn from_config(config: &RasterConfig, sink: S) -> Self {
        let mut grid = Self::with_sink(
            config.width,
            config.height,
            config.pixel_size,
            config.background,
            sink,
        );
        grid.circle_reflection = config.circle_reflection;
        grid
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Edge length of a cell in world units
    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    /// Current drawing color used by [`draw_line`](Self::draw_line) and
    /// [`draw_circle`](Self::draw_circle)
    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the current drawing color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Select the circle reflection policy
    pub fn set_circle_reflection(&mut self, reflection: CircleReflection) {
        self.circle_reflection = reflection;
    }

    /// Whether `(x, y)` addresses a cell
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.offset(x, y).is_some()
    }

    /// Color stored at `(x, y)`, if the coordinate is on the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    /// All cells, row by row
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Reset every cell without presenting anything
    pub fn fill(&mut self, color: Color) {
        self.cells.fill(color);
    }

    /// The presentation sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the presentation sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the grid, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Store `color` at `(x, y)` and present it. Off-grid writes are ignored.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(index) = self.offset(x, y) else {
            return;
        };

        self.cells[index] = color;
        self.sink.fill_quad(PixelQuad {
            x,
            y,
            origin: Vec2::new(x as f32 * self.pixel_size, y as f32 * self.pixel_size),
            size: self.pixel_size,
            color,
        });
    }

    /// Replace `(x, y)` with the kernel-weighted average of its 3x3
    /// neighbourhood. Alpha of the result is always 1.0.
    ///
    /// Neighbours are clamped per axis: negative coordinates read row or
    /// column 0, coordinates past the far edge read the center's own row or
    /// column. Off-grid centers are ignored.
    pub fn super_sample(&mut self, x: i32, y: i32) {
        let Some(center_index) = self.offset(x, y) else {
            return;
        };
        let center = self.cells[center_index];

        let width = extent(self.width);
        let height = extent(self.height);
        let mut sum = [0.0_f32; 3];

        for (row, dy) in (-1..=1).enumerate() {
            let ty = clamp_neighbour(y.saturating_add(dy), y, height);
            for (col, dx) in (-1..=1).enumerate() {
                let tx = clamp_neighbour(x.saturating_add(dx), x, width);
                let weight = KERNEL[row][col];
                // Clamped coordinates always land on the grid when the center does
                let sample = self.get(tx, ty).unwrap_or(center);
                sum[0] += weight * sample.r;
                sum[1] += weight * sample.g;
                sum[2] += weight * sample.b;
            }
        }

        let blended = Color::new(
            sum[0] / KERNEL_SUM,
            sum[1] / KERNEL_SUM,
            sum[2] / KERNEL_SUM,
            1.0,
        );
        self.draw_pixel(x, y, blended);
    }

    /// Draw a line with the current color using a digital differential analyzer.
    ///
    /// For `|slope| <= 1` the x axis is stepped and the pixels directly above
    /// and below each plotted pixel are supersampled; steeper lines step y
    /// and supersample left and right. Vertical lines take the steep path
    /// with zero inverse slope, and endpoints are ordered so both directions
    /// plot the same cells.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let color = self.color;
        let dx = i64::from(x1) - i64::from(x0);
        let dy = i64::from(y1) - i64::from(y0);

        if dx != 0 && dy.abs() <= dx.abs() {
            let ((x0, y0), (x1, _)) = ordered((x0, y0), (x1, y1), x0 <= x1);
            // Swapping both endpoints flips both signs, so the slope is order independent
            let slope = dy as f32 / dx as f32;
            let mut y = y0 as f32;

            for ix in x0..=x1 {
                let iy = round_half_up(y);
                self.draw_pixel(ix, iy, color);
                self.super_sample(ix, iy.saturating_sub(1));
                self.super_sample(ix, iy.saturating_add(1));
                y += slope;
            }
        } else {
            let ((x0, y0), (_, y1)) = ordered((x0, y0), (x1, y1), y0 <= y1);
            // Inverse slope; dy is non-zero whenever dx is
            let step = if dx == 0 { 0.0 } else { dx as f32 / dy as f32 };
            let mut x = x0 as f32;

            for iy in y0..=y1 {
                let ix = round_half_up(x);
                self.draw_pixel(ix, iy, color);
                self.super_sample(ix.saturating_sub(1), iy);
                self.super_sample(ix.saturating_add(1), iy);
                x += step;
            }
        }
    }

    /// Draw a circle outline with the current color using the midpoint algorithm.
    ///
    /// The four axis points are always plotted first; the loop then walks one
    /// octant and mirrors each point eight ways.
    pub fn draw_circle(&mut self, x0: i32, y0: i32, radius: i32) {
        let color = self.color;
        let (cx, cy, r) = (i64::from(x0), i64::from(y0), i64::from(radius));
        let row = match self.circle_reflection {
            CircleReflection::Symmetric => cy,
            CircleReflection::Legacy => cx,
        };

        let mut x = 0_i64;
        let mut y = r;
        let mut delta_e = 2 * x + 3;
        let mut delta_se = 2 * (x - y) + 5;
        // (x + 1)^2 + (y - 0.5)^2 - r^2 at x = 0, y = r
        let mut decision = 1.25 - r as f64;

        self.plot(cx, cy + r, color);
        self.plot(cx + r, cy, color);
        self.plot(cx, cy - r, color);
        self.plot(cx - r, cy, color);

        while y > x {
            if decision < 0.0 {
                // East
                decision += delta_e as f64;
            } else {
                // South-east
                y -= 1;
                decision += delta_se as f64;
                delta_se += 2;
            }

            delta_se += 2;
            delta_e += 2;
            x += 1;

            self.plot(cx + x, cy + y, color);
            self.plot(cx + x, cy - y, color);
            self.plot(cx - x, cy - y, color);
            self.plot(cx - x, cy + y, color);

            self.plot(cx + y, cy + x, color);
            self.plot(cx + y, row - x, color);
            self.plot(cx - y, row - x, color);
            self.plot(cx - y, row + x, color);
        }
    }

    /// `draw_pixel` for widened coordinates; anything outside `i32` is off the grid
    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.draw_pixel(x, y, color);
        }
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

impl<S: PixelSink> std::fmt::Debug for PixelGrid<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixel_size", &self.pixel_size)
            .field("color", &self.color)
            .field("circle_reflection", &self.circle_reflection)
            .finish_non_exhaustive()
    }
}

fn extent(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

fn clamp_neighbour(coord: i32, center: i32, extent: i32) -> i32 {
    if coord < 0 {
        0
    } else if coord >= extent {
        center
    } else {
        coord
    }
}

fn ordered(a: (i32, i32), b: (i32, i32), keep: bool) -> ((i32, i32), (i32, i32)) {
    if keep { (a, b) } else { (b, a) }
}
