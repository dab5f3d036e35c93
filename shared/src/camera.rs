use serde::{Deserialize, Serialize};

pub const BASE_PIXEL_SIZE: f64 = 6.0;
pub const MIN_ZOOM_FACTOR: f64 = 0.2;
pub const MAX_ZOOM_FACTOR: f64 = 16.0;
pub const ZOOM_SPEED: f64 = 0.01;
pub const ZOOM_DAMPING_FACTOR: f64 = 0.12;
const WHEEL_DELTA_LIMIT: f64 = 25.0;

/// Pure viewport transform: zoom factor plus a screen-space offset of the
/// board origin, both in device pixels. Offsets are unbounded; the board may
/// be panned arbitrarily far off-screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub zoom_factor: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Persisted form: `[zoom_factor, offset_x, offset_y]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord(pub f64, pub f64, pub f64);

/// A grid cell under a screen point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub i: usize,
    pub j: usize,
    pub index: usize,
}

/// The cell range currently mapped onto the canvas, half-open on the high
/// edge. The renderer iterates exactly this, never the full grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            zoom_factor: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Camera {
    /// On-screen size of one grid cell.
    pub fn pixel_size(&self) -> f64 {
        BASE_PIXEL_SIZE * self.zoom_factor
    }

    /// Wheel zoom around a pointer position. The wheel delta is clamped to
    /// ±25 and scaled by `ZOOM_SPEED`; an excursion past `[MIN_ZOOM_FACTOR,
    /// MAX_ZOOM_FACTOR]` is damped by `ZOOM_DAMPING_FACTOR` instead of being
    /// hard-clamped, so the factor may overshoot a bound slightly but every
    /// further step pulls it back toward the bound (rubber-band). The offset
    /// is rescaled so the world point under the pointer stays fixed.
    pub fn zoom(&mut self, pointer_x: f64, pointer_y: f64, wheel_delta_y: f64) {
        let previous_pixel_size = self.pixel_size();
        let change = 1.0 + (-wheel_delta_y).clamp(-WHEEL_DELTA_LIMIT, WHEEL_DELTA_LIMIT) * ZOOM_SPEED;
        let mut next = self.zoom_factor * change;
        if next < MIN_ZOOM_FACTOR {
            next = MIN_ZOOM_FACTOR + (next - MIN_ZOOM_FACTOR) * ZOOM_DAMPING_FACTOR;
        } else if next > MAX_ZOOM_FACTOR {
            next = MAX_ZOOM_FACTOR + (next - MAX_ZOOM_FACTOR) * ZOOM_DAMPING_FACTOR;
        }
        self.zoom_factor = next;

        let scale = self.pixel_size() / previous_pixel_size;
        self.offset_x = (self.offset_x - pointer_x) * scale + pointer_x;
        self.offset_y = (self.offset_y - pointer_y) * scale + pointer_y;
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Centers a `board_width` x `board_height` cell grid in the canvas.
    pub fn center(&mut self, board_width: usize, board_height: usize, canvas_width: f64, canvas_height: f64) {
        let pixel_size = self.pixel_size();
        self.offset_x = (canvas_width - board_width as f64 * pixel_size) / 2.0;
        self.offset_y = (canvas_height - board_height as f64 * pixel_size) / 2.0;
    }

    /// Hit test: the grid cell under a screen point, or `None` when the point
    /// falls outside the board rectangle.
    pub fn pixel_at(
        &self,
        board_width: usize,
        board_height: usize,
        client_x: f64,
        client_y: f64,
    ) -> Option<Pixel> {
        let pixel_size = self.pixel_size();
        if client_x < self.offset_x
            || client_x > self.offset_x + board_width as f64 * pixel_size
            || client_y < self.offset_y
            || client_y > self.offset_y + board_height as f64 * pixel_size
        {
            return None;
        }
        let i = ((client_x - self.offset_x) / pixel_size).floor() as usize;
        let j = ((client_y - self.offset_y) / pixel_size).floor() as usize;
        let i = i.min(board_width - 1);
        let j = j.min(board_height - 1);
        Some(Pixel {
            i,
            j,
            index: j * board_width + i,
        })
    }

    /// Inverse-maps the canvas corners through the transform, floors/ceils to
    /// cell coordinates and clamps to the board. `None` when the board is
    /// entirely off one side of the canvas.
    pub fn visible_range(
        &self,
        board_width: usize,
        board_height: usize,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Option<Viewport> {
        let pixel_size = self.pixel_size();
        let x_start = -self.offset_x / pixel_size;
        let y_start = -self.offset_y / pixel_size;
        let x_end = x_start + canvas_width / pixel_size;
        let y_end = y_start + canvas_height / pixel_size;

        if x_start >= board_width as f64
            || y_start >= board_height as f64
            || x_end <= 0.0
            || y_end <= 0.0
        {
            return None;
        }

        Some(Viewport {
            x0: x_start.floor().max(0.0) as usize,
            y0: y_start.floor().max(0.0) as usize,
            x1: (x_end.ceil() as usize).min(board_width),
            y1: (y_end.ceil() as usize).min(board_height),
        })
    }

    pub fn to_record(&self) -> ViewRecord {
        ViewRecord(self.zoom_factor, self.offset_x, self.offset_y)
    }

    /// Restores a persisted view, rejecting records that would leave the
    /// transform unusable.
    pub fn from_record(record: ViewRecord) -> Option<Camera> {
        let ViewRecord(zoom_factor, offset_x, offset_y) = record;
        if !zoom_factor.is_finite() || zoom_factor <= 0.0 {
            return None;
        }
        if !offset_x.is_finite() || !offset_y.is_finite() {
            return None;
        }
        Some(Camera {
            zoom_factor,
            offset_x,
            offset_y,
        })
    }
}
