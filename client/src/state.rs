use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use pixelgrid_shared::{BoardState, Camera, DrawLock, Pixel, PixelColor};

/// The per-session engine: sole owner of the board mirror, the camera, the
/// cursor and the draw lock. One instance is built per page session and
/// passed by reference into every socket/input callback.
pub struct Engine {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub board: Option<BoardState>,
    pub camera: Camera,
    pub lock: DrawLock,
    pub current_color: PixelColor,
    pub hovered: Option<Pixel>,
    pub pointer_down: bool,
    pub dragging: bool,
    pub pointer_x: f64,
    pub pointer_y: f64,
    /// Set once a usable view exists (restored from storage or centered on
    /// the first snapshot); later snapshots must not move the camera.
    pub view_placed: bool,
}

impl Engine {
    /// The grid cell under a screen point, in device pixels.
    pub fn hit_test(&self, client_x: f64, client_y: f64) -> Option<Pixel> {
        let board = self.board.as_ref()?;
        self.camera
            .pixel_at(board.width(), board.height(), client_x, client_y)
    }
}
