use pixelgrid_shared::{BoardDecodeError, BoardState, Pixel};

use crate::state::Engine;

/// Installs an authoritative snapshot wholesale. On a decode failure the
/// previous board stays in place untouched.
pub fn adopt_snapshot(engine: &mut Engine, payload: &[u8]) -> Result<(), BoardDecodeError> {
    let board = BoardState::decode(payload)?;
    if !engine.view_placed {
        engine.camera.center(
            board.width(),
            board.height(),
            f64::from(engine.canvas.width()),
            f64::from(engine.canvas.height()),
        );
        engine.view_placed = true;
    }
    engine.board = Some(board);
    engine.hovered = None;
    Ok(())
}

/// Applies an incremental patch in arrival order; ignored until the first
/// snapshot has arrived.
pub fn apply_migration(engine: &mut Engine, patch: &[u8]) {
    if let Some(board) = engine.board.as_mut() {
        board.apply_patch(patch);
    }
}

pub fn arm_lock(engine: &mut Engine, now_ms: f64, seconds: u8) {
    engine.lock.arm(now_ms, seconds);
}

/// Optimistic local draw: writes the cell immediately and reports whether a
/// draw request should go out. The write is never rolled back; a later
/// authoritative patch for the same pixel simply overwrites it.
pub fn draw_pixel(engine: &mut Engine, pixel: Pixel, now_ms: f64) -> bool {
    if !engine.lock.can_draw(now_ms) {
        return false;
    }
    let color = engine.current_color;
    match engine.board.as_mut() {
        Some(board) => {
            board.set_pixel(pixel.index, color);
            true
        }
        None => false,
    }
}
