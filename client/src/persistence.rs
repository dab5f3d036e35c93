use web_sys::{Storage, Window};

use pixelgrid_shared::{BoardState, Camera, PixelColor, ViewRecord};

const BOARD_KEY: &str = "board";
const VIEW_KEY: &str = "board-position";
const CURSOR_KEY: &str = "board-cursor";

fn local_storage(window: &Window) -> Option<Storage> {
    window.local_storage().ok().flatten()
}

/// Board record bytes as a latin-1 string, so `btoa`/`atob` round-trip the
/// exact byte sequence. Nothing beyond that round trip is relied on.
fn bytes_to_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}

fn text_to_bytes(text: &str) -> Option<Vec<u8>> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).ok())
        .collect()
}

pub fn load_board(window: &Window) -> Option<BoardState> {
    let storage = local_storage(window)?;
    let stored = storage.get_item(BOARD_KEY).ok()??;
    let text = window.atob(&stored).ok()?;
    let bytes = text_to_bytes(&text)?;
    BoardState::decode(&bytes).ok()
}

pub fn save_board(window: &Window, board: &BoardState) {
    let Some(storage) = local_storage(window) else {
        return;
    };
    let Ok(encoded) = window.btoa(&bytes_to_text(&board.encode())) else {
        return;
    };
    let _ = storage.set_item(BOARD_KEY, &encoded);
}

pub fn load_view(window: &Window) -> Option<Camera> {
    let storage = local_storage(window)?;
    let stored = storage.get_item(VIEW_KEY).ok()??;
    let record: ViewRecord = serde_json::from_str(&stored).ok()?;
    Camera::from_record(record)
}

pub fn save_view(window: &Window, camera: &Camera) {
    let Some(storage) = local_storage(window) else {
        return;
    };
    let Ok(json) = serde_json::to_string(&camera.to_record()) else {
        return;
    };
    let _ = storage.set_item(VIEW_KEY, &json);
}

pub fn load_color(window: &Window) -> Option<PixelColor> {
    let storage = local_storage(window)?;
    let stored = storage.get_item(CURSOR_KEY).ok()??;
    let (index,): (u8,) = serde_json::from_str(&stored).ok()?;
    PixelColor::from_index(index)
}

pub fn save_color(window: &Window, color: PixelColor) {
    let Some(storage) = local_storage(window) else {
        return;
    };
    let Ok(json) = serde_json::to_string(&(color.index(),)) else {
        return;
    };
    let _ = storage.set_item(CURSOR_KEY, &json);
}
