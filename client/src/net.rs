use wasm_bindgen::JsValue;
use web_sys::{WebSocket, Window};

use pixelgrid_shared::{protocol, PixelColor};

/// The board socket lives at `<pathname>ws`, secure when the page is.
pub fn websocket_url(window: &Window) -> Result<String, JsValue> {
    let location = window.location();
    let protocol = location.protocol()?;
    let host = location.host()?;
    let pathname = location.pathname()?;
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    Ok(format!("{scheme}://{host}{pathname}ws"))
}

/// Fire-and-forget draw request; the local write has already happened and the
/// authority's broadcast will reconcile everyone, us included.
pub fn send_draw_request(socket: &WebSocket, pixel_index: usize, color: PixelColor) {
    if socket.ready_state() != WebSocket::OPEN {
        return;
    }
    let Some(frame) = protocol::encode_draw_request(pixel_index, color) else {
        return;
    };
    let _ = socket.send_with_u8_array(&frame);
}
