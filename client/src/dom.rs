use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlSpanElement, Window};

use pixelgrid_shared::Pixel;

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

/// Sizes the canvas backing store in device pixels and its CSS box in layout
/// pixels, so one camera unit is one device pixel.
pub fn resize_canvas(window: &Window, canvas: &HtmlCanvasElement) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let dpr = window.device_pixel_ratio();
    canvas.set_width((width * dpr) as u32);
    canvas.set_height((height * dpr) as u32);
    if let Ok(element) = canvas.clone().dyn_into::<HtmlElement>() {
        let _ = element.style().set_property("width", &format!("{width}px"));
        let _ = element
            .style()
            .set_property("height", &format!("{height}px"));
    }
}

pub fn set_body_cursor(document: &Document, cursor: &str) {
    if let Some(body) = document.body() {
        let _ = body.style().set_property("cursor", cursor);
    }
}

pub fn update_users_counter(users_el: &HtmlSpanElement, count: u16) {
    users_el.set_text_content(Some(&count.to_string()));
}

pub fn update_coords_readout(coords_el: &HtmlSpanElement, hovered: Option<Pixel>) {
    match hovered {
        Some(pixel) => {
            coords_el.set_text_content(Some(&format!("{}:{}", pixel.i, pixel.j)));
            let _ = coords_el.style().remove_property("visibility");
        }
        None => {
            let _ = coords_el.style().set_property("visibility", "hidden");
        }
    }
}
