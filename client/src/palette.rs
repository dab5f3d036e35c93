use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

use pixelgrid_shared::PixelColor;

/// Rebuilds the swatch row: one button per palette entry, the selected one
/// marked with `data-active`.
pub fn render_palette(document: &Document, palette_el: &HtmlElement, selected: PixelColor) {
    palette_el.set_inner_html("");
    for color in PixelColor::ALL {
        let Ok(element) = document.create_element("button") else {
            continue;
        };
        let Ok(button) = element.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("data-index", &color.index().to_string());
        let _ = button.set_attribute("aria-label", &format!("Use color {}", color.css()));
        let _ = button.set_attribute("class", "swatch");
        let _ = button.style().set_property("background", color.css());
        if color == selected {
            let _ = button.set_attribute("data-active", "");
        }
        let _ = palette_el.append_child(&button);
    }
}

/// Resolves a click inside the palette row to the swatch it landed on.
pub fn color_from_event(event: &Event) -> Option<PixelColor> {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        if let Some(index) = element.get_attribute("data-index") {
            return index
                .parse::<u8>()
                .ok()
                .and_then(PixelColor::from_index);
        }
        current = element.parent_element();
    }
    None
}
