use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, CloseEvent, Event, HtmlCanvasElement, HtmlElement, HtmlSpanElement,
    MessageEvent, PointerEvent, WebSocket, WheelEvent,
};

use pixelgrid_shared::{DrawLock, PixelColor, ServerMessage};

use crate::actions::{adopt_snapshot, apply_migration, arm_lock, draw_pixel};
use crate::dom::{
    get_element, resize_canvas, set_body_cursor, update_coords_readout, update_users_counter,
};
use crate::net::{send_draw_request, websocket_url};
use crate::palette::{color_from_event, render_palette};
use crate::persistence;
use crate::render::render;
use crate::state::Engine;

fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let canvas: HtmlCanvasElement = get_element(&document, "board")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.set_image_smoothing_enabled(false);

    let palette_el: HtmlElement = get_element(&document, "palette")?;
    let users_el: HtmlSpanElement = get_element(&document, "users")?;
    let coords_el: HtmlSpanElement = get_element(&document, "coords")?;

    let restored_view = persistence::load_view(&window);
    let restored_board = persistence::load_board(&window);
    let current_color = persistence::load_color(&window).unwrap_or(PixelColor::White);

    let engine = Rc::new(RefCell::new(Engine {
        canvas: canvas.clone(),
        ctx,
        board: restored_board,
        camera: restored_view.unwrap_or_default(),
        lock: DrawLock::new(),
        current_color,
        hovered: None,
        pointer_down: false,
        dragging: false,
        pointer_x: 0.0,
        pointer_y: 0.0,
        view_placed: restored_view.is_some(),
    }));

    resize_canvas(&window, &canvas);
    render_palette(&document, &palette_el, current_color);
    update_coords_readout(&coords_el, None);

    {
        let resize_window = window.clone();
        let resize_canvas_el = canvas.clone();
        let onresize = Closure::<dyn FnMut()>::new(move || {
            resize_canvas(&resize_window, &resize_canvas_el);
        });
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }

    {
        let palette_engine = engine.clone();
        let palette_el_cb = palette_el.clone();
        let palette_document = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(color) = color_from_event(&event) else {
                return;
            };
            palette_engine.borrow_mut().current_color = color;
            render_palette(&palette_document, &palette_el_cb, color);
        });
        palette_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    let ws_url = websocket_url(&window)?;
    web_sys::console::log_1(&format!("WS connecting url={ws_url}").into());
    let socket = Rc::new(WebSocket::new(&ws_url)?);
    let _ = Reflect::set(
        socket.as_ref(),
        &JsValue::from_str("binaryType"),
        &JsValue::from_str("arraybuffer"),
    );

    {
        let ws_url = ws_url.clone();
        let onopen = Closure::<dyn FnMut(Event)>::new(move |_| {
            web_sys::console::log_1(&format!("WS open url={ws_url}").into());
        });
        socket.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        onopen.forget();
    }

    {
        let ws_url = ws_url.clone();
        let onclose = Closure::<dyn FnMut(CloseEvent)>::new(move |event: CloseEvent| {
            web_sys::console::warn_1(
                &format!(
                    "WS close url={ws_url} code={} was_clean={}",
                    event.code(),
                    event.was_clean()
                )
                .into(),
            );
        });
        socket.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();
    }

    {
        let ws_url = ws_url.clone();
        let onerror = Closure::<dyn FnMut(Event)>::new(move |_| {
            web_sys::console::error_1(&format!("WS error url={ws_url}").into());
        });
        socket.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    }

    {
        let message_engine = engine.clone();
        let users_el = users_el.clone();
        let onmessage = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let Ok(buffer) = event.data().dyn_into::<js_sys::ArrayBuffer>() else {
                web_sys::console::error_1(&"WS message data is not an arraybuffer".into());
                return;
            };
            let frame = Uint8Array::new(&buffer).to_vec();

            // Every frame is handled in isolation: a frame we cannot parse or
            // apply is logged and dropped, and the session keeps running.
            let message = match ServerMessage::parse(&frame) {
                Ok(message) => message,
                Err(error) => {
                    web_sys::console::warn_1(
                        &format!("WS frame dropped: {error:?}").into(),
                    );
                    return;
                }
            };

            let mut engine = message_engine.borrow_mut();
            match message {
                ServerMessage::State(payload) => {
                    if let Err(error) = adopt_snapshot(&mut engine, payload) {
                        web_sys::console::error_1(
                            &format!("Board snapshot rejected: {error:?}").into(),
                        );
                    }
                }
                ServerMessage::StateMigration(patch) => {
                    apply_migration(&mut engine, patch);
                }
                ServerMessage::StatePlayer(seconds) => {
                    arm_lock(&mut engine, now_ms(), seconds);
                }
                ServerMessage::StatePlayers(count) => {
                    update_users_counter(&users_el, count);
                }
            }
        });
        socket.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();
    }

    {
        let wheel_engine = engine.clone();
        let wheel_window = window.clone();
        let onwheel = Closure::<dyn FnMut(WheelEvent)>::new(move |event: WheelEvent| {
            event.prevent_default();
            let dpr = wheel_window.device_pixel_ratio();
            let mut engine = wheel_engine.borrow_mut();
            engine.camera.zoom(
                f64::from(event.client_x()) * dpr,
                f64::from(event.client_y()) * dpr,
                event.delta_y(),
            );
        });
        canvas.add_event_listener_with_callback("wheel", onwheel.as_ref().unchecked_ref())?;
        onwheel.forget();
    }

    {
        let down_engine = engine.clone();
        let down_window = window.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            event.prevent_default();
            let dpr = down_window.device_pixel_ratio();
            let mut engine = down_engine.borrow_mut();
            engine.pointer_down = true;
            engine.pointer_x = f64::from(event.client_x()) * dpr;
            engine.pointer_y = f64::from(event.client_y()) * dpr;
        });
        window
            .add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_engine = engine.clone();
        let move_window = window.clone();
        let move_document = document.clone();
        let coords_el = coords_el.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            event.prevent_default();
            let dpr = move_window.device_pixel_ratio();
            let client_x = f64::from(event.client_x()) * dpr;
            let client_y = f64::from(event.client_y()) * dpr;

            let mut engine = move_engine.borrow_mut();
            if engine.pointer_down {
                engine.dragging = true;
                engine.hovered = None;
                let dx = client_x - engine.pointer_x;
                let dy = client_y - engine.pointer_y;
                engine.camera.pan(dx, dy);
                engine.pointer_x = client_x;
                engine.pointer_y = client_y;
                drop(engine);
                set_body_cursor(&move_document, "grabbing");
                update_coords_readout(&coords_el, None);
                return;
            }
            let hovered = engine.hit_test(client_x, client_y);
            engine.hovered = hovered;
            drop(engine);
            update_coords_readout(&coords_el, hovered);
        });
        window
            .add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let up_engine = engine.clone();
        let up_window = window.clone();
        let up_document = document.clone();
        let up_socket = socket.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            event.prevent_default();
            set_body_cursor(&up_document, "default");
            let dpr = up_window.device_pixel_ratio();

            let mut engine = up_engine.borrow_mut();
            let was_dragging = engine.dragging;
            engine.pointer_down = false;
            engine.dragging = false;
            if was_dragging {
                return;
            }

            let client_x = f64::from(event.client_x()) * dpr;
            let client_y = f64::from(event.client_y()) * dpr;
            let Some(pixel) = engine.hit_test(client_x, client_y) else {
                return;
            };
            if draw_pixel(&mut engine, pixel, now_ms()) {
                let color = engine.current_color;
                drop(engine);
                send_draw_request(&up_socket, pixel.index, color);
            }
        });
        window.add_event_listener_with_callback("pointerup", onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    {
        let leave_engine = engine.clone();
        let coords_el = coords_el.clone();
        let onleave = Closure::<dyn FnMut(PointerEvent)>::new(move |_| {
            let mut engine = leave_engine.borrow_mut();
            engine.hovered = None;
            engine.pointer_down = false;
            engine.dragging = false;
            drop(engine);
            update_coords_readout(&coords_el, None);
        });
        window
            .add_event_listener_with_callback("pointerleave", onleave.as_ref().unchecked_ref())?;
        onleave.forget();
    }

    {
        let save_engine = engine.clone();
        let save_window = window.clone();
        let onbeforeunload = Closure::<dyn FnMut(Event)>::new(move |_| {
            let engine = save_engine.borrow();
            if let Some(board) = engine.board.as_ref() {
                persistence::save_board(&save_window, board);
            }
            persistence::save_view(&save_window, &engine.camera);
            persistence::save_color(&save_window, engine.current_color);
        });
        window.add_event_listener_with_callback(
            "beforeunload",
            onbeforeunload.as_ref().unchecked_ref(),
        )?;
        onbeforeunload.forget();
    }

    {
        let render_engine = engine.clone();
        let render_window = window.clone();
        let raf_handle: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
            Rc::new(RefCell::new(None));
        let raf_handle_cb = raf_handle.clone();
        let onframe = Closure::<dyn FnMut(f64)>::new(move |_| {
            {
                let engine = render_engine.borrow();
                render(&engine, now_ms(), render_window.device_pixel_ratio());
            }
            if let Some(callback) = raf_handle_cb.borrow().as_ref() {
                let _ = render_window
                    .request_animation_frame(callback.as_ref().unchecked_ref());
            }
        });
        *raf_handle.borrow_mut() = Some(onframe);
        if let Some(callback) = raf_handle.borrow().as_ref() {
            window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        };
    }

    Ok(())
}
