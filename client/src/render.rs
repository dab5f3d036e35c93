use pixelgrid_shared::{PixelColor, Viewport};

use crate::state::Engine;

const BACKDROP_COLOR: &str = "#282828";
const GRID_COLOR: &str = "#e0e0e0";
const GRID_ZOOM_THRESHOLD: f64 = 3.0;

/// Repaints the whole frame from the engine state. Cell fills cover only the
/// visible range; the full grid is never iterated.
pub fn render(engine: &Engine, now_ms: f64, device_pixel_ratio: f64) {
    let ctx = &engine.ctx;
    let canvas_width = f64::from(engine.canvas.width());
    let canvas_height = f64::from(engine.canvas.height());

    ctx.set_fill_style_str(BACKDROP_COLOR);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    let Some(board) = engine.board.as_ref() else {
        return;
    };
    let camera = &engine.camera;
    let pixel_size = camera.pixel_size();

    ctx.set_fill_style_str(PixelColor::White.css());
    ctx.fill_rect(
        camera.offset_x,
        camera.offset_y,
        board.width() as f64 * pixel_size,
        board.height() as f64 * pixel_size,
    );

    let Some(viewport) = camera.visible_range(board.width(), board.height(), canvas_width, canvas_height)
    else {
        return;
    };

    for j in viewport.y0..viewport.y1 {
        for i in viewport.x0..viewport.x1 {
            let index = board.index_of(j, i);
            let raw = board.pixel(index);
            if raw == PixelColor::White.index() {
                continue;
            }
            let Some(color) = PixelColor::from_index(raw) else {
                continue;
            };
            ctx.set_fill_style_str(color.css());
            ctx.fill_rect(
                i as f64 * pixel_size + camera.offset_x,
                j as f64 * pixel_size + camera.offset_y,
                pixel_size,
                pixel_size,
            );
        }
    }

    if camera.zoom_factor > GRID_ZOOM_THRESHOLD {
        draw_grid(engine, &viewport, device_pixel_ratio);
    }

    if let Some(pixel) = engine.hovered {
        if engine.lock.can_draw(now_ms) {
            draw_cursor(engine, pixel.i, pixel.j, device_pixel_ratio);
        }
    }
}

fn draw_grid(engine: &Engine, viewport: &Viewport, device_pixel_ratio: f64) {
    let ctx = &engine.ctx;
    let camera = &engine.camera;
    let pixel_size = camera.pixel_size();
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(0.8 * device_pixel_ratio);

    for x in viewport.x0..=viewport.x1 {
        let x_pos = x as f64 * pixel_size + camera.offset_x;
        ctx.begin_path();
        ctx.move_to(x_pos, camera.offset_y + viewport.y0 as f64 * pixel_size);
        ctx.line_to(x_pos, camera.offset_y + viewport.y1 as f64 * pixel_size);
        ctx.stroke();
    }

    for y in viewport.y0..=viewport.y1 {
        let y_pos = y as f64 * pixel_size + camera.offset_y;
        ctx.begin_path();
        ctx.move_to(camera.offset_x + viewport.x0 as f64 * pixel_size, y_pos);
        ctx.line_to(camera.offset_x + viewport.x1 as f64 * pixel_size, y_pos);
        ctx.stroke();
    }
}

fn draw_cursor(engine: &Engine, i: usize, j: usize, device_pixel_ratio: f64) {
    let ctx = &engine.ctx;
    let camera = &engine.camera;
    let pixel_size = camera.pixel_size();
    ctx.set_stroke_style_str("#000");
    ctx.set_line_width(2.0 * device_pixel_ratio);
    ctx.stroke_rect(
        i as f64 * pixel_size + camera.offset_x,
        j as f64 * pixel_size + camera.offset_y,
        pixel_size,
        pixel_size,
    );
}
