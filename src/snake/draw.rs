use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::SnakeGame;

const SEGMENT_RADIUS: f64 = 4.0;

/// Full redraw of one frame.
pub(super) fn draw(
    ctx: &CanvasRenderingContext2d,
    game: &SnakeGame,
    width: f64,
    height: f64,
    cell: f64,
) -> Result<(), JsValue> {
    let bg = ctx.create_linear_gradient(0.0, 0.0, width, height);
    bg.add_color_stop(0.0, "rgba(10, 10, 15, 0.95)")?;
    bg.add_color_stop(1.0, "rgba(20, 20, 30, 0.95)")?;
    ctx.set_fill_style_canvas_gradient(&bg);
    ctx.fill_rect(0.0, 0.0, width, height);

    // Faint grid
    ctx.set_stroke_style_str("rgba(139, 92, 246, 0.08)");
    ctx.set_line_width(0.5);
    let mut x = 0.0;
    while x <= width {
        line(ctx, x, 0.0, x, height);
        x += cell;
    }
    let mut y = 0.0;
    while y <= height {
        line(ctx, 0.0, y, width, y);
        y += cell;
    }

    if let Some(food) = game.food() {
        let fx = food.x as f64 * cell;
        let fy = food.y as f64 * cell;
        let (cx, cy) = (fx + cell / 2.0, fy + cell / 2.0);
        let glow = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, cell)?;
        glow.add_color_stop(0.0, "rgba(16, 185, 129, 0.8)")?;
        glow.add_color_stop(1.0, "rgba(16, 185, 129, 0.3)")?;
        ctx.set_fill_style_canvas_gradient(&glow);
        ctx.fill_rect(fx - 2.0, fy - 2.0, cell + 4.0, cell + 4.0);

        ctx.set_fill_style_str("#10b981");
        ctx.fill_rect(fx, fy, cell, cell);
        ctx.set_fill_style_str("rgba(255, 255, 255, 0.3)");
        ctx.fill_rect(fx + 2.0, fy + 2.0, cell - 4.0, cell - 4.0);
    }

    for (index, seg) in game.segments().enumerate() {
        let sx = seg.x as f64 * cell;
        let sy = seg.y as f64 * cell;

        if index == 0 {
            let (cx, cy) = (sx + cell / 2.0, sy + cell / 2.0);
            let halo = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, cell)?;
            halo.add_color_stop(0.0, "rgba(139, 92, 246, 0.6)")?;
            halo.add_color_stop(1.0, "rgba(139, 92, 246, 0)")?;
            ctx.set_fill_style_canvas_gradient(&halo);
            ctx.fill_rect(sx - 3.0, sy - 3.0, cell + 6.0, cell + 6.0);
        }

        let fill = ctx.create_linear_gradient(sx, sy, sx + cell, sy + cell);
        if index == 0 {
            fill.add_color_stop(0.0, "#8b5cf6")?;
            fill.add_color_stop(1.0, "#7c3aed")?;
        } else {
            let a = body_opacity(index);
            fill.add_color_stop(0.0, &format!("rgba(139, 92, 246, {a})"))?;
            fill.add_color_stop(1.0, &format!("rgba(124, 58, 237, {a})"))?;
        }
        ctx.set_fill_style_canvas_gradient(&fill);
        rounded_rect(ctx, sx, sy, cell, cell, SEGMENT_RADIUS)?;
        ctx.fill();

        if index == 0 {
            // shine
            ctx.set_fill_style_str("rgba(255, 255, 255, 0.3)");
            rounded_rect(ctx, sx + 2.0, sy + 2.0, cell - 4.0, cell - 4.0, SEGMENT_RADIUS - 1.0)?;
            ctx.fill();
        }
    }
    Ok(())
}

/// Body segments fade with distance from the head, never below 0.3.
fn body_opacity(index: usize) -> f64 {
    (0.9 - index as f64 * 0.05).max(0.3)
}

fn rounded_rect(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    r: f64,
) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    ctx.close_path();
    Ok(())
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}

#[cfg(test)]
mod tests {
    use super::body_opacity;

    #[test]
    fn body_fades_to_floor() {
        assert!((body_opacity(1) - 0.85).abs() < 1e-9);
        assert!((body_opacity(6) - 0.6).abs() < 1e-9);
        assert_eq!(body_opacity(40), 0.3);
    }
}
