use crate::eval::remaining::RemainingDuration;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::CountdownResult;
use crate::foundation::math::round_px;
use crate::render::backend::Bitmap;
use crate::render::layout::{StyleDerivedLayout, TILE_COUNT};
use crate::render::text::{PlacedText, TextEngine, VAlign};
use crate::request::model::RenderRequest;
use kurbo::{Point, Shape};

/// Fill of the unit tiles.
pub const TILE_FILL: Rgb8 = Rgb8::new(0xf0, 0xf4, 0xff);

const BORDER_ALPHA: u8 = 0x33;
const LABEL_ALPHA: u8 = 0x88;
const SEPARATOR_ALPHA: u8 = 0x66;

const LABEL_SCALE: f64 = 0.32;
const SEPARATOR_SCALE: f64 = 0.7;
const EXPIRED_SCALE: f64 = 0.65;

/// Rasterize one countdown frame with a fresh backend.
///
/// The request is validated first. The result is always `width x round(width * 0.28)` pixels
/// and fully opaque.
pub fn rasterize(remaining: &RemainingDuration, request: &RenderRequest) -> CountdownResult<Bitmap> {
    CpuRasterizer::new().rasterize(remaining, request)
}

/// CPU rasterizer powered by `vello_cpu`, with text shaped by `parley`.
///
/// Holds a reusable render context and text engine between frames; every frame is still painted
/// from a blank background.
#[derive(Default)]
pub struct CpuRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    text: Option<TextEngine>,
}

impl CpuRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> CountdownResult<R>,
    ) -> CountdownResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    /// Validate `request` and paint the frame for `remaining`.
    pub fn rasterize(
        &mut self,
        remaining: &RemainingDuration,
        request: &RenderRequest,
    ) -> CountdownResult<Bitmap> {
        request.validate()?;
        let canvas = request.canvas();
        let (w, h) = canvas.to_u16()?;

        let mut text = match self.text.take() {
            Some(text) => text,
            None => TextEngine::new()?,
        };
        let out = self.with_ctx_mut(w, h, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            set_paint(ctx, request.background.to_rgba8());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(canvas.width),
                f64::from(canvas.height),
            ));

            if remaining.expired {
                paint_expired(ctx, &mut text, canvas, request)?;
            } else {
                paint_tiles(ctx, &mut text, canvas, remaining, request)?;
            }

            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(Bitmap::from_premul_pixmap(&pixmap, request.background))
        });
        self.text = Some(text);
        out
    }
}

fn paint_expired(
    ctx: &mut vello_cpu::RenderContext,
    text: &mut TextEngine,
    canvas: Canvas,
    request: &RenderRequest,
) -> CountdownResult<()> {
    let center = Point::new(
        f64::from(canvas.width) / 2.0,
        f64::from(canvas.height) / 2.0,
    );
    let placed = text.place(
        &request.labels.expired,
        f64::from(round_px(f64::from(request.font_size) * EXPIRED_SCALE)),
        f64::from(canvas.width) * 0.9,
        center,
        VAlign::Middle,
        request.foreground.to_rgba8(),
    )?;
    draw_text(ctx, text.font(), &placed);
    Ok(())
}

fn paint_tiles(
    ctx: &mut vello_cpu::RenderContext,
    text: &mut TextEngine,
    canvas: Canvas,
    remaining: &RemainingDuration,
    request: &RenderRequest,
) -> CountdownResult<()> {
    let layout = StyleDerivedLayout::compute(canvas);
    let font = f64::from(request.font_size);
    let label_size = f64::from(round_px(font * LABEL_SCALE));
    let separator_size = f64::from(round_px(font * SEPARATOR_SCALE));
    let max_text_w = layout.tile_text_width();
    let fg = request.foreground;

    let values = remaining.units();
    let labels = request.labels.units();
    for slot in 0..TILE_COUNT {
        let mut tile = kurbo::BezPath::new();
        tile.extend(layout.tile_shape(slot).path_elements(0.1));
        let tile = bezpath_to_cpu(&tile);

        set_paint(ctx, TILE_FILL.to_rgba8());
        ctx.fill_path(&tile);
        set_paint(ctx, fg.with_alpha(BORDER_ALPHA));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(1.0));
        ctx.stroke_path(&tile);

        // Days may exceed two digits; the value then shrinks to stay inside the tile.
        let value = format!("{:02}", values[slot]);
        let placed = text.place(
            &value,
            font,
            max_text_w,
            layout.value_center(slot),
            VAlign::Middle,
            fg.to_rgba8(),
        )?;
        draw_text(ctx, text.font(), &placed);

        let placed = text.place(
            labels[slot],
            label_size,
            max_text_w,
            layout.label_top(slot),
            VAlign::Top,
            fg.with_alpha(LABEL_ALPHA),
        )?;
        draw_text(ctx, text.font(), &placed);

        if let Some(center) = layout.separator_center(slot) {
            let placed = text.place(
                ":",
                separator_size,
                f64::INFINITY,
                center,
                VAlign::Middle,
                fg.with_alpha(SEPARATOR_ALPHA),
            )?;
            draw_text(ctx, text.font(), &placed);
        }
    }
    Ok(())
}

fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    placed: &PlacedText,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        placed.origin.x,
        placed.origin.y,
    )));
    for line in placed.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            set_paint(ctx, run.style().brush.0);
            let baseline = run.baseline();
            let mut pen_x = run.offset();
            let glyphs = run.glyphs().map(|g| {
                let glyph = vello_cpu::Glyph {
                    id: g.id,
                    x: pen_x + g.x,
                    y: baseline - g.y,
                };
                pen_x += g.advance;
                glyph
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

fn set_paint(ctx: &mut vello_cpu::RenderContext, [r, g, b, a]: [u8; 4]) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
