//! Text shaping with `parley` against the bundled bold monospace face.

use std::borrow::Cow;

use kurbo::Point;

use crate::foundation::error::{CountdownError, CountdownResult};

/// DejaVu Sans Mono Bold (Bitstream Vera license, see `assets/fonts/LICENSE-DejaVu.txt`).
pub(crate) static FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono-Bold.ttf");

/// Straight RGBA8 brush carried through `parley` layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush(pub(crate) [u8; 4]);

/// Vertical anchoring of a text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum VAlign {
    /// Anchor is the middle of the line box.
    Middle,
    /// Anchor is the top of the line box.
    Top,
}

/// A shaped single-line layout and the top-left corner it is drawn at.
pub(crate) struct PlacedText {
    pub(crate) layout: parley::Layout<TextBrush>,
    pub(crate) origin: Point,
}

/// Shapes text with the bundled font; holds the `parley` contexts between frames.
pub(crate) struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextEngine {
    pub(crate) fn new() -> CountdownResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(FONT_BYTES.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CountdownError::validation("no font families registered from the bundled font")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CountdownError::validation("bundled font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(FONT_BYTES.to_vec()),
            0,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Font handle for `vello_cpu` glyph runs.
    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    fn shape(
        &mut self,
        text: &str,
        size_px: f64,
        brush: TextBrush,
    ) -> CountdownResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CountdownError::validation(
                "text size must be finite and > 0",
            ));
        }
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Advance width of `text` at `size_px`.
    pub(crate) fn measure(&mut self, text: &str, size_px: f64) -> CountdownResult<f64> {
        let layout = self.shape(text, size_px, TextBrush::default())?;
        Ok(f64::from(layout.width()))
    }

    /// Largest size up to `size_px` at which `text` is at most `max_width` wide.
    pub(crate) fn fit_size(
        &mut self,
        text: &str,
        size_px: f64,
        max_width: f64,
    ) -> CountdownResult<f64> {
        let w = self.measure(text, size_px)?;
        if w <= max_width || w <= 0.0 {
            return Ok(size_px);
        }
        Ok(size_px * max_width / w)
    }

    /// Shape `text`, shrunk to fit `max_width`, horizontally centered on `anchor.x`.
    pub(crate) fn place(
        &mut self,
        text: &str,
        size_px: f64,
        max_width: f64,
        anchor: Point,
        valign: VAlign,
        rgba: [u8; 4],
    ) -> CountdownResult<PlacedText> {
        let size = self.fit_size(text, size_px, max_width)?;
        let layout = self.shape(text, size, TextBrush(rgba))?;
        let w = f64::from(layout.width());
        let h = f64::from(layout.height());
        let top = match valign {
            VAlign::Middle => anchor.y - h / 2.0,
            VAlign::Top => anchor.y,
        };
        Ok(PlacedText {
            layout,
            origin: Point::new(anchor.x - w / 2.0, top),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
