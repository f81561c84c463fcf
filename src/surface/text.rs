use std::borrow::Cow;

use crate::foundation::core::Rgba8;
use crate::layout::tree::TextAlign;
use crate::surface::fonts::FontBook;
use crate::typography::roles::FontFace;

/// Average advance of one character as a fraction of the font size, used when no face is loaded.
pub const ESTIMATE_ADVANCE: f32 = 0.55;
/// Line height as a fraction of the font size, used when no face is loaded.
pub const ESTIMATE_LINE_HEIGHT: f32 = 1.2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub(crate) struct TextBrush {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<Rgba8> for TextBrush {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Size of a block of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Widest line.
    pub width: f32,
    /// Total height.
    pub height: f32,
    /// Line count.
    pub lines: usize,
}

/// Glyph position relative to the text box origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedGlyph {
    /// Glyph id in the run's font.
    pub id: u32,
    /// Pen x.
    pub x: f32,
    /// Baseline y.
    pub y: f32,
}

/// Glyphs sharing one font, size and color.
#[derive(Clone, Debug)]
pub struct GlyphRun {
    /// Font the glyph ids index into.
    pub font: vello_cpu::peniko::FontData,
    /// Size in pixels.
    pub size: f32,
    /// Fill color.
    pub color: Rgba8,
    /// Positioned glyphs.
    pub glyphs: Vec<PlacedGlyph>,
}

/// Fully shaped text ready to paint.
#[derive(Clone, Debug)]
pub struct ShapedText {
    /// Runs in paint order.
    pub runs: Vec<GlyphRun>,
    /// Block size.
    pub metrics: TextMetrics,
}

/// Deterministic size estimate for text whose face is not registered.
///
/// Greedy word wrap at `max_width`; a single word wider than the limit gets its own line.
pub fn estimate_metrics(text: &str, size_px: f32, max_width: Option<f32>) -> TextMetrics {
    let advance = size_px * ESTIMATE_ADVANCE;
    let space = advance;
    let mut widest = 0.0f32;
    let mut lines = 0usize;
    for paragraph in text.split('\n') {
        let mut line_w = 0.0f32;
        let mut started = false;
        for word in paragraph.split_whitespace() {
            let w = word.chars().count() as f32 * advance;
            let next = if started { line_w + space + w } else { w };
            match max_width {
                Some(limit) if started && next > limit => {
                    widest = widest.max(line_w);
                    lines += 1;
                    line_w = w;
                }
                _ => line_w = next,
            }
            started = true;
        }
        widest = widest.max(line_w);
        lines += 1;
    }
    TextMetrics {
        width: widest,
        height: lines as f32 * size_px * ESTIMATE_LINE_HEIGHT,
        lines,
    }
}

/// Shapes text with `parley` against the faces registered in a [`FontBook`].
pub struct TextShaper {
    layout_ctx: parley::LayoutContext<TextBrush>,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextShaper").finish_non_exhaustive()
    }
}

impl TextShaper {
    /// Fresh layout context.
    pub fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    fn layout(
        &mut self,
        book: &mut FontBook,
        text: &str,
        face: &FontFace,
        size_px: f32,
        color: Rgba8,
        max_width: Option<f32>,
    ) -> parley::Layout<TextBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut book.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(face.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush::from(color)));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(max_width);
        layout.align(
            max_width,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        layout
    }

    /// Size of `text` in `face`, wrapped at `max_width`. Falls back to [`estimate_metrics`] when
    /// the family is not registered.
    pub fn measure(
        &mut self,
        book: &mut FontBook,
        text: &str,
        face: &FontFace,
        size_px: f32,
        max_width: Option<f32>,
    ) -> TextMetrics {
        if !book.has_family(&face.family) {
            return estimate_metrics(text, size_px, max_width);
        }
        let layout = self.layout(book, text, face, size_px, Rgba8::hex(0), max_width);
        TextMetrics {
            width: layout.width(),
            height: layout.height(),
            lines: layout.lines().count(),
        }
    }

    /// Shape `text` into paintable glyph runs inside a box `box_width` wide.
    ///
    /// Returns `None` when the family is not registered; such text keeps its estimated box but is
    /// not painted.
    #[allow(clippy::too_many_arguments)]
    pub fn shape(
        &mut self,
        book: &mut FontBook,
        text: &str,
        face: &FontFace,
        size_px: f32,
        color: Rgba8,
        align: TextAlign,
        box_width: f32,
    ) -> Option<ShapedText> {
        let font = book.face(&face.family, face.weight)?.data.clone();
        let layout = self.layout(book, text, face, size_px, color, Some(box_width));

        let mut runs = Vec::new();
        for line in layout.lines() {
            let offset = match align {
                TextAlign::Start => 0.0,
                TextAlign::Center => ((box_width - line.metrics().advance) * 0.5).max(0.0),
            };
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                let glyphs = run
                    .glyphs()
                    .map(|g| PlacedGlyph {
                        id: g.id,
                        x: g.x + offset,
                        y: g.y,
                    })
                    .collect();
                runs.push(GlyphRun {
                    font: font.clone(),
                    size: run.run().font_size(),
                    color: Rgba8 {
                        r: brush.r,
                        g: brush.g,
                        b: brush.b,
                        a: brush.a,
                    },
                    glyphs,
                });
            }
        }

        Some(ShapedText {
            runs,
            metrics: TextMetrics {
                width: layout.width(),
                height: layout.height(),
                lines: layout.lines().count(),
            },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/text.rs"]
mod tests;
