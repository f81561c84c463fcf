use std::sync::Arc;

use kurbo::{ParamCurve, PathEl, Shape};

use crate::capture::backend::{CaptureBackend, CaptureGeometry, FrameRGBA};
use crate::capture::pipeline::JobPhase;
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::{AdrasterError, AdrasterResult};
use crate::surface::draw::{DrawItem, RenderSurface};
use crate::surface::images::{ImageAsset, PreparedImage, rasterize_svg};
use crate::surface::text::ShapedText;

const PATH_TOLERANCE: f64 = 0.1;
const PLACEHOLDER_OUTLINE: f64 = 2.0;

/// CPU rasterizer over `vello_cpu`. One canvas pixel per output pixel.
#[derive(Default)]
pub struct CpuCapture {
    ctx: Option<(u16, u16, vello_cpu::RenderContext)>,
}

impl std::fmt::Debug for CpuCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCapture")
            .field("size", &self.ctx.as_ref().map(|(w, h, _)| (*w, *h)))
            .finish()
    }
}

impl CpuCapture {
    /// Backend with no context allocated yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self, w: u16, h: u16) -> &mut vello_cpu::RenderContext {
        let reuse = matches!(&self.ctx, Some((cw, ch, _)) if *cw == w && *ch == h);
        if !reuse {
            self.ctx = None;
        }
        let (_, _, ctx) = self
            .ctx
            .get_or_insert_with(|| (w, h, vello_cpu::RenderContext::new(w, h)));
        if reuse {
            ctx.reset();
        }
        ctx
    }
}

impl CaptureBackend for CpuCapture {
    #[tracing::instrument(skip_all, fields(format = %geometry.format_id, w = geometry.width, h = geometry.height))]
    fn capture(
        &mut self,
        surface: &RenderSurface,
        geometry: &CaptureGeometry,
    ) -> AdrasterResult<FrameRGBA> {
        let fail = |msg: &str| {
            AdrasterError::capture(geometry.format_id.clone(), JobPhase::Capturing, msg)
        };
        let w: u16 = geometry
            .width
            .try_into()
            .map_err(|_| fail("canvas width exceeds u16"))?;
        let h: u16 = geometry
            .height
            .try_into()
            .map_err(|_| fail("canvas height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(fail("canvas must be non-empty"));
        }

        let ctx = self.context(w, h);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color(surface.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));

        for item in &surface.items {
            draw_item(ctx, item)?;
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: geometry.width,
            height: geometry.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_item(ctx: &mut vello_cpu::RenderContext, item: &DrawItem) -> AdrasterResult<()> {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    match item {
        DrawItem::Panel {
            rect,
            radius,
            fill,
            stroke,
            ..
        } => {
            if let Some(fill) = fill {
                ctx.set_paint(color(*fill));
                ctx.fill_path(&to_cpu(&rounded(*rect, *radius)));
            }
            if let Some((c, width)) = stroke
                && *width > 0.0
            {
                ctx.set_paint(color(*c));
                ctx.fill_path(&to_cpu(&ring(*rect, *radius, *width)));
            }
            Ok(())
        }
        DrawItem::Text { rect, shaped, .. } => {
            if let Some(shaped) = shaped {
                draw_text(ctx, *rect, shaped);
            }
            Ok(())
        }
        DrawItem::Image {
            rect,
            radius,
            asset,
            placeholder,
            ..
        } => {
            let path = to_cpu(&rounded(*rect, *radius));
            let paint = match asset {
                Some(a) => cover_paint(a, *rect)?,
                None => None,
            };
            match paint {
                Some((image, xform)) => {
                    ctx.set_paint_transform(xform);
                    ctx.set_paint(image);
                    ctx.fill_path(&path);
                }
                None => {
                    ctx.set_paint(color(*placeholder));
                    ctx.fill_path(&path);
                    ctx.set_paint(color(lighten(*placeholder)));
                    ctx.fill_path(&to_cpu(&ring(*rect, *radius, PLACEHOLDER_OUTLINE)));
                }
            }
            Ok(())
        }
    }
}

fn draw_text(ctx: &mut vello_cpu::RenderContext, rect: Rect, shaped: &ShapedText) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((rect.x0, rect.y0)));
    for run in &shaped.runs {
        ctx.set_paint(color(run.color));
        let glyphs = run.glyphs.iter().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        });
        ctx.glyph_run(&run.font)
            .font_size(run.size)
            .fill_glyphs(glyphs);
    }
}

/// Image paint and the transform that cover-fits it into `rect`, centered.
///
/// `None` for assets with no pixels.
fn cover_paint(
    asset: &ImageAsset,
    rect: Rect,
) -> AdrasterResult<Option<(vello_cpu::Image, vello_cpu::kurbo::Affine)>> {
    let (rw, rh) = (rect.width(), rect.height());
    if rw <= 0.0 || rh <= 0.0 {
        return Ok(None);
    }
    let prepared = match asset {
        ImageAsset::Raster(img) => img.clone(),
        ImageAsset::Svg(tree) => {
            let size = tree.size();
            let (iw, ih) = (f64::from(size.width()), f64::from(size.height()));
            if iw <= 0.0 || ih <= 0.0 {
                return Ok(None);
            }
            let s = (rw / iw).max(rh / ih);
            rasterize_svg(tree, (iw * s).ceil() as u32, (ih * s).ceil() as u32)?
        }
    };
    if prepared.width == 0 || prepared.height == 0 {
        return Ok(None);
    }

    let (iw, ih) = (f64::from(prepared.width), f64::from(prepared.height));
    let s = (rw / iw).max(rh / ih);
    let ox = rect.x0 + (rw - iw * s) / 2.0;
    let oy = rect.y0 + (rh - ih * s) / 2.0;
    let xform = vello_cpu::kurbo::Affine::translate((ox, oy))
        * vello_cpu::kurbo::Affine::scale(s);

    let pixmap = premul_pixmap(&prepared)?;
    Ok(Some((
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        },
        xform,
    )))
}

fn premul_pixmap(img: &PreparedImage) -> AdrasterResult<vello_cpu::Pixmap> {
    let w: u16 = img
        .width
        .try_into()
        .map_err(|_| AdrasterError::encode("image width exceeds u16"))?;
    let h: u16 = img
        .height
        .try_into()
        .map_err(|_| AdrasterError::encode("image height exceeds u16"))?;
    if img.rgba8_premul.len() != img.width as usize * img.height as usize * 4 {
        return Err(AdrasterError::encode("prepared image byte length mismatch"));
    }
    let mut may_have_opacities = false;
    let pixels: Vec<_> = img
        .rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

/// Halfway towards white, alpha kept.
fn lighten(c: Rgba8) -> Rgba8 {
    let up = |v: u8| ((u16::from(v) + 255) / 2) as u8;
    Rgba8 {
        r: up(c.r),
        g: up(c.g),
        b: up(c.b),
        a: c.a,
    }
}

fn color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rounded(rect: Rect, radius: f64) -> kurbo::BezPath {
    let r = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    kurbo::RoundedRect::from_rect(rect, r).to_path(PATH_TOLERANCE)
}

/// Inner stroke as a filled ring: the outer outline plus the inset outline wound backwards.
fn ring(rect: Rect, radius: f64, width: f64) -> kurbo::BezPath {
    let mut out = rounded(rect, radius);
    let inner_rect = rect.inset(-width);
    if inner_rect.width() <= 0.0 || inner_rect.height() <= 0.0 {
        return out;
    }
    let inner = rounded(inner_rect, (radius - width).max(0.0));
    let segs: Vec<kurbo::PathSeg> = inner.segments().collect();
    let Some(last) = segs.last() else {
        return out;
    };
    out.move_to(last.end());
    for seg in segs.iter().rev().map(|s| s.reverse()) {
        match seg {
            kurbo::PathSeg::Line(l) => out.line_to(l.p1),
            kurbo::PathSeg::Quad(q) => out.quad_to(q.p1, q.p2),
            kurbo::PathSeg::Cubic(c) => out.curve_to(c.p1, c.p2, c.p3),
        }
    }
    out.close_path();
    out
}

fn to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
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
