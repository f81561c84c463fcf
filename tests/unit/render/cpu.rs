use super::*;
use crate::foundation::core::Canvas;

const NAVY: Rgba8 = Rgba8::hex(0x181830);
const WHITE: Rgba8 = Rgba8::hex(0xFFFFFF);
const LIME: Rgba8 = Rgba8::hex(0xD7EF3F);
const RED: Rgba8 = Rgba8::hex(0xFF0000);

fn surface(w: u32, h: u32, items: Vec<DrawItem>) -> RenderSurface {
    RenderSurface {
        format_id: "test".into(),
        canvas: Canvas::new(w, h),
        background: NAVY,
        items,
    }
}

fn capture(s: &RenderSurface) -> FrameRGBA {
    let geometry = CaptureGeometry::new(&s.format_id, s.canvas, "test");
    CpuCapture::new().capture(s, &geometry).unwrap()
}

fn pixel(f: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * f.width + x) * 4) as usize;
    [f.data[i], f.data[i + 1], f.data[i + 2], f.data[i + 3]]
}

#[test]
fn background_covers_every_pixel_at_exact_size() {
    let f = capture(&surface(13, 7, Vec::new()));
    assert_eq!((f.width, f.height), (13, 7));
    assert_eq!(f.data.len(), 13 * 7 * 4);
    assert!(f.premultiplied);
    assert_eq!(pixel(&f, 0, 0), NAVY.to_array());
    assert_eq!(pixel(&f, 12, 6), NAVY.to_array());
}

#[test]
fn panel_fill_and_inner_stroke() {
    let f = capture(&surface(
        20,
        20,
        vec![DrawItem::Panel {
            name: "card",
            rect: Rect::new(0.0, 0.0, 20.0, 20.0),
            radius: 0.0,
            fill: Some(WHITE),
            stroke: Some((LIME, 2.0)),
        }],
    ));
    assert_eq!(pixel(&f, 10, 0), LIME.to_array());
    assert_eq!(pixel(&f, 1, 10), LIME.to_array());
    assert_eq!(pixel(&f, 10, 10), WHITE.to_array());
}

#[test]
fn missing_asset_draws_placeholder() {
    let f = capture(&surface(
        20,
        20,
        vec![DrawItem::Image {
            rect: Rect::new(10.0, 10.0, 20.0, 20.0),
            radius: 0.0,
            key: Some("missing.png".into()),
            asset: None,
            placeholder: LIME,
        }],
    ));
    assert_eq!(pixel(&f, 15, 15), LIME.to_array());
    assert_eq!(pixel(&f, 5, 5), NAVY.to_array());
    assert_eq!(pixel(&f, 10, 15), lighten(LIME).to_array());
}

#[test]
fn raster_asset_is_cover_fitted() {
    let red = PreparedImage {
        width: 2,
        height: 1,
        rgba8_premul: Arc::new(RED.to_array().repeat(2)),
    };
    let f = capture(&surface(
        20,
        20,
        vec![DrawItem::Image {
            rect: Rect::new(0.0, 0.0, 10.0, 20.0),
            radius: 0.0,
            key: Some("red.png".into()),
            asset: Some(ImageAsset::Raster(red)),
            placeholder: LIME,
        }],
    ));
    assert_eq!(pixel(&f, 5, 10), RED.to_array());
    assert_eq!(pixel(&f, 15, 10), NAVY.to_array());
}

#[test]
fn context_is_reused_across_captures() {
    let mut backend = CpuCapture::new();
    let s = surface(8, 8, Vec::new());
    let g = CaptureGeometry::new("test", s.canvas, "test");
    let a = backend.capture(&s, &g).unwrap();
    let b = backend.capture(&s, &g).unwrap();
    assert_eq!(a.data, b.data);

    let wide = surface(16, 4, Vec::new());
    let g = CaptureGeometry::new("test", wide.canvas, "test");
    assert_eq!(backend.capture(&wide, &g).unwrap().width, 16);
}

#[test]
fn oversized_canvas_is_rejected() {
    let s = surface(70_000, 1, Vec::new());
    let g = CaptureGeometry::new("huge", s.canvas, "test");
    let err = CpuCapture::new().capture(&s, &g).unwrap_err();
    assert_eq!(err.format_id(), Some("huge"));
}

#[test]
fn ring_has_outer_and_inner_subpaths() {
    let path = ring(Rect::new(0.0, 0.0, 10.0, 10.0), 3.0, 2.0);
    let moves = path
        .elements()
        .iter()
        .filter(|e| matches!(e, PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 2);
    let bbox = path.bounding_box();
    assert!(bbox.x0.abs() < 1e-6 && (bbox.x1 - 10.0).abs() < 1e-6);
    assert!(bbox.y0.abs() < 1e-6 && (bbox.y1 - 10.0).abs() < 1e-6);
}
