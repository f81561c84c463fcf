use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::surface::images::ImageAsset;
use crate::surface::text::ShapedText;
use crate::typography::roles::Role;

/// One paint operation in canvas pixel coordinates.
#[derive(Clone, Debug)]
pub enum DrawItem {
    /// Filled, optionally rounded and stroked box.
    Panel {
        /// Node name.
        name: &'static str,
        /// Absolute bounds.
        rect: Rect,
        /// Corner radius.
        radius: f64,
        /// Fill color.
        fill: Option<Rgba8>,
        /// Inner stroke `(color, width)`.
        stroke: Option<(Rgba8, f64)>,
    },
    /// Text block.
    Text {
        /// Node name.
        name: &'static str,
        /// Absolute bounds.
        rect: Rect,
        /// Role the size came from.
        role: Role,
        /// Resolved pixel size.
        size_px: u32,
        /// Text as laid out.
        text: String,
        /// Shaped glyphs, or `None` when the face was unavailable.
        shaped: Option<ShapedText>,
    },
    /// Illustration, cover-fitted to its bounds.
    Image {
        /// Absolute bounds.
        rect: Rect,
        /// Corner radius.
        radius: f64,
        /// Content key.
        key: Option<String>,
        /// Resolved asset, or `None` for a placeholder.
        asset: Option<ImageAsset>,
        /// Placeholder fill.
        placeholder: Rgba8,
    },
}

impl DrawItem {
    /// Absolute bounds.
    pub fn rect(&self) -> Rect {
        match self {
            Self::Panel { rect, .. } | Self::Text { rect, .. } | Self::Image { rect, .. } => *rect,
        }
    }
}

/// A realized creative: canvas, background and absolutely positioned paint list.
#[derive(Clone, Debug)]
pub struct RenderSurface {
    /// Format this surface was laid out for.
    pub format_id: String,
    /// Exact pixel geometry.
    pub canvas: Canvas,
    /// Canvas fill.
    pub background: Rgba8,
    /// Paint list, back to front.
    pub items: Vec<DrawItem>,
}

impl RenderSurface {
    /// Text items, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &DrawItem> {
        self.items
            .iter()
            .filter(|i| matches!(i, DrawItem::Text { .. }))
    }

    /// First item named `name`.
    pub fn find(&self, name: &str) -> Option<&DrawItem> {
        self.items.iter().find(|i| match i {
            DrawItem::Panel { name: n, .. } | DrawItem::Text { name: n, .. } => *n == name,
            DrawItem::Image { .. } => name == "image-panel",
        })
    }

    /// `true` when every item lies inside the canvas.
    pub fn fits_canvas(&self) -> bool {
        let bounds = Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        );
        const EPS: f64 = 0.5;
        self.items.iter().all(|i| {
            let r = i.rect();
            r.x0 >= bounds.x0 - EPS
                && r.y0 >= bounds.y0 - EPS
                && r.x1 <= bounds.x1 + EPS
                && r.y1 <= bounds.y1 + EPS
        })
    }
}
