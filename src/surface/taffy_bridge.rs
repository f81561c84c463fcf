use taffy::prelude::{AvailableSpace, NodeId, Size};
use taffy::style::{
    AlignItems, Dimension, Display, FlexDirection, FlexWrap, JustifyContent, LengthPercentage,
    Style,
};

use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::{AdrasterError, AdrasterResult};
use crate::layout::tree::{Align, BoxStyle, Direction, Extent, Justify, Node, NodeKind, TextSpec};
use crate::surface::draw::{DrawItem, RenderSurface};
use crate::surface::fonts::FontBook;
use crate::surface::images::ImageLibrary;
use crate::surface::text::TextShaper;
use crate::typography::roles::FontFace;
use crate::typography::scale::TypographyScale;

#[derive(Clone, Debug)]
enum LeafCtx {
    Text {
        text: String,
        face: FontFace,
        size_px: f32,
    },
    Fixed,
}

/// Mirror of the node tree holding the taffy id of every node.
struct Built {
    id: NodeId,
    children: Vec<Built>,
}

/// Everything layout and realization read besides the tree itself.
pub struct RealizeInputs<'a> {
    /// Sizes and faces per role.
    pub scale: &'a TypographyScale,
    /// Registered fonts.
    pub fonts: &'a mut FontBook,
    /// Text shaper.
    pub shaper: &'a mut TextShaper,
    /// Illustration source.
    pub images: &'a mut ImageLibrary,
    /// Fill for missing illustrations.
    pub placeholder: Rgba8,
}

/// Solves a [`Node`] tree with taffy flexbox and flattens it into a [`RenderSurface`].
#[derive(Debug)]
pub(crate) struct TaffyBridge {
    taffy: taffy::TaffyTree<LeafCtx>,
}

impl Default for TaffyBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn taffy_err(e: taffy::TaffyError) -> AdrasterError {
    AdrasterError::layout(e.to_string())
}

fn dimension(e: Extent) -> Dimension {
    match e {
        Extent::Auto => Dimension::auto(),
        Extent::Px(v) => Dimension::length(v.max(0.0)),
        Extent::Percent(f) => Dimension::percent(f.clamp(0.0, 1.0)),
    }
}

fn style_for(s: &BoxStyle) -> Style {
    let len = |v: f32| LengthPercentage::length(v.max(0.0));
    let mut style = Style {
        display: Display::Flex,
        flex_direction: match s.direction {
            Direction::Row => FlexDirection::Row,
            Direction::Column => FlexDirection::Column,
        },
        flex_wrap: if s.wrap {
            FlexWrap::Wrap
        } else {
            FlexWrap::NoWrap
        },
        justify_content: Some(match s.justify {
            Justify::Start => JustifyContent::Start,
            Justify::Center => JustifyContent::Center,
            Justify::End => JustifyContent::End,
            Justify::SpaceBetween => JustifyContent::SpaceBetween,
        }),
        align_items: Some(match s.align {
            Align::Start => AlignItems::Start,
            Align::Center => AlignItems::Center,
            Align::End => AlignItems::End,
            Align::Stretch => AlignItems::Stretch,
        }),
        gap: Size {
            width: len(s.gap),
            height: len(s.gap),
        },
        padding: taffy::geometry::Rect {
            left: len(s.padding.left),
            right: len(s.padding.right),
            top: len(s.padding.top),
            bottom: len(s.padding.bottom),
        },
        size: Size {
            width: dimension(s.width),
            height: dimension(s.height),
        },
        flex_basis: dimension(s.basis),
        flex_grow: s.grow.max(0.0),
        flex_shrink: s.shrink.max(0.0),
        ..Default::default()
    };
    if s.grow > 0.0 {
        // Growing regions may also shrink below their content.
        style.min_size = Size {
            width: Dimension::length(0.0),
            height: Dimension::length(0.0),
        };
    }
    style
}

impl TaffyBridge {
    pub(crate) fn new() -> Self {
        Self {
            taffy: taffy::TaffyTree::new(),
        }
    }

    fn build_subtree(&mut self, node: &Node, scale: &TypographyScale) -> AdrasterResult<Built> {
        let style = style_for(&node.style);
        match &node.kind {
            NodeKind::Container(children) => {
                let built = children
                    .iter()
                    .map(|c| self.build_subtree(c, scale))
                    .collect::<AdrasterResult<Vec<_>>>()?;
                let ids: Vec<NodeId> = built.iter().map(|b| b.id).collect();
                let id = self
                    .taffy
                    .new_with_children(style, &ids)
                    .map_err(taffy_err)?;
                Ok(Built {
                    id,
                    children: built,
                })
            }
            NodeKind::Text(spec) => {
                let ctx = LeafCtx::Text {
                    text: spec.display_text(),
                    face: scale.face(spec.role).clone(),
                    size_px: scale.size(spec.role) as f32,
                };
                let id = self
                    .taffy
                    .new_leaf_with_context(style, ctx)
                    .map_err(taffy_err)?;
                Ok(Built {
                    id,
                    children: Vec::new(),
                })
            }
            NodeKind::Image(_) | NodeKind::Spacer => {
                let id = self
                    .taffy
                    .new_leaf_with_context(style, LeafCtx::Fixed)
                    .map_err(taffy_err)?;
                Ok(Built {
                    id,
                    children: Vec::new(),
                })
            }
        }
    }

    /// Lay out `tree` at exactly `canvas` and flatten it into paint order.
    #[tracing::instrument(skip(self, tree, inputs), fields(w = canvas.width, h = canvas.height))]
    pub(crate) fn realize(
        &mut self,
        format_id: &str,
        tree: &Node,
        canvas: Canvas,
        background: Rgba8,
        inputs: RealizeInputs<'_>,
    ) -> AdrasterResult<RenderSurface> {
        self.taffy = taffy::TaffyTree::new();
        let built = self.build_subtree(tree, inputs.scale)?;

        let (cw, ch) = (canvas.width as f32, canvas.height as f32);
        let mut root_style = style_for(&tree.style);
        root_style.size = Size {
            width: Dimension::length(cw),
            height: Dimension::length(ch),
        };
        self.taffy
            .set_style(built.id, root_style)
            .map_err(taffy_err)?;

        let RealizeInputs {
            scale,
            fonts,
            shaper,
            images,
            placeholder,
        } = inputs;

        let available = Size {
            width: AvailableSpace::Definite(cw),
            height: AvailableSpace::Definite(ch),
        };
        self.taffy
            .compute_layout_with_measure(
                built.id,
                available,
                |known_dimensions, available_space, _node_id, node_context, _style| {
                    let Some(LeafCtx::Text {
                        text,
                        face,
                        size_px,
                    }) = node_context
                    else {
                        return known_dimensions.unwrap_or(Size::ZERO);
                    };
                    let limit = known_dimensions.width.or(match available_space.width {
                        AvailableSpace::Definite(w) => Some(w),
                        AvailableSpace::MinContent => Some(0.0),
                        AvailableSpace::MaxContent => None,
                    });
                    let m = shaper.measure(fonts, text, face, *size_px, limit);
                    Size {
                        width: known_dimensions.width.unwrap_or(m.width.ceil()),
                        height: known_dimensions.height.unwrap_or(m.height.ceil()),
                    }
                },
            )
            .map_err(taffy_err)?;

        let mut items = Vec::new();
        let mut emit = Emitter {
            taffy: &self.taffy,
            scale,
            fonts,
            shaper,
            images,
            placeholder,
            items: &mut items,
        };
        emit.node(tree, &built, 0.0, 0.0)?;

        tracing::debug!(items = items.len(), "surface realized");
        Ok(RenderSurface {
            format_id: format_id.to_owned(),
            canvas,
            background,
            items,
        })
    }
}

struct Emitter<'a, 'b> {
    taffy: &'a taffy::TaffyTree<LeafCtx>,
    scale: &'a TypographyScale,
    fonts: &'b mut FontBook,
    shaper: &'b mut TextShaper,
    images: &'b mut ImageLibrary,
    placeholder: Rgba8,
    items: &'b mut Vec<DrawItem>,
}

impl Emitter<'_, '_> {
    fn node(&mut self, node: &Node, built: &Built, px: f64, py: f64) -> AdrasterResult<()> {
        let l = self.taffy.layout(built.id).map_err(taffy_err)?;
        let x = px + f64::from(l.location.x);
        let y = py + f64::from(l.location.y);
        let rect = Rect::new(
            x,
            y,
            x + f64::from(l.size.width),
            y + f64::from(l.size.height),
        );

        match &node.kind {
            NodeKind::Container(children) => {
                let s = &node.style;
                if s.background.is_some() || s.border.is_some() {
                    self.items.push(DrawItem::Panel {
                        name: node.name,
                        rect,
                        radius: f64::from(s.radius),
                        fill: s.background,
                        stroke: s.border.map(|b| (b.color, f64::from(b.width))),
                    });
                }
                for (child, b) in children.iter().zip(&built.children) {
                    self.node(child, b, x, y)?;
                }
            }
            NodeKind::Text(spec) => self.text(node.name, spec, rect),
            NodeKind::Image(key) => {
                let asset = key.as_deref().and_then(|k| self.images.get(k));
                self.items.push(DrawItem::Image {
                    rect,
                    radius: f64::from(node.style.radius),
                    key: key.clone(),
                    asset,
                    placeholder: self.placeholder,
                });
            }
            NodeKind::Spacer => {}
        }
        Ok(())
    }

    fn text(&mut self, name: &'static str, spec: &TextSpec, rect: Rect) {
        let text = spec.display_text();
        let face = self.scale.face(spec.role);
        let size_px = self.scale.size(spec.role);
        let shaped = self.shaper.shape(
            self.fonts,
            &text,
            face,
            size_px as f32,
            spec.color,
            spec.align,
            rect.width() as f32,
        );
        self.items.push(DrawItem::Text {
            name,
            rect,
            role: spec.role,
            size_px,
            text,
            shaped,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/taffy_bridge.rs"]
mod tests;
