use std::collections::BTreeMap;

use crate::format::registry::LayoutVariant;
use crate::foundation::error::{AdrasterError, AdrasterResult};
use crate::layout::content::{CreativeContent, present};
use crate::layout::primitives::{
    ArrangeCtx, detail_blocks, footer_bar, header_bar, headline_stack, image_panel, pct,
};
use crate::layout::tree::{BoxStyle, Edges, Justify, Node, TextAlign};

/// Pure, total composition of content into a visual tree.
pub type ArrangeFn = fn(&CreativeContent, &ArrangeCtx<'_>) -> Node;

/// One arrangement function per [`LayoutVariant`], selected at a single dispatch point.
#[derive(Clone, Debug)]
pub struct ArrangementRegistry {
    table: BTreeMap<LayoutVariant, ArrangeFn>,
}

impl Default for ArrangementRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ArrangementRegistry {
    /// Build from explicit entries. Every variant must be covered exactly once.
    pub fn new(entries: Vec<(LayoutVariant, ArrangeFn)>) -> AdrasterResult<Self> {
        let mut table = BTreeMap::new();
        for (variant, f) in entries {
            if table.insert(variant, f).is_some() {
                return Err(AdrasterError::config(format!(
                    "arrangement for '{variant}' registered twice"
                )));
            }
        }
        if let Some(missing) = LayoutVariant::ALL.iter().find(|v| !table.contains_key(v)) {
            return Err(AdrasterError::config(format!(
                "no arrangement registered for '{missing}'"
            )));
        }
        Ok(Self { table })
    }

    /// Built-in arrangements.
    pub fn builtin() -> Self {
        let table = BTreeMap::from([
            (LayoutVariant::Square, stacked_center as ArrangeFn),
            (LayoutVariant::Portrait, stacked_roomy as ArrangeFn),
            (LayoutVariant::Story, stacked_story as ArrangeFn),
            (LayoutVariant::Landscape, side_by_side as ArrangeFn),
            (LayoutVariant::WideThumbnail, headline_only as ArrangeFn),
        ]);
        Self { table }
    }

    /// Replace the arrangement for one variant.
    pub fn with(mut self, variant: LayoutVariant, f: ArrangeFn) -> Self {
        self.table.insert(variant, f);
        self
    }

    /// Compose `content` for `variant`.
    pub fn select(
        &self,
        variant: LayoutVariant,
        content: &CreativeContent,
        ctx: &ArrangeCtx<'_>,
    ) -> Node {
        // The table is total by construction.
        let f = self.table.get(&variant).copied().unwrap_or(stacked_center);
        f(content, ctx)
    }
}

/// Compose with the built-in arrangements.
pub fn select_arrangement(
    variant: LayoutVariant,
    content: &CreativeContent,
    ctx: &ArrangeCtx<'_>,
) -> Node {
    ArrangementRegistry::builtin().select(variant, content, ctx)
}

fn root(ctx: &ArrangeCtx<'_>, pad_x: f32, pad_y: f32, gap: f32, children: Vec<Node>) -> Node {
    Node::container(
        "root",
        BoxStyle::column()
            .width(pct(1.0))
            .height(pct(1.0))
            .padding(Edges::xy(ctx.px(pad_x), ctx.px(pad_y)))
            .gap(ctx.px(gap)),
        children,
    )
}

fn push_opt(out: &mut Vec<Node>, n: Option<Node>) {
    if let Some(n) = n {
        out.push(n);
    }
}

/// Header, centered headline and details in a growing middle region, footer.
pub fn stacked_center(content: &CreativeContent, ctx: &ArrangeCtx<'_>) -> Node {
    let mut middle = vec![headline_stack(content, ctx, TextAlign::Center)];
    middle.extend(detail_blocks(content, ctx, true));

    let mut children = Vec::new();
    push_opt(&mut children, header_bar(content, ctx));
    children.push(Node::container(
        "content",
        BoxStyle::column()
            .justify(Justify::Center)
            .gap(ctx.px(28.0))
            .fill(),
        middle,
    ));
    push_opt(&mut children, footer_bar(content, ctx, false));
    root(ctx, 64.0, 56.0, 24.0, children)
}

/// Stacked like square, with more vertical room and the illustration under the headline.
pub fn stacked_roomy(content: &CreativeContent, ctx: &ArrangeCtx<'_>) -> Node {
    let mut middle = vec![headline_stack(content, ctx, TextAlign::Center)];
    if has_image(content) {
        middle.push(image_panel(
            content,
            ctx,
            BoxStyle::default().fill(),
        ));
    }
    middle.extend(detail_blocks(content, ctx, true));

    let mut children = Vec::new();
    push_opt(&mut children, header_bar(content, ctx));
    children.push(Node::container(
        "content",
        BoxStyle::column()
            .justify(Justify::Center)
            .gap(ctx.px(36.0))
            .fill(),
        middle,
    ));
    push_opt(&mut children, footer_bar(content, ctx, false));
    root(ctx, 64.0, 72.0, 32.0, children)
}

/// Tall stack with safe areas top and bottom; the illustration takes the free space.
pub fn stacked_story(content: &CreativeContent, ctx: &ArrangeCtx<'_>) -> Node {
    let mut children = Vec::new();
    push_opt(&mut children, header_bar(content, ctx));
    children.push(headline_stack(content, ctx, TextAlign::Start));
    if has_image(content) {
        children.push(image_panel(content, ctx, BoxStyle::default().fill()));
    }
    children.extend(detail_blocks(content, ctx, false));
    push_opt(&mut children, footer_bar(content, ctx, false));
    root(ctx, 64.0, 140.0, 18.0, children)
}

/// Text column at 60% beside a 40% illustration, compact footer. Without an illustration the
/// text column takes the full width.
pub fn side_by_side(content: &CreativeContent, ctx: &ArrangeCtx<'_>) -> Node {
    let mut text_col = vec![headline_stack(content, ctx, TextAlign::Start)];
    text_col.extend(detail_blocks(content, ctx, false));

    let column = BoxStyle::column()
        .justify(Justify::Center)
        .gap(ctx.px(18.0));
    let mut row = Vec::with_capacity(2);
    if has_image(content) {
        row.push(Node::container(
            "text-column",
            column.basis_percent(0.6),
            text_col,
        ));
        row.push(image_panel(content, ctx, BoxStyle::default().fill()));
    } else {
        row.push(Node::container("text-column", column.fill(), text_col));
    }
    let body = Node::container("content", BoxStyle::row().gap(ctx.px(32.0)).fill(), row);

    let mut children = Vec::new();
    push_opt(&mut children, header_bar(content, ctx));
    children.push(body);
    push_opt(&mut children, footer_bar(content, ctx, true));
    root(ctx, 48.0, 36.0, 16.0, children)
}

/// Header plus a centered headline and lead statistic; no footer.
pub fn headline_only(content: &CreativeContent, ctx: &ArrangeCtx<'_>) -> Node {
    let lead = CreativeContent {
        stats: content.stats.iter().take(1).cloned().collect(),
        steps: Vec::new(),
        tags: Vec::new(),
        body: None,
        ..content.clone()
    };
    let mut center = vec![headline_stack(&lead, ctx, TextAlign::Center)];
    center.extend(detail_blocks(&lead, ctx, true));

    let mut row = vec![Node::container(
        "headline-column",
        BoxStyle::column()
            .justify(Justify::Center)
            .gap(ctx.px(20.0))
            .fill(),
        center,
    )];
    if has_image(content) {
        row.push(image_panel(
            content,
            ctx,
            BoxStyle::default().basis_percent(0.35),
        ));
    }

    let mut children = Vec::new();
    push_opt(&mut children, header_bar(content, ctx));
    children.push(Node::container(
        "content",
        BoxStyle::row().gap(ctx.px(28.0)).fill(),
        row,
    ));
    root(ctx, 56.0, 40.0, 20.0, children)
}

fn has_image(content: &CreativeContent) -> bool {
    present(&content.image).is_some()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/arrangements.rs"]
mod tests;
