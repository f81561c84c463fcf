use crate::foundation::core::{Canvas, Rgba8};
use crate::layout::content::{CreativeContent, Stat, Step, present};
use crate::layout::palette::Palette;
use crate::layout::tree::{
    Align, Border, BoxStyle, Edges, Extent, Justify, Node, TextAlign, TextSpec,
};
use crate::typography::roles::Role;

/// Column count for grids of at most [`GRID_SPLIT`] items.
pub const GRID_COLUMNS_FEW: usize = 2;
/// Column count for grids of more than [`GRID_SPLIT`] items.
pub const GRID_COLUMNS_MANY: usize = 3;
/// Item count at which grids switch to [`GRID_COLUMNS_MANY`].
pub const GRID_SPLIT: usize = 4;

/// Columns for a grid of `items` cards.
pub fn grid_columns(items: usize) -> usize {
    if items <= GRID_SPLIT {
        GRID_COLUMNS_FEW
    } else {
        GRID_COLUMNS_MANY
    }
}

/// Inputs shared by every arrangement.
#[derive(Clone, Copy, Debug)]
pub struct ArrangeCtx<'a> {
    /// Target geometry.
    pub canvas: Canvas,
    /// Spacing multiplier, `min(w, h) / 1080`.
    pub unit: f32,
    /// Injected brand colors.
    pub palette: &'a Palette,
}

impl<'a> ArrangeCtx<'a> {
    /// Context for `canvas`.
    pub fn new(canvas: Canvas, palette: &'a Palette) -> Self {
        Self {
            canvas,
            unit: canvas.design_unit(),
            palette,
        }
    }

    /// Design pixels to canvas pixels.
    pub fn px(&self, design: f32) -> f32 {
        design * self.unit
    }
}

fn text(role: Role, s: &str, color: Rgba8, align: TextAlign) -> TextSpec {
    TextSpec {
        role,
        text: s.to_owned(),
        color,
        align,
        uppercase: false,
    }
}

/// Logo on the left, badge pill on the right. `None` when the creative has neither.
pub fn header_bar(content: &CreativeContent, ctx: &ArrangeCtx<'_>) -> Option<Node> {
    let logo = present(&content.logo);
    let badge = present(&content.badge);
    if logo.is_none() && badge.is_none() {
        return None;
    }
    let p = ctx.palette;
    let mut children = Vec::new();
    match logo {
        Some(l) => children.push(Node::text(
            "logo",
            TextSpec {
                uppercase: true,
                ..text(Role::Label, l, p.headline, TextAlign::Start)
            },
        )),
        None => children.push(Node::spacer(BoxStyle::default())),
    }
    if let Some(b) = badge {
        children.push(Node::container(
            "badge",
            BoxStyle::row()
                .padding(Edges::xy(ctx.px(18.0), ctx.px(8.0)))
                .panel(p.badge_fill, ctx.px(999.0), None),
            vec![Node::text(
                "badge-text",
                text(Role::Label, b, p.badge_text, TextAlign::Center),
            )],
        ));
    }
    Some(Node::container(
        "header-bar",
        BoxStyle::row()
            .justify(Justify::SpaceBetween)
            .align(Align::Center),
        children,
    ))
}

/// Course name and trust line on the left, call-to-action pill on the right.
///
/// `compact` drops the trust line and tightens padding for short canvases.
pub fn footer_bar(content: &CreativeContent, ctx: &ArrangeCtx<'_>, compact: bool) -> Option<Node> {
    let course = present(&content.course_name);
    let trust = present(&content.trust_text).filter(|_| !compact);
    let cta = present(&content.cta);
    if course.is_none() && trust.is_none() && cta.is_none() {
        return None;
    }
    let p = ctx.palette;
    let mut info = Vec::new();
    if let Some(c) = course {
        info.push(Node::text(
            "course-name",
            text(Role::Footer, c, p.headline, TextAlign::Start),
        ));
    }
    if let Some(t) = trust {
        info.push(Node::text(
            "trust-text",
            text(Role::Footer, t, p.footer_text, TextAlign::Start),
        ));
    }
    let mut children = vec![Node::container(
        "footer-info",
        BoxStyle::column().gap(ctx.px(4.0)).fill(),
        info,
    )];
    if let Some(c) = cta {
        children.push(Node::container(
            "cta",
            BoxStyle::row()
                .padding(Edges::xy(ctx.px(28.0), ctx.px(14.0)))
                .panel(p.cta_fill, ctx.px(12.0), None),
            vec![Node::text(
                "cta-text",
                TextSpec {
                    uppercase: true,
                    ..text(Role::Cta, &format!("{c} \u{2192}"), p.cta_text, TextAlign::Center)
                },
            )],
        ));
    }
    let pad = if compact { 14.0 } else { 22.0 };
    Some(Node::container(
        "footer-bar",
        BoxStyle::row()
            .justify(Justify::SpaceBetween)
            .align(Align::Center)
            .gap(ctx.px(24.0))
            .padding(Edges::xy(ctx.px(28.0), ctx.px(pad)))
            .panel(p.footer_fill, ctx.px(16.0), None),
        children,
    ))
}

/// Headline, accent line, subheadline and body copy.
pub fn headline_stack(content: &CreativeContent, ctx: &ArrangeCtx<'_>, align: TextAlign) -> Node {
    let p = ctx.palette;
    let mut children = vec![Node::text(
        "headline",
        TextSpec {
            uppercase: true,
            ..text(Role::Headline, content.headline.trim(), p.headline, align)
        },
    )];
    if let Some(a) = present(&content.headline_accent) {
        children.push(Node::text(
            "headline-accent",
            TextSpec {
                uppercase: true,
                ..text(Role::Headline, a, p.accent, align)
            },
        ));
    }
    if let Some(s) = present(&content.subheadline) {
        children.push(Node::text(
            "subheadline",
            text(Role::Subheadline, s, p.label, align),
        ));
    }
    if let Some(b) = present(&content.body) {
        children.push(Node::text("body", text(Role::Body, b, p.body, align)));
    }
    Node::container(
        "headline-stack",
        BoxStyle::column().gap(ctx.px(10.0)),
        children,
    )
}

fn card_style(ctx: &ArrangeCtx<'_>) -> BoxStyle {
    let p = ctx.palette;
    BoxStyle::column()
        .gap(ctx.px(6.0))
        .padding(Edges::all(ctx.px(20.0)))
        .panel(
            p.card,
            ctx.px(16.0),
            Some(Border {
                color: p.card_border,
                width: ctx.px(2.0).max(1.0),
            }),
        )
        .fill()
}

/// Rows of `columns` equal cells; the last row is padded with spacers so columns line up.
fn grid(name: &'static str, cells: Vec<Node>, columns: usize, gap: f32) -> Node {
    let mut rows = Vec::new();
    let mut cells = cells.into_iter().peekable();
    while cells.peek().is_some() {
        let mut row: Vec<Node> = cells.by_ref().take(columns).collect();
        while row.len() < columns {
            row.push(Node::spacer(BoxStyle::default().fill()));
        }
        rows.push(Node::container(
            "grid-row",
            BoxStyle::row().gap(gap),
            row,
        ));
    }
    Node::container(name, BoxStyle::column().gap(gap), rows)
}

/// Statistic cards. `None` when there are no stats.
pub fn stat_grid(stats: &[Stat], ctx: &ArrangeCtx<'_>, align: TextAlign) -> Option<Node> {
    if stats.is_empty() {
        return None;
    }
    let p = ctx.palette;
    let cells = stats
        .iter()
        .map(|s| {
            Node::container(
                "stat-card",
                card_style(ctx),
                vec![
                    Node::text(
                        "stat-value",
                        text(Role::Statistic, &s.value, p.statistic, align),
                    ),
                    Node::text("stat-label", text(Role::Label, &s.label, p.label, align)),
                ],
            )
        })
        .collect();
    Some(grid(
        "stat-grid",
        cells,
        grid_columns(stats.len()),
        ctx.px(14.0),
    ))
}

/// Timeline step cards. `None` when there are no steps.
pub fn step_grid(steps: &[Step], ctx: &ArrangeCtx<'_>) -> Option<Node> {
    if steps.is_empty() {
        return None;
    }
    let p = ctx.palette;
    let cells = steps
        .iter()
        .map(|s| {
            let mut children = vec![
                Node::text(
                    "step-label",
                    TextSpec {
                        uppercase: true,
                        ..text(Role::Label, &s.label, p.accent, TextAlign::Start)
                    },
                ),
                Node::text(
                    "step-title",
                    text(Role::CardTitle, &s.title, p.headline, TextAlign::Start),
                ),
            ];
            if let Some(d) = present(&s.desc) {
                children.push(Node::text(
                    "step-desc",
                    text(Role::Body, d, p.body, TextAlign::Start),
                ));
            }
            Node::container("step-card", card_style(ctx), children)
        })
        .collect();
    Some(grid(
        "step-grid",
        cells,
        grid_columns(steps.len()),
        ctx.px(12.0),
    ))
}

/// Wrapping row of tag pills. `None` when there are no tags.
pub fn tag_cloud(tags: &[String], ctx: &ArrangeCtx<'_>, justify: Justify) -> Option<Node> {
    let tags: Vec<&str> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if tags.is_empty() {
        return None;
    }
    let p = ctx.palette;
    let pills = tags
        .into_iter()
        .map(|t| {
            Node::container(
                "tag",
                BoxStyle::row()
                    .padding(Edges::xy(ctx.px(16.0), ctx.px(8.0)))
                    .panel(
                        p.card,
                        ctx.px(999.0),
                        Some(Border {
                            color: p.label,
                            width: ctx.px(2.0).max(1.0),
                        }),
                    ),
                vec![Node::text(
                    "tag-text",
                    text(Role::Label, t, p.headline, TextAlign::Center),
                )],
            )
        })
        .collect();
    let mut style = BoxStyle::row().gap(ctx.px(10.0)).justify(justify).wrapping();
    style.align = Align::Start;
    Some(Node::container("tag-cloud", style, pills))
}

/// Content body below the headline: stats, then steps, then tags, whichever are present.
pub fn detail_blocks(content: &CreativeContent, ctx: &ArrangeCtx<'_>, centered: bool) -> Vec<Node> {
    let (align, justify) = if centered {
        (TextAlign::Center, Justify::Center)
    } else {
        (TextAlign::Start, Justify::Start)
    };
    [
        stat_grid(&content.stats, ctx, align),
        step_grid(&content.steps, ctx),
        tag_cloud(&content.tags, ctx, justify),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Illustration panel. Missing keys still produce a panel so the composition keeps its shape.
pub fn image_panel(content: &CreativeContent, ctx: &ArrangeCtx<'_>, style: BoxStyle) -> Node {
    let style = BoxStyle {
        radius: ctx.px(24.0),
        ..style
    };
    Node::image(
        "image-panel",
        style,
        present(&content.image).map(str::to_owned),
    )
}

/// Percent extent helper.
pub(crate) fn pct(fraction: f32) -> Extent {
    Extent::Percent(fraction)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/primitives.rs"]
mod tests;
