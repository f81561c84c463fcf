use crate::foundation::core::Rgba8;
use crate::typography::roles::Role;

/// Main axis of a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Children left to right.
    Row,
    /// Children top to bottom.
    #[default]
    Column,
}

/// Main-axis distribution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Justify {
    /// Pack at the start.
    #[default]
    Start,
    /// Pack in the middle.
    Center,
    /// Pack at the end.
    End,
    /// First and last child flush with the edges.
    SpaceBetween,
}

/// Cross-axis alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Align to the start edge.
    Start,
    /// Center.
    Center,
    /// Align to the end edge.
    End,
    /// Fill the cross axis.
    #[default]
    Stretch,
}

/// Length along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Extent {
    /// Content-sized.
    #[default]
    Auto,
    /// Fixed pixels.
    Px(f32),
    /// Fraction of the parent, `0.0..=1.0`.
    Percent(f32),
}

/// Per-side lengths in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    /// Top.
    pub top: f32,
    /// Right.
    pub right: f32,
    /// Bottom.
    pub bottom: f32,
    /// Left.
    pub left: f32,
}

impl Edges {
    /// Same length on every side.
    pub fn all(v: f32) -> Self {
        Self::xy(v, v)
    }

    /// Horizontal and vertical lengths.
    pub fn xy(x: f32, y: f32) -> Self {
        Self {
            top: y,
            right: x,
            bottom: y,
            left: x,
        }
    }
}

/// Stroke drawn inside a box's edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f32,
}

/// Structural style of one node. Font sizes never live here.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxStyle {
    /// Main axis.
    pub direction: Direction,
    /// Main-axis distribution.
    pub justify: Justify,
    /// Cross-axis alignment of children.
    pub align: Align,
    /// Wrap children onto new lines.
    pub wrap: bool,
    /// Gap between children.
    pub gap: f32,
    /// Inner padding.
    pub padding: Edges,
    /// Width.
    pub width: Extent,
    /// Height.
    pub height: Extent,
    /// Flex basis.
    pub basis: Extent,
    /// Flex grow factor.
    pub grow: f32,
    /// Flex shrink factor.
    pub shrink: f32,
    /// Fill color.
    pub background: Option<Rgba8>,
    /// Inner stroke.
    pub border: Option<Border>,
    /// Corner radius.
    pub radius: f32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            direction: Direction::Column,
            justify: Justify::Start,
            align: Align::Stretch,
            wrap: false,
            gap: 0.0,
            padding: Edges::default(),
            width: Extent::Auto,
            height: Extent::Auto,
            basis: Extent::Auto,
            grow: 0.0,
            shrink: 1.0,
            background: None,
            border: None,
            radius: 0.0,
        }
    }
}

impl BoxStyle {
    /// Column container.
    pub fn column() -> Self {
        Self::default()
    }

    /// Row container.
    pub fn row() -> Self {
        Self {
            direction: Direction::Row,
            ..Self::default()
        }
    }

    /// Set the gap.
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Set padding.
    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Set justification.
    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Set cross-axis alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Grow to fill free space from a zero basis.
    pub fn fill(mut self) -> Self {
        self.grow = 1.0;
        self.basis = Extent::Px(0.0);
        self
    }

    /// Set grow factor.
    pub fn grow(mut self, grow: f32) -> Self {
        self.grow = grow;
        self
    }

    /// Fixed fraction of the parent's main axis.
    pub fn basis_percent(mut self, fraction: f32) -> Self {
        self.basis = Extent::Percent(fraction);
        self.grow = 0.0;
        self.shrink = 0.0;
        self
    }

    /// Set width.
    pub fn width(mut self, width: Extent) -> Self {
        self.width = width;
        self
    }

    /// Set height.
    pub fn height(mut self, height: Extent) -> Self {
        self.height = height;
        self
    }

    /// Enable wrapping.
    pub fn wrapping(mut self) -> Self {
        self.wrap = true;
        self
    }

    /// Fill color, corner radius and optional border.
    pub fn panel(mut self, fill: Rgba8, radius: f32, border: Option<Border>) -> Self {
        self.background = Some(fill);
        self.radius = radius;
        self.border = border;
        self
    }
}

/// Horizontal text alignment inside its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Left-aligned lines.
    #[default]
    Start,
    /// Centered lines.
    Center,
}

/// A run of text set in one role.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec {
    /// Typography role; the size comes from the active scale.
    pub role: Role,
    /// Text content.
    pub text: String,
    /// Fill color.
    pub color: Rgba8,
    /// Line alignment.
    pub align: TextAlign,
    /// Render upper-cased.
    pub uppercase: bool,
}

impl TextSpec {
    /// Text to lay out, with case applied.
    pub fn display_text(&self) -> String {
        if self.uppercase {
            self.text.to_uppercase()
        } else {
            self.text.clone()
        }
    }
}

/// Node payload.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Box with children.
    Container(Vec<Node>),
    /// Text leaf.
    Text(TextSpec),
    /// Image leaf. `None` or an unresolved key draws a placeholder.
    Image(Option<String>),
    /// Empty leaf used for free space and grid padding.
    Spacer,
}

/// Element of the composed visual tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Name used in logs and tests, e.g. `footer-bar`.
    pub name: &'static str,
    /// Structural style.
    pub style: BoxStyle,
    /// Payload.
    pub kind: NodeKind,
}

impl Node {
    /// Container node.
    pub fn container(name: &'static str, style: BoxStyle, children: Vec<Node>) -> Self {
        Self {
            name,
            style,
            kind: NodeKind::Container(children),
        }
    }

    /// Text leaf.
    pub fn text(name: &'static str, spec: TextSpec) -> Self {
        Self {
            name,
            style: BoxStyle::default(),
            kind: NodeKind::Text(spec),
        }
    }

    /// Image leaf.
    pub fn image(name: &'static str, style: BoxStyle, key: Option<String>) -> Self {
        Self {
            name,
            style,
            kind: NodeKind::Image(key),
        }
    }

    /// Spacer leaf.
    pub fn spacer(style: BoxStyle) -> Self {
        Self {
            name: "spacer",
            style,
            kind: NodeKind::Spacer,
        }
    }

    /// Children of a container; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Container(c) => c,
            _ => &[],
        }
    }

    /// Depth-first pre-order walk.
    pub fn walk(&self, f: &mut impl FnMut(&Node)) {
        f(self);
        for c in self.children() {
            c.walk(f);
        }
    }

    /// First node named `name`, depth-first.
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(name))
    }

    /// Number of nodes named `name`.
    pub fn count(&self, name: &str) -> usize {
        let mut n = 0;
        self.walk(&mut |node| {
            if node.name == name {
                n += 1;
            }
        });
        n
    }

    /// Every text spec in paint order.
    pub fn texts(&self) -> Vec<&TextSpec> {
        let mut out = Vec::new();
        collect_texts(self, &mut out);
        out
    }
}

fn collect_texts<'a>(node: &'a Node, out: &mut Vec<&'a TextSpec>) {
    if let NodeKind::Text(t) = &node.kind {
        out.push(t);
    }
    for c in node.children() {
        collect_texts(c, out);
    }
}
