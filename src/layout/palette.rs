use crate::foundation::core::Rgba8;

/// Brand colors.
pub mod brand {
    use crate::foundation::core::Rgba8;

    /// Primary blue.
    pub const BLUE: Rgba8 = Rgba8::hex(0x3B82F6);
    /// Purple.
    pub const PURPLE: Rgba8 = Rgba8::hex(0x6F53C1);
    /// Slate blue.
    pub const SLATE_BLUE: Rgba8 = Rgba8::hex(0x3F4C78);
    /// Deep navy, the default background.
    pub const DEEP_NAVY: Rgba8 = Rgba8::hex(0x181830);
    /// Lime accent.
    pub const LIME: Rgba8 = Rgba8::hex(0xD7EF3F);
    /// Teal.
    pub const TEAL: Rgba8 = Rgba8::hex(0x20C997);
    /// Orange.
    pub const ORANGE: Rgba8 = Rgba8::hex(0xFD7E15);
    /// Pink.
    pub const PINK: Rgba8 = Rgba8::hex(0xD63384);
    /// Lavender.
    pub const LAVENDER: Rgba8 = Rgba8::hex(0xE1E3FA);
    /// White.
    pub const WHITE: Rgba8 = Rgba8::hex(0xFFFFFF);
}

/// Colors arrangements paint with. Injected into every arrangement; never chosen by it.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    /// Canvas fill.
    pub background: Rgba8,
    /// Headline text.
    pub headline: Rgba8,
    /// Accent headline line and highlights.
    pub accent: Rgba8,
    /// Subheadline and label text.
    pub label: Rgba8,
    /// Running copy.
    pub body: Rgba8,
    /// Statistic numbers.
    pub statistic: Rgba8,
    /// Card fill.
    pub card: Rgba8,
    /// Card stroke.
    pub card_border: Rgba8,
    /// Badge pill fill.
    pub badge_fill: Rgba8,
    /// Badge pill text.
    pub badge_text: Rgba8,
    /// Call-to-action fill.
    pub cta_fill: Rgba8,
    /// Call-to-action text.
    pub cta_text: Rgba8,
    /// Footer bar fill.
    pub footer_fill: Rgba8,
    /// Footer text.
    pub footer_text: Rgba8,
    /// Image placeholder fill.
    pub placeholder: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self::brand()
    }
}

impl Palette {
    /// Fixed brand palette.
    pub fn brand() -> Self {
        Self {
            background: brand::DEEP_NAVY,
            headline: brand::WHITE,
            accent: brand::LIME,
            label: brand::BLUE,
            body: brand::LAVENDER,
            statistic: brand::LIME,
            card: brand::WHITE.with_alpha(15),
            card_border: brand::SLATE_BLUE,
            badge_fill: brand::PURPLE,
            badge_text: brand::WHITE,
            cta_fill: brand::LIME,
            cta_text: brand::DEEP_NAVY,
            footer_fill: Rgba8::hex(0x000000).with_alpha(64),
            footer_text: brand::WHITE.with_alpha(128),
            placeholder: brand::SLATE_BLUE,
        }
    }
}
