pub(crate) mod compose;
pub(crate) mod draw;
pub(crate) mod fonts;
pub(crate) mod host;
pub(crate) mod images;
pub(crate) mod taffy_bridge;
pub(crate) mod text;
