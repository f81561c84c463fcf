pub(crate) mod arrangements;
pub(crate) mod content;
pub(crate) mod palette;
pub(crate) mod primitives;
pub(crate) mod tree;
