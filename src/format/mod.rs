//! Output formats: the static registry and the geometry resolver.

pub(crate) mod registry;
pub(crate) mod resolver;
