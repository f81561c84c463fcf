pub(crate) mod backend;
pub(crate) mod encode;
pub(crate) mod pipeline;
pub(crate) mod sink;
