pub(crate) mod overrides;
pub(crate) mod presets;
pub(crate) mod roles;
pub(crate) mod scale;
