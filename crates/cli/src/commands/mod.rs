pub(crate) mod inspect;
pub(crate) mod render;
pub(crate) mod types;
