pub mod dataset;
pub(crate) mod mask;
pub(crate) mod merge;
