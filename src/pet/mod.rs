pub mod error;
pub(crate) mod fao56;
pub(crate) mod grid;
pub(crate) mod point;
