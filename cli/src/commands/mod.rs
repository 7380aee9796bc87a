pub mod inspect;
pub mod regions;
pub mod render;
