pub mod clone;
pub mod relay;
pub mod up;
