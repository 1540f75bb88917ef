//! Entry points for hosts: the C ABI and text rendering.

pub mod ffi;
pub mod render;

pub use render::render;
