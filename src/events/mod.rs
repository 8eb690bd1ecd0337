pub mod resize;
pub mod scroll;

pub use resize::wire_viewport_resize;
pub use scroll::ScrollBinding;
