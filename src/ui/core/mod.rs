pub mod channel;
pub mod frame;
pub mod geom;
pub mod id;
pub mod memo;
pub mod painter;
pub mod style;
pub mod surface;
