//! Presentation module
//!
//! Maps particle heat to color and glow and tessellates each frame into a
//! vertex list. Backend-agnostic: the output is plain `Pod` vertices.

pub mod frame;
pub mod palette;
pub mod shapes;
pub mod vertex;

pub use frame::{FrameBuilder, FrameStats, ParticleVisual, Presenter};
pub use palette::{Glow, HeatBand, HeatPalette, Rgb};
pub use vertex::Vertex;
