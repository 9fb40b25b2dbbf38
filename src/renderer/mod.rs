//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as a flat-colored triangle list in field
//! coordinates and mapped to clip space by the pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
