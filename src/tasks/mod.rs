//! Async tasks for the render pipeline.
//!
//! - `render`: the render worker that drains the job queue into the panel

pub mod render;

pub use render::RenderWorker;
