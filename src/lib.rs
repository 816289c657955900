//! Brushed-metal "Breville" button renderer.
//!
//! Pipeline: build the noise table, shade every pixel ([`ops::raster`]),
//! blur the ring into a halo ([`ops::effects`]), composite, save ([`io`]).

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod io;
pub mod logger;
pub mod noise;
pub mod ops;
pub mod pipeline;

pub use config::SceneConfig;
pub use error::{RenderError, Result};
pub use noise::NoiseTable;
pub use pipeline::{render_scene, render_stages};
