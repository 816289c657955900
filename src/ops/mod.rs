pub mod effects;
pub mod filters;
pub mod raster;
pub mod shader;
