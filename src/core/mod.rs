pub mod config;
pub mod export;
pub mod pool;
pub mod presets;
pub mod renderer;
pub mod template;
