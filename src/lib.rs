pub mod config;
pub mod default_colors;
pub mod editor;
pub mod error;
pub mod export;
pub mod grid;
pub mod traits;
pub mod transport;
pub mod types;
