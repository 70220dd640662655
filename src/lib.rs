mod app;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod observability;
#[cfg(not(target_arch = "wasm32"))]
pub mod replay;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::*;
