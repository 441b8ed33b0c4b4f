pub mod contact;
pub mod content;
pub mod log;
pub mod scroll;
pub mod theme;

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;
