pub mod api;
pub mod catalog;
pub mod edit;
pub mod error;
pub mod parse;
#[cfg(feature = "server")]
pub mod server;
pub mod simulate;
pub mod validate;
pub mod wasm;
