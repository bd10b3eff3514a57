//! # wren-transport
//!
//! Transport implementations for wren. The only built-in is the console
//! transport used for development and replay; a real WhatsApp Web client
//! plugs in by implementing `wren_core::traits::Transport`.

mod console;

pub use console::ConsoleTransport;
