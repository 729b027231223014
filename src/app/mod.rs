// app/mod.rs - Application State and Configuration
//
// Platform-independent settings shared by the UI and the capture worker.

mod state;

pub use state::*;
