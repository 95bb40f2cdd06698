pub mod poll;
pub mod run_tick;

pub use poll::*;
pub use run_tick::*;
