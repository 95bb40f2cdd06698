pub mod alert;
pub mod credentials;
pub mod poll_state;
pub mod target;

pub use alert::*;
pub use credentials::*;
pub use poll_state::*;
pub use target::*;
