pub mod ports;
pub mod shutdown;
pub mod usecases;

pub use ports::*;
pub use shutdown::*;
