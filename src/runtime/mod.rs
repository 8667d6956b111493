mod error;
mod log;

pub use error::Error;
pub use log::*;
