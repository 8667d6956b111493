pub mod command;
pub mod runtime;
pub mod utils;

pub use command::GenomeSequencing;
pub use command::Stage;
