pub mod genome_sequencing;

pub use genome_sequencing::{GenomeSequencing, GenomeSequencingCMD, Stage};
