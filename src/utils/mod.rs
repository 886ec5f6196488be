pub mod fastq;
pub mod fastx;
pub mod file;
pub mod histogram;
pub mod plotting;
pub mod quality;
pub mod stats;
