pub mod fastq_update;
pub mod read_len_plot;
