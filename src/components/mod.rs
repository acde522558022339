pub mod canvas;
pub mod cluster_plot;
pub mod doc_search;
pub mod fingerprint;
pub mod hypershelf;
