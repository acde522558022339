mod component;

pub use component::DocSearch;
