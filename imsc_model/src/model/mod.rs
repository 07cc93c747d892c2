pub mod document;
pub mod element;
pub mod namespaces;
pub mod region;
pub mod style;
