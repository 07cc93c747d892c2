pub mod converter;
pub mod error;
pub mod model;

pub use converter::config::*;
pub use converter::types::*;
pub use error::*;
pub use model::document::*;
pub use model::element::*;
pub use model::namespaces;
pub use model::region::*;
pub use model::style::*;
