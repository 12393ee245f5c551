pub mod extractor;
pub mod resolver;

pub use extractor::extract;
pub use resolver::resolve;
