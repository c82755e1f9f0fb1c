pub mod finder;
pub mod resolver;
pub mod scoring;
pub mod selector;
pub mod writer;
