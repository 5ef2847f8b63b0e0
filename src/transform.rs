mod document;
mod markup;
pub mod pipeline;
mod tags;
mod transformer;

#[cfg(test)]
mod fixtures;

pub use document::IndexDocument;
pub use transformer::Transformer;
