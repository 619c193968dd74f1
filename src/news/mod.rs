pub mod enrich;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod summarize;

pub use pipeline::NewsPipeline;
