#[cfg(feature = "pdf")]
pub mod extract;
pub mod output;
pub mod words;
