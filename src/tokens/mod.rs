pub mod address;
pub mod builder;
pub mod document;

pub use builder::{build_quote_documents, TokenTables};
pub use document::TokenSeedDocument;
