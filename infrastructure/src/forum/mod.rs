//! Forum page sources
//!
//! Adapters behind the application's `PageSource` port:
//!
//! - `client`: live phpBB thread over HTTP
//! - `extract`: rendered-HTML to post extraction
//! - `file`: a thread page saved to disk

pub mod client;
pub mod extract;
pub mod file;

pub use client::ForumClient;
pub use extract::parse_page;
pub use file::FilePageSource;
