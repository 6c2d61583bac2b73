//! Page lookup and body resolution for the VW documentation pipeline.
//!
//! [`Site`] sits between the HTTP layer and the content store. It finds a
//! document by slug, picks the best available body through an ordered
//! fallback chain ([`BodySource`]), and rewrites relative links so the body
//! can be served on its own.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use vw_site::Site;
//! use vw_storage_fs::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("content/docs")));
//! let site = Site::new(storage, "https://wiki.vara.network/docs");
//!
//! if let Some(page) = site.page("vara-network/staking/nominate") {
//!     println!("{}: {} bytes", page.title, page.body.len());
//! }
//! ```

mod page;
mod site;

pub use page::{BodySource, Page, PageBody};
pub use site::Site;
