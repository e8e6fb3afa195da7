//! Asset retrieval to local storage.
//!
//! [`Destination`] maps a [`DownloadableItem`](crate::entry::DownloadableItem)
//! to `<root>/<owner>/<work>/<item>.mp3`; [`AssetWriter`] streams the asset
//! into that file.

mod error;
mod filename;
mod writer;

pub use error::WriteError;
pub use filename::{Destination, sanitize_component, sanitize_filename};
pub use writer::AssetWriter;
