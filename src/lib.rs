/// The client for the bookmarking service.
mod api;
/// Available arguments.
mod args;
/// The bookmark model and url validation.
mod bookmarks;
/// The transport client for the remote services.
mod client;
/// Available commands.
pub mod cmd;
/// The configuration used in the CLI.
mod config;
/// The title and tag enrichment providers.
mod enrich;
/// The errors of the crate.
mod errors;
/// The logger.
mod logger;
/// The per-endpoint request builders.
mod request;

pub use api::{CreateBookmark, LinkhutApi};
pub use args::{
    AddArgs, Args, BookmarkCommands, DeleteArgs, DeleteTagArgs, ListArgs, ReadingListArgs,
    RenameTagArgs, Subcommands, TagCommands, ToggleReadArgs, UpdateArgs,
};
pub use bookmarks::{encode_url, verify_url, Bookmark, UNREAD_TAG};
pub use client::{Client, Fetch, MockClient};
pub use config::Config;
pub use errors::LinkhutError;
pub use logger::Logger;
pub use request::{ApiRequest, BookmarkFilter};
