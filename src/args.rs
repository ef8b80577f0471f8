use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};

/// Describes the available arguments in the CLI.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub subcommands: Subcommands,
}

/// Describes the available subcommands in the CLI.
#[derive(Subcommand, Debug)]
pub enum Subcommands {
    /// Manage bookmarks.
    #[command(subcommand)]
    Bookmarks(BookmarkCommands),
    /// Manage tags.
    #[command(subcommand)]
    Tags(TagCommands),
    /// Check the authentication configuration.
    ConfigStatus,
}

/// Describes the subcommands for `bookmarks`.
#[derive(Subcommand, Debug)]
pub enum BookmarkCommands {
    /// List bookmarks.
    List(ListArgs),
    /// Add a bookmark.
    Add(AddArgs),
    /// Update a bookmark.
    Update(UpdateArgs),
    /// Delete a bookmark.
    Delete(DeleteArgs),
    /// Show the reading list.
    ReadingList(ReadingListArgs),
    /// Toggle the to-read status of a bookmark.
    ToggleRead(ToggleReadArgs),
}

/// Describes the subcommands for `tags`.
#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Rename a tag across all bookmarks.
    Rename(RenameTagArgs),
    /// Delete a tag from all bookmarks.
    Delete(DeleteTagArgs),
}

/// Describes the arguments for the `bookmarks list` subcommand.
#[derive(ClapArgs, Debug)]
pub struct ListArgs {
    /// Filter by tags.
    ///
    /// Only the first tag is used if a count is given.
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// The number of recent bookmarks to show.
    #[arg(short, long)]
    pub count: Option<u32>,
    /// Filter by date (CCYY-MM-DDThh:mm:ssZ).
    #[arg(short, long)]
    pub date: Option<String>,
    /// Filter by url.
    #[arg(short, long)]
    pub url: Option<String>,
}

/// Describes the arguments for the `bookmarks add` subcommand.
#[derive(ClapArgs, Debug)]
pub struct AddArgs {
    /// The url to bookmark.
    pub url: String,
    /// The title of the bookmark.
    ///
    /// Fetched from the page if not given.
    #[arg(short, long)]
    pub title: Option<String>,
    /// A note for the bookmark.
    #[arg(short, long)]
    pub note: Option<String>,
    /// Tags for the bookmark.
    ///
    /// Suggested tags are fetched if not given.
    #[arg(short = 'g', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// Make the bookmark private.
    #[arg(short, long)]
    pub private: bool,
    /// Mark the bookmark as to-read.
    #[arg(short = 'r', long)]
    pub to_read: bool,
}

/// Describes the arguments for the `bookmarks update` subcommand.
#[derive(ClapArgs, Debug)]
pub struct UpdateArgs {
    /// The url of the bookmark to update.
    pub url: String,
    /// New tags replacing the existing tags.
    #[arg(short = 'g', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// A note appended to the existing note.
    #[arg(short, long)]
    pub note: Option<String>,
    /// Make the bookmark private.
    #[arg(long, overrides_with = "public")]
    pub private: bool,
    /// Make the bookmark public.
    #[arg(long, overrides_with = "private")]
    pub public: bool,
}

impl UpdateArgs {
    /// The requested visibility, if any.
    pub fn visibility(&self) -> Option<bool> {
        if self.private {
            Some(true)
        } else if self.public {
            Some(false)
        } else {
            None
        }
    }
}

/// Describes the arguments for the `bookmarks delete` subcommand.
#[derive(ClapArgs, Debug)]
pub struct DeleteArgs {
    /// The url of the bookmark to delete.
    pub url: String,
    /// Delete without confirmation.
    #[arg(short, long)]
    pub force: bool,
}

/// Describes the arguments for the `bookmarks reading-list` subcommand.
#[derive(ClapArgs, Debug)]
pub struct ReadingListArgs {
    /// The number of bookmarks to show.
    #[arg(short, long, default_value_t = 5)]
    pub count: u32,
}

/// Describes the arguments for the `bookmarks toggle-read` subcommand.
#[derive(ClapArgs, Debug)]
pub struct ToggleReadArgs {
    /// The url of the bookmark.
    pub url: String,
    /// Mark the bookmark as to-read (the default).
    #[arg(long, overrides_with = "not_to_read")]
    pub to_read: bool,
    /// Mark the bookmark as read.
    #[arg(long, overrides_with = "to_read")]
    pub not_to_read: bool,
    /// A note appended to the existing note.
    #[arg(short, long)]
    pub note: Option<String>,
    /// Tags to use if the bookmark does not exist yet.
    #[arg(short = 'g', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

impl ToggleReadArgs {
    /// The desired to-read status.
    pub fn desired(&self) -> bool {
        !self.not_to_read
    }
}

/// Describes the arguments for the `tags rename` subcommand.
#[derive(ClapArgs, Debug)]
pub struct RenameTagArgs {
    /// The current tag name.
    pub old_tag: String,
    /// The new tag name.
    pub new_tag: String,
}

/// Describes the arguments for the `tags delete` subcommand.
#[derive(ClapArgs, Debug)]
pub struct DeleteTagArgs {
    /// The tag to delete.
    pub tag: String,
    /// Delete without confirmation.
    #[arg(short, long)]
    pub force: bool,
}
