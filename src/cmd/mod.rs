mod add;
mod delete;
mod list;
mod reading_list;
mod status;
mod tags;
mod toggle;
mod update;

pub use add::add;
pub use delete::delete;
pub use list::list;
pub use reading_list::reading_list;
pub use status::config_status;
pub use tags::{delete_tag, rename_tag};
pub use toggle::toggle_read;
pub use update::update;

use std::io::{self, Write};

/// Ask the user for confirmation on stdin.
fn confirm(prompt: &str) -> Result<bool, anyhow::Error> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
