use crate::{api::LinkhutApi, args::ToggleReadArgs, client::Client, config::Config};
use colored::Colorize;
use log::debug;

pub async fn toggle_read(config: Config, args: ToggleReadArgs) -> Result<(), anyhow::Error> {
    debug!("{args:?}");

    let client = Client::new()?;
    let api = LinkhutApi::new(client, config);
    let tags = if args.tags.is_empty() {
        None
    } else {
        Some(args.tags.clone())
    };

    let toggled = api
        .toggle_read_status(&args.url, args.desired(), args.note.clone(), tags)
        .await?;

    if toggled {
        let status = if args.desired() { "to-read" } else { "read" };
        println!("{}", format!("Bookmark marked as {status}").green());
    } else {
        println!("{}", "Can't update the read status".red());
    }

    Ok(())
}
