use crate::{api::LinkhutApi, args::UpdateArgs, client::Client, config::Config};
use colored::Colorize;
use log::debug;

pub async fn update(config: Config, args: UpdateArgs) -> Result<(), anyhow::Error> {
    debug!("{args:?}");

    let client = Client::new()?;
    let api = LinkhutApi::new(client, config);
    let tags = if args.tags.is_empty() {
        None
    } else {
        Some(args.tags.clone())
    };

    let updated = api
        .update_bookmark(&args.url, tags, args.note.clone(), args.visibility())
        .await?;

    if updated {
        println!("{}", "Bookmark updated successfully".green());
        println!("URL: {}", args.url);
        if !args.tags.is_empty() {
            println!("Updated tags: {}", args.tags.join(", "));
        }
        if args.note.is_some() {
            println!("Note appended");
        }
        if let Some(private) = args.visibility() {
            let visibility = if private { "Private" } else { "Public" };
            println!("Updated visibility: {visibility}");
        }
    } else {
        println!("{}", "Can't update bookmark".red());
    }

    Ok(())
}
