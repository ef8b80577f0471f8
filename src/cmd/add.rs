use crate::{
    api::{CreateBookmark, LinkhutApi},
    args::AddArgs,
    client::Client,
    config::Config,
};
use colored::Colorize;
use log::debug;
use reqwest::StatusCode;

pub async fn add(config: Config, args: AddArgs) -> Result<(), anyhow::Error> {
    debug!("{args:?}");

    let client = Client::new()?;
    let api = LinkhutApi::new(client, config);
    let create = CreateBookmark {
        title: args.title.clone(),
        note: args.note.clone(),
        tags: if args.tags.is_empty() {
            None
        } else {
            Some(args.tags.clone())
        },
        private: args.private,
        to_read: args.to_read,
        ..CreateBookmark::new(&args.url)
    };

    let status = api.create_bookmark(create).await?;

    if status == StatusCode::OK {
        println!("{}", "Bookmark created successfully".green());
        println!("URL: {}", args.url);
        if let Some(title) = &args.title {
            println!("Title: {title}");
        }
        if !args.tags.is_empty() {
            println!("Tags: {}", args.tags.join(", "));
        }
        if args.private {
            println!("Visibility: Private");
        }
        if args.to_read {
            println!("Marked as: To Read");
        }
    } else {
        println!(
            "{}",
            format!("Can't create bookmark: status {status}").red()
        );
    }

    Ok(())
}
