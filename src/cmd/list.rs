use crate::{
    api::LinkhutApi, args::ListArgs, bookmarks::Bookmark, client::Client, config::Config,
    request::BookmarkFilter,
};
use colored::Colorize;
use log::debug;
use reqwest::StatusCode;

pub async fn list(config: Config, args: ListArgs) -> Result<(), anyhow::Error> {
    debug!("{args:?}");

    let client = Client::new()?;
    let api = LinkhutApi::new(client, config);
    let filter = BookmarkFilter {
        tags: args.tags,
        date: args.date,
        url: args.url,
        count: args.count,
    };

    let (bookmarks, status) = api.get_bookmarks(&filter).await?;

    if status != StatusCode::OK || bookmarks.is_empty() {
        println!("No bookmarks found");
        return Ok(());
    }

    println!("Found {} bookmarks:", bookmarks.len());
    println!();

    for (index, bookmark) in bookmarks.iter().enumerate() {
        print_bookmark(index + 1, bookmark);
    }

    Ok(())
}

fn print_bookmark(index: usize, bookmark: &Bookmark) {
    if bookmark.to_read {
        println!("{index}. {}", bookmark.title.bright_white().bold());
    } else {
        println!("{index}. {}", bookmark.title);
    }

    println!("   URL: {}", bookmark.url);

    if !bookmark.tags.is_empty() {
        println!("   Tags: {}", bookmark.tags.join(", "));
    }

    let mut markers = Vec::new();
    if bookmark.private {
        markers.push("[Private]");
    }
    if bookmark.to_read {
        markers.push("[To Read]");
    }
    if !markers.is_empty() {
        println!("   Status: {}", markers.join(" "));
    }

    println!();
}
