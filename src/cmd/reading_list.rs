use crate::{api::LinkhutApi, args::ReadingListArgs, client::Client, config::Config};
use log::debug;

pub async fn reading_list(config: Config, args: ReadingListArgs) -> Result<(), anyhow::Error> {
    debug!("{args:?}");

    let client = Client::new()?;
    let api = LinkhutApi::new(client, config);

    let bookmarks = api.get_reading_list(args.count).await?;

    if bookmarks.is_empty() {
        println!("The reading list is empty");
        return Ok(());
    }

    for (index, bookmark) in bookmarks.iter().enumerate() {
        println!("{index}: Title: {}, URL: {}", bookmark.title, bookmark.url);
    }

    Ok(())
}
