use super::confirm;
use crate::{api::LinkhutApi, args::DeleteArgs, client::Client, config::Config};
use colored::Colorize;
use log::debug;

pub async fn delete(config: Config, args: DeleteArgs) -> Result<(), anyhow::Error> {
    debug!("{args:?}");

    if !args.force {
        let confirmed = confirm(&format!(
            "Are you sure you want to delete the bookmark for {}?",
            args.url
        ))?;
        if !confirmed {
            println!("Operation cancelled");
            return Ok(());
        }
    }

    let client = Client::new()?;
    let api = LinkhutApi::new(client, config);

    let deleted = api.delete_bookmark(&args.url).await?;

    if deleted {
        println!("{}", "Bookmark deleted successfully".green());
    } else {
        println!(
            "{}",
            "Can't delete bookmark: it might not exist".red()
        );
    }

    Ok(())
}
