use super::confirm;
use crate::{
    api::LinkhutApi,
    args::{DeleteTagArgs, RenameTagArgs},
    client::Client,
    config::Config,
};
use colored::Colorize;
use log::debug;

pub async fn rename_tag(config: Config, args: RenameTagArgs) -> Result<(), anyhow::Error> {
    debug!("{args:?}");

    let client = Client::new()?;
    let api = LinkhutApi::new(client, config);

    let renamed = api.rename_tag(&args.old_tag, &args.new_tag).await?;

    if renamed {
        println!(
            "{}",
            format!("Tag '{}' renamed to '{}'", args.old_tag, args.new_tag).green()
        );
    } else {
        println!(
            "{}",
            format!("Can't rename tag '{}'", args.old_tag).red()
        );
    }

    Ok(())
}

pub async fn delete_tag(config: Config, args: DeleteTagArgs) -> Result<(), anyhow::Error> {
    debug!("{args:?}");

    if !args.force {
        let confirmed = confirm(&format!(
            "Are you sure you want to delete the tag '{}' from all bookmarks?",
            args.tag
        ))?;
        if !confirmed {
            println!("Operation cancelled");
            return Ok(());
        }
    }

    let client = Client::new()?;
    let api = LinkhutApi::new(client, config);

    let deleted = api.delete_tag(&args.tag).await?;

    if deleted {
        println!("{}", format!("Tag '{}' deleted", args.tag).green());
    } else {
        println!(
            "{}",
            format!("Can't delete tag '{}': it might not exist", args.tag).red()
        );
    }

    Ok(())
}
