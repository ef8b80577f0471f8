use clap::Parser;
use linkhut::{cmd, Args, BookmarkCommands, Config, Logger, Subcommands, TagCommands};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    Logger::init(args.verbose);

    run_app(args).await?;

    Ok(())
}

async fn run_app(args: Args) -> Result<(), anyhow::Error> {
    match args.subcommands {
        Subcommands::ConfigStatus => cmd::config_status()?,
        Subcommands::Bookmarks(command) => {
            let config = Config::init()?;

            match command {
                BookmarkCommands::List(args) => cmd::list(config, args).await?,
                BookmarkCommands::Add(args) => cmd::add(config, args).await?,
                BookmarkCommands::Update(args) => cmd::update(config, args).await?,
                BookmarkCommands::Delete(args) => cmd::delete(config, args).await?,
                BookmarkCommands::ReadingList(args) => cmd::reading_list(config, args).await?,
                BookmarkCommands::ToggleRead(args) => cmd::toggle_read(config, args).await?,
            }
        }
        Subcommands::Tags(command) => {
            let config = Config::init()?;

            match command {
                TagCommands::Rename(args) => cmd::rename_tag(config, args).await?,
                TagCommands::Delete(args) => cmd::delete_tag(config, args).await?,
            }
        }
    }

    Ok(())
}
