use clap::Parser;
use color_eyre::Result;
use pmdash::{
    cli::{Cli, Commands},
    store::Store,
    Config, Profile,
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    let config = Config::load_with_profile(profile)?;

    // Snapshot path: --data overrides the configured location
    let snapshot_path = match cli.data {
        Some(ref path) => pmdash::utils::expand_path(path),
        None => config.get_snapshot_path(),
    };
    let store = Store::new(snapshot_path);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Board {
            project,
            assignee,
            priority,
            tag,
            search,
        } => {
            pmdash::cli::handle_board(project, assignee, priority, tag, search, &store)?;
        }
        Commands::Agenda { project } => {
            pmdash::cli::handle_agenda(project, &store)?;
        }
        Commands::Calendar { mode, anchor, cap } => {
            pmdash::cli::handle_calendar(mode, anchor, cap, &config, &store)?;
        }
        Commands::Notes { tag, search } => {
            pmdash::cli::handle_notes(tag, search, &store)?;
        }
        Commands::Thread { id } => {
            pmdash::cli::handle_thread(id, &store)?;
        }
        Commands::AddTask {
            title,
            project,
            due,
            priority,
            tags,
        } => {
            pmdash::cli::handle_add_task(title, project, due, priority, tags, &store)?;
        }
        Commands::AddEvent {
            title,
            start,
            end,
            kind,
            project,
        } => {
            pmdash::cli::handle_add_event(title, start, end, kind, project, &store)?;
        }
    }

    Ok(())
}
