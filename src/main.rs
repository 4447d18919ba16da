//! Entry point: parse CLI, set up logging and dispatch to command handlers.

use anyhow::{Context, Result};
use clap::Parser;
use cricket_stats::{
    cli::{Commands, CricketStats, MatchCmd, PlayerCmd},
    commands::{
        matches::{handle_match_add, handle_match_delete, handle_match_list, handle_match_show},
        player::{handle_player_activate, handle_player_add, handle_player_list, PlayerAddParams},
        recalculate::handle_recalculate,
        resolve_db_path, resolve_player_id,
        stats::handle_stats,
    },
    storage::StatsDatabase,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cricket_stats=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "cricket_stats=info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the CLI.
fn main() -> Result<()> {
    let app = CricketStats::parse();
    init_tracing(app.verbose);

    let db_path = resolve_db_path(app.db)?;
    let mut db = StatsDatabase::new(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    match app.command {
        Commands::Player { cmd } => match cmd {
            PlayerCmd::Add {
                name,
                role,
                date_of_birth,
                batting_style,
                bowling_style,
                career_start,
                career_end,
                activate,
            } => {
                handle_player_add(
                    &mut db,
                    PlayerAddParams {
                        name,
                        role,
                        date_of_birth,
                        batting_style,
                        bowling_style,
                        career_start,
                        career_end,
                        activate,
                    },
                )?;
            }
            PlayerCmd::List { json } => handle_player_list(&db, json)?,
            PlayerCmd::Activate { id } => handle_player_activate(&mut db, id)?,
        },

        Commands::Match { cmd } => match cmd {
            MatchCmd::Add { file, recalculate } => {
                let player_id = resolve_player_id(&db, app.player_id)?;
                handle_match_add(&mut db, player_id, &file, recalculate)
                    .with_context(|| format!("Failed to add match from {}", file.display()))?;
            }
            MatchCmd::List { json } => {
                let player_id = resolve_player_id(&db, app.player_id)?;
                handle_match_list(&db, player_id, json)?;
            }
            MatchCmd::Show { match_id, json } => handle_match_show(&db, match_id, json)?,
            MatchCmd::Delete {
                match_id,
                recalculate,
            } => {
                handle_match_delete(&mut db, match_id, recalculate)?;
            }
        },

        Commands::Recalculate { category } => {
            let player_id = resolve_player_id(&db, app.player_id)?;
            handle_recalculate(&mut db, player_id, category).with_context(|| {
                format!("Failed to recalculate {} for player {}", category, player_id)
            })?;
        }

        Commands::Stats { view, json } => {
            let player_id = resolve_player_id(&db, app.player_id)?;
            handle_stats(&db, player_id, view, json)?;
        }
    }

    Ok(())
}
