use clap::{Arg, Command};
use talentmap_backend::{
    config::Config,
    db::{create_pool, run_migrations},
    error::AppResult,
    init_tracing,
    services::SavedSearchesService,
};

fn cli() -> Command {
    Command::new("talentmap-admin")
        .about("TalentMAP maintenance tasks")
        .subcommand_required(true)
        .subcommand(Command::new("migrate").about("Apply pending database migrations"))
        .subcommand(
            Command::new("refresh-counts")
                .about("Re-run saved searches and store their result counts")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .value_name("SAVED_SEARCH_ID")
                        .help("Only refresh this saved search")
                        .value_parser(clap::value_parser!(i32)),
                ),
        )
}

fn main() -> AppResult<()> {
    let matches = cli().get_matches();

    let config = Config::from_env()?;
    init_tracing(&config);
    let pool = create_pool(&config)?;
    let mut conn = pool.get()?;

    match matches.subcommand() {
        Some(("migrate", _)) => {
            let applied = run_migrations(&mut conn)?;
            if applied.is_empty() {
                println!("No pending migrations");
            }
            for version in applied {
                println!("Applied {}", version);
            }
        }
        Some(("refresh-counts", args)) => {
            let only = args.get_one::<i32>("id").copied();
            let summary = SavedSearchesService::refresh_all(&mut conn, only)?;
            println!(
                "Refreshed {} saved search(es), {} failed",
                summary.refreshed, summary.failed
            );
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn refresh_counts_parses_id() {
        let matches = cli()
            .try_get_matches_from(["talentmap-admin", "refresh-counts", "--id", "7"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "refresh-counts");
        assert_eq!(args.get_one::<i32>("id"), Some(&7));
    }
}
