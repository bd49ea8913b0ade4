use clap::{Parser, ValueEnum};
use migration::sea_orm::Database;
use migration::{get_latest_migration_version, migrate, MigrationCommand};

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(c: Command) -> Self {
        match c {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Skirmish database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database URL (postgresql://... or sqlite://...). Falls back to DATABASE_URL.
    #[arg(short, long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let Some(url) = args.url.or_else(|| std::env::var("DATABASE_URL").ok()) else {
        eprintln!("❌ No database given. Pass --url or set DATABASE_URL.");
        std::process::exit(2);
    };

    // An in-memory database would vanish as soon as the command exits
    if url.contains(":memory:") {
        eprintln!("❌ SQLite in-memory databases are not supported for CLI operations.");
        std::process::exit(2);
    }

    let conn = match Database::connect(&url).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("❌ Could not connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, args.command.into()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }

    match get_latest_migration_version(&conn).await {
        Ok(Some(version)) => tracing::info!("latest applied migration: {version}"),
        Ok(None) => tracing::info!("no migrations applied"),
        Err(e) => tracing::warn!("could not read migration version: {e}"),
    }
}
