use databaselib::core::{Adapter, DatabaseConnection, DatabaseError, Param, Result};
use databaselib::drivers::SqliteAdapter;
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: databaselib <sqlite|mysql> <config-file> <command> [param...]";

fn main() {
    // Initialize the logging system using tracing subscriber; stdout carries rows
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    let (backend, config_path, command) = (&args[1], &args[2], &args[3]);
    let params = parse_params(&args[4..]);

    let result = match backend.as_str() {
        "sqlite" => run(SqliteAdapter, config_path, command, &params),
        #[cfg(feature = "mysql")]
        "mysql" => run(
            databaselib::core::ServerAdapter::new(databaselib::drivers::MysqlBackend),
            config_path,
            command,
            &params,
        ),
        other => Err(DatabaseError::InvalidConfiguration(format!(
            "Unknown backend '{}'",
            other
        ))),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// `NULL` binds SQL NULL, everything else binds as text.
fn parse_params(args: &[String]) -> Vec<Param> {
    args.iter()
        .map(|arg| if arg == "NULL" { Param::null() } else { Param::from(arg) })
        .collect()
}

fn run<A: Adapter>(adapter: A, config_path: &str, command: &str, params: &[Param]) -> Result<()> {
    let mut connection = DatabaseConnection::from_config_file(adapter, config_path)?;
    connection.open()?;

    let table = connection.get_table(command, params)?;
    info!(rows = table.len(), "command finished");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for row in &table {
        serde_json::to_writer(&mut out, row).map_err(std::io::Error::from)?;
        writeln!(out)?;
    }

    connection.close()
}
