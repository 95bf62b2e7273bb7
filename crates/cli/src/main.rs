// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use liftbook::{Company, Record};
use liftbook_audit::AuditEntry;
use liftbook_persistence::{ConnectionSettings, Persistence};
use std::io::Write;
use tracing::info;

const IN_MEMORY_URL: &str = ":memory:";

/// liftbook - elevator inspection records
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// User that audit rows are attributed to. Defaults to the session user.
    #[arg(short, long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Create the database or bring its schema up to date
    Init,
    /// Check that the database is reachable
    Check,
    /// List companies
    Companies,
    /// Add a company
    AddCompany {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Rename a company, showing the change before saving it
    RenameCompany {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Show the audit trail of one record
    History {
        /// Record kind as stored in the audit log, e.g. `Company`
        #[arg(long)]
        table: String,
        #[arg(long)]
        id: i64,
    },
    /// Print query statistics as JSON
    Stats,
}

impl Args {
    fn settings(&self) -> ConnectionSettings {
        ConnectionSettings::new(self.database.as_deref().unwrap_or(IN_MEMORY_URL))
            .with_user_name(self.user.as_deref())
    }
}

fn list_companies(
    persistence: &mut Persistence,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    for company in Company::load_all(persistence)? {
        let id: String = company.id().map(|id| id.to_string()).unwrap_or_default();
        let status: &str = if company.is_active() { "" } else { " (inactive)" };
        writeln!(out, "{id}\t{}{status}", company.name())?;
    }
    Ok(())
}

fn add_company(
    persistence: &mut Persistence,
    out: &mut impl Write,
    name: &str,
    phone: Option<&str>,
    email: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut company: Company = Company::new("");
    if !company.set_name(name) {
        return Err("Company name must not be blank".into());
    }
    if let Some(phone) = phone {
        company.set_phone(phone)?;
    }
    if let Some(email) = email {
        company.set_email(email)?;
    }

    let recorded: bool = company.commit_to_database(persistence)?;
    let id: i64 = company.id().unwrap_or_default();
    writeln!(out, "Added company {id}: {}", company.name())?;
    if !recorded {
        writeln!(out, "Warning: audit trail is incomplete")?;
    }
    Ok(())
}

fn rename_company(
    persistence: &mut Persistence,
    out: &mut impl Write,
    id: i64,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut company: Company = Company::load(persistence, id)?;
    if !company.set_name(name) {
        writeln!(out, "No changes")?;
        return Ok(());
    }
    if let Some(summary) = company.save_confirmation_text() {
        writeln!(out, "{summary}")?;
    }

    if company.commit_to_database(persistence)? {
        writeln!(out, "Saved")?;
    } else {
        writeln!(out, "Saved with an incomplete audit trail")?;
    }
    Ok(())
}

fn print_history(
    persistence: &mut Persistence,
    out: &mut impl Write,
    table: &str,
    id: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let history: Vec<AuditEntry> = persistence.edit_history(table, id)?;
    if history.is_empty() {
        writeln!(out, "No history for {table} {id}")?;
    }
    for entry in history {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}

fn run(args: &Args, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let settings: ConnectionSettings = args.settings();

    if args.command == Command::Check && !Persistence::probe(&settings)? {
        writeln!(out, "unreachable: {}", settings.describe())?;
        return Ok(());
    }

    let mut persistence: Persistence = Persistence::connect(settings)?;

    match &args.command {
        Command::Init => {
            writeln!(out, "Database ready: {}", persistence.settings().describe())?;
        }
        Command::Check => {
            let alive: bool = persistence.check_connection()?;
            let state: &str = if alive { "ok" } else { "unreachable" };
            writeln!(out, "{state}: {}", persistence.settings().describe())?;
        }
        Command::Companies => list_companies(&mut persistence, out)?,
        Command::AddCompany { name, phone, email } => add_company(
            &mut persistence,
            out,
            name,
            phone.as_deref(),
            email.as_deref(),
        )?,
        Command::RenameCompany { id, name } => rename_company(&mut persistence, out, *id, name)?,
        Command::History { table, id } => print_history(&mut persistence, out, table, *id)?,
        Command::Stats => {
            writeln!(
                out,
                "{}",
                serde_json::to_string_pretty(persistence.statistics())?
            )?;
        }
    }

    info!(
        calls = persistence.call_count(),
        "Finished {:?}", args.command
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("liftbook").chain(argv.iter().copied()))
            .expect("arguments should parse")
    }

    fn test_persistence() -> Persistence {
        Persistence::new_in_memory()
            .expect("Failed to create in-memory persistence")
            .with_user_name("inspector")
    }

    fn output(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args: Args = parse(&["companies", "--database", "records.db", "--user", "dana"]);
        assert_eq!(args.command, Command::Companies);
        let settings: ConnectionSettings = args.settings();
        assert_eq!(settings.database_url, "records.db");
        assert_eq!(settings.user_name, "dana");
    }

    #[test]
    fn test_missing_database_is_in_memory() {
        let args: Args = parse(&["init"]);
        assert!(args.settings().is_in_memory());
    }

    #[test]
    fn test_add_company_requires_name() {
        let result = Args::try_parse_from(["liftbook", "add-company", "--phone", "4102908913"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_then_list_companies() {
        let mut persistence: Persistence = test_persistence();
        let mut buffer: Vec<u8> = Vec::new();

        add_company(
            &mut persistence,
            &mut buffer,
            "Acme Elevator",
            Some("410-290-8913"),
            None,
        )
        .unwrap();
        list_companies(&mut persistence, &mut buffer).unwrap();

        let text: String = output(buffer);
        assert!(text.contains("Added company 1: Acme Elevator"));
        assert!(text.contains("1\tAcme Elevator"));
    }

    #[test]
    fn test_add_company_rejects_bad_phone() {
        let mut persistence: Persistence = test_persistence();
        let mut buffer: Vec<u8> = Vec::new();

        let result = add_company(
            &mut persistence,
            &mut buffer,
            "Acme Elevator",
            Some("410-290-891"),
            None,
        );

        assert!(result.is_err());
        assert!(Company::load_all(&mut persistence).unwrap().is_empty());
    }

    #[test]
    fn test_add_company_rejects_blank_name() {
        let mut persistence: Persistence = test_persistence();
        let mut buffer: Vec<u8> = Vec::new();

        let result = add_company(&mut persistence, &mut buffer, "   ", None, None);

        assert_eq!(
            result.unwrap_err().to_string(),
            "Company name must not be blank"
        );
        assert!(buffer.is_empty());
        assert!(Company::load_all(&mut persistence).unwrap().is_empty());
    }

    #[test]
    fn test_rename_shows_summary_and_records_history() {
        let mut persistence: Persistence = test_persistence();
        let mut buffer: Vec<u8> = Vec::new();
        add_company(&mut persistence, &mut buffer, "Acme Elevator", None, None).unwrap();

        let mut buffer: Vec<u8> = Vec::new();
        rename_company(&mut persistence, &mut buffer, 1, "Acme Lift").unwrap();
        print_history(&mut persistence, &mut buffer, "Company", 1).unwrap();

        let text: String = output(buffer);
        assert!(text.contains("name: Acme Elevator -> Acme Lift"));
        assert!(text.contains("Saved"));
        assert!(text.contains("inspector Company#1 name:  -> Acme Elevator"));
        assert!(text.contains("inspector Company#1 name: Acme Elevator -> Acme Lift"));
    }

    #[test]
    fn test_rename_to_same_name_is_no_change() {
        let mut persistence: Persistence = test_persistence();
        let mut buffer: Vec<u8> = Vec::new();
        add_company(&mut persistence, &mut buffer, "Acme Elevator", None, None).unwrap();

        let mut buffer: Vec<u8> = Vec::new();
        rename_company(&mut persistence, &mut buffer, 1, "Acme Elevator").unwrap();

        assert_eq!(output(buffer), "No changes\n");
    }

    #[test]
    fn test_history_of_unknown_record() {
        let mut persistence: Persistence = test_persistence();
        let mut buffer: Vec<u8> = Vec::new();

        print_history(&mut persistence, &mut buffer, "Building", 9).unwrap();

        assert_eq!(output(buffer), "No history for Building 9\n");
    }

    #[test]
    fn test_stats_prints_json() {
        let args: Args = parse(&["stats"]);
        let mut buffer: Vec<u8> = Vec::new();

        run(&args, &mut buffer).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output(buffer)).unwrap();
        assert_eq!(json["calls"], 0);
    }
}
