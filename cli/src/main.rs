use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use cli::api::{ApiError, HttpApi};
use cli::console::{Console, Tab, Toast};
use cli::messages::Locale;
use cli::render;
use cli::store::{FileTokenStore, StoreError};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not logged in; run `authgate login` first")]
    NotLoggedIn,
    #[error("no authorization rule with id {0}")]
    RuleNotFound(i64),
    #[error(transparent)]
    Store(StoreError),
    #[error("health check failed: {0}")]
    Health(ApiError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "authgate", about = "authgate license server admin console")]
struct Cli {
    #[arg(long, env = "AUTHGATE_BASE_URL", default_value = "http://127.0.0.1:7389", global = true)]
    base_url: String,

    /// Where the session token is kept between runs.
    #[arg(long, env = "AUTHGATE_TOKEN_FILE", global = true)]
    token_file: Option<PathBuf>,

    #[arg(long, env = "AUTHGATE_LOCALE", value_enum, default_value_t = Locale::En, global = true)]
    locale: Locale,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "AUTHGATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Rules(RulesCommand),
    Events {
        #[arg(long)]
        app: Option<String>,
        #[arg(long)]
        event_type: Option<String>,
    },
    Stats {
        #[arg(long, requires = "end_date")]
        start_date: Option<String>,
        #[arg(long, requires = "start_date")]
        end_date: Option<String>,
    },
    Ping,
}

#[derive(Args, Debug)]
struct RulesCommand {
    #[command(subcommand)]
    command: RulesSubcommand,
}

#[derive(Subcommand, Debug)]
enum RulesSubcommand {
    List,
    Add {
        #[arg(long)]
        app: String,
        #[arg(long)]
        version_rule: String,
        #[arg(long)]
        ip_rule: String,
        #[arg(long, default_value = "")]
        detail_info: String,
    },
    Edit {
        id: i64,
        #[command(flatten)]
        fields: RuleFields,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug, Default)]
struct RuleFields {
    #[arg(long)]
    app: Option<String>,
    #[arg(long)]
    version_rule: Option<String>,
    #[arg(long)]
    ip_rule: Option<String>,
    #[arg(long)]
    detail_info: Option<String>,
}

type AdminConsole = Console<HttpApi, FileTokenStore>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Ping = cli.command {
        return match HttpApi::new(&cli.base_url).health().await {
            Ok(()) => {
                println!("ok");
                ExitCode::SUCCESS
            }
            Err(e) => fail(CliError::Health(e)),
        };
    }

    let store = match &cli.token_file {
        Some(path) => FileTokenStore::new(path),
        None => match FileTokenStore::default_location() {
            Ok(store) => store,
            Err(e) => return fail(CliError::Store(e)),
        },
    };
    tracing::debug!(path = %store.path().display(), "using token file");
    let mut console = Console::new(HttpApi::new(&cli.base_url), store, cli.locale);

    let outcome = run(&mut console, cli.command, cli.json).await;
    finish(&console.take_toasts(), outcome.err())
}

fn fail(err: CliError) -> ExitCode {
    finish(&[], Some(err))
}

/// Print toasts and any command error to stderr, then pick the exit status.
fn finish(toasts: &[Toast], error: Option<CliError>) -> ExitCode {
    let error = error.as_ref().map(|e| e as &dyn std::fmt::Display);
    match render::report(&mut std::io::stderr(), toasts, error) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) | Err(_) => ExitCode::FAILURE,
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(console: &mut AdminConsole, command: Command, json: bool) -> Result<(), CliError> {
    match command {
        Command::Login { username, password } => {
            console.login_form.username = username;
            console.login_form.password = password;
            console.handle_login().await;
            if console.is_logged_in {
                println!("logged in as {}", console.login_form.username);
            }
        }
        Command::Logout => console.handle_logout(),
        Command::Rules(rules) => run_rules(console, rules.command, json).await?,
        Command::Events { app, event_type } => {
            require_session(console)?;
            console.select_tab(Tab::Events);
            console.event_filter.app = app;
            console.event_filter.event_type = event_type;
            console.load_events().await;
            output(json, &console.events, render::events_table)?;
        }
        Command::Stats { start_date, end_date } => {
            require_session(console)?;
            console.select_tab(Tab::Stats);
            console.stats_filter.start_date = start_date;
            console.stats_filter.end_date = end_date;
            console.generate_stats().await;
            output(json, &console.stats, render::stats_table)?;
        }
        Command::Ping => {}
    }
    Ok(())
}

async fn run_rules(console: &mut AdminConsole, command: RulesSubcommand, json: bool) -> Result<(), CliError> {
    require_session(console)?;
    match command {
        RulesSubcommand::List => {
            console.load_auth_rules().await;
            output(json, &console.auth_rules, render::rules_table)?;
        }
        RulesSubcommand::Add { app, version_rule, ip_rule, detail_info } => {
            console.show_add_auth_dialog();
            console.auth_form.app = app;
            console.auth_form.version_rule = version_rule;
            console.auth_form.ip_rule = ip_rule;
            console.auth_form.detail_info = detail_info;
            console.save_auth().await;
        }
        RulesSubcommand::Edit { id, fields } => {
            console.load_auth_rules().await;
            if console.has_errors() {
                return Ok(());
            }
            let rule = console
                .auth_rules
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or(CliError::RuleNotFound(id))?;
            console.edit_auth(&rule);
            apply_fields(console, fields);
            console.save_auth().await;
        }
        RulesSubcommand::Delete { id } => console.delete_auth(id).await,
    }
    Ok(())
}

fn apply_fields(console: &mut AdminConsole, fields: RuleFields) {
    let form = &mut console.auth_form;
    if let Some(app) = fields.app {
        form.app = app;
    }
    if let Some(version_rule) = fields.version_rule {
        form.version_rule = version_rule;
    }
    if let Some(ip_rule) = fields.ip_rule {
        form.ip_rule = ip_rule;
    }
    if let Some(detail_info) = fields.detail_info {
        form.detail_info = detail_info;
    }
}

fn require_session(console: &mut AdminConsole) -> Result<(), CliError> {
    if console.restore_session() { Ok(()) } else { Err(CliError::NotLoggedIn) }
}

fn output<T: Serialize>(json: bool, rows: &[T], table: fn(&[T]) -> String) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else {
        print!("{}", table(rows));
    }
    Ok(())
}
