//! decision-journal CLI
//!
//! Record decisions, generate alternatives, keep them tidy.
//!
//! Run with: decision-journal --help
//! Proxy server: decision-journal serve --port 3100

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use decision_journal::{
    config::{default_data_dir, GeneratorKind, ProxyConfig, StorageBackend},
    generator::{AlternativeGenerator, ProxyClient, TemplateGenerator},
    journal::{Journal, ScenarioPatch},
    proxy::{routes, upstream::HttpChatModel, GenerationProxy},
    session::{LocalSession, Session},
    store,
    types::{Alternative, Scenario, DEFAULT_ALTERNATIVE_COUNT},
    validate::{validate_context, ContextPolicy, MIN_CONTEXT_CHARS},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "decision-journal")]
#[command(author, version, about = "Record decisions and generate concrete alternatives")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    opts: GlobalOpts,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    /// Where scenarios and the session live
    #[arg(long, global = true, env = "DECISION_JOURNAL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Scenario store backend
    #[arg(long, global = true, value_enum, env = "DECISION_JOURNAL_STORAGE", default_value = "sqlite")]
    storage: StorageBackend,

    /// Alternative generator (default: direct when an API key is set, template otherwise)
    #[arg(long, global = true, value_enum, env = "DECISION_JOURNAL_GENERATOR")]
    generator: Option<GeneratorKind>,

    /// Endpoint used by `--generator proxy`
    #[arg(
        long,
        global = true,
        env = "DECISION_JOURNAL_PROXY_URL",
        default_value = "http://127.0.0.1:3100/generate-alternatives"
    )]
    proxy_url: String,

    /// Bearer token sent to the proxy
    #[arg(long, global = true, env = "DECISION_JOURNAL_PROXY_TOKEN", hide_env_values = true)]
    proxy_token: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl GlobalOpts {
    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the generation proxy HTTP server
    Serve {
        #[arg(short, long, default_value = "3100")]
        port: u16,

        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Sign in with an email address
    Login { email: String },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Check whether a decision context is detailed enough
    Validate { description: String },

    /// Create a scenario and generate its first alternatives
    New {
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Generate even when the context is too thin
        #[arg(long)]
        force: bool,

        #[arg(long)]
        json: bool,
    },

    /// List your scenarios, most recently updated first
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show one scenario with its alternatives
    Show {
        /// Scenario id or unique prefix
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Edit a scenario's title or description
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a scenario and all of its alternatives
    Delete { id: String },

    /// Manage a scenario's alternatives
    Alt {
        #[command(subcommand)]
        action: AltCommand,
    },

    /// Generate a fresh batch of alternatives and append it
    Regenerate { id: String },

    /// Generate alternatives without saving anything
    Generate {
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short = 'n', long, default_value_t = DEFAULT_ALTERNATIVE_COUNT)]
        count: usize,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum AltCommand {
    /// Add your own alternative
    Add { scenario: String, text: String },

    /// Rewrite an alternative (id prefix or 1-based position)
    Edit {
        scenario: String,
        alternative: String,
        text: String,
    },

    /// Remove an alternative (id prefix or 1-based position)
    Rm { scenario: String, alternative: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = match (&cli.command, cli.opts.verbose) {
        (_, true) => "debug",
        (Command::Serve { .. }, false) => "info",
        _ => "warn",
    };
    init_tracing(default_level)?;

    let opts = &cli.opts;
    match cli.command {
        Command::Serve { port, host } => run_serve(&host, port).await,
        Command::Login { email } => run_login(opts, &email),
        Command::Logout => run_logout(opts),
        Command::Whoami => run_whoami(opts),
        Command::Validate { description } => run_validate(&description),
        Command::New {
            title,
            description,
            force,
            json,
        } => run_new(opts, &title, &description, force, json).await,
        Command::List { json } => run_list(opts, json).await,
        Command::Show { id, json } => run_show(opts, &id, json).await,
        Command::Edit {
            id,
            title,
            description,
        } => run_edit(opts, &id, ScenarioPatch { title, description }).await,
        Command::Delete { id } => run_delete(opts, &id).await,
        Command::Alt { action } => run_alt(opts, action).await,
        Command::Regenerate { id } => run_regenerate(opts, &id).await,
        Command::Generate {
            title,
            description,
            count,
            json,
        } => run_generate(opts, &title, &description, count, json).await,
    }
}

fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run_serve(host: &str, port: u16) -> Result<()> {
    let config = ProxyConfig::default();
    if !config.has_api_key() {
        tracing::warn!(
            "{} is not set; every generation request will fail",
            decision_journal::config::API_KEY_ENV
        );
    }
    tracing::info!(model = %config.model, upstream = %config.api_url, "starting generation proxy");

    let proxy = GenerationProxy::new(Arc::new(HttpChatModel::new(config)?));
    routes::serve(proxy, &format!("{}:{}", host, port)).await
}

fn run_login(opts: &GlobalOpts, email: &str) -> Result<()> {
    let user = LocalSession::new(&opts.data_dir()).sign_in(email)?;
    println!("✅ Signed in as {}", user.email);
    Ok(())
}

fn run_logout(opts: &GlobalOpts) -> Result<()> {
    LocalSession::new(&opts.data_dir()).sign_out()?;
    println!("Signed out");
    Ok(())
}

fn run_whoami(opts: &GlobalOpts) -> Result<()> {
    match LocalSession::new(&opts.data_dir()).current_user() {
        Some(user) => println!("{} ({})", user.email, user.id),
        None => println!("Not signed in"),
    }
    Ok(())
}

fn run_validate(description: &str) -> Result<()> {
    let check = validate_context(description);
    if check.valid {
        println!("✅ Context looks detailed enough");
    } else {
        println!("⚠️  {}", check.message.unwrap_or_default());
        println!(
            "   ({} of {} characters)",
            description.trim().chars().count(),
            MIN_CONTEXT_CHARS
        );
    }
    Ok(())
}

async fn run_new(
    opts: &GlobalOpts,
    title: &str,
    description: &str,
    force: bool,
    json: bool,
) -> Result<()> {
    let journal = open_journal(opts).await?;
    let policy = if force {
        ContextPolicy::Advisory
    } else {
        ContextPolicy::Enforce
    };

    let scenario = journal.create_scenario(title, description, policy).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&scenario)?);
    } else {
        print_scenario(&scenario);
    }
    Ok(())
}

async fn run_list(opts: &GlobalOpts, json: bool) -> Result<()> {
    let journal = open_journal(opts).await?;
    let scenarios = journal.scenarios().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&scenarios)?);
        return Ok(());
    }
    if scenarios.is_empty() {
        println!("No scenarios yet. Create one with `decision-journal new <title>`.");
        return Ok(());
    }
    for scenario in &scenarios {
        println!(
            "{}  {}  ({} alternatives, updated {})",
            short_id(&scenario.id),
            scenario.title,
            scenario.alternatives.len(),
            scenario.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

async fn run_show(opts: &GlobalOpts, id: &str, json: bool) -> Result<()> {
    let journal = open_journal(opts).await?;
    let scenario = resolve_scenario(&journal, id).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&scenario)?);
    } else {
        print_scenario(&scenario);
    }
    Ok(())
}

async fn run_edit(opts: &GlobalOpts, id: &str, patch: ScenarioPatch) -> Result<()> {
    if patch.title.is_none() && patch.description.is_none() {
        bail!("Nothing to change: pass --title and/or --description");
    }
    let journal = open_journal(opts).await?;
    let scenario = resolve_scenario(&journal, id).await?;
    let updated = journal.update_scenario(&scenario.id, patch).await?;
    print_scenario(&updated);
    Ok(())
}

async fn run_delete(opts: &GlobalOpts, id: &str) -> Result<()> {
    let journal = open_journal(opts).await?;
    let scenario = resolve_scenario(&journal, id).await?;
    journal.delete_scenario(&scenario.id).await?;
    println!("Deleted \"{}\"", scenario.title);
    Ok(())
}

async fn run_alt(opts: &GlobalOpts, action: AltCommand) -> Result<()> {
    let journal = open_journal(opts).await?;
    match action {
        AltCommand::Add { scenario, text } => {
            let scenario = resolve_scenario(&journal, &scenario).await?;
            let added = journal.add_alternative(&scenario.id, &text).await?;
            println!("Added {}  {}", short_id(&added.id), added.text);
        }
        AltCommand::Edit {
            scenario,
            alternative,
            text,
        } => {
            let scenario = resolve_scenario(&journal, &scenario).await?;
            let target = resolve_alternative(&scenario, &alternative)?;
            journal
                .update_alternative(&scenario.id, &target.id, &text)
                .await?;
            println!("Updated {}", short_id(&target.id));
        }
        AltCommand::Rm {
            scenario,
            alternative,
        } => {
            let scenario = resolve_scenario(&journal, &scenario).await?;
            let target = resolve_alternative(&scenario, &alternative)?;
            journal
                .delete_alternative(&scenario.id, &target.id)
                .await?;
            println!("Removed \"{}\"", target.text);
        }
    }
    Ok(())
}

async fn run_regenerate(opts: &GlobalOpts, id: &str) -> Result<()> {
    let journal = open_journal(opts).await?;
    let scenario = resolve_scenario(&journal, id).await?;
    let fresh = journal.regenerate_alternatives(&scenario.id).await?;

    println!("Added {} alternatives to \"{}\":", fresh.len(), scenario.title);
    for alternative in &fresh {
        println!("  + {}", alternative.text);
    }
    Ok(())
}

async fn run_generate(
    opts: &GlobalOpts,
    title: &str,
    description: &str,
    count: usize,
    json: bool,
) -> Result<()> {
    let generator = build_generator(opts)?;
    let count = if count == 0 { DEFAULT_ALTERNATIVE_COUNT } else { count };
    let alternatives = generator.generate(title, description, count).await?;

    if json {
        let texts: Vec<&str> = alternatives.iter().map(|a| a.text.as_str()).collect();
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "alternatives": texts }))?);
    } else {
        for (i, alternative) in alternatives.iter().enumerate() {
            println!("{}. {}", i + 1, alternative.text);
        }
    }
    Ok(())
}

fn build_generator(opts: &GlobalOpts) -> Result<Arc<dyn AlternativeGenerator>> {
    let config = ProxyConfig::default();
    let kind = opts.generator.unwrap_or(if config.has_api_key() {
        GeneratorKind::Direct
    } else {
        GeneratorKind::Template
    });
    tracing::debug!(?kind, "using generator");

    let generator: Arc<dyn AlternativeGenerator> = match kind {
        GeneratorKind::Template => Arc::new(TemplateGenerator::new()),
        GeneratorKind::Proxy => Arc::new(ProxyClient::new(
            opts.proxy_url.clone(),
            opts.proxy_token.clone(),
        )?),
        GeneratorKind::Direct => Arc::new(GenerationProxy::new(Arc::new(HttpChatModel::new(config)?))),
    };
    Ok(generator)
}

/// Wire the journal for the signed-in user and load their scenarios
async fn open_journal(opts: &GlobalOpts) -> Result<Journal> {
    let data_dir = opts.data_dir();
    let session = Arc::new(LocalSession::new(&data_dir));
    if session.current_user().is_none() {
        bail!("Not signed in. Run `decision-journal login <email>` first.");
    }

    let store = store::open(opts.storage, &data_dir)?;
    let journal = Journal::new(store, build_generator(opts)?, session);
    journal.load().await;
    Ok(journal)
}

/// Find a scenario by full id or unique prefix
async fn resolve_scenario(journal: &Journal, key: &str) -> Result<Scenario> {
    let mut matches: Vec<Scenario> = journal
        .scenarios()
        .await
        .into_iter()
        .filter(|s| s.id.starts_with(key))
        .collect();

    match matches.len() {
        0 => bail!("No scenario matches {:?}", key),
        1 => Ok(matches.remove(0)),
        n => bail!("{:?} is ambiguous ({} scenarios match)", key, n),
    }
}

/// Find an alternative by 1-based position or id prefix
fn resolve_alternative(scenario: &Scenario, key: &str) -> Result<Alternative> {
    if let Ok(position) = key.parse::<usize>() {
        if let Some(alternative) = position
            .checked_sub(1)
            .and_then(|i| scenario.alternatives.get(i))
        {
            return Ok(alternative.clone());
        }
    }

    let matches: Vec<&Alternative> = scenario
        .alternatives
        .iter()
        .filter(|a| a.id.starts_with(key))
        .collect();
    match matches.as_slice() {
        [] => bail!("No alternative matches {:?}", key),
        [one] => Ok((*one).clone()),
        _ => bail!("{:?} is ambiguous", key),
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn print_scenario(scenario: &Scenario) {
    println!("\n{}  ({})", scenario.title, short_id(&scenario.id));
    if !scenario.description.is_empty() {
        println!("{}", scenario.description);
    }
    println!();
    for (i, alternative) in scenario.alternatives.iter().enumerate() {
        println!("  {}. {}  [{}]", i + 1, alternative.text, short_id(&alternative.id));
    }
    println!(
        "\nCreated {} · Updated {}",
        scenario.created_at.format("%Y-%m-%d %H:%M"),
        scenario.updated_at.format("%Y-%m-%d %H:%M")
    );
}
