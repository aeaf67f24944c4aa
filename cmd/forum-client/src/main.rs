mod cli;
mod output;

use std::sync::Arc;

use anyhow::{Context, Result};
use api_adapters::HttpGateway;
use clap::Parser;
use configs::{LogFormat, LogSettings, SessionBackend, Settings};
use domains::{Credentials, NewThread, Notifier, Registration, SessionStore};
use services::{ForumService, Store, VoteIntent, VoteTarget};
use storage_adapters::{FileSessionStore, MemorySessionStore};
use tracing::{debug, warn};

use crate::cli::{Cli, Command, Direction, VoteCommand};

/// Shows blocking notices on stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        warn!(%message, "user notice");
        eprintln!("! {message}");
    }
}

fn init_tracing(log: &LogSettings) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let _ = match log.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

async fn session_store(settings: &Settings) -> Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match settings.session.backend {
        SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        SessionBackend::File => Arc::new(FileSessionStore::new(&settings.session.path)),
    };
    if let Some(token) = &settings.session.access_token {
        use secrecy::{ExposeSecret, SecretString};
        store
            .set(SecretString::from(token.expose_secret()))
            .await
            .context("seeding session from settings")?;
    }
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings.log);

    let base_url = cli
        .base_url
        .clone()
        .unwrap_or_else(|| settings.api.base_url.clone());
    debug!(%base_url, backend = ?settings.session.backend, "starting");

    let session = session_store(&settings).await?;
    let gateway = Arc::new(HttpGateway::new(base_url, session.clone()));
    let store = Arc::new(Store::new());
    let service = ForumService::new(store, gateway, session, Arc::new(ConsoleNotifier));

    service.preload_session().await;
    run(&service, cli.command).await
}

async fn run(service: &ForumService, command: Command) -> Result<()> {
    match command {
        Command::Register(args) => {
            let user = service
                .register(Registration {
                    name: args.name,
                    email: args.email,
                    password: args.password,
                })
                .await?;
            println!("registered {} ({}), now log in", user.name, user.id);
        }
        Command::Login(args) => {
            let user = service
                .login(Credentials {
                    email: args.email,
                    password: args.password,
                })
                .await?;
            println!("logged in as {} ({})", user.name, user.id);
        }
        Command::Logout => {
            service.logout().await?;
            println!("logged out");
        }
        Command::Whoami => match service.store().state().auth.auth_user {
            Some(user) => output::print_user(&user),
            None => println!("not logged in"),
        },
        Command::Threads { category } => {
            service.fetch_all_threads().await?;
            if let Some(category) = category {
                service.set_filter_category(category);
            }
            output::print_threads(&service.store().state());
        }
        Command::Thread { thread_id } => {
            service.fetch_thread_detail(&thread_id).await?;
            output::print_detail(&service.store().state());
        }
        Command::Post(args) => {
            let thread = service
                .create_thread(NewThread {
                    title: args.title,
                    body: args.body,
                    category: args.category,
                })
                .await?;
            println!("created thread {}", thread.id);
        }
        Command::Comment { thread_id, content } => {
            service.fetch_thread_detail(&thread_id).await?;
            let comment = service.add_comment(&thread_id, &content).await?;
            println!("added comment {}", comment.id);
        }
        Command::Vote { target } => {
            let (thread_id, target, direction) = match target {
                VoteCommand::Thread {
                    thread_id,
                    direction,
                } => (thread_id.clone(), VoteTarget::thread(thread_id), direction),
                VoteCommand::Comment {
                    thread_id,
                    comment_id,
                    direction,
                } => (
                    thread_id.clone(),
                    VoteTarget::comment(thread_id, comment_id),
                    direction,
                ),
            };
            service.fetch_thread_detail(&thread_id).await?;
            service.cast_vote(target, intent(direction)).await?;
            output::print_detail(&service.store().state());
        }
        Command::Leaderboard => {
            service.fetch_leaderboards().await?;
            output::print_leaderboard(&service.store().state());
        }
    }
    Ok(())
}

fn intent(direction: Direction) -> VoteIntent {
    match direction {
        Direction::Up => VoteIntent::ToggleUp,
        Direction::Down => VoteIntent::ToggleDown,
        Direction::Neutral => VoteIntent::Neutral,
    }
}
