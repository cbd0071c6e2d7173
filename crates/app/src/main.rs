use chrono_tz::Tz;
use engine::{Balance, Engine, Parties, SqlStore, Subscription, calculate_balance};
use migration::{Migrator, MigratorTrait};
use server::ServerState;
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tandem={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let timezone: Tz = settings
        .app
        .timezone
        .parse()
        .map_err(|err| format!("invalid timezone {}: {err}", settings.app.timezone))?;
    let parties = Parties::new(settings.parties.a, settings.parties.b)?;

    let db = parse_database(&settings.server.database).await?;
    let store = SqlStore::open(db).await?;
    let engine = Engine::builder()
        .parties(parties.clone())
        .store(store)
        .build()?;

    tasks.spawn(log_balance_changes(engine.subscribe(), parties));

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let state = ServerState::new(engine, timezone, settings.reports.trend_days);
    tasks.spawn(async move {
        if let Err(err) = server::run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    while tasks.join_next().await.is_some() {
        tasks.shutdown().await;
    }

    Ok(())
}

/// Recomputes the balance from every published snapshot and logs when it
/// moves.
async fn log_balance_changes(mut subscription: Subscription, parties: Parties) {
    let mut last = calculate_balance(subscription.current().records(), &parties);
    log_balance(&last, &parties);

    while let Some(snapshot) = subscription.next().await {
        let balance = calculate_balance(snapshot.records(), &parties);
        if balance != last {
            log_balance(&balance, &parties);
            last = balance;
        }
    }
    tracing::debug!("store closed, balance watcher stopped");
}

fn log_balance(balance: &Balance, parties: &Parties) {
    match *balance {
        Balance::Settled => tracing::info!("balance: all settled up"),
        Balance::Owing {
            debtor,
            creditor,
            amount,
        } => tracing::info!(
            "balance: {} owes {} {amount}",
            parties.name(debtor),
            parties.name(creditor)
        ),
    }
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
