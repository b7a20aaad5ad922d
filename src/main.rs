use dotenv::dotenv;
use fightbot::composite_observer::CompositeObserver;
use fightbot::decision_log::CsvDecisionLog;
use fightbot::default_observer::DefaultObserver;
use fightbot::game_observer::GameObserver;
use fightbot::{Bot, BotConfig, Game, GameConnection, TrainingBackend};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fightbot=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let config = BotConfig::from_env()?;
    tracing::info!("Player {} listening on {}", config.player, config.address());
    if let Some(seed) = config.seed {
        tracing::info!("- seed: {}", seed);
    }

    let bot = Bot::<TrainingBackend>::new(
        config.player,
        config.agent.clone(),
        config.reward.clone(),
        config.seed,
        Default::default(),
    )?;
    let decision_log = CsvDecisionLog::open(&config.log_file)?;
    let observers: Vec<Box<dyn GameObserver>> =
        vec![Box::new(DefaultObserver::new()), Box::new(decision_log)];
    let observer = CompositeObserver::new(observers);

    let connection = GameConnection::accept(&config.address()).await?;
    let mut game = Game::new(connection, bot, observer);
    let ticks = game.run().await?;
    tracing::info!("Served {} ticks", ticks);

    Ok(())
}
