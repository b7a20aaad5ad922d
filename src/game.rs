use crate::bot::{Bot, TickReport};
use crate::error::Result;
use crate::game_observer::GameObserver;
use crate::transport::GameConnection;
use burn::tensor::backend::AutodiffBackend;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::warn;

/// One emulator frame at 60 Hz
const TICK_BUDGET_MS: u128 = 16;

pub struct Game<B: AutodiffBackend, S = TcpStream> {
    connection: GameConnection<S>,
    bot: Bot<B>,
    observer: Box<dyn GameObserver>,
}

impl<B, S> Game<B, S>
where
    B: AutodiffBackend,
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(
        connection: GameConnection<S>,
        bot: Bot<B>,
        observer: impl GameObserver + 'static,
    ) -> Self {
        Self {
            connection,
            bot,
            observer: Box::new(observer),
        }
    }

    /// Serve snapshots until the emulator disconnects. Returns the tick count.
    pub async fn run(&mut self) -> Result<u64> {
        self.observer
            .on_game_start(self.bot.player(), self.connection.peer());

        let mut ticks = 0;
        while let Some(snapshot) = self.connection.receive().await? {
            let tick_start = Instant::now();

            let report = self.bot.fight(&snapshot)?;
            self.notify(&report);
            self.connection.send(&report.command).await?;
            ticks += 1;

            let tick_duration = tick_start.elapsed();
            if tick_duration.as_millis() > TICK_BUDGET_MS {
                warn!(
                    "Tick {} took {:.2}ms (round {}, training: {})",
                    ticks,
                    tick_duration.as_secs_f64() * 1000.0,
                    self.bot.round_id(),
                    report.train.is_some()
                );
            }
        }

        self.observer.on_game_finished(ticks);
        Ok(ticks)
    }

    fn notify(&mut self, report: &TickReport) {
        if let Some(start) = &report.round_start {
            self.observer.on_round_start(start);
        }
        if let Some(decision) = &report.decision {
            self.observer.on_decision(decision);
        }
        if let Some(stats) = &report.train {
            self.observer.on_train_step(stats);
        }
        if let Some(summary) = &report.round_over {
            self.observer.on_round_over(summary);
        }
    }
}
