use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::classify::ClassifierConfig;
use crate::timer::TimerController;

use super::loop_worker::watch_loop;
use super::ports::Detector;
use super::WatchConfig;

/// Lifecycle of the watch loop task.
///
/// Stopping cancels the loop and awaits the join; on resume the loop
/// starts fresh rather than replaying missed ticks.
pub struct SensingController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl SensingController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn is_watching(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start_watching(
        &mut self,
        detector: Arc<dyn Detector>,
        timer: TimerController,
        classifier: ClassifierConfig,
        config: WatchConfig,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("watch loop already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(watch_loop(detector, timer, classifier, config, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    pub async fn stop_watching(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            info!("Waiting for watch loop to finish");
            handle
                .await
                .context("watch loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}
