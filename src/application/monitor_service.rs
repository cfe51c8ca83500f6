// Monitor service - Tick-driven polling loop feeding label frames to a renderer
use crate::application::label_service::LabelBuilder;
use crate::application::stats_service::StatsCollector;
use crate::domain::label::LabelFrame;
use crate::domain::stats::StatsSnapshot;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct MonitorService {
    collector: StatsCollector,
    labels: LabelBuilder,
    poll_interval: Duration,
}

impl MonitorService {
    pub fn new(collector: StatsCollector, labels: LabelBuilder, poll_interval: Duration) -> Self {
        Self {
            collector,
            labels,
            poll_interval,
        }
    }

    /// One poll: collect a snapshot and derive its labels
    pub async fn tick(&self) -> Result<LabelFrame> {
        let (_, frame) = self.tick_with_snapshot().await?;
        Ok(frame)
    }

    /// Like `tick`, but also hands back the raw snapshot the labels came from
    pub async fn tick_with_snapshot(&self) -> Result<(StatsSnapshot, LabelFrame)> {
        let snapshot = self.collector.collect().await?;
        tracing::debug!("Collected {}", snapshot);

        let labels = self.labels.build_labels(&snapshot);
        let frame = LabelFrame::new(chrono::Utc::now(), labels);
        Ok((snapshot, frame))
    }

    /// Spawn the polling loop and return the frame receiver.
    ///
    /// The next tick is scheduled only after the current frame has been handed
    /// off. Dropping the receiver stops the loop.
    pub fn start(self) -> mpsc::Receiver<LabelFrame> {
        let (tx, rx) = mpsc::channel(1);

        tokio::spawn(async move {
            loop {
                match self.tick().await {
                    Ok(frame) => {
                        if tx.send(frame).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Tick failed: {:#}", e);
                    }
                }

                tokio::select! {
                    _ = tokio::time::sleep(self.poll_interval) => {}
                    _ = tx.closed() => break,
                }
            }
            tracing::debug!("Polling loop stopped");
        });

        rx
    }
}
