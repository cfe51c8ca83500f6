// Main entry point - Dependency injection and polling loop
use std::sync::Arc;

use clap::Parser;
use strip_monitor::application::label_service::LabelBuilder;
use strip_monitor::application::monitor_service::MonitorService;
use strip_monitor::application::stats_service::StatsCollector;
use strip_monitor::infrastructure::config::{OutputFormat, load_monitor_config};
use strip_monitor::infrastructure::sysinfo_host::SysinfoHost;
use strip_monitor::infrastructure::temperature::build_temperature_sources;
use strip_monitor::presentation::sink::{JsonLinesSink, LabelSink, TerminalSink};
use tracing_subscriber::EnvFilter;

const TEMPERATURE_HINT: &str = "Temperature: not available \
    (install osx-cpu-temp with `brew install osx-cpu-temp`, or enable the sensors strategy)";

/// Host CPU, RAM and temperature monitor with severity-colored labels
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path, without extension
    #[arg(short, long, default_value = "config/monitor")]
    config: String,

    /// Collect and print a single snapshot and its labels, then exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout carries the frames
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_monitor_config(&args.config)?;
    tracing::debug!("Loaded configuration: {:?}", config);

    // Infrastructure
    let host = Arc::new(SysinfoHost::new());
    let temperature_sources = build_temperature_sources(&config.temperature);

    // Services
    let collector = StatsCollector::new(host, temperature_sources, config.cpu_sample_window());
    let labels = LabelBuilder::new(config.display.font_size, config.temperature.range());
    let service = MonitorService::new(collector, labels, config.poll_interval());

    let mut sink: Box<dyn LabelSink> = match config.display.output {
        OutputFormat::Terminal => Box::new(TerminalSink::new(std::io::stdout())),
        OutputFormat::Json => Box::new(JsonLinesSink::new(std::io::stdout())),
    };

    if args.once {
        let (snapshot, frame) = service.tick_with_snapshot().await?;
        println!("{}", snapshot);
        if snapshot.temperature_celsius.is_none() {
            println!("{}", TEMPERATURE_HINT);
        }
        sink.render(&frame)?;
        return Ok(());
    }

    tracing::info!(
        "Starting strip-monitor, polling every {:?}",
        config.poll_interval()
    );

    let mut frames = service.start();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            frame = frames.recv() => match frame {
                Some(frame) => sink.render(&frame)?,
                None => break,
            },
            _ = &mut shutdown => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
