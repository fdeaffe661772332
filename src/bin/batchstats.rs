use std::env;
use std::sync::Arc;

use batchstats::core::events::EventBus;
use batchstats::core::services::batch::{
    BatchEvent, BatchObserver, EventBusObserver, FanoutObserver, TracingObserver,
};
use batchstats::{BatchConfig, BatchProcessor, ItemId, SimulatedStatsCalculator, DEFAULT_ITEM_IDS};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BatchConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut items: Vec<ItemId> = Vec::new();
    let mut failing: Vec<ItemId> = Vec::new();
    let mut json = false;
    let mut stream_events = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--fail" | "-f" => {
                if i + 1 < args.len() {
                    failing.push(args[i + 1].parse()?);
                    i += 1;
                } else {
                    anyhow::bail!("--fail requires an item id");
                }
            }
            "--json" => json = true,
            "--events" => stream_events = true,
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => items.push(other.parse()?),
        }
        i += 1;
    }

    if items.is_empty() {
        items = DEFAULT_ITEM_IDS.into_iter().map(ItemId::from).collect();
    }

    let calculator = failing
        .into_iter()
        .fold(SimulatedStatsCalculator::new(), |calc, id| {
            calc.with_failure(id, "not found")
        });

    let mut observer = FanoutObserver::new().with(Arc::new(TracingObserver));
    if stream_events {
        let bus = Arc::new(EventBus::new());
        bus.subscribe_all(Arc::new(|event: &BatchEvent| match event.to_json() {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("Failed to serialize {} event: {}", event.kind().as_str(), e),
        }));
        observer = observer.with(Arc::new(EventBusObserver::new(bus)));
    }

    let observer: Arc<dyn BatchObserver> = Arc::new(observer);
    let processor = BatchProcessor::new(config).with_observer(observer);
    let summary = processor.run(items, &calculator).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
        for message in summary.error_messages() {
            println!("  {}", message);
        }
    }

    Ok(())
}

fn print_help() {
    println!("batchstats - compute per-item stats over a batch, isolating failures");
    println!();
    println!("USAGE:");
    println!("    batchstats [OPTIONS] [ID]...");
    println!();
    println!("ARGS:");
    println!("    [ID]...            Item ids to process (default: 1 2 3 4 5)");
    println!();
    println!("OPTIONS:");
    println!("    -f, --fail <ID>    Make the simulated calculator fail for this id (repeatable)");
    println!("        --json         Print the summary as JSON");
    println!("        --events       Print every batch event as a JSON line while running");
    println!("    -h, --help         Print this help");
    println!();
    println!("ENVIRONMENT:");
    println!("    BATCHSTATS_PROGRESS_INTERVAL   Log progress every N items (0 disables)");
    println!("    BATCHSTATS_MAX_CAUSE_CHARS     Truncate failure causes past N chars");
    println!("    BATCHSTATS_LOG_FILTER          Default tracing filter (RUST_LOG wins)");
}
