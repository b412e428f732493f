use anyhow::Context;
use bridge::publisher::{StreamPublisher, Transport};
use bridge::store::{load_frame, save_frame, save_labels};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use wildcore::classify::ClassificationMethod;
use wildcore::record::LabeledRow;
use wildcore::simulation::{Clock, GeneratorConfig, SimulatedClock, SystemClock, TelemetryGenerator};
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod bridge;
mod workflow;

const DEFAULT_TELEMETRY_PATH: &str = "data/simulated_telemetry.json";

#[derive(Parser)]
#[command(author, version, about = "Wildlife telemetry simulation and behavior profiling driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a telemetry run and save it as a frame file
    Simulate {
        #[command(flatten)]
        generator: GeneratorArgs,
        /// Load a workflow config from YAML instead of the generator flags
        #[arg(long)]
        workflow: Option<PathBuf>,
        /// Pace generation with the wall clock
        #[arg(long, default_value_t = false)]
        realtime: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Process a saved frame and label behavior per row
    Classify {
        #[arg(short, long, default_value = DEFAULT_TELEMETRY_PATH)]
        input: PathBuf,
        /// `rule` or `model`
        #[arg(long, default_value = "rule")]
        method: ClassificationMethod,
        /// Keep rows at or after this timestamp
        #[arg(long, allow_negative_numbers = true)]
        start: Option<f64>,
        /// Keep rows at or before this timestamp
        #[arg(long, allow_negative_numbers = true)]
        end: Option<f64>,
        /// Write labels here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Publish samples live to a (logged) MQTT or WebSocket feed
    Stream {
        #[command(flatten)]
        generator: GeneratorArgs,
        #[arg(long, value_enum, default_value = "mqtt")]
        transport: Transport,
        #[arg(long, default_value = "wildlife/telemetry")]
        topic: String,
        #[arg(long, default_value = "localhost")]
        host: String,
        #[arg(long, default_value_t = 1883)]
        port: u16,
        /// Emit as fast as possible on a simulated clock
        #[arg(long, default_value_t = false)]
        simulated: bool,
    },
    /// Simulate, process and classify in one pass
    Run {
        #[command(flatten)]
        generator: GeneratorArgs,
        #[arg(long)]
        workflow: Option<PathBuf>,
        /// Write labels here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
struct GeneratorArgs {
    #[arg(long, default_value = "deer")]
    species: String,
    /// Movement mode: rest, walk, run or fly
    #[arg(long = "mode", default_value = "walk")]
    movement_mode: String,
    /// Sampling rate in hertz
    #[arg(long, default_value_t = 1.0)]
    rate: f64,
    /// Duration in seconds
    #[arg(long, default_value_t = 60.0)]
    duration: f64,
    #[arg(long, default_value_t = 45.0, allow_negative_numbers = true)]
    start_lat: f64,
    #[arg(long, default_value_t = -75.0, allow_negative_numbers = true)]
    start_lon: f64,
    /// Fix the random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl GeneratorArgs {
    fn to_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            species: self.species.as_str().into(),
            movement_mode: self.movement_mode.as_str().into(),
            sampling_rate_hz: self.rate,
            duration_seconds: self.duration,
            start_latitude: self.start_lat,
            start_longitude: self.start_lon,
            seed: self.seed,
        }
    }
}

fn workflow_config(
    workflow: Option<PathBuf>,
    generator: &GeneratorArgs,
) -> anyhow::Result<WorkflowConfig> {
    match workflow {
        Some(path) => WorkflowConfig::load(path),
        None => {
            let config = WorkflowConfig::from_generator(generator.to_config());
            config.validate()?;
            Ok(config)
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            generator,
            workflow,
            realtime,
            output,
        } => {
            let mut config = workflow_config(workflow, &generator)?;
            config.realtime |= realtime;
            let path = output
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TELEMETRY_PATH));
            let runner = Runner::new(config);
            let frame = runner.generate()?;
            save_frame(&path, &frame)?;
            println!("Simulated {} samples -> {}", frame.len(), path.display());
        }
        Commands::Classify {
            input,
            method,
            start,
            end,
            output,
        } => {
            let frame = load_frame(&input)?
                .between(start, end)
                .context("filtering by time range")?;
            let runner = Runner::new(WorkflowConfig {
                classification: method,
                ..Default::default()
            });
            let (_, labels) = runner.analyze(&frame, None)?;
            emit_labels(&labels, output.as_deref())?;
        }
        Commands::Stream {
            generator,
            transport,
            topic,
            host,
            port,
            simulated,
        } => {
            let config = generator.to_config();
            let publisher = StreamPublisher::new(transport, topic, host, port);
            let published = if simulated {
                let clock = SimulatedClock::starting_at(SystemClock.now());
                stream_until_interrupted(config, clock, publisher)?
            } else {
                stream_until_interrupted(config, SystemClock, publisher)?
            };
            println!("Published {} samples", published);
        }
        Commands::Run {
            generator,
            workflow,
            output,
        } => {
            let config = workflow_config(workflow, &generator)?;
            let output = output.or_else(|| config.output.clone());
            let runner = Runner::new(config);
            let result = runner.execute()?;

            let snapshot = runner.metrics().snapshot();
            info!("pipeline metrics: {:?}", snapshot);
            println!(
                "Run -> samples {}, feature columns {}, labelled rows {}",
                result.raw.len(),
                result.features.columns().len(),
                result.labels.len()
            );
            for label in wildcore::BehaviorLabel::ALL {
                let count = snapshot.labels.get(&label).copied().unwrap_or(0);
                println!("  {:<8} {}", label.as_str(), count);
            }
            if let Some(path) = output {
                save_labels(&path, &result.labels)?;
                println!("Labels -> {}", path.display());
            }
        }
    }

    Ok(())
}

fn emit_labels(labels: &[LabeledRow], output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            save_labels(path, labels)?;
            println!("Labelled {} rows -> {}", labels.len(), path.display());
        }
        None => {
            for row in labels {
                println!(
                    "{}",
                    serde_json::to_string(row).context("serializing labelled row")?
                );
            }
        }
    }
    Ok(())
}

/// Streams on a worker thread until the run completes or Ctrl+C arrives.
fn stream_until_interrupted<C>(
    config: GeneratorConfig,
    clock: C,
    publisher: StreamPublisher,
) -> anyhow::Result<usize>
where
    C: Clock + Send + 'static,
{
    let mut generator =
        TelemetryGenerator::with_clock(config, clock).context("configuring stream generator")?;
    let stop = Arc::new(AtomicBool::new(false));
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for signal handling")?;

    runtime.block_on(async {
        let worker_stop = stop.clone();
        let mut worker = tokio::task::spawn_blocking(move || {
            publisher.publish_all(generator.stream(), &worker_stop)
        });
        let published = tokio::select! {
            joined = &mut worker => joined.context("stream worker failed")??,
            interrupted = signal::ctrl_c() => {
                interrupted.context("awaiting Ctrl+C to stop")?;
                info!("interrupt received, stopping stream");
                stop.store(true, Ordering::Relaxed);
                worker.await.context("stream worker failed")??
            }
        };
        Ok::<usize, anyhow::Error>(published)
    })
}
