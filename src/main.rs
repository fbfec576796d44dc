use applepay_bridge::application::plugin::ApplePayPlugin;
use applepay_bridge::infrastructure::channel::ChannelDelegate;
use applepay_bridge::infrastructure::simulated::{SheetOutcome, SimulatedSheet};
use applepay_bridge::interfaces::jsonl::command_reader::{BridgeAction, CommandReader};
use applepay_bridge::interfaces::jsonl::result_writer::ResultWriter;
use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command script: one JSON envelope per line
    /// ({"action", "callbackId", "args"})
    input: PathBuf,

    /// How the simulated payment sheet resolves presentations.
    #[arg(long, value_enum, default_value_t = SheetOutcome::Authorize)]
    outcome: SheetOutcome,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let (delegate, mut deliveries) = ChannelDelegate::new();
    let sheet = SimulatedSheet::new(cli.outcome);
    let plugin = ApplePayPlugin::new(Arc::new(sheet), Arc::new(delegate));

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    let stdout = io::stdout();
    let mut writer = ResultWriter::new(stdout.lock());

    for envelope in reader.commands() {
        let envelope = envelope.into_diagnostic()?;
        let command = envelope.command();
        match envelope.action {
            BridgeAction::CanMakePayment => {
                plugin.can_make_payment(command).await.into_diagnostic()?
            }
            BridgeAction::RequestPayment => {
                plugin.request_payment(command).await.into_diagnostic()?
            }
        }

        // Each command resolves exactly one callback. Await it before the
        // next command so at most one flow is ever in flight.
        let delivered = deliveries
            .recv()
            .await
            .ok_or_else(|| miette!("delivery channel closed"))?;
        writer.write_result(&delivered).into_diagnostic()?;
    }

    Ok(())
}
