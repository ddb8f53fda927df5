use clap::{Parser, Subcommand, ValueEnum};
use scpecg::import::contec::read_contec_path;
use scpecg::import::read_csv_path;
use scpecg::{export_scp, Acquisition, ExportOptions, LeadOrder, Recording};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ecg2scp", about = "Convert ECG recordings to SCP-ECG files")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a Contec ECG90A file or a CSV sample table as an .scp file
    Convert {
        input: PathBuf,
        /// Input format (default: csv for *.csv, contec otherwise)
        #[arg(long, value_enum)]
        format: Option<InputFormat>,
        /// Output path (default: <input>.scp)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Patient/acquisition metadata as JSON (see `metadata`), replacing
        /// what the input provides
        #[arg(short, long)]
        metadata: Option<PathBuf>,
        /// Comma-separated lead names, overriding the input's lead order
        #[arg(short, long, value_delimiter = ',')]
        leads: Option<Vec<String>>,
        /// Sample rate in Hz (default: 800 for contec, 500 for csv)
        #[arg(long)]
        sample_rate: Option<u32>,
        /// Nanovolts per sample unit (default: 5000)
        #[arg(long)]
        amplitude_nv: Option<u16>,
        /// Replace the output file if it exists
        #[arg(short = 'f', long)]
        overwrite: bool,
    },
    /// Print the default metadata as a JSON template
    Metadata,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    Contec,
    Csv,
}

impl InputFormat {
    fn detect(input: &Path) -> Self {
        match input.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Contec,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {

        // ── Convert ──────────────────────────────────────────────────────────
        Commands::Convert {
            input, format, output, metadata, leads, sample_rate, amplitude_nv, overwrite,
        } => {
            let (recording, source_acquisition, base) = read_input(&input, format)?;
            let acquisition = match metadata {
                Some(path) => Acquisition::from_json(&std::fs::read(path)?)?,
                None       => source_acquisition,
            };
            let lead_order = match leads {
                Some(names) => LeadOrder::from_names(names)?,
                None        => base.lead_order.clone(),
            };
            let opts = ExportOptions {
                sample_rate_hz:     sample_rate.unwrap_or(base.sample_rate_hz),
                amplitude_nanovolt: amplitude_nv.unwrap_or(base.amplitude_nanovolt),
                lead_order,
                overwrite,
                ..base
            };
            let output = output.unwrap_or_else(|| default_output(&input));
            let written = export_scp(&output, &recording, &acquisition, &opts)?;
            println!(
                "Created: {} ({} leads, {} samples)",
                written.display(),
                recording.n_leads(),
                recording.n_samples()
            );
        }

        // ── Metadata ─────────────────────────────────────────────────────────
        Commands::Metadata => {
            println!("{}", Acquisition::default().to_json_pretty()?);
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Recording, metadata and export defaults from one input file.
fn read_input(
    input: &Path,
    format: Option<InputFormat>,
) -> scpecg::Result<(Recording, Acquisition, ExportOptions)> {
    match format.unwrap_or_else(|| InputFormat::detect(input)) {
        InputFormat::Contec => {
            let ecg = read_contec_path(input)?;
            let opts = ecg.export_options();
            Ok((ecg.recording, ecg.acquisition, opts))
        }
        InputFormat::Csv => {
            let csv = read_csv_path(input)?;
            let opts = ExportOptions {
                lead_order: csv.lead_order.unwrap_or_default(),
                ..ExportOptions::default()
            };
            Ok((csv.recording, Acquisition::default(), opts))
        }
    }
}

fn default_output(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".scp");
    PathBuf::from(name)
}
