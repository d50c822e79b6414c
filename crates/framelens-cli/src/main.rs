use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use framelens_core::{AnalysisOptions, CaptureReport, ProtocolId};
use serde::Serialize;
use tracing::Level;

mod hex;
mod input;
mod render;

use hex::parse_hex_frame;
use input::{ensure_distinct_output, resolve_input_path, validate_input_file};
use render::render_text;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FRAMELENS_BUILD_COMMIT"),
    " ",
    env!("FRAMELENS_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "framelens")]
#[command(version = VERSION)]
#[command(
    about = "Layered decoder for captured network frames (Ethernet / ARP / IPv4 / TCP / UDP / ICMPv4).",
    long_about = None,
    after_help = "Examples:\n  framelens pcap decode capture.pcapng --stdout\n  framelens pcap decode capture.pcap -o report.json --format json\n  framelens frame decode 'ff ff ff ff ff ff 02 00 00 00 00 01 08 06 ...'"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on PCAP/PCAPNG inputs.
    Pcap {
        #[command(subcommand)]
        command: PcapCommands,
    },
    /// Operations on a single frame given as hex.
    Frame {
        #[command(subcommand)]
        command: FrameCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PcapCommands {
    /// Decode every frame of a capture file into a text or JSON report.
    #[command(visible_alias = "analyse", alias = "analyze")]
    #[command(
        after_help = "Examples:\n  framelens pcap decode capture.pcapng --stdout\n  framelens pcap analyse capture.pcap -o report.json --format json --pretty"
    )]
    Decode {
        /// Path to a .pcap or .pcapng file (glob patterns must match one file)
        input: PathBuf,

        /// Output report path
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write the report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        json: JsonStyle,

        /// Include the full layer tree of every frame (JSON output only)
        #[arg(long)]
        layers: bool,

        /// Stop after N frames
        #[arg(long, value_name = "N")]
        limit: Option<u64>,

        /// Exit with a non-zero code if any frame failed to decode
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Subcommand, Debug)]
enum FrameCommands {
    /// Decode one frame from hex (whitespace and ':' separators allowed).
    Decode {
        /// Frame bytes as hex
        hex: String,

        /// Protocol of the first byte
        #[arg(long, default_value = "ethernet", value_parser = parse_protocol)]
        protocol: ProtocolId,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        json: JsonStyle,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct JsonStyle {
    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,
}

fn parse_protocol(value: &str) -> Result<ProtocolId, String> {
    ProtocolId::from_name(value).ok_or_else(|| {
        let known = ProtocolId::ALL
            .iter()
            .map(|id| id.name().to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown protocol '{value}' (known: {known})")
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Pcap { command } => match command {
            PcapCommands::Decode {
                input,
                report,
                stdout,
                format,
                json,
                layers,
                limit,
                strict,
            } => cmd_pcap_decode(PcapDecodeArgs {
                input,
                report,
                stdout,
                format,
                json,
                layers,
                limit,
                quiet: cli.quiet,
                strict,
            }),
        },
        Commands::Frame { command } => match command {
            FrameCommands::Decode {
                hex,
                protocol,
                format,
                json,
            } => cmd_frame_decode(&hex, protocol, format, json),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // Also forwards `log` records from framelens-core.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

struct PcapDecodeArgs {
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    format: OutputFormat,
    json: JsonStyle,
    layers: bool,
    limit: Option<u64>,
    quiet: bool,
    strict: bool,
}

fn cmd_pcap_decode(args: PcapDecodeArgs) -> Result<(), CliError> {
    if args.layers && args.format == OutputFormat::Text {
        return Err(CliError::new(
            "--layers has no effect on text reports",
            Some("add --format json".to_string()),
        ));
    }
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    tracing::debug!("decoding capture {}", resolved_input.display());

    let report_path = if args.stdout {
        None
    } else {
        let path = args.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        ensure_distinct_output(&resolved_input, &path)?;
        Some(path)
    };

    let options = AnalysisOptions {
        limit: args.limit,
        include_layers: args.layers,
    };
    let report = framelens_core::decode_capture_file(&resolved_input, &options)
        .context("PCAP/PCAPNG decoding failed")?;
    let output = match args.format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => serialize_json(&report, args.json)?,
    };

    match report_path {
        None => print!("{output}"),
        Some(path) => {
            write_report(&path, &output)?;
            if !args.quiet {
                eprintln!("OK: report written -> {}", path.display());
            }
        }
    }

    if args.strict {
        check_strict(&report)?;
    }
    Ok(())
}

fn cmd_frame_decode(
    hex: &str,
    protocol: ProtocolId,
    format: OutputFormat,
    json: JsonStyle,
) -> Result<(), CliError> {
    let bytes = parse_hex_frame(hex).map_err(|err| {
        CliError::new(
            format!("invalid hex frame: {err}"),
            Some("pass bytes as hex pairs, e.g. 'ff ff 00 1a' or 'ff:ff:00:1a'".to_string()),
        )
    })?;
    let layer = framelens_core::decode(&bytes, protocol).map_err(|err| {
        CliError::new(
            format!("decode failed: {err}"),
            Some(format!("check the frame bytes and --protocol (got {protocol})")),
        )
    })?;

    match format {
        OutputFormat::Text => println!("{layer}"),
        OutputFormat::Json => println!("{}", serialize_json(&layer, json)?),
    }
    Ok(())
}

fn serialize_json<T: Serialize>(value: &T, style: JsonStyle) -> Result<String, CliError> {
    if style.pretty && style.compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    let json = if style.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn write_report(path: &Path, output: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, output)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}

fn check_strict(report: &CaptureReport) -> Result<(), CliError> {
    let failed = report.summary.frames_failed;
    if failed == 0 {
        return Ok(());
    }
    let first = report
        .frames
        .iter()
        .find(|frame| !frame.is_decoded())
        .map(|frame| frame.index);
    Err(CliError::new(
        format!("{failed} frame(s) failed to decode"),
        first.map(|index| format!("first failure at frame {index}; rerun without --strict to inspect")),
    ))
}
