use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use zt_qr::{EncodeOptions, MaskPattern, MaskSelection, QrCode, Version};
use zt_share_core::{NetworkId, ShareConfig, ShareFormat, SharePayload};

mod logging;

#[derive(Parser)]
#[command(name = "zt-share")]
#[command(about = "Print and save QR codes for ZeroTier networks")]
#[command(long_about = None)]
struct Cli {
    /// Share config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode arbitrary text
    Encode {
        /// Text to encode
        text: String,
        #[command(flatten)]
        output: OutputArgs,
        /// Force a QR version (1-10)
        #[arg(long = "qr-version")]
        version: Option<u8>,
    },
    /// Encode the share payload for a network
    Share {
        /// 16-digit network ID
        network_id: String,
        /// Payload format (defaults to the config's default_format)
        #[arg(short = 'F', long = "as")]
        share_format: Option<ShareFormat>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show how text would be encoded, without rendering
    Info {
        /// Text to analyse
        text: String,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output file (stdout when omitted; required for png)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Compact)]
    format: OutputFormat,
    /// Mask pattern: auto or 0-7 (overrides the config)
    #[arg(long)]
    mask: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Png,
    Ascii,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Encode {
            text,
            output,
            version,
        } => encode_text(&text, &output, version, &config),
        Commands::Share {
            network_id,
            share_format,
            output,
        } => share_network(&network_id, share_format, &output, &config),
        Commands::Info { text } => show_info(&text),
    }
}

fn load_config(path: Option<&Path>) -> Result<ShareConfig> {
    let Some(path) = path else {
        return Ok(ShareConfig::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = ShareConfig::from_json(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    debug!("loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

/// `--mask` wins over the config's mask policy.
fn mask_selection(arg: Option<&str>, config: &ShareConfig) -> Result<MaskSelection> {
    match arg {
        None => Ok(config.mask.to_selection()?),
        Some(s) if s.eq_ignore_ascii_case("auto") => Ok(MaskSelection::LowestPenalty),
        Some(s) => {
            let n: u8 = s
                .parse()
                .with_context(|| format!("Invalid mask '{}': expected auto or 0-7", s))?;
            Ok(MaskSelection::Fixed(MaskPattern::new(n)?))
        }
    }
}

fn encode_text(
    text: &str,
    output: &OutputArgs,
    version: Option<u8>,
    config: &ShareConfig,
) -> Result<()> {
    let options = EncodeOptions {
        mask: mask_selection(output.mask.as_deref(), config)?,
        version: version.map(Version::new).transpose()?,
    };
    let qr = QrCode::encode_with(text.as_bytes(), &options)
        .with_context(|| format!("Failed to encode {} bytes", text.len()))?;

    write_output(&qr, output, config)
}

fn share_network(
    network_id: &str,
    share_format: Option<ShareFormat>,
    output: &OutputArgs,
    config: &ShareConfig,
) -> Result<()> {
    let network = NetworkId::parse(network_id)?;
    let format = share_format.unwrap_or(config.default_format);
    let payload = SharePayload::new(&network, format);

    let options = EncodeOptions {
        mask: mask_selection(output.mask.as_deref(), config)?,
        version: None,
    };
    let qr = QrCode::encode_with(payload.content.as_bytes(), &options)?;
    info!("sharing {} as {}", network, format);

    write_output(&qr, output, config)?;

    // Caption goes to stderr when the symbol itself is on stdout.
    if output.output.is_none() {
        eprintln!("{}", payload.label);
    } else {
        println!("{}", payload.label);
    }
    Ok(())
}

fn render(qr: &QrCode, format: OutputFormat, config: &ShareConfig) -> Result<Vec<u8>> {
    Ok(match format {
        OutputFormat::Svg => qr
            .to_svg_sized(config.module_scale, config.display_size)
            .into_bytes(),
        OutputFormat::Png => qr
            .to_png(config.module_scale)
            .context("Failed to encode PNG")?,
        OutputFormat::Ascii => qr.to_ascii().into_bytes(),
        OutputFormat::Compact => qr.to_ascii_compact().into_bytes(),
    })
}

fn write_output(qr: &QrCode, output: &OutputArgs, config: &ShareConfig) -> Result<()> {
    if output.output.is_none() && output.format == OutputFormat::Png {
        bail!("PNG output needs --output <file>");
    }
    let bytes = render(qr, output.format, config)?;

    match &output.output {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "Wrote version {} ({}x{}, mask {}) to {}",
                qr.version(),
                qr.size(),
                qr.size(),
                qr.mask(),
                path.display()
            );
        }
        None => {
            print!("{}", String::from_utf8_lossy(&bytes));
        }
    }
    Ok(())
}

fn show_info(text: &str) -> Result<()> {
    let qr = QrCode::encode(text)?;
    let version = qr.version();
    let profile = version.profile();

    println!("============================================================");
    println!("                      QR ENCODING INFO");
    println!("============================================================");
    println!();
    println!("Payload:           {} bytes", text.len());
    println!(
        "Version:           {} ({}x{} modules)",
        version,
        qr.size(),
        qr.size()
    );
    println!("Capacity:          {} bytes", version.byte_capacity());
    println!("Data codewords:    {}", profile.data);
    println!("ECC per block:     {}", profile.ecc_per_block);
    println!("Blocks:            {}", profile.num_blocks());
    println!("Total codewords:   {}", profile.total);
    println!("Mask:              {}", qr.mask());
    println!();
    println!("============================================================");

    Ok(())
}
