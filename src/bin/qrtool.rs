use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_qr_gen::{ByteEncoding, ECLevel, EncodeOptions, Encoder, MaskPattern, ModuleGrid};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code encoder tools")]
struct Cli {
    /// Log pipeline decisions (segments, version, mask scores)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text and print the symbol to the terminal
    Encode {
        text: String,
        #[command(flatten)]
        opts: EncodeArgs,
    },
    /// Print the intermediate artifacts of an encode
    Inspect {
        text: String,
        #[command(flatten)]
        opts: EncodeArgs,
    },
}

#[derive(Args)]
struct EncodeArgs {
    #[arg(long, value_enum, default_value_t = Ecc::M)]
    ecc: Ecc,
    #[arg(long)]
    min_version: Option<u8>,
    /// Exact version; fails if the data does not fit
    #[arg(long)]
    version: Option<u8>,
    #[arg(long)]
    mask: Option<u8>,
    #[arg(long)]
    quiet_zone: Option<usize>,
    /// Encode bytes as UTF-8 instead of ISO-8859-1
    #[arg(long)]
    utf8: bool,
    /// Raise the EC level while the chosen version still fits
    #[arg(long)]
    boost: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Ecc {
    L,
    M,
    Q,
    H,
}

impl From<Ecc> for ECLevel {
    fn from(ecc: Ecc) -> Self {
        match ecc {
            Ecc::L => ECLevel::L,
            Ecc::M => ECLevel::M,
            Ecc::Q => ECLevel::Q,
            Ecc::H => ECLevel::H,
        }
    }
}

impl EncodeArgs {
    fn encoder(&self) -> Encoder {
        let mut options = EncodeOptions::new()
            .with_ec_level(self.ecc.into())
            .with_boost_ec_level(self.boost);
        if let Some(v) = self.min_version {
            options = options.with_min_version(v);
        }
        if let Some(v) = self.version {
            options = options.with_version(v);
        }
        if let Some(m) = self.mask {
            options = options.with_mask(m);
        }
        if let Some(q) = self.quiet_zone {
            options = options.with_quiet_zone(q);
        }
        if self.utf8 {
            options = options.with_byte_encoding(ByteEncoding::Utf8);
        }
        Encoder::with_options(options)
    }
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rust_qr_gen=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match &cli.command {
        Command::Encode { text, opts } => encode_cmd(text, opts),
        Command::Inspect { text, opts } => inspect_cmd(text, opts),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn encode_cmd(text: &str, opts: &EncodeArgs) -> rust_qr_gen::Result<()> {
    let grid = opts.encoder().encode_text(text)?;
    print!("{}", render_blocks(&grid));
    println!(
        "version={} ({}x{}) ec_level={} mask={} quiet_zone={}",
        grid.version(),
        grid.side_length(),
        grid.side_length(),
        grid.ec_level(),
        grid.mask(),
        grid.quiet_zone()
    );
    Ok(())
}

fn inspect_cmd(text: &str, opts: &EncodeArgs) -> rust_qr_gen::Result<()> {
    let plan = opts.encoder().plan_text(text)?;
    println!("Segments:");
    for seg in plan.segments() {
        println!(
            "  {:<18} chars={:<5} bits={}",
            seg.mode().to_string(),
            seg.num_chars(),
            seg.encoded_bits(plan.version()).unwrap_or(0)
        );
    }
    println!(
        "Version: {} ({}x{}), EC level {} (~{}% recovery)",
        plan.version(),
        plan.version().size(),
        plan.version().size(),
        plan.ec_level(),
        plan.ec_level().recovery_percent()
    );
    println!("Data codewords ({}):", plan.data_codewords().len());
    println!("  {}", hex(plan.data_codewords()));
    println!("Final codewords ({}):", plan.codewords().len());
    println!("  {}", hex(plan.codewords()));

    let evaluation = plan.evaluate_masks();
    println!("Mask penalties:");
    for mask in MaskPattern::ALL {
        let marker = if mask == evaluation.best() { " <- best" } else { "" };
        println!("  mask {}: {}{}", mask, evaluation.score(mask), marker);
    }
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two characters per module so the symbol stays roughly square
fn render_blocks(grid: &ModuleGrid) -> String {
    let outer = grid.outer_side_length();
    let mut out = String::with_capacity(outer * (outer * 6 + 1));
    for row in 0..outer {
        for col in 0..outer {
            out.push_str(if grid.module_with_margin(row, col) {
                "██"
            } else {
                "  "
            });
        }
        out.push('\n');
    }
    out
}
