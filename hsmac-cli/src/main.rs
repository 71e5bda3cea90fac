use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use hsmac::{Algorithm, Encoding, SigningRequest, Verdict};

mod watch;

/**
    HMAC signing and verification command-line tool.
*/
#[derive(Parser, Debug)]
#[command(name = "hsmac")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute an HMAC signature over a payload.
    Sign {
        /// Payload text. Reads stdin when omitted or "-".
        payload: Option<String>,

        /// Read the payload from a file instead.
        #[arg(short, long, conflicts_with = "payload")]
        file: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,

        /// Also place the signature on the system clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Verify a received signature against a payload.
    Verify {
        /// Payload text. Reads stdin when omitted or "-".
        payload: Option<String>,

        /// Read the payload from a file instead.
        #[arg(short, long, conflicts_with = "payload")]
        file: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,

        /// The received signature, in the selected encoding.
        #[arg(short = 'x', long)]
        signature: String,
    },
    /// Recompute continuously as payload lines arrive on stdin.
    Watch {
        #[command(flatten)]
        common: CommonArgs,

        /// Verify each payload against this signature instead of signing.
        #[arg(short = 'x', long)]
        signature: Option<String>,

        /// Quiet period before recomputing, in milliseconds.
        #[arg(long, default_value = "300")]
        debounce_ms: u64,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Shared secret.
    #[arg(short, long)]
    secret: Option<String>,

    /// Read the shared secret from a file.
    #[arg(long, conflicts_with = "secret")]
    secret_file: Option<PathBuf>,

    /// MAC algorithm: hs256, hs384, or hs512.
    #[arg(short, long, default_value = "hs256")]
    alg: Algorithm,

    /// Signature encoding: hex or base64.
    #[arg(short, long, default_value = "hex")]
    encoding: Encoding,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Sign {
            payload,
            file,
            common,
            copy,
        } => cmd_sign(payload, file.as_deref(), &common, copy),
        Command::Verify {
            payload,
            file,
            common,
            signature,
        } => cmd_verify(payload, file.as_deref(), &common, &signature),
        Command::Watch {
            common,
            signature,
            debounce_ms,
        } => {
            let secret = read_secret(&common)?;
            watch::run(watch::WatchConfig {
                secret,
                algorithm: common.alg,
                encoding: common.encoding,
                signature,
                debounce: Duration::from_millis(debounce_ms),
            })
            .await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_sign(
    payload_arg: Option<String>,
    file: Option<&std::path::Path>,
    common: &CommonArgs,
    copy: bool,
) -> Result<ExitCode> {
    let payload = read_payload(payload_arg, file)?;
    let secret = read_secret(common)?;

    let Some(request) = SigningRequest::new(payload, secret, common.alg, common.encoding) else {
        // Nothing to compute; mirror an empty output field.
        return Ok(ExitCode::SUCCESS);
    };

    let signature = request.generate()?;
    println!("{signature}");

    if copy {
        copy_to_clipboard(&signature);
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_verify(
    payload_arg: Option<String>,
    file: Option<&std::path::Path>,
    common: &CommonArgs,
    signature: &str,
) -> Result<ExitCode> {
    let payload = read_payload(payload_arg, file)?;
    let secret = read_secret(common)?;

    let Some(request) = SigningRequest::new(payload, secret, common.alg, common.encoding) else {
        bail!("payload and secret must both be non-empty to verify");
    };

    match request.verify(signature) {
        Ok(Verdict::Valid) => {
            println!("valid");
            Ok(ExitCode::SUCCESS)
        }
        Ok(Verdict::Invalid) => {
            println!("invalid");
            Ok(ExitCode::from(1))
        }
        Err(err) => {
            eprintln!("warning: {err}");
            Ok(ExitCode::from(2))
        }
    }
}

fn read_payload(arg: Option<String>, file: Option<&std::path::Path>) -> Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload file {}", path.display()));
    }
    match arg.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read payload from stdin")?;
            Ok(buf)
        }
        Some(text) => Ok(text.to_owned()),
    }
}

fn read_secret(common: &CommonArgs) -> Result<String> {
    if let Some(secret) = &common.secret {
        return Ok(secret.clone());
    }
    if let Some(path) = &common.secret_file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read secret file {}", path.display()))?;
        // A trailing newline is an artifact of how the file was written,
        // not part of the secret.
        let trimmed = raw.strip_suffix('\n').unwrap_or(&raw);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        return Ok(trimmed.to_owned());
    }
    bail!("either --secret or --secret-file is required")
}

fn copy_to_clipboard(text: &str) {
    // Best-effort: a headless session has no clipboard, and the signature
    // is already on stdout.
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_owned())) {
        Ok(()) => eprintln!("Copied signature to clipboard"),
        Err(err) => eprintln!("Clipboard copy failed: {err}"),
    }
}
