/*!
    Debounced reactive recomputation.

    Payload revisions arrive on a watch channel (one revision per stdin
    line). Every change restarts a quiet-period timer; once the input
    goes quiet, the newest revision is signed (or verified) on a
    blocking worker, since the MAC itself is CPU-bound. A revision
    arriving while a computation is in flight supersedes it: stale
    results are dropped, never displayed.
*/

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncBufReadExt;
use tokio::sync::watch;
use tokio::task;

use hsmac::{Algorithm, Encoding, MacResult, SigningRequest, Verdict};

pub struct WatchConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub encoding: Encoding,
    /// When set, each revision is verified against this signature
    /// instead of being signed.
    pub signature: Option<String>,
    pub debounce: Duration,
}

/// One payload revision. The sequence number exists for logging only;
/// the watch channel itself already keeps just the newest value.
#[derive(Debug, Clone, Default)]
struct Revision {
    seq: u64,
    payload: String,
}

/// What a single recomputation produced.
enum Outcome {
    /// Nothing to compute (payload or secret trims to empty).
    Neutral,
    Signature(String),
    Verdict(Verdict),
}

/**
    A watch receiver with a quiet-period gate in front of it.

    `next` waits for a change, then keeps restarting the timer for as
    long as further changes arrive inside the window. Only once the
    input has been quiet for the full period does it hand out the
    newest revision. A value sent just before the channel closed is
    still delivered.
*/
struct DebouncedInput {
    rx: watch::Receiver<Revision>,
    quiet: Duration,
}

impl DebouncedInput {
    fn new(rx: watch::Receiver<Revision>, quiet: Duration) -> Self {
        Self { rx, quiet }
    }

    async fn next(&mut self) -> Option<Revision> {
        if self.rx.changed().await.is_err() {
            return None;
        }
        loop {
            tokio::select! {
                // Biased so that a change landing together with the
                // timer edge restarts the window instead of racing it.
                biased;
                changed = self.rx.changed() => {
                    if changed.is_err() {
                        // Input closed mid-burst; flush what we have.
                        break;
                    }
                }
                _ = tokio::time::sleep(self.quiet) => break,
            }
        }
        Some(self.rx.borrow_and_update().clone())
    }

    /// True when a newer revision arrived after the one last returned.
    fn superseded(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }
}

pub async fn run(config: WatchConfig) -> Result<()> {
    let (tx, rx) = watch::channel(Revision::default());

    eprintln!("Reading payload lines from stdin (Ctrl-D to finish)");

    let reader = task::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        let mut seq = 0u64;
        while let Ok(Some(line)) = lines.next_line().await {
            seq += 1;
            if tx.send(Revision { seq, payload: line }).is_err() {
                break;
            }
        }
        // Dropping the sender closes the channel and ends the loop below.
    });

    let mut stdout = std::io::stdout();
    run_loop(rx, &config, &mut stdout).await?;
    reader.await.context("stdin reader task panicked")?;
    Ok(())
}

async fn run_loop(
    rx: watch::Receiver<Revision>,
    config: &WatchConfig,
    out: &mut impl Write,
) -> Result<()> {
    let mut input = DebouncedInput::new(rx, config.debounce);

    while let Some(revision) = input.next().await {
        tracing::debug!(seq = revision.seq, "recomputing");

        let outcome = compute(config, revision.payload)
            .await
            .context("signing worker panicked")?;

        if input.superseded() {
            tracing::debug!(seq = revision.seq, "dropping stale result");
            continue;
        }

        match outcome {
            Ok(Outcome::Neutral) => {}
            Ok(Outcome::Signature(signature)) => writeln!(out, "{signature}")?,
            Ok(Outcome::Verdict(verdict)) => writeln!(out, "{verdict}")?,
            Err(err) => writeln!(out, "warning: {err}")?,
        }
        out.flush()?;
    }
    Ok(())
}

/// Run one sign-or-verify operation on the blocking pool.
async fn compute(
    config: &WatchConfig,
    payload: String,
) -> std::result::Result<MacResult<Outcome>, task::JoinError> {
    let secret = config.secret.clone();
    let signature = config.signature.clone();
    let (algorithm, encoding) = (config.algorithm, config.encoding);

    task::spawn_blocking(move || {
        let Some(request) = SigningRequest::new(payload, secret, algorithm, encoding) else {
            return Ok(Outcome::Neutral);
        };
        match signature {
            None => request.generate().map(Outcome::Signature),
            Some(signature) => request.verify(&signature).map(Outcome::Verdict),
        }
    })
    .await
}
