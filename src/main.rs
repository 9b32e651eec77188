//! Headless runner (default binary).
//!
//! Reads an intent script from the file given as the first argument (or stdin
//! when absent or `-`), drives a fresh session with it and prints JSON
//! observations to stdout, one per line.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};

use anyhow::{Context, Result};

use blockfall::config::{EmitMode, RunConfig};
use blockfall::core::GameSession;
use blockfall::observe::{observe, ObservationMessage};
use blockfall::script::parse_script;

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    let source = read_source(std::env::args().nth(1))?;
    let steps = parse_script(&source)?;

    let mut session = GameSession::with_config(config.session.clone())
        .context("invalid session configuration")?;
    session.start();

    eprintln!(
        "[Runner] {}x{} board, seed {}, {} randomizer, {} script steps",
        config.session.cols,
        config.session.rows,
        config.session.seed,
        config.session.randomizer.as_str(),
        steps.len()
    );

    let stdout = io::stdout();
    let mut out = Sink::new(stdout.lock(), open_log(config.log_path.as_deref()));

    let mut seq: u64 = 0;
    if config.emit == EmitMode::Changes {
        out.emit(&observe(&mut session, seq))?;
    }

    for line in &steps {
        for _ in 0..line.repeat {
            let changed = line.step.apply(&mut session);
            if changed && config.emit == EmitMode::Changes {
                seq += 1;
                out.emit(&observe(&mut session, seq))?;
            }
        }
    }

    if config.emit == EmitMode::Final {
        seq += 1;
        out.emit(&observe(&mut session, seq))?;
    }
    out.flush()?;

    match session.final_score() {
        Some(score) => eprintln!(
            "[Runner] Game over: score {}, lines {}, level {}",
            score,
            session.lines(),
            session.level()
        ),
        None => eprintln!(
            "[Runner] Script finished: score {}, lines {}, {} pieces",
            session.score(),
            session.lines(),
            session.pieces_spawned()
        ),
    }

    Ok(())
}

fn read_source(path: Option<String>) -> Result<String> {
    let mut source = String::new();
    match path.as_deref() {
        None | Some("-") => {
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read script from stdin")?;
        }
        Some(path) => {
            File::open(path)
                .and_then(|mut f| f.read_to_string(&mut source))
                .with_context(|| format!("failed to read script {}", path))?;
        }
    }
    Ok(source)
}

/// The observation log is best-effort: an unusable path is reported once.
fn open_log(path: Option<&str>) -> Option<BufWriter<File>> {
    let path = path?;
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(BufWriter::new(file)),
        Err(e) => {
            eprintln!("[Runner] Cannot open log {}: {}", path, e);
            None
        }
    }
}

struct Sink<W: Write> {
    out: W,
    log: Option<BufWriter<File>>,
    buf: Vec<u8>,
}

impl<W: Write> Sink<W> {
    fn new(out: W, log: Option<BufWriter<File>>) -> Self {
        Self {
            out,
            log,
            buf: Vec::with_capacity(4096),
        }
    }

    fn emit(&mut self, obs: &ObservationMessage) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, obs).context("failed to encode observation")?;
        self.buf.push(b'\n');

        self.out
            .write_all(&self.buf)
            .context("failed to write observation")?;

        if let Some(log) = self.log.as_mut() {
            if let Err(e) = log.write_all(&self.buf) {
                eprintln!("[Runner] Log write failed, disabling: {}", e);
                self.log = None;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("failed to flush stdout")?;
        if let Some(log) = self.log.as_mut() {
            let _ = log.flush();
        }
        Ok(())
    }
}
