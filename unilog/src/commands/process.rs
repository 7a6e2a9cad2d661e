//! The `process` command: reads the log line by line, runs the pipeline and
//! routes raw and parsed lines to their sinks.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use unilog_core::{ParserConfig, Pipeline, PipelineStats};

/// Options for the `run_process` entry point.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub config_path: PathBuf,
    pub input: Option<PathBuf>,
    pub secondary_log_file: Option<PathBuf>,
    pub print_unparsed: bool,
}

/// The pair of output sinks. Parsed lines go to `main` and raw lines to
/// `secondary`, or the other way round when `print_unparsed` is set.
pub struct LogWriters<'a> {
    main: Box<dyn Write + 'a>,
    secondary: Option<Box<dyn Write + 'a>>,
    print_unparsed: bool,
}

impl<'a> LogWriters<'a> {
    pub fn new(main: Box<dyn Write + 'a>, secondary: Option<Box<dyn Write + 'a>>, print_unparsed: bool) -> Self {
        Self {
            main,
            secondary,
            print_unparsed,
        }
    }

    /// Creates (truncating) `path` and uses it as the secondary sink.
    pub fn with_secondary_log_file(main: Box<dyn Write + 'a>, path: &Path, print_unparsed: bool) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Can't open specified secondary file ({})", path.display()))?;
        Ok(Self::new(main, Some(Box::new(BufWriter::new(file))), print_unparsed))
    }

    fn write_raw(&mut self, line: &str) -> io::Result<()> {
        if self.print_unparsed {
            write_line(Some(&mut self.main), line)
        } else {
            write_line(self.secondary.as_mut(), line)
        }
    }

    fn write_parsed(&mut self, line: &str) -> io::Result<()> {
        if self.print_unparsed {
            write_line(self.secondary.as_mut(), line)
        } else {
            write_line(Some(&mut self.main), line)
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.main.flush()?;
        if let Some(secondary) = self.secondary.as_mut() {
            secondary.flush()?;
        }
        Ok(())
    }
}

fn write_line(writer: Option<&mut Box<dyn Write + '_>>, line: &str) -> io::Result<()> {
    match writer {
        Some(w) => writeln!(w, "{}", line),
        None => Ok(()),
    }
}

/// Feeds every line of `input` through `pipeline`, writing each raw line
/// before its parsed counterpart. Lines are split on `\n`, a trailing `\r` is
/// removed and invalid UTF-8 is replaced.
pub fn process_input<R: BufRead>(mut input: R, pipeline: &mut Pipeline, writers: &mut LogWriters<'_>) -> Result<PipelineStats> {
    let mut buf = Vec::with_capacity(1024);
    loop {
        buf.clear();
        let read = input.read_until(b'\n', &mut buf).context("Failed to read input")?;
        if read == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        let line = String::from_utf8_lossy(&buf);

        writers.write_raw(&line).context("Failed to write unparsed line")?;
        if let Some(parsed) = pipeline.process_line(&line) {
            writers.write_parsed(&parsed).context("Failed to write parsed line")?;
        }
    }
    writers.flush().context("Failed to flush output")?;
    Ok(pipeline.stats())
}

/// The main operation runner for the unilog CLI.
pub fn run_process(opts: &ProcessOptions) -> Result<PipelineStats> {
    let config = ParserConfig::load_or_default(&opts.config_path)?;
    let compiled = config.compile().context("Invalid parser configuration")?;
    let mut pipeline = Pipeline::new(Arc::new(compiled));

    let stdout = io::stdout();
    let main: Box<dyn Write> = Box::new(stdout.lock());
    let mut writers = match &opts.secondary_log_file {
        Some(path) => {
            debug!("Using secondary log file {}", path.display());
            LogWriters::with_secondary_log_file(main, path, opts.print_unparsed)?
        }
        None => LogWriters::new(main, None, opts.print_unparsed),
    };

    let stats = match &opts.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open input file {}", path.display()))?;
            process_input(BufReader::new(file), &mut pipeline, &mut writers)?
        }
        None => process_input(io::stdin().lock(), &mut pipeline, &mut writers)?,
    };

    info!(
        "Processed {} lines: {} emitted, {} suppressed.",
        stats.lines_read, stats.lines_emitted, stats.lines_suppressed
    );
    let open = pipeline.open_blocks();
    if !open.is_empty() {
        info!("Input ended inside unterminated block(s): {}", open.join(", "));
    }
    Ok(stats)
}
