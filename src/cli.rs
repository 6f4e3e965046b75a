// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, bail};

use crate::config::consts::{DATASET_TITLE_MARKER, DEFAULT_OUT_DIR, FETCH_TIMEOUT_SECS};
use crate::config::options::{PageEncoding, RunOptions};
use crate::core::HttpFetcher;
use crate::error::Error;
use crate::progress::Progress;
use crate::runner;

/// Turn quiz pages into one slide deck per part plus a JSON summary.
#[derive(Parser, Debug)]
#[command(name = "quiz_deck", version, about)]
pub struct Args {
    /// Quiz pages to process. Defaults to the built-in list.
    pub urls: Vec<String>,

    /// Output directory for decks and summaries.
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    /// Character encoding of the pages (utf-8 | latin-1).
    #[arg(long, default_value = "utf-8")]
    pub encoding: PageEncoding,

    /// Substring of the embedded chart title that marks the quiz dataset.
    #[arg(long, default_value = DATASET_TITLE_MARKER)]
    pub marker: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn into_options(self) -> RunOptions {
        let mut opts = RunOptions::default();
        if !self.urls.is_empty() {
            opts.urls = self.urls;
        }
        opts.out_dir = self.out;
        opts.marker = self.marker;
        opts.fetch.encoding = self.encoding;
        opts.fetch.timeout = Duration::from_secs(self.timeout);
        opts
    }
}

/// Prints one line per page to stdout.
struct ConsoleProgress {
    total: usize,
    seen: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, url: &str, files: &[PathBuf]) {
        self.seen += 1;
        println!("[{}/{}] {url}", self.seen, self.total);
        for f in files {
            println!("    wrote {}", f.display());
        }
    }

    fn item_failed(&mut self, url: &str, err: &Error) {
        self.seen += 1;
        println!("[{}/{}] {url} FAILED: {err}", self.seen, self.total);
    }
}

pub fn run() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    crate::log::init(args.verbose);

    let opts = args.into_options();
    if opts.urls.is_empty() {
        bail!("No quiz pages given and the built-in list is empty");
    }
    logd!("Encoding {}, marker {:?}, out {}", opts.fetch.encoding.label(), opts.marker, opts.out_dir.display());

    let fetcher = HttpFetcher::new(&opts.fetch)?;
    let mut progress = ConsoleProgress { total: 0, seen: 0 };
    let summary = runner::run(&opts, &fetcher, Some(&mut progress))?;

    println!(
        "Done: {} page(s), {} file(s) written, {} failed",
        summary.pages_done,
        summary.files_written.len(),
        summary.pages_failed.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_run_options() {
        let args = Args::parse_from([
            "quiz_deck", "--encoding", "latin-1", "-o", "decks", "--timeout", "5", "http://a", "http://b",
        ]);
        let opts = args.into_options();
        assert_eq!(opts.urls, vec!["http://a", "http://b"]);
        assert_eq!(opts.out_dir, PathBuf::from("decks"));
        assert_eq!(opts.fetch.encoding, PageEncoding::Latin1);
        assert_eq!(opts.fetch.timeout, Duration::from_secs(5));
        assert_eq!(opts.marker, DATASET_TITLE_MARKER);
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        assert!(Args::try_parse_from(["quiz_deck", "--encoding", "ebcdic"]).is_err());
    }
}
