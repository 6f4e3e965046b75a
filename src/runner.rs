// src/runner.rs
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{
    classify::sort_quiz,
    config::options::RunOptions,
    core::{Fetch, sanitize::sanitize_file_stem},
    deck::{PptxDeck, SlideGraph, render, Deck},
    error::{Error, Result},
    file::{deck_path, ensure_directory, resolve_stem, summary_path},
    progress::Progress,
    specs::quiz::{page_meta, parse_page},
    summary::Summary,
};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub pages_done: usize,
    /// `(url, reason)` for every abandoned page.
    pub pages_failed: Vec<(String, String)>,
}

/// What one page yielded.
#[derive(Debug)]
pub struct PageOutput {
    pub decks: Vec<PathBuf>,
    pub summary: PathBuf,
    pub records: usize,
    pub discards: usize,
}

impl PageOutput {
    pub fn files(&self) -> Vec<PathBuf> {
        let mut all = self.decks.clone();
        all.push(self.summary.clone());
        all
    }
}

/// Process every configured page in order. A page that fails is reported and
/// skipped; only internal-consistency errors stop the run.
pub fn run(
    opts: &RunOptions,
    fetcher: &dyn Fetch,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if opts.urls.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.log("No pages to process.");
        }
        return Ok(summary);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(opts.urls.len());
    }

    let mut seen: HashMap<String, usize> = HashMap::new();

    for url in &opts.urls {
        logf!("Processing {url}");
        match process_page(url, opts, fetcher, &mut seen) {
            Ok(out) => {
                let files = out.files();
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(url, &files);
                }
                summary.files_written.extend(files);
                summary.pages_done += 1;
            }
            Err(e) if e.is_fatal() => {
                loge!("{url}: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(url, &e);
                    p.finish();
                }
                return Err(e);
            }
            Err(e) => {
                loge!("{url}: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(url, &e);
                }
                summary.pages_failed.push((url.clone(), e.to_string()));
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(summary)
}

/// Fetch, decode once with the configured encoding, then build outputs.
pub fn process_page(
    url: &str,
    opts: &RunOptions,
    fetcher: &dyn Fetch,
    seen: &mut HashMap<String, usize>,
) -> Result<PageOutput> {
    let bytes = fetcher.fetch(url)?;
    let html_doc = opts.fetch.encoding.decode(&bytes);
    build_outputs(&html_doc, &opts.marker, &opts.out_dir, seen)
}

/// Everything after the fetch: extract, sort, one deck per part, one summary.
/// Metadata is checked before anything is written, so a bad title leaves no files.
pub fn build_outputs(
    html_doc: &str,
    marker: &str,
    out_dir: &Path,
    seen: &mut HashMap<String, usize>,
) -> Result<PageOutput> {
    let mut quiz = parse_page(html_doc, marker)?;
    let meta = page_meta(&quiz.page_title)?;
    sort_quiz(&mut quiz);

    logf!(
        "{:?}: season {} week {}, {} parts, {} records, {} dropped",
        quiz.page_title,
        meta.season,
        meta.week,
        quiz.parts.len(),
        quiz.record_count(),
        quiz.discard_count()
    );

    // Build every graph first: an ordering defect must not leave half a page on disk.
    let mut graphs = Vec::with_capacity(quiz.parts.len());
    for part in &quiz.parts {
        let identifier = format!("{} - Parte {}", quiz.page_title, part.sequence);
        graphs.push((part.sequence, SlideGraph::build(&identifier, &part.records)?));
    }

    ensure_directory(out_dir)?;
    let stem = resolve_stem(&sanitize_file_stem(&quiz.page_title, "quiz"), seen);

    let mut decks = Vec::with_capacity(graphs.len());
    for (sequence, graph) in &graphs {
        let mut deck = PptxDeck::new();
        render(graph, &mut deck)?;
        let path = deck_path(out_dir, &stem, *sequence);
        deck.save(&path)?;
        logd!("Wrote {} ({} slides)", path.display(), deck.slide_count());
        decks.push(path);
    }

    let summary = summary_path(out_dir, &stem);
    Summary::build(meta, &quiz).write(&summary)?;
    logd!("Wrote {}", summary.display());

    Ok(PageOutput {
        decks,
        summary,
        records: quiz.record_count(),
        discards: quiz.discard_count(),
    })
}

/// Fails every page whose URL has no canned body.
#[cfg(test)]
pub(crate) struct CannedFetch(pub HashMap<String, Vec<u8>>);

#[cfg(test)]
impl Fetch for CannedFetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Status { url: s!(url), status: 404 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;

    fn page(title: &str, rows: &[&str]) -> String {
        let texts = rows
            .iter()
            .map(|r| serde_json::to_string(r).unwrap())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            r#"<html><head><title>{title}</title></head><body><div class="level3"><script type="application/json">{{"x":{{"layout":{{"title":{{"text":"QNpt"}}}},"data":[{{"text":[{texts}]}}]}}}}</script></div></body></html>"#
        )
    }

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("quiz_deck_runner_{name}"));
        let _ = std::fs::remove_dir_all(&p);
        p
    }

    const ROW: &str = "<b>Ana</b><br>Golos (xT = 0.1, xP = 2)<br><i>Q</i><br><b>Resposta</b> <i>R</i><br><b>2</b>";

    #[test]
    fn bad_title_writes_nothing() {
        let dir = tmp_dir("bad_title");
        let mut seen = HashMap::new();
        let err = build_outputs(&page("Sem números", &[ROW]), "QNpt", &dir, &mut seen).unwrap_err();
        assert!(matches!(err, Error::Metadata { .. }));
        assert!(!dir.exists());
    }

    #[test]
    fn failed_fetch_does_not_stop_the_run() {
        let dir = tmp_dir("continue");
        let mut pages = HashMap::new();
        pages.insert(s!("good"), page("QNpt Season 3 Week 4", &[ROW]).into_bytes());
        let opts = RunOptions {
            urls: vec![s!("missing"), s!("good")],
            out_dir: dir.clone(),
            ..RunOptions::default()
        };
        let mut progress = NullProgress;
        let summary = run(&opts, &CannedFetch(pages), Some(&mut progress)).unwrap();
        assert_eq!(summary.pages_done, 1);
        assert_eq!(summary.pages_failed.len(), 1);
        assert_eq!(summary.pages_failed[0].0, "missing");
        assert_eq!(summary.files_written.len(), 2);
        assert!(dir.join("QNpt Season 3 Week 4 - Parte 1.pptx").is_file());
        assert!(dir.join("QNpt Season 3 Week 4.json").is_file());
    }
}
