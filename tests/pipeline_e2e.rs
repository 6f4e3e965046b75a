// tests/pipeline_e2e.rs
//
// Whole-page runs against the offline fixture, through a canned fetcher.
//
use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::PathBuf;

use serde_json::{Value, json};
use zip::ZipArchive;

use quiz_deck::Error;
use quiz_deck::classify::sort_quiz;
use quiz_deck::config::options::{PageEncoding, RunOptions};
use quiz_deck::core::Fetch;
use quiz_deck::model::DiscardReason;
use quiz_deck::progress::NullProgress;
use quiz_deck::runner;
use quiz_deck::specs::quiz::{page_meta, parse_page};

const FIXTURE: &str = include_str!("fixtures/quiz_page.html");
const STEM: &str = "QNpt Season 15 - Week 7";

struct Canned(HashMap<&'static str, Vec<u8>>);

impl Fetch for Canned {
    fn fetch(&self, url: &str) -> quiz_deck::Result<Vec<u8>> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Status { url: url.to_string(), status: 503 })
    }
}

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("quiz_deck_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    p
}

fn slide_xml(deck: &PathBuf, n: usize) -> String {
    let bytes = fs::read(deck).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(&format!("ppt/slides/slide{n}.xml")).unwrap();
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}

fn slide_count(deck: &PathBuf) -> usize {
    let bytes = fs::read(deck).unwrap();
    let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive
        .file_names()
        .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
        .count()
}

#[test]
fn fixture_extracts_parts_records_and_discards() {
    let mut quiz = parse_page(FIXTURE, "QNpt").unwrap();
    assert!(quiz.dataset_matched);
    assert_eq!(quiz.page_title, STEM);
    assert_eq!(quiz.parts.len(), 2);

    let first = &quiz.parts[0];
    assert_eq!(first.records.len(), 4);
    assert_eq!(first.discards.len(), 2);
    assert_eq!(first.discards[0].index, 4);
    assert_eq!(first.discards[0].reason, DiscardReason::TooFewSegments);
    assert_eq!(first.discards[1].reason, DiscardReason::BadMetric("0.1.2".to_string()));

    // the chart entry without text does not take a sequence number
    assert_eq!(quiz.parts[1].sequence, 2);
    assert_eq!(quiz.parts[1].records.len(), 2);

    sort_quiz(&mut quiz);
    let themes: Vec<&str> = quiz.parts[0].records.iter().map(|r| r.theme.as_str()).collect();
    assert_eq!(themes, vec!["Alcunhas", "Carreira", "Carreira", "Mystery Box 1"]);
    assert_eq!(quiz.parts[0].records[1].question, "Em que ano se estreou?");
    assert_eq!(quiz.parts[0].records[0].question, "Quem era o \"Maestro\"?");
    assert_eq!(quiz.parts[0].records[0].answer, "Rui Costa & mais ninguém");
}

#[test]
fn latin1_page_decodes_to_the_same_quiz() {
    let latin1: Vec<u8> = FIXTURE.chars().map(|c| c as u32 as u8).collect();
    let decoded = PageEncoding::Latin1.decode(&latin1);
    assert_eq!(parse_page(&decoded, "QNpt").unwrap(), parse_page(FIXTURE, "QNpt").unwrap());
}

#[test]
fn metadata_comes_from_the_compacted_title() {
    let quiz = parse_page(FIXTURE, "QNpt").unwrap();
    let meta = page_meta(&quiz.page_title).unwrap();
    assert_eq!((meta.season, meta.week), (15, 7));
}

#[test]
fn run_writes_one_deck_per_part_and_a_summary() {
    let dir = tmp_dir("full");
    let fetcher = Canned(HashMap::from([("https://quiz/15/7", FIXTURE.as_bytes().to_vec())]));
    let opts = RunOptions {
        urls: vec!["https://quiz/15/7".to_string()],
        out_dir: dir.clone(),
        ..RunOptions::default()
    };

    let mut progress = NullProgress;
    let summary = runner::run(&opts, &fetcher, Some(&mut progress)).unwrap();
    assert_eq!(summary.pages_done, 1);
    assert!(summary.pages_failed.is_empty());
    assert_eq!(summary.files_written.len(), 3);

    let deck1 = dir.join(format!("{STEM} - Parte 1.pptx"));
    let deck2 = dir.join(format!("{STEM} - Parte 2.pptx"));
    assert_eq!(slide_count(&deck1), 2 * 4 + 1);
    assert_eq!(slide_count(&deck2), 2 * 2 + 1);

    // Index: Alcunhas → slide 1, Carreira → slide 3 (first occurrence), Mystery Box 1 → slide 7
    let index = slide_xml(&deck1, 1);
    assert!(index.contains(&format!("{STEM} - Parte 1")));
    assert_eq!(index.matches("ppaction://hlinksldjump").count(), 3);

    // answer slide of the first Carreira record carries the xP footer
    let answer = slide_xml(&deck1, 5);
    assert!(answer.contains("1991"));
    assert!(answer.contains("xP: 1.5"));
    assert!(answer.contains("actionButtonHome"));
    assert!(answer.contains("actionButtonBackPrevious"));

    let text = fs::read_to_string(dir.join(format!("{STEM}.json"))).unwrap();
    let v: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["season"], 15);
    assert_eq!(v["week"], 7);
    assert_eq!(v["parts"][0]["themes"], json!(["Alcunhas", "Carreira"]));
    assert_eq!(v["parts"][0]["questions"].as_array().unwrap().len(), 4);
    assert_eq!(v["parts"][1]["sequence"], 2);
    assert_eq!(v["parts"][1]["themes"], json!(["Transferências"]));
    assert_eq!(v["parts"][1]["questions"][1]["player"], Value::Null);
    assert_eq!(v["parts"][1]["questions"][1]["guessed"], false);
    assert_eq!(v["parts"][1]["questions"][0]["guessed"], true);
}

#[test]
fn failing_pages_are_reported_and_skipped() {
    let dir = tmp_dir("partial");
    let no_dataset = "<html><head><title>QNpt Season 1 Week 1</title></head><body></body></html>";
    let bad_title = FIXTURE.replace("Season 15 - Liga (I)+ - Week 7", "Semana sem número");
    let fetcher = Canned(HashMap::from([
        ("empty", no_dataset.as_bytes().to_vec()),
        ("untitled", bad_title.into_bytes()),
        ("good", FIXTURE.as_bytes().to_vec()),
    ]));
    let opts = RunOptions {
        urls: ["down", "empty", "untitled", "good"].map(String::from).to_vec(),
        out_dir: dir.clone(),
        ..RunOptions::default()
    };

    let summary = runner::run(&opts, &fetcher, None).unwrap();
    assert_eq!(summary.pages_done, 1);
    let failed: Vec<&str> = summary.pages_failed.iter().map(|(u, _)| u.as_str()).collect();
    assert_eq!(failed, vec!["down", "empty", "untitled"]);
    assert!(dir.join(format!("{STEM}.json")).is_file());
}

#[test]
fn same_title_twice_does_not_overwrite() {
    let dir = tmp_dir("dupes");
    let fetcher = Canned(HashMap::from([
        ("a", FIXTURE.as_bytes().to_vec()),
        ("b", FIXTURE.as_bytes().to_vec()),
    ]));
    let opts = RunOptions {
        urls: vec!["a".to_string(), "b".to_string()],
        out_dir: dir.clone(),
        ..RunOptions::default()
    };
    runner::run(&opts, &fetcher, None).unwrap();
    assert!(dir.join(format!("{STEM}.json")).is_file());
    assert!(dir.join(format!("{STEM} (2).json")).is_file());
    assert!(dir.join(format!("{STEM} (2) - Parte 2.pptx")).is_file());
}
