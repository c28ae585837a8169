// tests/pipeline_e2e.rs
//
// Full runs against canned pages: no network, output into temp dirs.
//
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use wordle_data::artifacts::{
    ALLOWED_JSON, ALLOWED_NOT_USED_JSON, CHECKSUMS_TXT, USED_JSON, WORDS_CSV, WordList, sha256_digest,
};
use wordle_data::config::options::{RunOptions, UsedSource};
use wordle_data::csv::parse_rows;
use wordle_data::error::{FetchError, PipelineError};
use wordle_data::progress::Progress;
use wordle_data::reconcile::Strategy;
use wordle_data::{runner, verify};

const ALLOWED_URL: &str = "http://allowed/words";

struct Pages(HashMap<&'static str, String>);

impl Pages {
    fn fetcher(&self) -> impl Fn(&str) -> Result<String, FetchError> + '_ {
        move |url: &str| {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Status { url: url.to_string(), status: 404 })
        }
    }
}

fn techradar(words: &[&str]) -> String {
    let items: String = words.iter().map(|w| format!("<li><strong>{}</strong></li>", w.to_uppercase())).collect();
    format!("<html><body><h1>Past answers</h1><ul>{items}</ul></body></html>")
}

fn wordfinder(words: &[&str]) -> String {
    let rows: String = words.iter().map(|w| format!("<tr><td><a href=\"/w\">{w}</a></td></tr>")).collect();
    format!("<html><body><table>{rows}</table></body></html>")
}

fn options(root: &Path, min_confidence: usize) -> RunOptions {
    let mut opts = RunOptions::default();
    opts.sources.allowed_urls = vec!["http://down/words".into(), ALLOWED_URL.into()];
    opts.sources.used = vec![
        UsedSource::new("techradar", "http://tr/past"),
        UsedSource::new("wordfinder", "http://wf/archive"),
    ];
    opts.output.data_dir = root.join("data");
    opts.output.public_dir = Some(root.join("public"));
    opts.min_confidence = min_confidence;
    opts.date = NaiveDate::from_ymd_opt(2025, 10, 16);
    opts
}

fn sample_pages() -> Pages {
    let mut m = HashMap::new();
    m.insert(ALLOWED_URL, "abbey\ncrane\nslate\nzonal\ntrace\nmouse\n".to_string());
    // "pasts" appears on an answer page but is not an allowed guess
    m.insert("http://tr/past", techradar(&["crane", "slate", "trace", "pasts"]));
    m.insert("http://wf/archive", wordfinder(&["crane", "slate", "mouse"]));
    Pages(m)
}

fn read_list(dir: &Path, name: &str) -> WordList {
    serde_json::from_slice(&fs::read(dir.join(name)).unwrap()).unwrap()
}

#[test]
fn high_agreement_uses_intersection() {
    let tmp = tempfile::tempdir().unwrap();
    let pages = sample_pages();
    let fetch = pages.fetcher();

    let summary = runner::run(&options(tmp.path(), 2), &fetch, None).unwrap();

    assert_eq!(summary.strategy, Strategy::Intersection);
    let used = read_list(&tmp.path().join("data"), USED_JSON);
    assert_eq!(used.words, vec!["crane", "slate"]);
    assert_eq!(summary.counts.to_string(), "allowed=6 used=2 diff=4");
}

#[test]
fn low_agreement_uses_union_then_cross_filter() {
    let tmp = tempfile::tempdir().unwrap();
    let pages = sample_pages();
    let fetch = pages.fetcher();

    let summary = runner::run(&options(tmp.path(), 100), &fetch, None).unwrap();

    assert_eq!(summary.strategy, Strategy::Union);
    let data = tmp.path().join("data");
    let used = read_list(&data, USED_JSON);
    // union is crane, mouse, pasts, slate, trace; "pasts" is not an allowed guess
    assert_eq!(used.words, vec!["crane", "mouse", "slate", "trace"]);
}

#[test]
fn artifacts_satisfy_cross_dataset_invariants() {
    let tmp = tempfile::tempdir().unwrap();
    let pages = sample_pages();
    let fetch = pages.fetcher();
    runner::run(&options(tmp.path(), 100), &fetch, None).unwrap();

    let data = tmp.path().join("data");
    let allowed = read_list(&data, ALLOWED_JSON);
    let used = read_list(&data, USED_JSON);
    let not_used = read_list(&data, ALLOWED_NOT_USED_JSON);

    let a: BTreeSet<&String> = allowed.words.iter().collect();
    let u: BTreeSet<&String> = used.words.iter().collect();
    let n: BTreeSet<&String> = not_used.words.iter().collect();

    assert!(u.is_subset(&a));
    assert_eq!(n, a.difference(&u).copied().collect::<BTreeSet<_>>());
    assert!(n.is_disjoint(&u));

    let rows = parse_rows(&fs::read_to_string(data.join(WORDS_CSV)).unwrap());
    assert_eq!(rows[0], vec!["word", "is_used", "generated"]);
    let body = &rows[1..];
    assert_eq!(body.len(), a.union(&u).count());
    for row in body {
        assert_eq!(row[1] == "true", u.contains(&row[0]));
        assert_eq!(row[2], "2025-10-16");
    }

    verify::verify_dir(&data).unwrap();
}

#[test]
fn reruns_are_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let pages = sample_pages();
    let fetch = pages.fetcher();
    let opts = options(tmp.path(), 2);
    let data = tmp.path().join("data");

    let first = runner::run(&opts, &fetch, None).unwrap();
    let before: Vec<Vec<u8>> = [ALLOWED_JSON, USED_JSON, ALLOWED_NOT_USED_JSON, WORDS_CSV]
        .iter()
        .map(|n| fs::read(data.join(n)).unwrap())
        .collect();

    let second = runner::run(&opts, &fetch, None).unwrap();
    let after: Vec<Vec<u8>> = [ALLOWED_JSON, USED_JSON, ALLOWED_NOT_USED_JSON, WORDS_CSV]
        .iter()
        .map(|n| fs::read(data.join(n)).unwrap())
        .collect();

    assert_eq!(before, after);
    assert_eq!(first.digests, second.digests);
}

#[test]
fn json_subset_mirrored_byte_for_byte() {
    let tmp = tempfile::tempdir().unwrap();
    let pages = sample_pages();
    let fetch = pages.fetcher();
    let summary = runner::run(&options(tmp.path(), 2), &fetch, None).unwrap();

    let data = tmp.path().join("data");
    let public = tmp.path().join("public");
    assert_eq!(summary.files_mirrored.len(), 3);
    for name in [ALLOWED_JSON, USED_JSON, ALLOWED_NOT_USED_JSON] {
        assert_eq!(fs::read(data.join(name)).unwrap(), fs::read(public.join(name)).unwrap());
    }
    assert!(!public.join(WORDS_CSV).exists());
}

#[test]
fn checksum_manifest_matches_files() {
    let tmp = tempfile::tempdir().unwrap();
    let pages = sample_pages();
    let fetch = pages.fetcher();
    runner::run(&options(tmp.path(), 2), &fetch, None).unwrap();

    let data = tmp.path().join("data");
    let manifest = fs::read_to_string(data.join(CHECKSUMS_TXT)).unwrap();
    for line in manifest.lines() {
        let (digest, name) = line.split_once("  ").unwrap();
        assert_eq!(digest, sha256_digest(&fs::read(data.join(name)).unwrap()));
    }
}

#[test]
fn one_used_source_down_still_publishes() {
    let tmp = tempfile::tempdir().unwrap();
    let mut pages = sample_pages();
    pages.0.remove("http://wf/archive");
    let fetch = pages.fetcher();

    #[derive(Default)]
    struct Record { done: Vec<String>, failed: Vec<String> }
    impl Progress for Record {
        fn item_done(&mut self, name: &str, _words: usize) { self.done.push(name.into()); }
        fn item_failed(&mut self, name: &str, _reason: &str) { self.failed.push(name.into()); }
    }
    let mut rec = Record::default();

    let summary = runner::run(&options(tmp.path(), 100), &fetch, Some(&mut rec)).unwrap();

    assert_eq!(summary.strategy, Strategy::Single);
    assert_eq!(summary.sources_failed, 1);
    assert_eq!(rec.done, vec!["techradar"]);
    assert_eq!(rec.failed, vec!["wordfinder"]);
    let used = read_list(&tmp.path().join("data"), USED_JSON);
    assert_eq!(used.words, vec!["crane", "slate", "trace"]);
}

#[test]
fn all_used_sources_down_is_fatal_and_keeps_old_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join(USED_JSON), "previous").unwrap();

    let mut pages = sample_pages();
    pages.0.remove("http://wf/archive");
    pages.0.remove("http://tr/past");
    let fetch = pages.fetcher();

    let err = runner::run(&options(tmp.path(), 2), &fetch, None).unwrap_err();
    assert!(matches!(err, PipelineError::UsedUnavailable { .. }));
    assert!(err.is_fatal_acquisition());
    assert_eq!(fs::read_to_string(data.join(USED_JSON)).unwrap(), "previous");
    assert!(!data.join(ALLOWED_JSON).exists());
}

#[test]
fn allowed_list_unavailable_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let mut pages = sample_pages();
    pages.0.remove(ALLOWED_URL);
    let fetch = pages.fetcher();

    let err = runner::run(&options(tmp.path(), 2), &fetch, None).unwrap_err();
    assert!(matches!(err, PipelineError::AllowedUnavailable { attempts: 2, .. }));
    assert!(!tmp.path().join("data").exists());
}

#[test]
fn unusable_public_dir_leaves_data_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join(USED_JSON), "previous").unwrap();
    // a regular file where the mirror directory should be
    fs::write(tmp.path().join("public"), "").unwrap();

    let pages = sample_pages();
    let fetch = pages.fetcher();

    let err = runner::run(&options(tmp.path(), 2), &fetch, None).unwrap_err();
    assert!(matches!(err, PipelineError::Artifact(_)));
    assert_eq!(fs::read_to_string(data.join(USED_JSON)).unwrap(), "previous");
    assert!(!data.join(ALLOWED_JSON).exists());
    let staged = fs::read_dir(&data)
        .unwrap()
        .filter(|e| e.as_ref().unwrap().path().extension().is_some_and(|x| x == "tmp"))
        .count();
    assert_eq!(staged, 0);
}

#[test]
fn archive_with_line_breaks_and_unclosed_items() {
    let tmp = tempfile::tempdir().unwrap();
    let mut pages = sample_pages();
    pages.0.insert(
        "http://tr/past",
        "<html><body><h2>Answers</h2><p>CRANE<br>SLATE<br>TRACE</p><ul><li>crane<li>slate<li>mouse</ul></body></html>"
            .to_string(),
    );
    pages.0.insert(
        "http://wf/archive",
        "<table><tr><td>#1<td><b>crane</b><i>slate</i><tr><td>#2<td>trace</table>".to_string(),
    );
    let fetch = pages.fetcher();

    let summary = runner::run(&options(tmp.path(), 3), &fetch, None).unwrap();

    assert_eq!(summary.strategy, Strategy::Intersection);
    let used = read_list(&tmp.path().join("data"), USED_JSON);
    assert_eq!(used.words, vec!["crane", "slate", "trace"]);
}
