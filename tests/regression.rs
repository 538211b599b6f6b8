use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use record_sourcer::regression::{self, CaseOutcome, ReferenceMode, StageReport, TestContext};
use record_sourcer::sites::{lookup, SITES};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// Copy the case lists and snapshots, leaving the committed references behind.
fn copy_without_refs(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            if entry.file_name() != "ref" {
                copy_without_refs(&entry.path(), &target);
            }
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn strict() -> (tempfile::TempDir, TestContext) {
    let results = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(fixtures_dir(), results.path(), ReferenceMode::Strict);
    (results, ctx)
}

fn run(ctx: &TestContext) -> Vec<StageReport> {
    SITES
        .iter()
        .flat_map(|site| regression::run_all(ctx, site).unwrap())
        .collect()
}

fn failures(reports: &[StageReport]) -> Vec<String> {
    reports
        .iter()
        .flat_map(|r| r.failures().into_iter().map(move |c| format!("{} {}: {:?}", r.site, c.name, c.outcome)))
        .collect()
}

#[test]
fn every_site_matches_committed_references() {
    let (_results, ctx) = strict();
    let reports = run(&ctx);
    assert_eq!(failures(&reports), Vec::<String>::new());
    assert_eq!(reports.iter().map(|r| r.recorded()).sum::<usize>(), 0);
    assert!(reports.iter().map(|r| r.passed()).sum::<usize>() > 0);
    for site in SITES {
        assert!(reports.iter().any(|r| r.site == site.id && r.passed() > 0), "nothing passed for {}", site.id);
    }
}

#[test]
fn failed_pages_keep_their_reason_and_later_stages_skip() {
    let (_results, ctx) = strict();
    let reports = regression::run_all(&ctx, lookup("np").unwrap()).unwrap();
    assert!(reports.iter().all(StageReport::is_ok));

    let refs = fixtures_dir().join("np/ref");
    let value = read_json(&refs.join("extract_data/search_results_not_an_article.json"));
    assert_eq!(
        value["extract_failure"]["reason"],
        "It looks like a Newspapers.com page but not an article page."
    );
    let value = read_json(&refs.join("generalize_data/clip_without_date.json"));
    assert_eq!(value["generalize_failure"]["site"], "np");

    let skipped: Vec<&str> = reports[2]
        .cases
        .iter()
        .filter(|c| matches!(c.outcome, CaseOutcome::Skipped(_)))
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(skipped, ["search_results_not_an_article", "clip_without_date"]);
    assert!(!refs.join("build_citation/clip_without_date_inline.json").exists());
}

#[test]
fn variant_runs_are_named_by_variant_and_type() {
    let (_results, ctx) = strict();
    let reports = regression::run_all(&ctx, lookup("fmp").unwrap()).unwrap();
    let names: Vec<&str> = reports[2].cases.iter().map(|c| c.name.as_str()).collect();
    for expected in [
        "england_census_1901_charles_pavey_son_inline",
        "england_census_1901_charles_pavey_son_narrative_2_narrative",
        "england_census_1901_charles_pavey_son_dataStyle_table_source",
        "england_census_1901_ralph_pavey_son_dataStyle_none_inline",
        "england_leics_marriage_1844_jane_cox_narrative_1_narrative",
        "us_census_1860_betsey_gardener_dataStyle_list_source",
    ] {
        assert!(names.contains(&expected), "missing run {}", expected);
        let reference = fixtures_dir().join("fmp/ref/build_citation").join(format!("{expected}.json"));
        assert!(reference.exists(), "no reference for {}", expected);
    }
    assert!(!names.contains(&"england_census_1901_charles_pavey_son_narrative_2_inline"));
    assert!(!names.contains(&"england_leics_marriage_1844_jane_cox_narrative_3_source"));
}

#[test]
fn committed_marriage_narratives_keep_age_punctuation() {
    let refs = fixtures_dir().join("fmp/ref/build_citation");
    let text = |run: &str| read_json(&refs.join(format!("{run}.json")))["text"].as_str().unwrap().to_string();

    let commas = text("england_leics_marriage_1844_jane_cox_narrative_1_narrative");
    assert!(commas.starts_with("Jane, age 21, married John Smith, age 24, on 3 June 1844 in Leicester St Margaret"), "{}", commas);
    let separate = text("england_leics_marriage_1844_jane_cox_narrative_3_narrative");
    assert!(separate.contains("Leicestershire, England. She was 21 years old.<ref>"), "{}", separate);
}

#[test]
fn recording_into_an_empty_tree_reproduces_the_committed_references() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = dir.path().join("fixtures");
    copy_without_refs(&fixtures_dir(), &fixtures);

    let ctx = TestContext::new(&fixtures, dir.path().join("results"), ReferenceMode::Record);
    let reports = run(&ctx);
    assert_eq!(failures(&reports), Vec::<String>::new());
    assert_eq!(reports.iter().map(|r| r.passed()).sum::<usize>(), 0);

    for report in &reports {
        for case in report.cases.iter().filter(|c| c.outcome == CaseOutcome::Recorded) {
            let path = Path::new(report.site).join("ref").join(report.stage.dir()).join(format!("{}.json", case.name));
            assert_eq!(read_json(&fixtures.join(&path)), read_json(&fixtures_dir().join(&path)), "{}", path.display());
        }
    }
}
