//! Golden-file regression harness.
//!
//! Each site keeps a literal case list and captured page snapshots under
//! `<fixtures>/<site>/`. The runners replay every case through one pipeline
//! stage, write the result to `<results>/<site>/<stage>/<name>.json` and compare
//! it as a JSON value with the stored reference under `<fixtures>/<site>/ref/`.

mod stages;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::cite::CitationType;
use crate::model::RecordType;
use crate::page::RawPageRecord;
use crate::sites::Site;

pub use stages::{run_all, run_build_citation_tests, run_extract_data_tests, run_generalize_data_tests};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionVariant {
    pub variant_name: String,
    /// Restricts the variant to one citation type (`narrative`) or record type (`census`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub this_type_only: Option<String>,
    #[serde(default)]
    pub option_overrides: BTreeMap<String, String>,
}

impl OptionVariant {
    fn applies_to(&self, citation_type: CitationType, record_type: RecordType) -> bool {
        match &self.this_type_only {
            Some(only) => only == citation_type.as_str() || only == record_type.as_str(),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionCase {
    pub case_name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub option_variants: Vec<OptionVariant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceMode {
    /// A missing reference is written from the current result.
    Record,
    /// A missing reference is a failure.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ExtractData,
    GeneralizeData,
    BuildCitation,
}

impl Stage {
    pub fn dir(self) -> &'static str {
        match self {
            Self::ExtractData => "extract_data",
            Self::GeneralizeData => "generalize_data",
            Self::BuildCitation => "build_citation",
        }
    }
}

pub struct TestContext {
    pub fixtures_dir: PathBuf,
    pub results_dir: PathBuf,
    pub mode: ReferenceMode,
    pub progress: Option<ProgressBar>,
}

impl TestContext {
    pub fn new(fixtures_dir: impl Into<PathBuf>, results_dir: impl Into<PathBuf>, mode: ReferenceMode) -> Self {
        Self {
            fixtures_dir: fixtures_dir.into(),
            results_dir: results_dir.into(),
            mode,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    fn advance(&self, n: usize) {
        if let Some(pb) = &self.progress {
            pb.inc(n as u64);
        }
    }

    fn result_path(&self, site: &Site, stage: Stage, name: &str) -> PathBuf {
        self.results_dir.join(site.id).join(stage.dir()).join(format!("{name}.json"))
    }

    fn reference_path(&self, site: &Site, stage: Stage, name: &str) -> PathBuf {
        self.fixtures_dir
            .join(site.id)
            .join("ref")
            .join(stage.dir())
            .join(format!("{name}.json"))
    }

    /// Store `value` as a result and compare it with its reference.
    fn check(&self, site: &Site, stage: Stage, name: &str, value: &Value) -> Result<CaseOutcome> {
        write_json(&self.result_path(site, stage, name), value)?;
        let reference = self.reference_path(site, stage, name);
        if reference.exists() {
            let expected = read_json(&reference)?;
            return Ok(if &expected == value {
                CaseOutcome::Passed
            } else {
                CaseOutcome::Failed(format!("result differs from {}", reference.display()))
            });
        }
        match self.mode {
            ReferenceMode::Record => {
                write_json(&reference, value)?;
                Ok(CaseOutcome::Recorded)
            }
            ReferenceMode::Strict => Ok(CaseOutcome::Failed(format!("no reference at {}", reference.display()))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    Recorded,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub name: String,
    pub outcome: CaseOutcome,
}

#[derive(Debug, Clone)]
pub struct StageReport {
    pub site: &'static str,
    pub stage: Stage,
    pub cases: Vec<CaseReport>,
}

impl StageReport {
    fn count(&self, pred: impl Fn(&CaseOutcome) -> bool) -> usize {
        self.cases.iter().filter(|c| pred(&c.outcome)).count()
    }

    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Passed))
    }

    pub fn recorded(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Recorded))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Skipped(_)))
    }

    pub fn failures(&self) -> Vec<&CaseReport> {
        self.cases
            .iter()
            .filter(|c| matches!(c.outcome, CaseOutcome::Failed(_)))
            .collect_vec()
    }

    pub fn is_ok(&self) -> bool {
        self.failures().is_empty()
    }

    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} {}: {} passed, {} recorded, {} skipped, {} failed",
            self.site,
            self.stage.dir(),
            self.passed(),
            self.recorded(),
            self.skipped(),
            self.failures().len()
        );
        if !self.is_ok() {
            line.push_str(&format!(" ({})", self.failures().iter().map(|c| &c.name).join(", ")));
        }
        line
    }
}

/// The case list and variants of one site.
pub struct SiteFixtures {
    pub site: &'static Site,
    pub cases: Vec<RegressionCase>,
    /// Variants applied to every case, after the case's own.
    pub variants: Vec<OptionVariant>,
}

impl SiteFixtures {
    pub fn load(ctx: &TestContext, site: &'static Site) -> Result<Self> {
        let dir = ctx.fixtures_dir.join(site.id);
        let cases: Vec<RegressionCase> = serde_json::from_value(read_json(&dir.join("regression.json"))?)
            .with_context(|| format!("case list for {}", site.id))?;
        let variants_path = dir.join("option_variants.json");
        let variants = if variants_path.exists() {
            serde_json::from_value(read_json(&variants_path)?)
                .with_context(|| format!("option variants for {}", site.id))?
        } else {
            Vec::new()
        };
        Ok(Self { site, cases, variants })
    }

    pub fn page(&self, ctx: &TestContext, case: &RegressionCase) -> Result<RawPageRecord> {
        let path = ctx
            .fixtures_dir
            .join(self.site.id)
            .join("pages")
            .join(format!("{}.md", case.case_name));
        let page = RawPageRecord::load(&path).with_context(|| format!("loading snapshot {}", path.display()))?;
        if page.url != case.url {
            warn!(case = %case.case_name, snapshot = %page.url, listed = %case.url, "snapshot url differs from case list");
        }
        Ok(page)
    }

    /// Named citation runs for `case`: every citation type with default options,
    /// then each applicable variant.
    pub fn citation_runs(
        &self,
        case: &RegressionCase,
        record_type: RecordType,
    ) -> Vec<(String, CitationType, BTreeMap<String, String>)> {
        let mut runs = CitationType::ALL
            .iter()
            .map(|t| (format!("{}_{}", case.case_name, t), *t, BTreeMap::new()))
            .collect_vec();
        for variant in case.option_variants.iter().chain(&self.variants) {
            for t in CitationType::ALL.iter().filter(|t| variant.applies_to(**t, record_type)) {
                runs.push((
                    format!("{}_{}_{}", case.case_name, variant.variant_name, t),
                    *t,
                    variant.option_overrides.clone(),
                ));
            }
        }
        runs
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text + "\n").with_context(|| format!("writing {}", path.display()))
}
