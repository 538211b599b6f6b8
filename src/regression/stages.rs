use anyhow::Result;
use rayon::prelude::*;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::cite::CitationInput;
use crate::model::GeneralizedData;
use crate::options::CitationOptions;
use crate::pipeline::household_table;
use crate::sites::{IntermediateRecord, Site};

use super::{CaseOutcome, CaseReport, RegressionCase, SiteFixtures, Stage, StageReport, TestContext};

const CHUNK: usize = 64;

/// Run `per_case` over every case in parallel chunks, keeping case order.
fn run_cases<F>(ctx: &TestContext, fixtures: &SiteFixtures, stage: Stage, per_case: F) -> Result<StageReport>
where
    F: Fn(&RegressionCase) -> Result<Vec<CaseReport>> + Sync,
{
    let mut cases = Vec::new();
    for chunk in fixtures.cases.chunks(CHUNK) {
        let results: Vec<Result<Vec<CaseReport>>> = chunk.par_iter().map(&per_case).collect();
        for result in results {
            cases.extend(result?);
        }
        ctx.advance(chunk.len());
    }
    let report = StageReport {
        site: fixtures.site.id,
        stage,
        cases,
    };
    info!(site = report.site, stage = stage.dir(), passed = report.passed(), failed = report.failures().len(), "stage done");
    Ok(report)
}

fn report(name: &str, outcome: CaseOutcome) -> Vec<CaseReport> {
    vec![CaseReport {
        name: name.to_string(),
        outcome,
    }]
}

fn extracted(ctx: &TestContext, fixtures: &SiteFixtures, case: &RegressionCase) -> Result<Result<IntermediateRecord, Value>> {
    let page = fixtures.page(ctx, case)?;
    Ok((fixtures.site.extract)(&page).map_err(|f| json!({ "extract_failure": f })))
}

fn generalized(ctx: &TestContext, fixtures: &SiteFixtures, case: &RegressionCase) -> Result<Option<GeneralizedData>> {
    let Ok(record) = extracted(ctx, fixtures, case)? else {
        return Ok(None);
    };
    Ok((fixtures.site.generalize)(&record).ok())
}

pub fn run_extract_data_tests(ctx: &TestContext, fixtures: &SiteFixtures) -> Result<StageReport> {
    run_cases(ctx, fixtures, Stage::ExtractData, |case| {
        let value = match extracted(ctx, fixtures, case)? {
            Ok(record) => serde_json::to_value(record)?,
            Err(failure) => failure,
        };
        let outcome = ctx.check(fixtures.site, Stage::ExtractData, &case.case_name, &value)?;
        Ok(report(&case.case_name, outcome))
    })
}

pub fn run_generalize_data_tests(ctx: &TestContext, fixtures: &SiteFixtures) -> Result<StageReport> {
    run_cases(ctx, fixtures, Stage::GeneralizeData, |case| {
        let record = match extracted(ctx, fixtures, case)? {
            Ok(record) => record,
            Err(_) => return Ok(report(&case.case_name, CaseOutcome::Skipped("extract failed".into()))),
        };
        let value = match (fixtures.site.generalize)(&record) {
            Ok(data) => serde_json::to_value(data)?,
            Err(failure) => json!({ "generalize_failure": failure }),
        };
        let outcome = ctx.check(fixtures.site, Stage::GeneralizeData, &case.case_name, &value)?;
        Ok(report(&case.case_name, outcome))
    })
}

pub fn run_build_citation_tests(ctx: &TestContext, fixtures: &SiteFixtures) -> Result<StageReport> {
    run_cases(ctx, fixtures, Stage::BuildCitation, |case| {
        let Some(data) = generalized(ctx, fixtures, case)? else {
            return Ok(report(&case.case_name, CaseOutcome::Skipped("no generalized data".into())));
        };
        let table = household_table(&data);

        let mut reports = Vec::new();
        for (name, citation_type, overrides) in fixtures.citation_runs(case, data.record_type) {
            let options = match CitationOptions::resolve(&overrides) {
                Ok(options) => options,
                Err(err) => {
                    reports.push(CaseReport {
                        name,
                        outcome: CaseOutcome::Failed(err.to_string()),
                    });
                    continue;
                }
            };
            let citation = (fixtures.site.build_citation)(&CitationInput {
                data: &data,
                options: &options,
                table: table.as_ref(),
                citation_type,
            });
            debug!(run = %name, "citation built");
            let outcome = ctx.check(fixtures.site, Stage::BuildCitation, &name, &serde_json::to_value(&citation)?)?;
            reports.push(CaseReport { name, outcome });
        }
        Ok(reports)
    })
}

/// All three stages for `site`.
pub fn run_all(ctx: &TestContext, site: &'static Site) -> Result<Vec<StageReport>> {
    let fixtures = SiteFixtures::load(ctx, site)?;
    Ok(vec![
        run_extract_data_tests(ctx, &fixtures)?,
        run_generalize_data_tests(ctx, &fixtures)?,
        run_build_citation_tests(ctx, &fixtures)?,
    ])
}
