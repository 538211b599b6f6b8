//! One captured page through extract → generalize → (table) → cite.
//!
//! Every stage is pure. The site is chosen from the page url, and the
//! generalizer is chosen from the extracted record's own site tag, so a record
//! can never reach another site's generalizer.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::cite::{Citation, CitationInput, CitationType};
use crate::error::PipelineError;
use crate::model::GeneralizedData;
use crate::options::CitationOptions;
use crate::page::RawPageRecord;
use crate::sites::{self, IntermediateRecord, Site};
use crate::table::{build_table, HouseholdTable};

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub site: &'static str,
    pub intermediate: IntermediateRecord,
    pub generalized: GeneralizedData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<HouseholdTable>,
    pub citation: Citation,
}

pub fn site_for(page: &RawPageRecord) -> Result<&'static Site, PipelineError> {
    sites::for_url(&page.url).ok_or_else(|| PipelineError::UnrecognizedSite { url: page.url.clone() })
}

fn site_of(record: &IntermediateRecord) -> Result<&'static Site, PipelineError> {
    let id = record.site_id();
    sites::lookup(id).ok_or_else(|| PipelineError::UnknownSite(id.to_string()))
}

pub fn extract(page: &RawPageRecord) -> Result<IntermediateRecord, PipelineError> {
    let site = site_for(page)?;
    Ok((site.extract)(page)?)
}

pub fn generalize(record: &IntermediateRecord) -> Result<GeneralizedData, PipelineError> {
    let site = site_of(record)?;
    Ok((site.generalize)(record)?)
}

/// The household table for census-like records, `None` for other record types.
pub fn household_table(data: &GeneralizedData) -> Option<HouseholdTable> {
    data.record_type
        .is_household_type()
        .then(|| build_table(std::slice::from_ref(data), data.record_type))
}

pub fn cite(
    data: &GeneralizedData,
    options: &CitationOptions,
    table: Option<&HouseholdTable>,
    citation_type: CitationType,
) -> Result<Citation, PipelineError> {
    let site = sites::lookup(&data.site).ok_or_else(|| PipelineError::UnknownSite(data.site.clone()))?;
    let input = CitationInput {
        data,
        options,
        table,
        citation_type,
    };
    Ok((site.build_citation)(&input))
}

pub fn run(
    page: &RawPageRecord,
    options: &CitationOptions,
    citation_type: CitationType,
) -> Result<PipelineOutput, PipelineError> {
    let site = site_for(page)?;
    let intermediate = (site.extract)(page)?;
    let generalized = (site_of(&intermediate)?.generalize)(&intermediate)?;
    let table = household_table(&generalized);
    let citation = cite(&generalized, options, table.as_ref(), citation_type)?;
    debug!(site = site.id, url = %page.url, record_type = %generalized.record_type, "page cited");
    Ok(PipelineOutput {
        site: site.id,
        intermediate,
        generalized,
        table,
        citation,
    })
}

/// Validate `overrides` and then run the page. Invalid options fail before any
/// stage runs.
pub fn run_with_overrides<K, V>(
    page: &RawPageRecord,
    overrides: impl IntoIterator<Item = (K, V)>,
    citation_type: CitationType,
) -> Result<PipelineOutput, PipelineError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let options = CitationOptions::resolve(overrides)?;
    run(page, &options, citation_type)
}

/// Run independent pages in parallel. Results come back in input order.
pub fn run_batch(
    pages: &[RawPageRecord],
    options: &CitationOptions,
    citation_type: CitationType,
) -> Vec<Result<PipelineOutput, PipelineError>> {
    pages.par_iter().map(|page| run(page, options, citation_type)).collect()
}
