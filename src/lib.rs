//! Genealogy record sourcing: captured record pages from FindMyPast, WikiTree
//! and Newspapers.com go through extract → generalize → (household table) →
//! cite, producing WikiTree-style citations and narrative sentences.

pub mod cite;
pub mod error;
pub mod model;
pub mod options;
pub mod page;
pub mod parser;
pub mod pipeline;
pub mod regression;
pub mod settings;
pub mod sites;
pub mod table;
pub mod text;

pub use cite::{Citation, CitationType};
pub use error::{ExtractFailure, GeneralizeFailure, OptionValidationFailure, PipelineError, TableBuildAmbiguity};
pub use model::GeneralizedData;
pub use options::CitationOptions;
pub use page::RawPageRecord;
pub use sites::IntermediateRecord;
