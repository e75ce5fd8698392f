//! Domain models: typed records per query and the per-request reports.

mod expert;
mod field;
mod matching;
mod narrative;
mod overview;
mod person;
mod report;
mod source;

pub use expert::{merge_experts, ExpertCandidate, ResearchExpert, ThesisExpert};
pub use field::{FieldResearcher, FieldTrends, YearlyActivity};
pub use matching::ResearcherMatch;
pub use narrative::Narrative;
pub use overview::{DatabaseStats, LabelCount, OrcidCoverage, RelationshipTypeCount};
pub use person::{Affiliation, ResearcherProfile, ThesisActivity};
pub(crate) use person::{real_orcid, ORCID_NOT_FOUND};
pub use report::{DatabaseOverview, ExpertSearch, FieldBrief, PersonLookup, ResearcherMatches};
pub use source::{DataSource, SourceReport, SourceStatus};
