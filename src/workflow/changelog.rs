use crate::context::AppContext;
use crate::domain::metadata::CommitMetadata;
use crate::domain::report::{ChangeEntry, SectionMap};
use crate::error::{AppError, AppResult};
use crate::workflow::history::{ExclusionSet, collect_candidates};

const RANGE_SEPARATOR: &str = "..";

/// `<from>..<to>` revision pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    pub from: String,
    pub to: String,
}

impl RevisionRange {
    pub fn parse(expression: &str) -> AppResult<Self> {
        let (from, to) = expression.split_once(RANGE_SEPARATOR).ok_or_else(|| {
            AppError::Revision(format!(
                "'{expression}' is not a revision range, expected <from>..<to>"
            ))
        })?;
        if from.is_empty() || to.is_empty() {
            return Err(AppError::Revision(format!(
                "'{expression}' must name both ends of the range"
            )));
        }
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ChangelogRequest {
    pub title: String,
    pub range: RevisionRange,
}

/// Renders the Markdown changelog for merges in `to` that `from` lacks.
///
/// Nothing is returned unless both history walks complete.
pub fn generate_changelog(ctx: &AppContext, request: &ChangelogRequest) -> AppResult<String> {
    let source = ctx.commit_source.as_ref();
    let from = source.resolve(&request.range.from)?;
    let to = source.resolve(&request.range.to)?;

    tracing::info!("git log {from}");
    let exclusions = ExclusionSet::build(source, &from)?;
    tracing::info!(signatures = exclusions.len(), "indexed released history");

    tracing::info!("git log {to}");
    let candidates = collect_candidates(source, &to, &exclusions)?;
    tracing::info!(candidates = candidates.len(), "collected unreleased merges");

    let classifier = ctx.config.classifier();
    let registry = ctx.config.registry();
    let mut sections = SectionMap::new();
    for (hash, commit) in candidates {
        let metadata = CommitMetadata::extract(&commit.message);
        let component = metadata.component.clone();
        match ChangeEntry::build(metadata, &classifier, &registry) {
            Some(entry) => {
                tracing::debug!(
                    commit = %hash,
                    pr = ?entry.pr_number,
                    component = %entry.component,
                    marker = %entry.marker,
                    section = %entry.section,
                    title = %entry.title,
                    "classified change"
                );
                sections.insert(entry);
            }
            None => {
                tracing::debug!(commit = %hash, component = %component, "unregistered component");
            }
        }
    }

    if sections.is_empty() {
        tracing::warn!(
            from = %request.range.from,
            to = %request.range.to,
            "no reportable changes in range"
        );
    } else {
        tracing::info!(entries = sections.len(), "rendering changelog");
    }
    Ok(sections.render(&ctx.config.deprecation_notice, &request.title))
}
