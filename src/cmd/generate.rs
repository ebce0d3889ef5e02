use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitRepository;
use crate::workflow::changelog::{ChangelogRequest, RevisionRange, generate_changelog};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Release title printed under the changelog header.
    pub title: String,
    /// Revision range as <from>..<to>, e.g. v18.02.0-ce..HEAD.
    pub range: String,
    /// Path inside the repository to read history from.
    #[arg(short, long, default_value = ".")]
    pub repo: PathBuf,
}

pub fn run(args: GenerateArgs, config: AppConfig) -> AppResult<String> {
    let range = RevisionRange::parse(&args.range)?;
    let repository = GitRepository::discover(&args.repo)?;
    let context = AppContext::new(config, Arc::new(repository));

    let request = ChangelogRequest {
        title: args.title,
        range,
    };
    generate_changelog(&context, &request)
}
