//! The lint orchestrator.

use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use poulint_ast::{ParseOutcome, Summary, SummaryUnit};
use poulint_cache::{ParseCache, SourceFile};
use poulint_parser::SourceParser;
use poulint_registry::{CheckRegistry, LintIssue, Settings};

use crate::{FileSelector, LintConfig, LintError, RunReport};

/// Reserved issue code for files that failed to parse or to read.
///
/// Not a registered check; builtin and plugin checks must not claim it.
pub const SYNTAX_FAILURE_CODE: &str = "P001";

/// Per-file result of the parallel parse phase.
enum FileResult {
    Parsed {
        rel_path: PathBuf,
        outcome: Arc<ParseOutcome>,
        from_cache: bool,
    },
    Unreadable {
        rel_path: PathBuf,
        error: String,
    },
}

/// Drives one lint run: selection, cached parsing, aggregation, check
/// execution, and the exit-code decision.
///
/// Parsing is parallel per file (distinct files never share cache keys);
/// aggregation happens at a single point after all parses complete, and
/// `run_all` only reads the immutable summary and registry.
pub struct Orchestrator {
    config: LintConfig,
    registry: CheckRegistry,
    parser: Box<dyn SourceParser>,
    selector: FileSelector,
    cache: ParseCache,
}

impl Orchestrator {
    /// Builds an orchestrator from a validated configuration and a fully
    /// populated registry.
    pub fn new(
        config: LintConfig,
        registry: CheckRegistry,
        parser: Box<dyn SourceParser>,
    ) -> Result<Self, LintError> {
        let selector = FileSelector::new(&config.include, &config.exclude)?;
        let cache = ParseCache::new(&config.cache_dir, config.cache);

        Ok(Self {
            config,
            registry,
            parser,
            selector,
            cache,
        })
    }

    /// Runs the full pipeline.
    ///
    /// Per-file failures (unreadable or unparsable files) become synthetic
    /// [`SYNTAX_FAILURE_CODE`] issues and never stop the remaining files;
    /// only startup-class errors propagate.
    pub fn run(&self, settings: &Settings) -> Result<RunReport, LintError> {
        let root = &self.config.root_dir;
        let files = self.selector.select(root)?;
        info!("Linting {} source files", files.len());

        let results: Vec<FileResult> = files
            .par_iter()
            .map(|rel_path| match SourceFile::read(root, rel_path) {
                Ok(file) => {
                    let (outcome, from_cache) =
                        self.cache.get_or_parse(&file, self.parser.as_ref());
                    FileResult::Parsed {
                        rel_path: rel_path.clone(),
                        outcome,
                        from_cache,
                    }
                }
                Err(e) => FileResult::Unreadable {
                    rel_path: rel_path.clone(),
                    error: e.to_string(),
                },
            })
            .collect();

        // Single aggregation point after the parallel phase.
        let mut units = Vec::new();
        let mut issues = Vec::new();
        let mut cache_hits = 0;
        let mut parse_failures = 0;

        for result in results {
            match result {
                FileResult::Parsed {
                    rel_path,
                    outcome,
                    from_cache,
                } => {
                    if from_cache {
                        cache_hits += 1;
                    }
                    match &*outcome {
                        ParseOutcome::Parsed(unit) => units.push(SummaryUnit {
                            file: rel_path,
                            unit: unit.clone(),
                        }),
                        ParseOutcome::Failed(failure) => {
                            parse_failures += 1;
                            issues.push(
                                LintIssue::new(SYNTAX_FAILURE_CODE, failure.message.clone())
                                    .with_file(rel_path)
                                    .with_location(failure.location),
                            );
                        }
                    }
                }
                FileResult::Unreadable { rel_path, error } => {
                    parse_failures += 1;
                    issues.push(
                        LintIssue::new(
                            SYNTAX_FAILURE_CODE,
                            format!("failed to read file: {error}"),
                        )
                        .with_file(rel_path),
                    );
                }
            }
        }

        let summary = Summary::collect(units, self.config.squash);
        debug!("Aggregated {} units from {} files", summary.len(), files.len());

        issues.extend(self.registry.run_all(&summary, settings));

        Ok(RunReport {
            files_checked: files.len(),
            cache_hits,
            parse_failures,
            issues,
        })
    }
}
