use anyhow::Result;
use log::{error, info, debug};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::classification_service::ClassificationService;
use crate::classifier::{LanguageClassifier, WhatlangClassifier};
use crate::decision_engine::{Action, DecisionEngine};
use crate::file_utils::FileManager;
use crate::filename_tokenizer::{self, SUBTITLE_EXTENSION};
use crate::language_utils;

// @module: Application controller for the rename pipeline

/// Counters accumulated over one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Files renamed (or that would be renamed in a dry-run)
    pub renamed: usize,
    /// Files deleted (or that would be deleted in a dry-run)
    pub deleted: usize,
    /// Files already carrying their canonical name
    pub unchanged: usize,
    /// Files skipped with an informational reason
    pub skipped: usize,
    /// Files that failed to decode, parse or mutate
    pub failed: usize,
}

/// Main application controller for subtitle language detection
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Classification pipeline shared across the run
    classification: ClassificationService,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_classifier(config, Box::new(WhatlangClassifier::new()))
    }

    /// Create a controller around an explicit classifier backend
    pub fn with_classifier(
        config: Config,
        classifier: Box<dyn LanguageClassifier>,
    ) -> Result<Self> {
        Ok(Self {
            config,
            classification: ClassificationService::new(classifier),
        })
    }

    /// Process every given file or directory in order.
    ///
    /// Directories are walked recursively for subtitle files. Per-file
    /// failures are reported and counted; they never stop the run.
    pub fn run(&self, inputs: &[PathBuf]) -> Result<RunStats> {
        let mut stats = RunStats::default();

        for input in inputs {
            if FileManager::file_exists(input) {
                self.process_file(input, &mut stats);
            } else if FileManager::dir_exists(input) {
                match FileManager::find_files(input, SUBTITLE_EXTENSION) {
                    Ok(files) => {
                        for file in files {
                            self.process_file(&file, &mut stats);
                        }
                    }
                    Err(e) => {
                        error!("Failed to walk directory '{}': {}", input.display(), e);
                        stats.failed += 1;
                    }
                }
            } else {
                error!("Subtitle file/path '{}' doesn't exist", input.display());
                stats.failed += 1;
            }
        }

        if self.config.summary {
            self.log_summary(&stats);
        }

        Ok(stats)
    }

    /// Classify one file, decide its action, and apply or report it
    fn process_file(&self, path: &Path, stats: &mut RunStats) {
        debug!("Parsing '{}'", path.display());

        let action = match self.decide_action(path) {
            Ok(action) => action,
            Err(e) => {
                error!("{:#}", e);
                stats.failed += 1;
                return;
            }
        };

        if let Err(e) = self.apply_action(path, &action, stats) {
            error!("{:#}", e);
            stats.failed += 1;
        }
    }

    fn decide_action(&self, path: &Path) -> Result<Action> {
        let parsed = filename_tokenizer::parse_filename(path);

        if let Some(code) = &parsed.language_code {
            let name = language_utils::get_language_name(code).unwrap_or_else(|_| code.clone());
            let mut message = format!("Filename identified as: {}", name);
            if let Some(marker) = parsed.special {
                message.push_str(&format!(" ({})", marker.as_token()));
            }
            if parsed.forced {
                message.push_str(" (Forced)");
            }
            debug!("{}", message);
        }

        let outcome = self.classification.classify_file(path)?;

        let engine = DecisionEngine::new(&self.config);
        engine.decide(path, &parsed, &outcome)
    }

    fn apply_action(&self, path: &Path, action: &Action, stats: &mut RunStats) -> Result<()> {
        match action {
            Action::NoChange => {
                info!("No changes necessary to '{}'", path.display());
                stats.unchanged += 1;
            }
            Action::Skip(reason) => {
                info!("Skipping '{}': {}", path.display(), reason);
                stats.skipped += 1;
            }
            Action::Rename(target) => {
                if self.config.rename_files {
                    FileManager::rename_file(path, target)?;
                    info!("Renamed '{}' to '{}'", path.display(), target.display());
                } else {
                    info!("Would rename '{}' to '{}'", path.display(), target.display());
                }
                stats.renamed += 1;
            }
            Action::Delete => {
                // The file still carries its original name at this point
                if self.config.rename_files {
                    FileManager::delete_file(path)?;
                    info!("Deleted file '{}'", path.display());
                } else {
                    info!("Would delete file '{}'", path.display());
                }
                stats.deleted += 1;
            }
        }

        Ok(())
    }

    fn log_summary(&self, stats: &RunStats) {
        let mode = if self.config.rename_files { "" } else { " (dry-run)" };
        info!(
            "Run summary{}: {} renamed, {} deleted, {} unchanged, {} skipped, {} failed",
            mode, stats.renamed, stats.deleted, stats.unchanged, stats.skipped, stats.failed
        );
    }
}
