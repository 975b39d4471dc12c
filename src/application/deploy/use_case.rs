//! Deploy Use Case
//!
//! Orchestrates an incremental deploy:
//! 1. Load the project's deployment state
//! 2. Seed the baseline on a first run, or resolve changes since it
//! 3. Group candidates into deploy units and stage them
//! 4. Run the deploy command, streaming its output
//! 5. Record the new baseline when the output carried no errors
//!
//! This use case is pure orchestration - all business logic lives in domain services.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::staging::stage_units;
use crate::application::state_store::StateStore;
use crate::domain::ports::{
    DeployEvent, DeployEventSink, DeployRunner, FileSystem, NoopEventSink, StateRepository,
    VersionControl,
};
use crate::domain::services::{Baseline, ChangeResolver, DeployOutputScanner, LineKind};
use crate::domain::value_objects::IgnorePatterns;
use crate::error::LazyResult;

use super::options::DeployOptions;
use super::result::DeployOutcome;

/// Deploy use case - orchestrates the deployment flow
///
/// This use case is parameterized by its dependencies (ports),
/// allowing for easy testing and different implementations.
pub struct DeployUseCase<V, F, R, D>
where
    V: VersionControl,
    F: FileSystem,
    R: StateRepository,
    D: DeployRunner,
{
    vcs: V,
    file_system: F,
    store: StateStore<R>,
    runner: D,
    resolver: ChangeResolver,
    options: DeployOptions,
}

impl<V, F, R, D> DeployUseCase<V, F, R, D>
where
    V: VersionControl,
    F: FileSystem,
    R: StateRepository,
    D: DeployRunner,
{
    pub fn new(vcs: V, file_system: F, state_repo: R, runner: D, options: DeployOptions) -> Self {
        let resolver = ChangeResolver::new(options.project_root.clone(), options.resolver.clone());
        Self {
            vcs,
            file_system,
            store: StateStore::new(state_repo),
            runner,
            resolver,
            options,
        }
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    pub fn store(&self) -> &StateStore<R> {
        &self.store
    }

    pub fn runner(&self) -> &D {
        &self.runner
    }

    /// Execute the deploy use case
    pub fn execute(&self) -> LazyResult<DeployOutcome> {
        self.execute_with_events(Arc::new(NoopEventSink))
    }

    /// Execute the deploy use case with event reporting
    pub fn execute_with_events(
        &self,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> LazyResult<DeployOutcome> {
        let project = self.options.project_root.as_path();
        let mut state = self.store.load(project);

        let since = match self.resolver.resolve_baseline(&state) {
            Baseline::Seed => {
                let revision = self.vcs.current_revision()?;
                self.store.record_revision(&mut state, project, &revision)?;
                info!(revision = %revision, "registered seed revision");
                event_sink.on_event(DeployEvent::SeedRegistered {
                    revision: revision.clone(),
                });
                return Ok(DeployOutcome::SeedRegistered { revision });
            }
            Baseline::Since(revision) => revision,
        };

        let patterns = IgnorePatterns::load(
            project,
            &self.options.ignore.file,
            &self.options.ignore.builtin,
            &self.options.ignore.hidden_prefix,
        )?;

        let changed = self.resolver.list_changed_files(&self.vcs, &since)?;
        let candidates =
            self.resolver
                .filter_and_dedupe(&changed, &patterns, &mut state, &self.file_system);
        event_sink.on_event(DeployEvent::ChangesResolved {
            changed: changed.len(),
            candidates: candidates.len(),
        });

        if candidates.is_empty() {
            // Keep the stamps of files that changed but are not deployable.
            self.store.save(project, &state)?;
            event_sink.on_event(DeployEvent::NoChanges);
            return Ok(DeployOutcome::NoChanges);
        }

        let units = self
            .resolver
            .expand_to_units(&candidates, &self.file_system);
        let revision = self.vcs.current_revision()?;
        debug!(units = units.len(), revision = %revision, "deploying");

        let staging = self.options.staging_dir.as_path();
        self.file_system.remove_dir_all(staging)?;
        let report = stage_units(
            &self.file_system,
            project,
            staging,
            &units,
            event_sink.as_ref(),
        )?;

        event_sink.on_event(DeployEvent::DeployStarted {
            command: self.runner.describe(),
        });
        let mut scanner = DeployOutputScanner::new(self.options.benign_errors.clone());
        let run = self.runner.run(staging, &mut |line: &str| match scanner.observe(line) {
            LineKind::Progress => event_sink.on_event(DeployEvent::DeployProgress {
                line: line.to_string(),
            }),
            LineKind::JobInfo => event_sink.on_event(DeployEvent::DeployJob {
                line: line.to_string(),
            }),
            LineKind::Error | LineKind::Other => debug!(line, "deploy output"),
        });

        if let Err(e) = self.file_system.remove_dir_all(staging) {
            warn!(error = %e, "could not remove staging directory");
        }
        run?;

        if scanner.has_errors() {
            let errors = scanner.into_errors();
            event_sink.on_event(DeployEvent::DeployFailed {
                errors: errors.clone(),
            });
            return Ok(DeployOutcome::Failed {
                errors,
                copy_issues: report.issues,
            });
        }

        self.store.record_revision(&mut state, project, &revision)?;
        info!(revision = %revision, units = units.len(), "deployed");
        event_sink.on_event(DeployEvent::Deployed {
            revision: revision.clone(),
            unit_count: units.len(),
        });

        Ok(DeployOutcome::Deployed {
            revision,
            units,
            copy_issues: report.issues,
        })
    }

    /// Clear tracked files and register the current revision as baseline.
    pub fn reset(&self) -> LazyResult<DeployOutcome> {
        self.reset_with_events(Arc::new(NoopEventSink))
    }

    pub fn reset_with_events(
        &self,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> LazyResult<DeployOutcome> {
        let project = self.options.project_root.as_path();
        let mut state = self.store.load(project);
        let revision = self.vcs.current_revision()?;

        self.store.reset(&mut state, project, &revision)?;
        info!(revision = %revision, "tracking reset");

        event_sink.on_event(DeployEvent::TrackingCleared);
        event_sink.on_event(DeployEvent::SeedRegistered {
            revision: revision.clone(),
        });
        Ok(DeployOutcome::Reset { revision })
    }
}
