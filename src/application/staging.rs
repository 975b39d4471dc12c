//! Staging
//!
//! Copies deploy units into the staging directory at their project-relative
//! paths, so the deploy command sees the same layout as the project.

use std::path::Path;

use tracing::{debug, warn};

use crate::domain::entities::DeployUnit;
use crate::domain::ports::{CopyIssue, DeployEvent, DeployEventSink, FileSystem, FsResult};

/// What staging achieved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingReport {
    /// Units whose primary content was copied
    pub staged: usize,
    /// Primary files or trees that could not be copied
    pub issues: Vec<CopyIssue>,
}

/// Copy `units` from `project_root` into `staging_root`.
///
/// Failing to create the staging directory is an error. A unit that fails
/// to copy is recorded as a `CopyIssue` and staging moves on; a missing
/// metadata companion is not reported at all.
pub fn stage_units<F>(
    fs: &F,
    project_root: &Path,
    staging_root: &Path,
    units: &[DeployUnit],
    sink: &dyn DeployEventSink,
) -> FsResult<StagingReport>
where
    F: FileSystem + ?Sized,
{
    fs.create_dir_all(staging_root)?;

    let total = units.len();
    sink.on_event(DeployEvent::StagingStarted { unit_count: total });

    let mut report = StagingReport::default();
    for (index, unit) in units.iter().enumerate() {
        match unit {
            DeployUnit::Tree { root } => {
                match fs.copy_dir_all(&project_root.join(root), &staging_root.join(root)) {
                    Ok(()) => report.staged += 1,
                    Err(e) => report.issues.push(CopyIssue {
                        path: root.clone(),
                        error: e.to_string(),
                    }),
                }
            }
            DeployUnit::File { path, companion } => {
                match fs.copy_file(&project_root.join(path), &staging_root.join(path)) {
                    Ok(()) => report.staged += 1,
                    Err(e) => report.issues.push(CopyIssue {
                        path: path.clone(),
                        error: e.to_string(),
                    }),
                }
                if let Some(companion) = companion {
                    if let Err(e) =
                        fs.copy_file(&project_root.join(companion), &staging_root.join(companion))
                    {
                        debug!(path = %companion, error = %e, "companion not staged");
                    }
                }
            }
        }
        sink.on_event(DeployEvent::UnitStaged { index, total });
    }

    for issue in &report.issues {
        warn!(path = %issue.path, error = %issue.error, "unable to stage");
    }
    sink.on_event(DeployEvent::StagingFinished {
        issues: report.issues.clone(),
    });

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fs::LocalFs;
    use crate::test_support::{list_files, RecordingSink};
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    #[test]
    fn stages_files_trees_and_companions() {
        let project = tempdir().unwrap();
        write(project.path(), "src/classes/Foo.cls");
        write(project.path(), "src/classes/Foo.cls-meta.xml");
        write(project.path(), "src/staticresources/lib/app.js");
        write(project.path(), "src/staticresources/lib.resource-meta.xml");
        let staging = project.path().join("temp");

        let units = vec![
            DeployUnit::file_with_companion("src/classes/Foo.cls", "src/classes/Foo.cls-meta.xml"),
            DeployUnit::tree("src/staticresources"),
        ];
        let sink = RecordingSink::default();

        let report = stage_units(&LocalFs::new(), project.path(), &staging, &units, &sink).unwrap();

        assert_eq!(report.staged, 2);
        assert!(report.issues.is_empty());
        assert_eq!(
            list_files(&staging),
            vec![
                "src/classes/Foo.cls",
                "src/classes/Foo.cls-meta.xml",
                "src/staticresources/lib.resource-meta.xml",
                "src/staticresources/lib/app.js",
            ]
        );
    }

    #[test]
    fn missing_primary_is_reported_and_staging_continues() {
        let project = tempdir().unwrap();
        write(project.path(), "src/classes/Bar.cls");
        let staging = project.path().join("temp");

        let units = vec![
            DeployUnit::file("src/classes/Gone.cls"),
            DeployUnit::file("src/classes/Bar.cls"),
        ];

        let report = stage_units(
            &LocalFs::new(),
            project.path(),
            &staging,
            &units,
            &RecordingSink::default(),
        )
        .unwrap();

        assert_eq!(report.staged, 1);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].path, "src/classes/Gone.cls");
        assert_eq!(list_files(&staging), vec!["src/classes/Bar.cls"]);
    }

    #[test]
    fn missing_companion_is_silent() {
        let project = tempdir().unwrap();
        write(project.path(), "src/classes/Foo.cls");
        let staging = project.path().join("temp");

        let units = vec![DeployUnit::file_with_companion(
            "src/classes/Foo.cls",
            "src/classes/Foo.cls-meta.xml",
        )];

        let report = stage_units(
            &LocalFs::new(),
            project.path(),
            &staging,
            &units,
            &RecordingSink::default(),
        )
        .unwrap();

        assert_eq!(report.staged, 1);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn progress_events_per_unit() {
        let project = tempdir().unwrap();
        write(project.path(), "src/a.cls");
        write(project.path(), "src/b.cls");
        let sink = RecordingSink::default();

        stage_units(
            &LocalFs::new(),
            project.path(),
            &project.path().join("temp"),
            &[DeployUnit::file("src/a.cls"), DeployUnit::file("src/b.cls")],
            &sink,
        )
        .unwrap();

        assert_eq!(
            sink.events(),
            vec![
                DeployEvent::StagingStarted { unit_count: 2 },
                DeployEvent::UnitStaged { index: 0, total: 2 },
                DeployEvent::UnitStaged { index: 1, total: 2 },
                DeployEvent::StagingFinished { issues: Vec::new() },
            ]
        );
    }
}
