//! Property tests for change resolution.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use lazydeploy::domain::ports::{FileSystem, FsError, FsResult};
use lazydeploy::{ChangeResolver, DeploymentState, FileStamp, IgnorePatterns, ResolverConfig};

const ROOT: &str = "/project";

/// Modification times only; nothing is ever copied.
struct StampFs(BTreeMap<PathBuf, FileStamp>);

impl StampFs {
    fn new(files: &[(String, u64)]) -> Self {
        Self(
            files
                .iter()
                .map(|(path, nanos)| (Path::new(ROOT).join(path), FileStamp::from_nanos(*nanos)))
                .collect(),
        )
    }
}

impl FileSystem for StampFs {
    fn exists(&self, path: &Path) -> bool {
        self.0.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        Err(FsError::NotFound(path.to_path_buf()))
    }

    fn modified(&self, path: &Path) -> FsResult<FileStamp> {
        self.0
            .get(path)
            .copied()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn create_dir_all(&self, _path: &Path) -> FsResult<()> {
        Ok(())
    }

    fn copy_file(&self, _from: &Path, _to: &Path) -> FsResult<()> {
        Ok(())
    }

    fn copy_dir_all(&self, _from: &Path, _to: &Path) -> FsResult<()> {
        Ok(())
    }

    fn remove_dir_all(&self, _path: &Path) -> FsResult<()> {
        Ok(())
    }
}

fn project_path() -> impl Strategy<Value = String> {
    let dir = prop::sample::select(vec![
        "src/classes",
        "src/staticresources/lib",
        "src/objects/Account",
        "src/objects/Account/fields",
        "src/lwc/app",
        "docs",
    ]);
    let name = prop::sample::select(vec!["A", "B", "C", ".hidden"]);
    let ext = prop::sample::select(vec![
        ".cls",
        ".cls-meta.xml",
        ".js",
        ".json",
        ".object-meta.xml",
        ".field-meta.xml",
    ]);
    (dir, name, ext).prop_map(|(d, n, e)| format!("{}/{}{}", d, n, e))
}

fn changed_files() -> impl Strategy<Value = Vec<(String, u64)>> {
    prop::collection::vec((project_path(), 1u64..1_000_000), 0..=16).prop_map(|files| {
        let mut seen = HashSet::new();
        files
            .into_iter()
            .filter(|(path, _)| seen.insert(path.clone()))
            .collect()
    })
}

fn patterns() -> IgnorePatterns {
    let builtin: Vec<String> = ["**.json", ".*", "**.ts", "**.resource"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    IgnorePatterns::from_content(
        &Path::new(ROOT).join(".forceignore"),
        &builtin,
        ".",
        "",
    )
    .unwrap()
}

fn paths(files: &[(String, u64)]) -> Vec<String> {
    files.iter().map(|(p, _)| p.clone()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a second pass over unmodified files yields nothing.
    #[test]
    fn property_filter_is_idempotent(files in changed_files()) {
        let fs = StampFs::new(&files);
        let resolver = ChangeResolver::new(ROOT, ResolverConfig::default());
        let patterns = patterns();
        let mut state = DeploymentState::new();

        resolver.filter_and_dedupe(&paths(&files), &patterns, &mut state, &fs);
        let second = resolver.filter_and_dedupe(&paths(&files), &patterns, &mut state, &fs);

        prop_assert!(second.is_empty());
    }

    /// PROPERTY: every evaluated file is stamped, ignored or not, and only
    /// deployable files come back.
    #[test]
    fn property_every_file_is_stamped(files in changed_files()) {
        let fs = StampFs::new(&files);
        let resolver = ChangeResolver::new(ROOT, ResolverConfig::default());
        let patterns = patterns();
        let mut state = DeploymentState::new();

        let candidates = resolver.filter_and_dedupe(&paths(&files), &patterns, &mut state, &fs);

        for (path, nanos) in &files {
            prop_assert_eq!(state.stamp(path), Some(FileStamp::from_nanos(*nanos)));
        }
        for candidate in &candidates {
            prop_assert!(!patterns.is_ignored(candidate));
            prop_assert!(candidate.starts_with("src/"));
        }
    }

    /// PROPERTY: files whose stamp is already recorded are neither returned
    /// nor restamped.
    #[test]
    fn property_recorded_stamps_are_skipped(
        files in changed_files(),
        seen in prop::collection::vec(any::<bool>(), 16),
    ) {
        let fs = StampFs::new(&files);
        let resolver = ChangeResolver::new(ROOT, ResolverConfig::default());
        let mut state = DeploymentState::new();
        let mut known = HashSet::new();
        for ((path, nanos), seen) in files.iter().zip(&seen) {
            if *seen {
                state.record_stamp(path.clone(), FileStamp::from_nanos(*nanos));
                known.insert(path.clone());
            }
        }
        let tracked_before = state.tracked_count();

        let candidates = resolver.filter_and_dedupe(&paths(&files), &patterns(), &mut state, &fs);

        for candidate in &candidates {
            prop_assert!(!known.contains(candidate));
        }
        prop_assert_eq!(state.tracked_count(), tracked_before + files.len() - known.len());
    }

    /// PROPERTY: units cover every candidate and no unit appears twice.
    #[test]
    fn property_units_cover_candidates_once(files in changed_files()) {
        let fs = StampFs::new(&files);
        let resolver = ChangeResolver::new(ROOT, ResolverConfig::default());
        let mut state = DeploymentState::new();
        let candidates = resolver.filter_and_dedupe(&paths(&files), &patterns(), &mut state, &fs);

        let units = resolver.expand_to_units(&candidates, &fs);

        for candidate in &candidates {
            prop_assert!(
                units.iter().any(|u| u.covers(candidate)),
                "{} not covered by {:?}", candidate, units
            );
        }
        let mut primaries = HashSet::new();
        for unit in &units {
            prop_assert!(primaries.insert(unit.primary().to_string()), "duplicate {}", unit);
        }
        prop_assert!(units.len() <= candidates.len());
    }
}
