use std::path::Path;

use crate::checker::composer::ComposerUnusedChecker;
use crate::checker::fawltydeps::FawltyDepsChecker;
use crate::checker::knip::KnipChecker;
use crate::checker::maven::MavenChecker;
use crate::checker::Checker;

/// Select the checkers applicable to a project by probing for each
/// ecosystem's manifest file, preserving registration order. The checker
/// set is built fresh per call; a missing directory simply matches nothing.
pub fn select_checkers(project_root: &Path) -> Vec<Box<dyn Checker>> {
    let all: Vec<Box<dyn Checker>> = vec![
        Box::new(KnipChecker::new()),
        Box::new(ComposerUnusedChecker::new()),
        Box::new(FawltyDepsChecker::new()),
        Box::new(MavenChecker::new()),
    ];

    all.into_iter()
        .filter(|checker| project_root.join(checker.manifest_file()).exists())
        .collect()
}
