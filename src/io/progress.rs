//! Scene batch progress display

use std::path::Path;
use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::algorithm::executor::RecomputeStats;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Scenes: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar over a batch of scene files
///
/// Does nothing until [`initialize`](Self::initialize) is called.
#[derive(Default)]
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    placements: usize,
}

impl ProgressManager {
    /// Create an idle progress manager
    pub const fn new() -> Self {
        Self {
            bar: None,
            placements: 0,
        }
    }

    /// Show a bar sized for `scene_count` scenes
    pub fn initialize(&mut self, scene_count: usize) {
        let bar = ProgressBar::new(scene_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = Some(bar);
        self.placements = 0;
    }

    /// Name the scene being processed
    pub fn start_scene(&self, path: &Path) {
        if let Some(ref bar) = self.bar {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            bar.set_message(name.into_owned());
        }
    }

    /// Count a finished scene
    pub fn complete_scene(&mut self, stats: &RecomputeStats) {
        self.placements += stats.placements;
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Tiles placed across every completed scene
    pub const fn total_placements(&self) -> usize {
        self.placements
    }

    /// Replace the bar with a summary line
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_with_message(format!("{} tiles placed", self.placements));
        }
    }
}
