//! Command-line interface for batch tiling of scene files

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{ArgAction, Parser};
use tracing::{debug, info};

use crate::algorithm::executor::AutoTiler;
use crate::io::configuration::{DEFAULT_PREVIEW_SCALE, OUTPUT_SUFFIX, PREVIEW_SUFFIX};
use crate::io::error::{Result, TileError, invalid_parameter};
use crate::io::image::export_layer_as_png;
use crate::io::progress::ProgressManager;
use crate::io::scene::{Scene, TileOutput};
use crate::spatial::TileLayer;

const SCENE_EXTENSION: &str = "json";

#[derive(Parser)]
#[command(name = "hextile")]
#[command(
    author,
    version,
    about = "Apply hex auto-tiling rules to scene files"
)]
/// Command-line arguments for the tiling tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Scene JSON file or directory of scenes to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process scenes even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Also write a PNG preview of one layer
    #[arg(short, long)]
    pub preview: bool,

    /// Vertical layer shown in the preview
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub layer: i32,

    /// Preview pixels per unit of hex radius
    #[arg(short, long, default_value_t = DEFAULT_PREVIEW_SCALE)]
    pub scale: u32,

    /// Increase log detail, repeatable
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter used when `RUST_LOG` is unset
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Orchestrates batch processing of scene files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process scenes according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or scene processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            info!(path = %self.cli.target.display(), "no scenes to process");
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_scene_file(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"must be a .json scene file",
                ))
            }
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|source| TileError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if is_scene_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a scene file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::output_path(input_path);
        if output_path.exists() {
            info!(scene = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref pm) = self.progress_manager {
            pm.start_scene(input_path);
        }

        let scene = Scene::from_path(input_path)?;
        let source = scene.source_grid();
        let mut tiler = AutoTiler::new(scene.rule_set(), TileLayer::new());
        let stats = tiler.recompute(&source);

        TileOutput::from_layer(tiler.output()).save(&Self::output_path(input_path))?;

        if self.cli.preview {
            export_layer_as_png(
                tiler.output(),
                self.cli.layer,
                self.cli.scale,
                &Self::preview_path(input_path),
            )?;
        }

        debug!(
            scene = %input_path.display(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "scene processed"
        );
        info!(
            scene = %input_path.display(),
            cells = stats.source_cells,
            tiles = stats.placements,
            "tiled scene"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_scene(&stats);
        }

        Ok(())
    }

    /// Path the tiles for `input_path` are written to
    pub fn output_path(input_path: &Path) -> PathBuf {
        sibling_with_suffix(input_path, OUTPUT_SUFFIX, SCENE_EXTENSION)
    }

    /// Path the preview image for `input_path` is written to
    pub fn preview_path(input_path: &Path) -> PathBuf {
        sibling_with_suffix(input_path, PREVIEW_SUFFIX, "png")
    }
}

// Scene files are `.json` files that are not themselves tool output
fn is_scene_file(path: &Path) -> bool {
    let is_json = path.extension().and_then(|s| s.to_str()) == Some(SCENE_EXTENSION);
    let is_output = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX));
    is_json && !is_output
}

fn sibling_with_suffix(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
