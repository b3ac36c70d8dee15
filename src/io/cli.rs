//! Command-line interface for batch processing PNG tile sheets

use crate::algorithm::executor::Solver;
use crate::io::configuration::{
    DEFAULT_CELL_SIZE, DEFAULT_DIMENSION, DEFAULT_MAX_TICKS, DEFAULT_SEED, GIF_FRAME_DELAY_MS,
    MAX_CANVAS_SIDE, MAX_CELL_SIZE, MAX_GRID_DIMENSION, OUTPUT_SUFFIX, TILE_SIZE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{export_grid_as_png, load_tiles};
use crate::io::progress::ProgressManager;
use crate::io::visualization::{FrameCapture, Renderer};
use crate::spatial::adjacency::AdjacencyModel;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "edgetile")]
#[command(
    author,
    version,
    about = "Fill a grid with edge-matching tiles cut from a PNG"
)]
/// Command-line arguments for the tile grid generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Side length of the generated grid, in cells
    #[arg(short, long, default_value_t = DEFAULT_DIMENSION)]
    pub dimension: usize,

    /// Side length of the tiles cut from the source, in pixels
    #[arg(short, long, default_value_t = TILE_SIZE)]
    pub tile_size: usize,

    /// Rendered size of one cell in the output, in pixels
    #[arg(short, long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: usize,

    /// Maximum solver ticks before writing whatever state was reached
    #[arg(short, long, default_value_t = DEFAULT_MAX_TICKS)]
    pub max_ticks: usize,

    /// Drop duplicate tiles before building adjacency rules
    #[arg(short = 'u', long)]
    pub dedupe: bool,

    /// Enable visualization output as animated GIF, one frame per tick
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
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

    /// Reject parameter combinations the solver or renderer cannot use
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension, tile size or cell size is out of range,
    /// or if the painted canvas would be too large
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 || self.dimension > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "dimension",
                &self.dimension,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }
        if self.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be at least 1",
            ));
        }
        if self.cell_size == 0 || self.cell_size > MAX_CELL_SIZE {
            return Err(invalid_parameter(
                "cell_size",
                &self.cell_size,
                &format!("must be between 1 and {MAX_CELL_SIZE}"),
            ));
        }
        if self.dimension * self.cell_size > MAX_CANVAS_SIDE {
            return Err(invalid_parameter(
                "cell_size",
                &self.cell_size,
                &format!("canvas of {} cells must fit in {MAX_CANVAS_SIDE} pixels", self.dimension),
            ));
        }
        Ok(())
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
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

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, target discovery or file
    /// processing fails
    pub fn process(&mut self) -> Result<()> {
        self.cli.validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(crate::io::error::io_error(
                    "Target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && !Self::is_generated(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(crate::io::error::io_error(
                "Target must be a PNG file or directory",
            ))
        }
    }

    fn is_generated(path: &Path) -> bool {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for user feedback when the tick budget runs out
    #[allow(clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let output_path = Self::get_output_path(input_path);

        let tiles = load_tiles(input_path, self.cli.tile_size, self.cli.dedupe)?.into_tiles();
        let adjacency = Arc::new(AdjacencyModel::compute(&tiles));
        let mut solver = Solver::with_seed(adjacency, self.cli.dimension, self.cli.seed)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, solver.grid().len());
        }

        let mut capture = self
            .cli
            .visualize
            .then(|| FrameCapture::new(tiles.clone(), self.cli.cell_size, GIF_FRAME_DELAY_MS));
        if let Some(ref mut capture) = capture {
            capture.render(solver.grid())?;
        }

        for _ in 0..self.cli.max_ticks {
            if solver.grid().is_fully_collapsed() {
                break;
            }
            solver.tick();

            if let Some(ref mut capture) = capture {
                capture.render(solver.grid())?;
            }
            if let Some(ref mut pm) = self.progress_manager {
                let collapsed = solver.grid().cells().filter(|cell| cell.collapsed).count();
                pm.update_tick(index, collapsed, solver.stats());
            }
        }

        if !solver.grid().is_fully_collapsed() && !self.cli.quiet {
            eprintln!(
                "Tick budget of {} exhausted for {} (writing partial grid)",
                self.cli.max_ticks,
                input_path.display()
            );
        }

        export_grid_as_png(
            solver.grid(),
            &tiles,
            self.cli.cell_size,
            output_path
                .to_str()
                .ok_or_else(|| crate::io::error::io_error("Invalid output path"))?,
        )?;

        if let Some(capture) = capture {
            let viz_path = Self::get_visualization_path(input_path);
            capture.export_gif(
                viz_path
                    .to_str()
                    .ok_or_else(|| crate::io::error::io_error("Invalid visualization path"))?,
            )?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(())
    }

    /// Path of the PNG written for `input_path`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    /// Path of the GIF written for `input_path` when visualizing
    pub fn get_visualization_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let viz_name = format!("{}_visualization.gif", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}
