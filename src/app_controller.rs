use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, RenderMode};
use crate::file_utils::FileManager;
use crate::normalizer::initialize_with_normalized_timestamps;
use crate::segments::Segment;
use crate::srt_converter::SrtConverter;
use crate::validation::srt_syntax::parse_srt_string;
use crate::validation::timecodes::{TimecodeValidationResult, TimecodeValidator};

// @module: Application controller for transcript conversion

/// Outcome of validating one SRT file
#[derive(Debug, Clone)]
pub struct FileValidation {
    // @field: Validated file
    pub path: PathBuf,

    // @field: Structural problem, if any
    pub syntax_error: Option<String>,

    // @field: Timeline check results (strict mode, structurally valid files only)
    pub timecodes: Option<TimecodeValidationResult>,
}

impl FileValidation {
    /// Whether the file passed every check that was run
    pub fn passed(&self) -> bool {
        self.syntax_error.is_none() && self.timecodes.as_ref().is_none_or(|t| t.passed)
    }
}

/// Main application controller for transcript to SRT conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the segments of one transcript file
    pub fn load_segments(&self, path: &Path) -> Result<Vec<Segment>> {
        let transcript = FileManager::load_transcript(path)?;
        let segments = transcript
            .into_segments(self.config.render.input_words_per_segment)
            .with_context(|| format!("Failed to build segments from {}", path.display()))?;
        debug!("Loaded {} segments from {}", segments.len(), path.display());
        Ok(segments)
    }

    /// Build the segment store from one or more transcript files.
    ///
    /// Several files are treated as consecutive chunks of one recording and
    /// stitched onto a single timeline in the given order.
    pub fn build_converter(&self, inputs: &[PathBuf]) -> Result<SrtConverter> {
        match inputs {
            [] => Err(anyhow!("At least one transcript file is required")),
            [single] => Ok(SrtConverter::new(self.load_segments(single)?)),
            many => {
                let chunks = many
                    .iter()
                    .map(|path| self.load_segments(path))
                    .collect::<Result<Vec<_>>>()?;
                info!("Stitching {} transcript chunks", chunks.len());
                Ok(initialize_with_normalized_timestamps(chunks))
            }
        }
    }

    /// Render the store in the configured style
    pub fn render(&self, converter: &SrtConverter) -> Result<String> {
        let render = &self.config.render;
        let srt = match render.mode {
            RenderMode::Highlight => converter.to_srt_highlight_word(&render.highlight_color),
            RenderMode::SingleWords => converter.to_srt_single_words(),
            RenderMode::PlainText => converter.to_srt_plain_text(render.words_per_segment)?,
        };

        if srt.is_empty() {
            warn!("{} rendering produced no cues", render.mode.display_name());
        }

        Ok(srt)
    }

    /// Convert transcript files to SRT, writing to `output` when given.
    /// Missing parent directories of `output` are created.
    ///
    /// Returns the rendered SRT text.
    pub fn run(&self, inputs: &[PathBuf], output: Option<&Path>) -> Result<String> {
        let converter = self.build_converter(inputs)?;
        let srt = self.render(&converter)?;

        if let Some(output) = output {
            if let Some(parent) = output.parent() {
                FileManager::ensure_dir(parent)?;
            }
            FileManager::write_to_file(output, &srt)
                .with_context(|| format!("Failed to write SRT to {}", output.display()))?;
            info!("Success: {}", output.display());
        }

        Ok(srt)
    }

    /// Validate one SRT file
    pub fn validate_file(&self, path: &Path, strict: bool) -> Result<FileValidation> {
        let content = FileManager::read_to_string(path)?;

        let (syntax_error, timecodes) = match parse_srt_string(&content) {
            Ok(cues) => {
                let timecodes = strict.then(|| TimecodeValidator::new().validate_cues(&cues));
                (None, timecodes)
            }
            Err(e) => (Some(e.to_string()), None),
        };

        Ok(FileValidation {
            path: path.to_path_buf(),
            syntax_error,
            timecodes,
        })
    }

    /// Validate an SRT file, or every `.srt` file below a directory
    pub fn validate_path(&self, path: &Path, strict: bool) -> Result<Vec<FileValidation>> {
        let files = if FileManager::dir_exists(path) {
            FileManager::find_files(path, "srt")?
        } else {
            vec![path.to_path_buf()]
        };

        if files.is_empty() {
            warn!("No SRT files found in {}", path.display());
        }

        files
            .iter()
            .map(|file| self.validate_file(file, strict))
            .collect()
    }
}
