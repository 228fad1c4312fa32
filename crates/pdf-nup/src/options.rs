use crate::constants::{DEFAULT_GUTTER_MM, DEFAULT_OUTPUT_FILE};
use crate::layout::LayoutRequest;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Imposition run configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpositionOptions {
    // Input / output
    pub input_file: PathBuf,
    pub output_file: PathBuf,

    // Sheet
    pub substrate: Substrate,

    // Spacing around every copy, in mm
    pub gutter_mm: f32,
}

impl Default for ImpositionOptions {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            substrate: Substrate::default(),
            gutter_mm: DEFAULT_GUTTER_MM,
        }
    }
}

impl ImpositionOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.input_file.as_os_str().is_empty() {
            return Err(ImposeError::Config("No input file specified".to_string()));
        }
        if self.output_file.as_os_str().is_empty() {
            return Err(ImposeError::Config("No output file specified".to_string()));
        }
        if self.substrate.width_mm <= 0.0 || self.substrate.height_mm <= 0.0 {
            return Err(ImposeError::InvalidDimensions(format!(
                "substrate must be positive, got {}x{} mm",
                self.substrate.width_mm, self.substrate.height_mm
            )));
        }
        if self.gutter_mm < 0.0 {
            return Err(ImposeError::InvalidDimensions(format!(
                "gutter must be zero or positive, got {} mm",
                self.gutter_mm
            )));
        }
        Ok(())
    }

    /// Planning request for a source page of the given trim size
    pub fn layout_request(&self, page: PageSize) -> LayoutRequest {
        LayoutRequest::new(self.substrate, page, self.gutter_mm)
    }
}
