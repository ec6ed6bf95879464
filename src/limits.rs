use log::warn;
use serde_derive::Deserialize;
use std::fs;
use std::path::Path;

use crate::engine::MazeRequest;
use crate::errors::*;

/// Upper bounds a caller puts on maze requests before handing them to the engine.
///
/// Read from TOML, e.g.
///
/// ```toml
/// max_width = 40
/// max_height = 40
/// max_cell_pixels = 12
/// ```
///
/// Keys left out keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RequestLimits {
    pub max_width: usize,
    pub max_height: usize,
    pub max_cell_pixels: u32,
}

impl Default for RequestLimits {
    fn default() -> Self {
        RequestLimits {
            max_width: 64,
            max_height: 64,
            max_cell_pixels: 16,
        }
    }
}

impl RequestLimits {
    pub fn from_toml_str(data: &str) -> Result<RequestLimits> {
        Ok(toml::from_str(data)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<RequestLimits> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .chain_err(|| ErrorKind::LimitsConfig(path.to_path_buf()))?;
        RequestLimits::from_toml_str(&data)
            .chain_err(|| ErrorKind::LimitsConfig(path.to_path_buf()))
    }

    /// Cap the request's size and scale at these limits. Values are only ever lowered,
    /// so a non positive request still reaches the engine and is rejected there.
    pub fn clamp(&self, request: MazeRequest) -> MazeRequest {
        let clamped = MazeRequest {
            width: request.width.min(self.max_width),
            height: request.height.min(self.max_height),
            cell_pixels: request.cell_pixels.min(self.max_cell_pixels),
            ..request.clone()
        };
        if clamped != request {
            warn!("maze request {}x{} at {}px clamped to {}x{} at {}px",
                  request.width,
                  request.height,
                  request.cell_pixels,
                  clamped.width,
                  clamped.height,
                  clamped.cell_pixels);
        }
        clamped
    }
}
