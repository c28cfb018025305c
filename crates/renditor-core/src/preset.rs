//! Resize presets: the tunable parameters applied to every crop region.
//!
//! A batch request carries an ordered list of presets; every valid crop
//! region is rendered once per preset, and presets are referred to by
//! position (1..N), never by name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The resize filters understood by the batch tool, in its numeric order.
///
/// The discriminant doubles as the index encoded into the geometry spec, so
/// the order here must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMethod {
    Thumbnail = 0,
    Scale,
    Sample,
    Point,
    Box,
    Triangle,
    Hermite,
    Hanning,
    Hamming,
    Blackman,
    Gaussian,
    Quadratic,
    Cubic,
    Catrom,
    Mitchell,
    Lanczos,
    Bessel,
    Sinc,
}

impl ResizeMethod {
    /// All methods in index order.
    pub const ALL: [ResizeMethod; 18] = [
        ResizeMethod::Thumbnail,
        ResizeMethod::Scale,
        ResizeMethod::Sample,
        ResizeMethod::Point,
        ResizeMethod::Box,
        ResizeMethod::Triangle,
        ResizeMethod::Hermite,
        ResizeMethod::Hanning,
        ResizeMethod::Hamming,
        ResizeMethod::Blackman,
        ResizeMethod::Gaussian,
        ResizeMethod::Quadratic,
        ResizeMethod::Cubic,
        ResizeMethod::Catrom,
        ResizeMethod::Mitchell,
        ResizeMethod::Lanczos,
        ResizeMethod::Bessel,
        ResizeMethod::Sinc,
    ];

    /// The numeric index the batch tool expects in the geometry spec.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Look up a method by its numeric index.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// The canonical filter name.
    pub fn name(self) -> &'static str {
        match self {
            ResizeMethod::Thumbnail => "Thumbnail",
            ResizeMethod::Scale => "Scale",
            ResizeMethod::Sample => "Sample",
            ResizeMethod::Point => "Point",
            ResizeMethod::Box => "Box",
            ResizeMethod::Triangle => "Triangle",
            ResizeMethod::Hermite => "Hermite",
            ResizeMethod::Hanning => "Hanning",
            ResizeMethod::Hamming => "Hamming",
            ResizeMethod::Blackman => "Blackman",
            ResizeMethod::Gaussian => "Gaussian",
            ResizeMethod::Quadratic => "Quadratic",
            ResizeMethod::Cubic => "Cubic",
            ResizeMethod::Catrom => "Catrom",
            ResizeMethod::Mitchell => "Mitchell",
            ResizeMethod::Lanczos => "Lanczos",
            ResizeMethod::Bessel => "Bessel",
            ResizeMethod::Sinc => "Sinc",
        }
    }
}

impl fmt::Display for ResizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResizeMethod {
    type Err = ParsePresetError;

    /// Parse from a filter name (case-insensitive) or a numeric index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.parse::<u8>() {
            return Self::from_index(index)
                .ok_or_else(|| ParsePresetError::UnknownMethod(s.to_string()));
        }
        Self::ALL
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ParsePresetError::UnknownMethod(s.to_string()))
    }
}

/// One preset: resize filter plus blur, quality, and interlacing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    /// Resize filter passed to the batch tool
    pub resize_method: ResizeMethod,

    /// Blur magnitude (>= 1 blurs, < 1 sharpens)
    pub blur: f64,

    /// Compression quality, 0-100
    pub quality: u8,

    /// Write progressive (line-interlaced) output
    pub progressive: bool,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            resize_method: ResizeMethod::Thumbnail,
            blur: 1.0,
            quality: 80,
            progressive: false,
        }
    }
}

impl FromStr for Preset {
    type Err = ParsePresetError;

    /// Parse the compact CLI form `method,blur,quality[,progressive]`.
    ///
    /// `method` is a filter name or index; the optional fourth field must be
    /// `progressive` or `p`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() < 3 || parts.len() > 4 {
            return Err(ParsePresetError::Malformed(s.to_string()));
        }

        let resize_method = parts[0].parse::<ResizeMethod>()?;
        let blur = parts[1]
            .parse::<f64>()
            .map_err(|_| ParsePresetError::InvalidBlur(parts[1].to_string()))?;
        let quality = parts[2]
            .parse::<u8>()
            .ok()
            .filter(|q| *q <= 100)
            .ok_or_else(|| ParsePresetError::InvalidQuality(parts[2].to_string()))?;

        let progressive = match parts.get(3) {
            None => false,
            Some(&"progressive") | Some(&"p") => true,
            Some(other) => return Err(ParsePresetError::Malformed((*other).to_string())),
        };

        Ok(Self {
            resize_method,
            blur,
            quality,
            progressive,
        })
    }
}

/// Errors parsing the CLI preset grammar.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParsePresetError {
    #[error("unknown resize method: {0}")]
    UnknownMethod(String),

    #[error("invalid blur value: {0}")]
    InvalidBlur(String),

    #[error("invalid quality value (expected 0-100): {0}")]
    InvalidQuality(String),

    #[error("expected method,blur,quality[,progressive], got: {0}")]
    Malformed(String),
}
