//! Parsed animation document.
//!
//! Any JSON value is a valid document. The accessors below read the Lottie
//! header fields the player needs and fall back to defaults when a field is
//! missing or has the wrong type, so a document never fails after parsing.

use serde_json::Value;

pub const DEFAULT_FRAME_RATE: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDocument {
    raw: Value,
}

/// One entry of the top-level `layers` array.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerInfo {
    pub name: String,
    pub kind: LayerKind,
    pub in_point: f64,
    pub out_point: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Precomp,
    Solid,
    Image,
    Null,
    Shape,
    Text,
    Audio,
    Other(i64),
}

impl LayerKind {
    fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Precomp,
            1 => Self::Solid,
            2 => Self::Image,
            3 => Self::Null,
            4 => Self::Shape,
            5 => Self::Text,
            6 => Self::Audio,
            other => Self::Other(other),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Precomp => "precomp",
            Self::Solid => "solid",
            Self::Image => "image",
            Self::Null => "null",
            Self::Shape => "shape",
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Other(_) => "layer",
        }
    }
}

impl AnimationDocument {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn name(&self) -> Option<&str> {
        self.raw.get("nm").and_then(Value::as_str)
    }

    /// Bodymovin export version (`v`).
    pub fn version(&self) -> Option<&str> {
        self.raw.get("v").and_then(Value::as_str)
    }

    pub fn frame_rate(&self) -> f64 {
        self.number("fr")
            .filter(|fr| *fr > 0.0)
            .unwrap_or(DEFAULT_FRAME_RATE)
    }

    pub fn in_point(&self) -> f64 {
        self.number("ip").unwrap_or(0.0)
    }

    /// End frame; never earlier than one frame past `in_point`.
    pub fn out_point(&self) -> f64 {
        let ip = self.in_point();
        self.number("op").filter(|op| *op > ip).unwrap_or(ip + 1.0)
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        let w = self.number("w")?;
        let h = self.number("h")?;
        (w > 0.0 && h > 0.0).then_some((w as u32, h as u32))
    }

    pub fn total_frames(&self) -> f64 {
        self.out_point() - self.in_point()
    }

    pub fn duration_secs(&self) -> f64 {
        self.total_frames() / self.frame_rate()
    }

    /// Frame shown `elapsed_secs` after playback started, wrapping back to
    /// `in_point` once `out_point` is reached.
    pub fn frame_at(&self, elapsed_secs: f64) -> f64 {
        let frames = (elapsed_secs.max(0.0) * self.frame_rate()) % self.total_frames();
        self.in_point() + frames
    }

    pub fn layers(&self) -> Vec<LayerInfo> {
        let Some(layers) = self.raw.get("layers").and_then(Value::as_array) else {
            return Vec::new();
        };
        let doc_ip = self.in_point();
        let doc_op = self.out_point();
        layers
            .iter()
            .enumerate()
            .map(|(idx, layer)| LayerInfo {
                name: layer
                    .get("nm")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("layer {}", idx + 1)),
                kind: LayerKind::from_code(layer.get("ty").and_then(Value::as_i64).unwrap_or(-1)),
                in_point: layer.get("ip").and_then(Value::as_f64).unwrap_or(doc_ip),
                out_point: layer.get("op").and_then(Value::as_f64).unwrap_or(doc_op),
            })
            .collect()
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.raw.get(key).and_then(Value::as_f64)
    }
}

impl LayerInfo {
    pub fn is_visible_at(&self, frame: f64) -> bool {
        frame >= self.in_point && frame < self.out_point
    }
}
