//! Recognized codes and the payload acceptance rule.

/// Prefix a payload must carry to be accepted as a source URL.
///
/// This is a plain case-sensitive prefix test, not URL validation:
/// `"httpsNOTaurl"` passes, `"HTTPS://x"` does not.
pub const ACCEPTED_PREFIX: &str = "https";

/// Message shown when a recognized code is rejected.
pub const REJECTED_MESSAGE: &str = "Incorrect Data";

/// Symbology names `zbarcam` prints in front of decoded data.
const KNOWN_SYMBOLOGIES: &[&str] = &[
    "QR-Code",
    "SQ-Code",
    "EAN-13",
    "EAN-8",
    "EAN-2",
    "EAN-5",
    "UPC-A",
    "UPC-E",
    "ISBN-10",
    "ISBN-13",
    "I2/5",
    "DataBar",
    "DataBar-Exp",
    "Codabar",
    "CODE-39",
    "CODE-93",
    "CODE-128",
    "PDF417",
];

/// A code emitted by a scanner source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedCode {
    /// Symbology reported by the scanner (`QR-Code`, `keyboard`, `raw`, …).
    pub kind: String,
    /// Decoded payload, arbitrary text.
    pub data: String,
}

impl ScannedCode {
    pub fn new(kind: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: data.into(),
        }
    }

    /// A code typed into the scanner view (or sent by a keyboard-wedge scanner).
    pub fn keyboard(data: impl Into<String>) -> Self {
        Self::new("keyboard", data)
    }

    pub fn is_accepted(&self) -> bool {
        is_accepted_payload(&self.data)
    }
}

pub fn is_accepted_payload(data: &str) -> bool {
    data.starts_with(ACCEPTED_PREFIX)
}

/// Parse one stdout line from `zbarcam`.
///
/// `zbarcam` prints `SYMBOLOGY:data`. Lines whose prefix is not a known
/// symbology (e.g. when run with `--raw`) are kept whole as `raw` data, so a
/// bare `https://…` line is not split at the scheme colon.
pub fn parse_zbar_line(line: &str) -> Option<ScannedCode> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return None;
    }
    if let Some((kind, data)) = line.split_once(':') {
        if KNOWN_SYMBOLOGIES.contains(&kind) {
            return Some(ScannedCode::new(kind, data));
        }
    }
    Some(ScannedCode::new("raw", line))
}
