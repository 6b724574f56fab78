//! Camera permission probe, run once at startup.
//!
//! A terminal has no OS permission dialog; "authorized" means the scanner
//! source is usable. For zbarcam that is a decoder binary plus a video device
//! this user can open. A keyboard-wedge scanner needs neither.

use std::path::Path;

use tracing::{info, warn};

use lottie_proto::config::{ScannerConfig, ScannerSource};

/// Resolve camera access for `scanner`. `decoder` is the zbarcam binary, if found.
pub async fn request_camera_access(scanner: &ScannerConfig, decoder: Option<&Path>) -> bool {
    match scanner.source {
        ScannerSource::Keyboard => {
            info!("keyboard scanner source: no camera device required");
            true
        }
        ScannerSource::Zbarcam => {
            let Some(decoder) = decoder else {
                warn!("camera access denied: zbarcam binary not found");
                return false;
            };
            match probe_device(&scanner.device).await {
                Ok(()) => {
                    info!(
                        "camera access granted: {} via {}",
                        scanner.device.display(),
                        decoder.display()
                    );
                    true
                }
                Err(e) => {
                    warn!("camera access denied for {}: {}", scanner.device.display(), e);
                    false
                }
            }
        }
    }
}

/// Open `device` for reading and close it again.
async fn probe_device(device: &Path) -> std::io::Result<()> {
    let file = tokio::fs::File::open(device).await?;
    drop(file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn zbar(device: PathBuf) -> ScannerConfig {
        ScannerConfig {
            source: ScannerSource::Zbarcam,
            device,
        }
    }

    #[tokio::test]
    async fn keyboard_source_is_always_granted() {
        let cfg = ScannerConfig {
            source: ScannerSource::Keyboard,
            device: PathBuf::from("/definitely/not/a/device"),
        };
        assert!(request_camera_access(&cfg, None).await);
    }

    #[tokio::test]
    async fn missing_decoder_is_denied() {
        let dev = tempfile::NamedTempFile::new().unwrap();
        let cfg = zbar(dev.path().to_path_buf());
        assert!(!request_camera_access(&cfg, None).await);
    }

    #[tokio::test]
    async fn missing_device_is_denied() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cfg = zbar(tmp.path().join("video9"));
        let decoder = tmp.path().join("zbarcam");
        assert!(!request_camera_access(&cfg, Some(&decoder)).await);
    }

    #[tokio::test]
    async fn readable_device_is_granted() {
        let dev = tempfile::NamedTempFile::new().unwrap();
        let cfg = zbar(dev.path().to_path_buf());
        let decoder = PathBuf::from("/usr/bin/zbarcam");
        assert!(request_camera_access(&cfg, Some(&decoder)).await);
    }
}
