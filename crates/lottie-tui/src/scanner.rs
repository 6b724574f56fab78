//! zbarcam driver: the camera side of the scanner view.
//!
//! zbarcam is spawned when scanning starts and killed when it stops. Every
//! decoded symbol arrives as one `SYMBOLOGY:data` stdout line and is forwarded
//! to the app as a `ScannerEvent`. Each run carries a session number so events
//! from a process that was already torn down can be told apart.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use lottie_proto::scan::{parse_zbar_line, ScannedCode};

#[derive(Debug)]
pub enum ScannerEvent {
    Code { session: u64, code: ScannedCode },
    Exited { session: u64, detail: String },
}

/// Running zbarcam process; dropping or stopping it kills the child.
pub struct ScannerHandle {
    session: u64,
    task: tokio::task::AbortHandle,
}

impl ScannerHandle {
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn stop(self) {
        debug!("stopping scanner session {}", self.session);
        self.task.abort();
    }
}

impl Drop for ScannerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn zbarcam_command(binary: &Path, device: &Path) -> Command {
    let mut cmd = Command::new(binary);
    cmd.arg("--nodisplay")
        .arg(device)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Spawn zbarcam on `device` and forward its output to `tx`.
pub fn spawn(
    binary: PathBuf,
    device: PathBuf,
    session: u64,
    tx: mpsc::Sender<ScannerEvent>,
) -> std::io::Result<ScannerHandle> {
    let mut child = zbarcam_command(&binary, &device).spawn()?;
    info!(
        "scanner session {}: {} on {}",
        session,
        binary.display(),
        device.display()
    );

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    if let Some(stderr) = stderr {
        let mut lines = BufReader::new(stderr).lines();
        tokio::spawn(async move {
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("zbarcam stderr: {}", line);
            }
        });
    }

    let task = tokio::spawn(async move {
        if let Some(stdout) = stdout {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let Some(code) = parse_zbar_line(&line) else {
                    continue;
                };
                debug!("zbarcam decoded {} ({} bytes)", code.kind, code.data.len());
                if tx.send(ScannerEvent::Code { session, code }).await.is_err() {
                    return;
                }
            }
        }

        let detail = match child.wait().await {
            Ok(status) => format!("zbarcam exited ({})", status),
            Err(e) => format!("zbarcam wait failed: {}", e),
        };
        warn!("scanner session {}: {}", session, detail);
        let _ = tx.send(ScannerEvent::Exited { session, detail }).await;
    });

    Ok(ScannerHandle {
        session,
        task: task.abort_handle(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    /// A stand-in decoder: a shell script that prints fixed zbarcam output.
    fn fake_zbarcam(dir: &Path, output: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("zbarcam");
        let script = format!("#!/bin/sh\nprintf '{}'\n", output);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    async fn next(rx: &mut mpsc::Receiver<ScannerEvent>) -> ScannerEvent {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn forwards_decoded_codes_then_exit() {
        let tmp = tempfile::TempDir::new().unwrap();
        let bin = fake_zbarcam(
            tmp.path(),
            "QR-Code:https://x.test/anim.json\\nEAN-13:4006381333931\\n",
        );
        let (tx, mut rx) = mpsc::channel(8);
        let _handle = spawn(bin, PathBuf::from("/dev/null"), 7, tx).unwrap();

        match next(&mut rx).await {
            ScannerEvent::Code { session, code } => {
                assert_eq!(session, 7);
                assert_eq!(code, ScannedCode::new("QR-Code", "https://x.test/anim.json"));
            }
            other => panic!("unexpected {:?}", other),
        }
        match next(&mut rx).await {
            ScannerEvent::Code { code, .. } => assert_eq!(code.kind, "EAN-13"),
            other => panic!("unexpected {:?}", other),
        }
        match next(&mut rx).await {
            ScannerEvent::Exited { session, .. } => assert_eq!(session, 7),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_binary_fails_to_spawn() {
        let (tx, _rx) = mpsc::channel(1);
        let result = spawn(
            PathBuf::from("/nonexistent/zbarcam"),
            PathBuf::from("/dev/null"),
            1,
            tx,
        );
        assert!(result.is_err());
    }
}
