use std::path::PathBuf;

const APP_DIR: &str = "lottiescan";

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/lottiescan/ (XDG layout)
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}

pub fn cache_dir() -> PathBuf {
    // ~/.cache/lottiescan/ on macOS too, instead of ~/Library/Caches/
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(temp_dir)
            .join(".cache")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::cache_dir().unwrap_or_else(temp_dir).join(APP_DIR)
    }
}

#[cfg(unix)]
fn zbarcam_binary_names() -> &'static [&'static str] {
    &["zbarcam"]
}

#[cfg(windows)]
fn zbarcam_binary_names() -> &'static [&'static str] {
    &["zbarcam.exe", "zbarcam"]
}

fn find_beside_exe(names: &[&str]) -> Option<PathBuf> {
    let current_exe = std::env::current_exe().ok()?;
    let dir = current_exe.parent()?;
    for name in names {
        let p = dir.join(name);
        if p.exists() {
            return Some(p);
        }
        let p = dir.join("external").join(name);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn find_on_path(names: &[&str]) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        for name in names {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }
    None
}

/// Find the zbarcam binary (ZBar's camera code decoder).
///
/// Searches in order:
/// 1. ZBARCAM_PATH environment variable
/// 2. Beside current executable (or its `external/` folder)
/// 3. PATH
pub fn find_zbarcam_binary() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("ZBARCAM_PATH") {
        let p = PathBuf::from(path);
        if p.exists() {
            return Some(p);
        }
    }

    if let Some(p) = find_beside_exe(zbarcam_binary_names()) {
        return Some(p);
    }

    find_on_path(zbarcam_binary_names())
}
