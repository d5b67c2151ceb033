use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use env_logger::{Env, Target};

const LOG_FILE_NAME: &str = "tui-2048.log";

/// Route `log` output to a file.  The terminal belongs to the UI, so nothing
/// is written to stderr once the game is running.
///
/// Failing to open the file is not fatal: the game runs without logging and
/// a single warning is printed before the screen is taken over.
pub fn init(log_file: Option<&Path>) {
    let Some(path) = log_file.map(Path::to_path_buf).or_else(default_path) else {
        eprintln!("[WARN] No data directory available; logging disabled.");
        return;
    };

    match open(&path) {
        Ok(file) => {
            let result = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .try_init();
            if result.is_err() {
                eprintln!("[WARN] A logger is already installed; {} unused.", path.display());
            }
        }
        Err(e) => {
            eprintln!(
                "[WARN] Cannot open log file {}: {}; logging disabled.",
                path.display(),
                e
            );
        }
    }
}

fn open(path: &Path) -> io::Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `<data dir>/tui-2048.log`, e.g. `~/.local/share/tui-2048/` on Linux.
fn default_path() -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "tui-2048", "tui-2048")?;
    Some(proj_dirs.data_dir().join(LOG_FILE_NAME))
}
