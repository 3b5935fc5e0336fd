use std::path::Path;

use anyhow::{Context, Result};

pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
    }
    std::fs::write(path, bytes).with_context(|| format!("write: {}", path.display()))
}

/// Write to `out` when given, stdout otherwise.
pub fn emit(out: Option<&Path>, bytes: &[u8]) -> Result<()> {
    if let Some(path) = out {
        return write_bytes(path, bytes);
    }
    use std::io::Write as _;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes).context("write stdout")?;
    stdout.flush().context("flush stdout")
}
