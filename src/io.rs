use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tempfile::NamedTempFile;

pub fn assert_not_stdout(path: &Path) -> Result<()> {
    if path == Path::new("-") {
        bail!("stdout is not supported here; omit the output path to print instead.");
    }
    Ok(())
}

/// Write-then-rename wrapper so a rendered file is never observed half-written.
pub struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

pub fn open_for_write(target: &Path, force: bool) -> Result<PendingWrite> {
    let parent = target.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("create dir {}", parent.display()))?;
    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }
    let tmp = NamedTempFile::new_in(parent).context("create temp file")?;

    Ok(PendingWrite { target: target.to_path_buf(), tmp })
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.tmp.write(buf) }
    fn flush(&mut self) -> std::io::Result<()> { self.tmp.flush() }
}

pub fn finalize_write(pending: PendingWrite) -> Result<()> {
    let PendingWrite { target, tmp } = pending;
    tmp.as_file().sync_all().ok(); // best-effort fsync file
    tmp.persist(&target)
        .with_context(|| format!("rename to {}", target.display()))?;
    if let Some(dir) = target.parent() {
        let _ = File::open(dir).and_then(|f| f.sync_all());
    }
    Ok(())
}

/// Serialize `value` as JSON to `target` atomically.
pub fn write_json(target: &Path, value: &Value, pretty: bool, force: bool) -> Result<()> {
    assert_not_stdout(target)?;
    let mut sink = open_for_write(target, force)?;
    if pretty {
        serde_json::to_writer_pretty(&mut sink, value)?;
    } else {
        serde_json::to_writer(&mut sink, value)?;
    }
    sink.write_all(b"\n")?;
    finalize_write(sink)?;
    tracing::info!(path = %target.display(), "wrote charts");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/charts.json");

        write_json(&path, &json!({ "ok": true }), false, false).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\"ok\":true}\n");

        assert!(write_json(&path, &json!({ "ok": false }), false, false).is_err());
        write_json(&path, &json!({ "ok": false }), false, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"ok\":false}\n");
    }

    #[test]
    fn rejects_dash() {
        assert!(assert_not_stdout(Path::new("-")).is_err());
    }
}
