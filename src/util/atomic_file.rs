use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes a file by filling a temporary sibling file and renaming it into place once everything succeeded.
/// If anything fails, the temporary file is removed and any existing file at `filename` is left untouched.
/// # Arguments
/// * `filename` - the final output path
/// * `fill` - callback that writes the full file content
/// # Errors
/// * if the temporary file cannot be created, written, or renamed
/// * if `fill` returns an error
pub fn write_atomic<F>(filename: &Path, fill: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> anyhow::Result<()>
{
    let tmp_filename = temporary_name(filename);
    let result = (|| -> anyhow::Result<()> {
        let file = File::create(&tmp_filename)
            .with_context(|| format!("Error while creating {tmp_filename:?}:"))?;
        let mut writer = BufWriter::new(file);
        fill(&mut writer)?;
        writer.flush()
            .with_context(|| format!("Error while flushing output to {tmp_filename:?}:"))?;
        writer.get_ref().sync_all()
            .with_context(|| format!("Error while syncing {tmp_filename:?}:"))?;
        std::fs::rename(&tmp_filename, filename)
            .with_context(|| format!("Error while renaming {tmp_filename:?} to {filename:?}:"))?;
        Ok(())
    })();

    if result.is_err() {
        // best effort, the original error is the one worth reporting
        let _ = std::fs::remove_file(&tmp_filename);
    }
    result
}

/// Hidden temporary name in the same directory, so the rename stays on one filesystem
fn temporary_name(filename: &Path) -> PathBuf {
    let base = filename.file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();
    filename.with_file_name(format!(".{base}.{}.tmp", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_success() {
        let dir = tempfile::tempdir().unwrap();
        let filename = dir.path().join("out.txt");
        write_atomic(&filename, |w| {
            writeln!(w, "hello")?;
            Ok(())
        }).unwrap();
        assert_eq!(std::fs::read_to_string(&filename).unwrap(), "hello\n");
        // only the final file remains
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_failure_keeps_old() {
        let dir = tempfile::tempdir().unwrap();
        let filename = dir.path().join("out.txt");
        std::fs::write(&filename, "old\n").unwrap();
        let result = write_atomic(&filename, |w| {
            writeln!(w, "partial")?;
            anyhow::bail!("simulated failure");
        });
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&filename).unwrap(), "old\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
