use anyhow::{anyhow, bail, Context};
use indexmap::IndexMap;
use log::info;
use std::path::Path;

/// Loads the path label file: two tab-separated columns, path name then label, no header.
/// Lines starting with '#' are ignored.
/// # Arguments
/// * `filename` - the label file
/// # Errors
/// * if the file cannot be read
/// * if a row is missing a column or a path name is repeated
pub fn load_path_labels(filename: &Path) -> anyhow::Result<IndexMap<String, String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_path(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    let mut labels: IndexMap<String, String> = Default::default();
    for result in csv_reader.records() {
        let row = result.with_context(|| format!("Error while reading {filename:?}"))?;
        let line_num = row.position().map(|p| p.line()).unwrap_or_default();

        let name = row.get(0).ok_or(anyhow!("Missing path name on line {line_num}: {row:?}"))?;
        let label = row.get(1).ok_or(anyhow!("Missing label on line {line_num}: {row:?}"))?;
        if name.is_empty() || label.is_empty() {
            bail!("Empty path name or label on line {line_num}: {row:?}");
        }
        if labels.contains_key(name) {
            bail!("Duplicate path name found on line {line_num}: {name}");
        }
        labels.insert(name.to_string(), label.to_string());
    }

    info!("Loaded {} path labels from {filename:?}", labels.len());
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_labels() {
        let dir = tempfile::tempdir().unwrap();
        let filename = dir.path().join("labels.tsv");
        std::fs::write(&filename, "# sample\tlabel\nHG01\tcase\nHG02\tctrl\n").unwrap();
        let labels = load_path_labels(&filename).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("HG01").map(|l| l.as_str()), Some("case"));
        assert_eq!(labels.get_index(1).map(|(n, _l)| n.as_str()), Some("HG02"));
    }

    #[test]
    fn test_bad_labels() {
        let dir = tempfile::tempdir().unwrap();
        let filename = dir.path().join("labels.tsv");
        std::fs::write(&filename, "HG01\tcase\nHG01\tctrl\n").unwrap();
        assert!(load_path_labels(&filename).is_err());

        std::fs::write(&filename, "HG01\n").unwrap();
        assert!(load_path_labels(&filename).is_err());
    }
}
