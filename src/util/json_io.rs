use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Opens a file for buffered reading, transparently decompressing it if it ends in ".gz"
/// # Arguments
/// * `filename` - the file path to open
/// # Errors
/// * if the file does not open properly
pub fn open_reader(filename: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    let fp = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let reader: Box<dyn BufRead> = if filename.extension().unwrap_or_default() == "gz" {
        Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(fp)))
    } else {
        Box::new(BufReader::new(fp))
    };
    Ok(reader)
}

/// Helper function that loads a file into some type, helpful generic
/// # Arguments
/// * `filename` - the file path to open and parse, optionally gzipped
/// # Errors
/// * if the file does not open properly
/// * if the deserialization throws errors
pub fn load_json<T: serde::de::DeserializeOwned>(filename: &Path) -> anyhow::Result<T> {
    let reader = open_reader(filename)?;
    let result: T = serde_json::from_reader(reader)
        .with_context(|| format!("Error while deserializing {filename:?}:"))?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_gzipped() {
        let dir = tempfile::tempdir().unwrap();
        let filename = dir.path().join("values.json.gz");
        let mut encoder = flate2::write::GzEncoder::new(File::create(&filename).unwrap(), flate2::Compression::fast());
        encoder.write_all(b"[1, 2, 3]").unwrap();
        encoder.finish().unwrap();

        let values: Vec<u32> = load_json(&filename).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: anyhow::Result<Vec<u32>> = load_json(&dir.path().join("absent.json"));
        assert!(result.is_err());
    }
}
