use anyhow::Context;
use std::io::Write;

use crate::data_types::frequented_region::FrequentedRegion;
use crate::data_types::path::Path;
use crate::writers::tsv_writer;

/// Class value for a path: +1 for case, -1 for control, 0 when unlabeled
fn svm_class(path: &Path) -> &'static str {
    if path.is_case() {
        "+1"
    } else if path.is_control() {
        "-1"
    } else {
        "0"
    }
}

/// Writes one SVM-light style row per genome path: the class, then `<k>:<count>` for every region with k starting at 1.
/// # Arguments
/// * `writer` - destination
/// * `regions` - the regions, in feature order
/// * `paths` - the full genome paths, in row order
pub fn write_svm<W: Write>(writer: W, regions: &[&FrequentedRegion], paths: &[Path]) -> anyhow::Result<()> {
    let mut csv_writer = tsv_writer(writer);
    for path in paths.iter() {
        let mut row = Vec::with_capacity(regions.len() + 1);
        row.push(svm_class(path).to_string());
        row.extend(
            regions.iter()
                .enumerate()
                .map(|(i, fr)| format!("{}:{}", i + 1, fr.path_count(path)))
        );
        csv_writer.write_record(&row)
            .with_context(|| format!("Error while writing SVM row for {}:", path.identifier()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::mock_graphs::{build_graph, case_control_graph};
    use crate::data_types::node_set::NodeSet;

    #[test]
    fn test_write_svm() {
        let graph = case_control_graph();
        let fr1 = FrequentedRegion::new(&graph, NodeSet::new([1, 2]).unwrap(), 1.0, 0).unwrap();
        let fr2 = FrequentedRegion::new(&graph, NodeSet::singleton(3), 1.0, 0).unwrap();

        let mut buffer: Vec<u8> = vec![];
        write_svm(&mut buffer, &[&fr1, &fr2], graph.paths()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 20);
        assert!(lines.contains(&"+1\t1:1\t2:1"));
        assert!(lines.contains(&"-1\t1:0\t2:1"));
    }

    #[test]
    fn test_unlabeled() {
        let graph = build_graph(&[(1, "A")], &[("a", None, &[1])]);
        let fr = FrequentedRegion::new(&graph, NodeSet::singleton(1), 1.0, 0).unwrap();
        let mut buffer: Vec<u8> = vec![];
        write_svm(&mut buffer, &[&fr], graph.paths()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "0\t1:1\n");
    }

    #[test]
    fn test_diploid_rows() {
        let graph = build_graph(&[(1, "A"), (2, "C")], &[("s", Some(0), &[1, 2]), ("s", Some(1), &[1, 2])]);
        let fr = FrequentedRegion::new(&graph, NodeSet::new([1, 2]).unwrap(), 1.0, 0).unwrap();
        assert_eq!(fr.support(), 2);
        let mut buffer: Vec<u8> = vec![];
        write_svm(&mut buffer, &[&fr], graph.paths()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "0\t1:1\n0\t1:1\n");
    }
}
