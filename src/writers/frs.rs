use anyhow::Context;
use std::io::Write;

use crate::data_types::frequented_region::FrequentedRegion;
use crate::writers::tsv_writer;

/// Writes the FR summary table: a header, then one row per region.
/// # Arguments
/// * `writer` - destination, a file or stdout
/// * `regions` - the regions, in output order
/// * `labels` - the label columns, in output order
/// # Errors
/// * if writing fails
pub fn write_frs<W: Write>(writer: W, regions: &[&FrequentedRegion], labels: &[&str]) -> anyhow::Result<()> {
    let mut csv_writer = tsv_writer(writer);
    csv_writer.write_record(FrequentedRegion::column_heading(labels))
        .with_context(|| "Error while writing FR header:")?;
    for fr in regions.iter() {
        csv_writer.write_record(fr.summary_line(labels))
            .with_context(|| format!("Error while writing FR {}:", fr.nodes()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::mock_graphs::case_control_graph;
    use crate::data_types::node_set::NodeSet;

    #[test]
    fn test_write_frs() {
        let graph = case_control_graph();
        let fr1 = FrequentedRegion::new(&graph, NodeSet::new([1, 2]).unwrap(), 1.0, 0).unwrap();
        let fr2 = FrequentedRegion::new(&graph, NodeSet::singleton(3), 1.0, 0).unwrap();

        let mut buffer: Vec<u8> = vec![];
        write_frs(&mut buffer, &[&fr1, &fr2], &graph.labels()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "nodes\tsupport\tavgLen\tcase\tctrl\n[1,2]\t10\t6.0\t10\t0\n[3]\t20\t4.0\t10\t10\n");
    }

    #[test]
    fn test_no_labels() {
        let mut buffer: Vec<u8> = vec![];
        write_frs(&mut buffer, &[], &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "nodes\tsupport\tavgLen\n");
    }
}
