use anyhow::Context;
use std::io::Write;

use crate::data_types::frequented_region::FrequentedRegion;
use crate::writers::tsv_writer;

/// Writes the full record of each region: a `<nodes>\t<support>\t<avgLen>` header, then one `<identifier>:<node list>` line per subpath.
/// The average length is rounded to the nearest integer.
/// This is the file that regions are reloaded from.
pub fn write_subpaths<W: Write>(writer: W, regions: &[&FrequentedRegion]) -> anyhow::Result<()> {
    let mut csv_writer = tsv_writer(writer);
    for fr in regions.iter() {
        csv_writer.write_record([
            fr.nodes().to_string(),
            fr.support().to_string(),
            format!("{}", fr.avg_length().round() as u64)
        ]).with_context(|| format!("Error while writing FR {}:", fr.nodes()))?;

        for subpath in fr.subpaths().iter() {
            csv_writer.write_record([format!("{}:{}", subpath.identifier(), subpath.node_id_list())])
                .with_context(|| format!("Error while writing subpaths for FR {}:", fr.nodes()))?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}
