use anyhow::Context;
use std::io::Write;

use crate::data_types::frequented_region::FrequentedRegion;
use crate::data_types::path::Path;
use crate::writers::tsv_writer;

/// Writes the count matrix of subpaths per genome path per region.
/// The header has one identifier per path, then each region gets a row named `FR<k>` with k starting at 1.
/// # Arguments
/// * `writer` - destination
/// * `regions` - the regions, in output order
/// * `paths` - the full genome paths, in column order
pub fn write_path_frs<W: Write>(writer: W, regions: &[&FrequentedRegion], paths: &[Path]) -> anyhow::Result<()> {
    let mut csv_writer = tsv_writer(writer);
    csv_writer.write_record(paths.iter().map(|p| p.identifier()))
        .with_context(|| "Error while writing path header:")?;

    for (i, fr) in regions.iter().enumerate() {
        let mut row = Vec::with_capacity(paths.len() + 1);
        row.push(format!("FR{}", i + 1));
        row.extend(paths.iter().map(|p| fr.path_count(p).to_string()));
        csv_writer.write_record(&row)
            .with_context(|| format!("Error while writing path counts for FR {}:", fr.nodes()))?;
    }
    csv_writer.flush()?;
    Ok(())
}
