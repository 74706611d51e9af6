use anyhow::Context;
use std::io::Write;

use crate::parsing::run_params::RunParams;
use crate::writers::tsv_writer;

/// Writes the run parameters as `key\tvalue` rows, absent optional values are left out
pub fn write_params<W: Write>(writer: W, params: &RunParams) -> anyhow::Result<()> {
    let mut csv_writer = tsv_writer(writer);
    for (key, value) in params.rows().iter() {
        csv_writer.write_record([*key, value.as_str()])
            .with_context(|| format!("Error while writing param {key}:"))?;
    }
    csv_writer.flush()?;
    Ok(())
}
