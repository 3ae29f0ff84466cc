//! Tabular (CSV) form of a dataset. Header and column order follow
//! [`RECORD_COLUMNS`]; values are written exactly as rounded at assembly.

use crate::{
    error::{FloodError, FloodResult},
    record::{FloodRecord, RECORD_COLUMNS},
};
use std::{fs::File, io, path::Path};

pub fn write_csv<W: io::Write>(records: &[FloodRecord], writer: W) -> FloodResult<()> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_csv<R: io::Read>(reader: R) -> FloodResult<Vec<FloodRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();
    if headers != RECORD_COLUMNS {
        return Err(FloodError::Other(anyhow::anyhow!(
            "unexpected CSV header: {}",
            headers.join(",")
        )));
    }

    let records = csv_reader
        .deserialize()
        .collect::<Result<Vec<FloodRecord>, _>>()?;
    Ok(records)
}

pub fn write_csv_file(records: &[FloodRecord], path: impl AsRef<Path>) -> FloodResult<()> {
    let path = path.as_ref();
    write_csv(records, io::BufWriter::new(File::create(path)?))?;
    log::info!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}

pub fn read_csv_file(path: impl AsRef<Path>) -> FloodResult<Vec<FloodRecord>> {
    let path = path.as_ref();
    let records = read_csv(io::BufReader::new(File::open(path)?))?;
    log::debug!("read {} records from {}", records.len(), path.display());
    Ok(records)
}
