//! CSV input and output for ratings tables and simulation results.
//!
//! Input rows carry `region,seed,team,rating`; the `Region,Seed,Team,Sagarin
//! rating` headers of the raw ratings exports are accepted too. Results are
//! written back in input order with a `win_percentage` column appended.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::info;

use crate::error::SimulationError;
use crate::field::Field;
use crate::simulation::SimulationResults;
use crate::team::Competitor;
use crate::topology::RegionPairing;

/// Parse competitor rows from CSV.
pub fn read_competitors<R: Read>(reader: R) -> Result<Vec<Competitor>, SimulationError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let competitors = csv_reader
        .deserialize()
        .collect::<Result<Vec<Competitor>, csv::Error>>()?;
    Ok(competitors)
}

/// Parse and validate a field from CSV.
pub fn read_field<R: Read>(reader: R, pairing: &RegionPairing) -> Result<Field, SimulationError> {
    Field::new(read_competitors(reader)?, pairing)
}

pub fn read_field_from_path(path: impl AsRef<Path>, pairing: &RegionPairing) -> Result<Field, SimulationError> {
    let path = path.as_ref();
    let field = read_field(File::open(path)?, pairing)?;
    info!(path = %path.display(), competitors = field.len(), "loaded field");
    Ok(field)
}

/// Write one row per competitor, in field order.
pub fn write_results<W: Write>(writer: W, results: &SimulationResults) -> Result<(), SimulationError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &results.rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_results_to_path(path: impl AsRef<Path>, results: &SimulationResults) -> Result<(), SimulationError> {
    let path = path.as_ref();
    write_results(File::create(path)?, results)?;
    info!(path = %path.display(), rows = results.rows.len(), "wrote results");
    Ok(())
}

/// Conventional results file name, e.g. `results_n1000_stdev10.csv`.
pub fn results_file_name(trials: u64, spread: f64) -> String {
    format!("results_n{}_stdev{}.csv", trials, spread)
}
