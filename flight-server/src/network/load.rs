//! CSV ingestion for networks.
//!
//! Two header-less, comma-separated files describe a network:
//!
//! - locations: `code,name,city,region`
//! - connections: `origin,destination,departure,arrival,duration`
//!
//! Connection ids are assigned from [`FIRST_CONNECTION_ID`] by line number,
//! so a skipped line still uses up its id. Connections naming a location
//! that is not in the locations file are skipped with a warning. A row with
//! too few or too many fields is an error. Time
//! fields are stored as given and only parsed during search.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{Network, NetworkBuilder, NetworkError};
use crate::domain::{Connection, ConnectionId, InvalidLocationCode, Location, LocationCode};

/// Id given to the connection on the first line of the connections file.
pub const FIRST_CONNECTION_ID: u32 = 1001;

/// Errors from loading a network.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: csv::Error },

    /// A row could not be read or has the wrong shape
    #[error("{source_name}:{line}: {source}")]
    Row {
        source_name: String,
        line: usize,
        source: csv::Error,
    },

    /// A row has the wrong number of fields
    #[error("{source_name}:{line}: expected {expected} fields, found {found}")]
    ColumnCount {
        source_name: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A row carries an invalid location code
    #[error("{source_name}:{line}: {source}")]
    Code {
        source_name: String,
        line: usize,
        source: InvalidLocationCode,
    },

    /// A row conflicts with the network built so far
    #[error("{source_name}:{line}: {source}")]
    Network {
        source_name: String,
        line: usize,
        source: NetworkError,
    },
}

/// Fields per row in the locations file.
const LOCATION_FIELDS: usize = 4;

/// Fields per row in the connections file.
const CONNECTION_FIELDS: usize = 5;

#[derive(Debug, Deserialize)]
struct LocationRow {
    code: String,
    name: String,
    city: String,
    region: String,
}

#[derive(Debug, Deserialize)]
struct ConnectionRow {
    origin: String,
    destination: String,
    departure: String,
    arrival: String,
    duration: u32,
}

/// Load a network from a locations file and a connections file.
pub fn from_paths(
    locations: impl AsRef<Path>,
    connections: impl AsRef<Path>,
) -> Result<Network, LoadError> {
    let locations = locations.as_ref();
    let connections = connections.as_ref();

    let location_reader = reader_builder()
        .from_path(locations)
        .map_err(|source| LoadError::Open {
            path: locations.to_path_buf(),
            source,
        })?;
    let connection_reader = reader_builder()
        .from_path(connections)
        .map_err(|source| LoadError::Open {
            path: connections.to_path_buf(),
            source,
        })?;

    let mut builder = NetworkBuilder::new();
    read_locations(location_reader, &locations.display().to_string(), &mut builder)?;
    read_connections(
        connection_reader,
        &connections.display().to_string(),
        &mut builder,
    )?;
    Ok(builder.build())
}

/// Load a network from in-memory CSV sources.
pub fn from_readers<L: Read, C: Read>(locations: L, connections: C) -> Result<Network, LoadError> {
    let mut builder = NetworkBuilder::new();
    read_locations(
        reader_builder().from_reader(locations),
        "locations",
        &mut builder,
    )?;
    read_connections(
        reader_builder().from_reader(connections),
        "connections",
        &mut builder,
    )?;
    Ok(builder.build())
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

/// Check a record's width, then deserialize it.
fn read_row<T: DeserializeOwned>(
    record: Result<csv::StringRecord, csv::Error>,
    expected: usize,
    source_name: &str,
    line: usize,
) -> Result<T, LoadError> {
    let row_error = |source| LoadError::Row {
        source_name: source_name.to_string(),
        line,
        source,
    };

    let record = record.map_err(row_error)?;
    if record.len() != expected {
        return Err(LoadError::ColumnCount {
            source_name: source_name.to_string(),
            line,
            expected,
            found: record.len(),
        });
    }
    record.deserialize(None).map_err(row_error)
}

fn read_locations<R: Read>(
    mut reader: csv::Reader<R>,
    source_name: &str,
    builder: &mut NetworkBuilder,
) -> Result<(), LoadError> {
    let mut count = 0;

    for (i, record) in reader.records().enumerate() {
        let line = i + 1;
        let row: LocationRow = read_row(record, LOCATION_FIELDS, source_name, line)?;

        let code = LocationCode::parse(&row.code).map_err(|source| LoadError::Code {
            source_name: source_name.to_string(),
            line,
            source,
        })?;

        builder
            .add_location(Location::new(code, row.name, row.city, row.region))
            .map_err(|source| LoadError::Network {
                source_name: source_name.to_string(),
                line,
                source,
            })?;
        count += 1;
    }

    debug!(source = source_name, locations = count, "Loaded locations");
    Ok(())
}

fn read_connections<R: Read>(
    mut reader: csv::Reader<R>,
    source_name: &str,
    builder: &mut NetworkBuilder,
) -> Result<(), LoadError> {
    let mut count = 0;
    let mut skipped = 0;

    for (i, record) in reader.records().enumerate() {
        let line = i + 1;
        let id = ConnectionId(FIRST_CONNECTION_ID + i as u32);
        let code_error = |source| LoadError::Code {
            source_name: source_name.to_string(),
            line,
            source,
        };

        let row: ConnectionRow = read_row(record, CONNECTION_FIELDS, source_name, line)?;

        let origin = LocationCode::parse(&row.origin).map_err(code_error)?;
        let destination = LocationCode::parse(&row.destination).map_err(code_error)?;

        if !builder.contains(&origin) || !builder.contains(&destination) {
            warn!(
                source = source_name,
                line,
                origin = %origin,
                destination = %destination,
                "Skipping connection with unknown location"
            );
            skipped += 1;
            continue;
        }

        builder
            .add_connection(Connection::new(
                id,
                origin,
                destination,
                row.duration,
                row.departure,
                row.arrival,
            ))
            .map_err(|source| LoadError::Network {
                source_name: source_name.to_string(),
                line,
                source,
            })?;
        count += 1;
    }

    debug!(
        source = source_name,
        connections = count,
        skipped, "Loaded connections"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const LOCATIONS: &str = "\
MSN,Dane County Regional,Madison,WI
ORD,O'Hare International,Chicago,IL
DTW,Detroit Metropolitan,Detroit,MI
";

    const CONNECTIONS: &str = "\
MSN,ORD,08:00,08:55,55
ORD,DTW,10:00,12:05,65
MSN,XXX,09:00,10:00,60
DTW,MSN,13:00,13:50,110
";

    fn code(s: &str) -> LocationCode {
        LocationCode::parse(s).unwrap()
    }

    #[test]
    fn load_from_readers() {
        let network = from_readers(LOCATIONS.as_bytes(), CONNECTIONS.as_bytes()).unwrap();

        assert_eq!(network.len(), 3);
        assert_eq!(network.location(&code("ORD")).unwrap().city, "Chicago");

        // Line 3 names an unknown location and is skipped
        assert_eq!(network.connection_count(), 3);
        let ids: Vec<_> = network.connections().iter().map(|c| c.id().0).collect();
        assert_eq!(ids, [1001, 1002, 1004]);

        let first = &network.connections()[0];
        assert_eq!(first.departure_str(), "08:00");
        assert_eq!(first.arrival_str(), "08:55");
        assert_eq!(first.duration_mins(), 55);
    }

    #[test]
    fn fields_are_trimmed() {
        let network = from_readers(
            " MSN , Dane County , Madison , WI \n ORD ,O'Hare,Chicago,IL\n".as_bytes(),
            " MSN , ORD , 08:00 , 08:55 , 55 \n".as_bytes(),
        )
        .unwrap();

        let msn = network.location(&code("MSN")).unwrap();
        assert_eq!(msn.name, "Dane County");
        assert_eq!(network.connections()[0].departure_str(), "08:00");
    }

    #[test]
    fn malformed_times_are_loaded_as_is() {
        let network =
            from_readers(LOCATIONS.as_bytes(), "MSN,ORD,8am,08:55,55\n".as_bytes()).unwrap();
        assert!(network.connections()[0].departure_time().is_err());
    }

    #[test]
    fn bad_duration_reports_line() {
        let err = from_readers(
            LOCATIONS.as_bytes(),
            "MSN,ORD,08:00,08:55,55\nORD,DTW,10:00,12:05,long\n".as_bytes(),
        )
        .unwrap_err();

        assert!(matches!(err, LoadError::Row { line: 2, .. }));
        assert!(err.to_string().starts_with("connections:2:"));
    }

    #[test]
    fn missing_column_is_error() {
        let err = from_readers("MSN,Dane County,Madison\n".as_bytes(), "".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::ColumnCount {
                line: 1,
                expected: 4,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn extra_location_column_is_error() {
        let err = from_readers(
            "MSN,Dane County,Madison,WI\nORD,O'Hare,Chicago,IL,EXTRA\n".as_bytes(),
            "".as_bytes(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LoadError::ColumnCount {
                line: 2,
                expected: 4,
                found: 5,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "locations:2: expected 4 fields, found 5"
        );
    }

    #[test]
    fn extra_connection_column_is_error() {
        let err = from_readers(
            LOCATIONS.as_bytes(),
            "MSN,ORD,08:00,08:55,55,EXTRA\n".as_bytes(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LoadError::ColumnCount {
                line: 1,
                expected: 5,
                found: 6,
                ..
            }
        ));
        assert!(err.to_string().starts_with("connections:1:"));
    }

    #[test]
    fn invalid_code_is_error() {
        let err = from_readers("M-N,Dane County,Madison,WI\n".as_bytes(), "".as_bytes())
            .unwrap_err();
        assert!(matches!(err, LoadError::Code { line: 1, .. }));
    }

    #[test]
    fn duplicate_location_is_error() {
        let err = from_readers(
            "MSN,Dane County,Madison,WI\nMSN,Other,Madison,WI\n".as_bytes(),
            "".as_bytes(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Network {
                line: 2,
                source: NetworkError::DuplicateLocation(_),
                ..
            }
        ));
    }

    #[test]
    fn load_from_files() {
        let dir = tempdir().unwrap();
        let locations = dir.path().join("airports.csv");
        let connections = dir.path().join("flights.csv");
        fs::write(&locations, LOCATIONS).unwrap();
        fs::write(&connections, CONNECTIONS).unwrap();

        let network = from_paths(&locations, &connections).unwrap();
        assert_eq!(network.len(), 3);
        assert_eq!(network.departures_from(&code("MSN")).len(), 1);
    }

    #[test]
    fn missing_file_is_open_error() {
        let dir = tempdir().unwrap();
        let err = from_paths(dir.path().join("nope.csv"), dir.path().join("nope2.csv"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
