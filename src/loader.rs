//! Bulk airport import from `airports.dat` files
//!
//! The file is headerless CSV with eleven columns per row:
//! id, name, city, country, IATA, ICAO, latitude, longitude, altitude,
//! timezone offset and DST rule. Only IATA and the coordinates are used.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::service::AirportService;

const IATA_COLUMN: usize = 4;
const LATITUDE_COLUMN: usize = 6;
const LONGITUDE_COLUMN: usize = 7;

/// Outcome of one import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub added: usize,
    pub skipped: usize,
}

/// Register every airport listed in the file at `path`
pub fn load_airports(service: &AirportService, path: &Path) -> Result<LoadReport> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open airport file {}", path.display()))?;

    let report = load_airports_from_reader(service, file);
    info!(
        added = report.added,
        skipped = report.skipped,
        "Loaded airports from {}",
        path.display()
    );
    Ok(report)
}

/// Register every airport read from `reader`; rows that fail are skipped
pub fn load_airports_from_reader<R: Read>(service: &AirportService, reader: R) -> LoadReport {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut report = LoadReport::default();
    for (index, result) in reader.records().enumerate() {
        let line = index + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(line, "Skipping unreadable airport row: {e}");
                report.skipped += 1;
                continue;
            }
        };

        let Some((iata, latitude, longitude)) = airport_fields(&record) else {
            warn!(line, columns = record.len(), "Skipping short airport row");
            report.skipped += 1;
            continue;
        };

        match service.add_airport(iata, latitude, longitude) {
            Ok(_) => report.added += 1,
            Err(e) => {
                warn!(line, iata, "Skipping airport row: {e}");
                report.skipped += 1;
            }
        }
    }

    debug!(added = report.added, skipped = report.skipped, "Airport import finished");
    report
}

fn airport_fields(record: &StringRecord) -> Option<(&str, &str, &str)> {
    Some((
        record.get(IATA_COLUMN)?,
        record.get(LATITUDE_COLUMN)?,
        record.get(LONGITUDE_COLUMN)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AirportStore, AtmosphereStore};
    use std::io::Write;
    use std::sync::Arc;

    const SAMPLE: &str = r#"1,"General Edward Lawrence Logan Intl","Boston","United States","BOS","KBOS",42.364347,-71.005181,19,-5,"A"
2,"Newark Liberty Intl","Newark","United States","EWR","KEWR",40.6925,-74.168667,18,-5,"A"
3,"City","London","United Kingdom","LCY","EGLC",51.505278,0.055278,19,0,"E"
4,"Stansted","London","United Kingdom","STN","EGSS",51.885,0.235,348,0,"E"
"#;

    fn service() -> AirportService {
        AirportService::new(Arc::new(AirportStore::new()), Arc::new(AtmosphereStore::new()))
    }

    #[test]
    fn test_load_sample_rows() {
        let service = service();
        let report = load_airports_from_reader(&service, SAMPLE.as_bytes());

        assert_eq!(report, LoadReport { added: 4, skipped: 0 });
        let codes: Vec<_> = service.all_airport_codes().into_iter().collect();
        assert_eq!(codes, vec!["BOS", "EWR", "LCY", "STN"]);

        let lcy = service.get_airport("LCY").unwrap();
        assert_eq!(lcy.latitude, 51.505278);
        assert_eq!(lcy.longitude, 0.055278);
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let input = format!(
            "{SAMPLE}5,\"Dup\",\"Boston\",\"US\",\"BOS\",\"KBOS\",1,1,0,0,\"A\"\n\
             6,\"Short\",\"Nowhere\"\n\
             7,\"Broken\",\"X\",\"Y\",\"ZZZ\",\"ZZZZ\",north,1,0,0,\"A\"\n\
             8,\"No code\",\"X\",\"Y\",\"\",\"ZZZZ\",1,1,0,0,\"A\"\n"
        );
        let service = service();
        let report = load_airports_from_reader(&service, input.as_bytes());

        assert_eq!(report, LoadReport { added: 4, skipped: 4 });
        assert_eq!(service.get_airport("BOS").unwrap().latitude, 42.364347);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let service = service();
        let report = load_airports(&service, file.path()).unwrap();
        assert_eq!(report.added, 4);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_airports(&service(), &dir.path().join("airports.dat"));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to open airport file"));
    }
}
