use anyhow::Result;
use geom::{GPSBounds, LonLat};
use serde::{Deserialize, Serialize};

/// A store to mark on the map, independent of any trail
#[derive(Clone, Serialize)]
pub struct StoreLocation {
    pub brand: Option<String>,
    pub store_name: String,
    pub street_address: Option<String>,
    pub pos: LonLat,
}

/// Reads the JSON export, a list of objects with `StoreName`, `Longitude`, `Latitude`, etc.
pub fn load_json<R: std::io::Read>(reader: R) -> Result<(Vec<StoreLocation>, GPSBounds)> {
    let records: Vec<JsonRecord> = serde_json::from_reader(reader)?;
    build(records.into_iter().map(Record::from))
}

/// Reads the CSV export, with columns like `Store Name`. Unrelated columns are ignored.
pub fn load_csv<R: std::io::Read>(reader: R) -> Result<(Vec<StoreLocation>, GPSBounds)> {
    let mut records = Vec::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: CsvRecord = rec?;
        records.push(Record::from(rec));
    }
    build(records.into_iter())
}

/// Picks the format from the file extension
pub fn load(path: &str) -> Result<(Vec<StoreLocation>, GPSBounds)> {
    let file = fs_err::File::open(path)?;
    let result = if path.to_lowercase().ends_with(".csv") {
        load_csv(file)
    } else {
        load_json(std::io::BufReader::new(file))
    };
    let (stores, gps_bounds) = result.map_err(|err| anyhow!("{path}: {err}"))?;
    info!("Loaded {} stores from {path}", stores.len());
    Ok((stores, gps_bounds))
}

fn build(records: impl Iterator<Item = Record>) -> Result<(Vec<StoreLocation>, GPSBounds)> {
    let mut gps_bounds = GPSBounds::new();
    let mut stores = Vec::new();
    for (idx, rec) in records.enumerate() {
        let (lon, lat) = match (rec.longitude, rec.latitude) {
            (Some(lon), Some(lat)) => (lon, lat),
            _ => bail!("Store #{idx} ({}) has no coordinates", rec.store_name),
        };
        let pos = LonLat::new(lon, lat);
        gps_bounds.update(pos);
        stores.push(StoreLocation {
            brand: rec.brand,
            store_name: rec.store_name,
            street_address: rec.street_address,
            pos,
        });
    }
    Ok((stores, gps_bounds))
}

// Both formats funnel into this
struct Record {
    brand: Option<String>,
    store_name: String,
    street_address: Option<String>,
    longitude: Option<f64>,
    latitude: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JsonRecord {
    brand: Option<String>,
    store_name: String,
    street_address: Option<String>,
    longitude: Option<f64>,
    latitude: Option<f64>,
}

#[derive(Deserialize)]
struct CsvRecord {
    #[serde(rename = "Brand")]
    brand: Option<String>,
    #[serde(rename = "Store Name")]
    store_name: String,
    #[serde(rename = "Street Address")]
    street_address: Option<String>,
    #[serde(rename = "Longitude")]
    longitude: Option<f64>,
    #[serde(rename = "Latitude")]
    latitude: Option<f64>,
}

impl From<JsonRecord> for Record {
    fn from(rec: JsonRecord) -> Self {
        Self {
            brand: rec.brand,
            store_name: rec.store_name,
            street_address: rec.street_address,
            longitude: rec.longitude,
            latitude: rec.latitude,
        }
    }
}

impl From<CsvRecord> for Record {
    fn from(rec: CsvRecord) -> Self {
        Self {
            brand: rec.brand,
            store_name: rec.store_name,
            street_address: rec.street_address,
            longitude: rec.longitude,
            latitude: rec.latitude,
        }
    }
}
