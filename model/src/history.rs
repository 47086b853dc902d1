use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A location-history export, like the `Records.json` from Google Takeout. Everything besides
/// `locations` is ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationHistory {
    /// None when the payload has no `locations` key at all. That's treated like having no source.
    #[serde(default)]
    pub locations: Option<Vec<RawLocationRecord>>,
}

/// One observation. Every field is optional here, so that a missing one can be reported with the
/// index of the record, instead of failing the whole file with a generic parse error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocationRecord {
    #[serde(rename = "latitudeE7")]
    pub latitude_e7: Option<RawE7>,
    #[serde(rename = "longitudeE7")]
    pub longitude_e7: Option<RawE7>,
    pub timestamp_ms: Option<RawTimestamp>,
}

/// A fixed-point coordinate. Anything besides an integer is kept around, so the normalizer can
/// reject it along with the index of the record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawE7 {
    Integer(i64),
    Other(serde_json::Value),
}

impl RawE7 {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RawE7::Integer(x) => Some(*x),
            RawE7::Other(_) => None,
        }
    }
}

/// Exports disagree about whether `timestampMs` is a number or a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Booleans, objects, arrays. Never coercible.
    Other(serde_json::Value),
}

impl RawTimestamp {
    /// None if this is text that isn't a finite number
    pub fn coerce(&self) -> Option<f64> {
        let x = match self {
            RawTimestamp::Integer(x) => *x as f64,
            RawTimestamp::Float(x) => *x,
            RawTimestamp::Text(text) => {
                let text = text.trim();
                match text.parse::<i64>() {
                    Ok(x) => x as f64,
                    Err(_) => text.parse::<f64>().ok()?,
                }
            }
            RawTimestamp::Other(_) => return None,
        };
        if x.is_finite() {
            Some(x)
        } else {
            None
        }
    }
}

impl RawLocationRecord {
    pub fn new(latitude_e7: i64, longitude_e7: i64, timestamp_ms: i64) -> Self {
        Self {
            latitude_e7: Some(RawE7::Integer(latitude_e7)),
            longitude_e7: Some(RawE7::Integer(longitude_e7)),
            timestamp_ms: Some(RawTimestamp::Integer(timestamp_ms)),
        }
    }
}

impl LocationHistory {
    pub fn new(locations: Vec<RawLocationRecord>) -> Self {
        Self {
            locations: Some(locations),
        }
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let history: Self = serde_json::from_reader(reader)?;
        Ok(history)
    }

    pub fn load(path: &str) -> Result<Self> {
        let file = fs_err::File::open(path)?;
        let history = Self::from_reader(std::io::BufReader::new(file))
            .map_err(|err| anyhow!("{path}: {err}"))?;
        info!(
            "Loaded {} location records from {path}",
            history.locations.as_ref().map(|x| x.len()).unwrap_or(0)
        );
        Ok(history)
    }
}
