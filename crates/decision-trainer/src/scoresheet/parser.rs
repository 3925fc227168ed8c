use crate::training::ScoreKey;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoreRow {
    pub(crate) key: ScoreKey,
    pub(crate) score: i32,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ScoreRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<SheetRow>() {
        let row = record?;
        rows.push(ScoreRow {
            key: ScoreKey::new(normalize_key(&row.key)),
            score: row.score,
        });
    }

    Ok(rows)
}

pub(crate) fn write_rows<'a, W, I>(writer: W, rows: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = (&'a ScoreKey, i32)>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (key, score) in rows {
        csv_writer.serialize(SheetRow {
            key: key.as_str().to_string(),
            score,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Debug, Deserialize, Serialize)]
struct SheetRow {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Score")]
    score: i32,
}

// Spreadsheet exports prepend a BOM to the first cell.
fn normalize_key(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}
