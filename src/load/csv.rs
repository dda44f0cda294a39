//! Delimited-text reading and writing.

use std::io;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::{DataSet, DataType, Schema, Sentiment, Sex, Value};

/// Read a delimited file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The file must have headers.
/// - Headers must contain all schema fields (order can differ).
/// - Each value is parsed according to the schema field type; empty cells
///   become [`Value::Null`].
/// - For a [`crate::types::Field::lenient`] field, an unparseable cell also
///   becomes [`Value::Null`]; for a strict field it is an [`Error::Parse`].
pub fn read_csv_from_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    delimiter: u8,
) -> Result<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_path(path)?;
    read_csv_from_reader(&mut rdr, schema)
}

/// Read delimited data from an existing CSV reader.
pub fn read_csv_from_reader<R: io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> Result<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> column indexes (allows re-ordered columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(Error::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            match parse_typed_value(user_row, &field.name, &field.data_type, raw) {
                Ok(value) => row.push(value),
                Err(_) if field.lenient => row.push(Value::Null),
                Err(e) => return Err(e),
            }
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Re-encode a dataset (typically a filtered view) as comma-delimited text
/// with headers, in schema order. Nulls become empty cells; categoricals use
/// their canonical display form, so a load/export cycle of well-formed input
/// is lossless.
pub fn write_csv<W: io::Write>(dataset: &DataSet, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// [`write_csv`] into an owned `String` (the "download current results"
/// payload).
pub fn write_csv_string(dataset: &DataSet) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(dataset, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::SchemaMismatch {
        message: format!("exported csv is not valid utf-8: {e}"),
    })
}

fn parse_typed_value(row: usize, column: &str, data_type: &DataType, raw: &str) -> Result<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let parse_err = |message: String| Error::Parse {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_err(e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_err(e.to_string())),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_err),
        DataType::Sex => Sex::from_str(trimmed)
            .map(Value::Sex)
            .map_err(|_| parse_err("expected sex (M/F/Male/Female/1/2)".to_string())),
        DataType::Sentiment => Sentiment::from_str(trimmed)
            .map(Value::Sentiment)
            .map_err(|_| parse_err("expected sentiment (positive/neutral/negative)".to_string())),
    }
}

fn parse_bool(s: &str) -> std::result::Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    fn event_schema() -> Schema {
        Schema::new(vec![
            Field::lenient("patient_age", DataType::Float64),
            Field::new("patient_sex", DataType::Sex),
            Field::new("serious", DataType::Bool),
            Field::new("reaction_meddra", DataType::Utf8),
        ])
    }

    #[test]
    fn parses_typed_row_with_integer_sex_encoding() {
        let input = "patient_age,patient_sex,serious,reaction_meddra\n54,1,1,Nausea\n";
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes());

        let ds = read_csv_from_reader(&mut rdr, &event_schema()).unwrap();
        assert_eq!(
            ds.rows[0],
            vec![
                Value::Float64(54.0),
                Value::Sex(Sex::Male),
                Value::Bool(true),
                Value::Utf8("Nausea".to_string()),
            ]
        );
    }

    #[test]
    fn lenient_field_coerces_garbage_to_null() {
        let input = "patient_age,patient_sex,serious,reaction_meddra\nunknown,F,0,Headache\n";
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes());

        let ds = read_csv_from_reader(&mut rdr, &event_schema()).unwrap();
        assert_eq!(ds.rows[0][0], Value::Null);
        assert_eq!(ds.rows[0][1], Value::Sex(Sex::Female));
    }

    #[test]
    fn strict_field_reports_row_and_column_on_parse_failure() {
        let schema = Schema::new(vec![Field::new("year", DataType::Int64)]);
        let input = "year\n1977\nnot_a_year\n";
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes());

        let err = read_csv_from_reader(&mut rdr, &schema).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 3"));
        assert!(msg.contains("column 'year'"));
    }

    #[test]
    fn export_round_trips_well_formed_input() {
        let input = "patient_age,patient_sex,serious,reaction_meddra\n54,M,true,Nausea\n61.5,F,false,Dizziness\n";
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes());
        let ds = read_csv_from_reader(&mut rdr, &event_schema()).unwrap();

        let exported = write_csv_string(&ds).unwrap();
        assert_eq!(exported, input);
    }

    #[test]
    fn export_renders_null_as_empty_cell() {
        let schema = Schema::new(vec![
            Field::new("name", DataType::Utf8),
            Field::lenient("age", DataType::Float64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![vec![Value::Utf8("Ada".to_string()), Value::Null]],
        );
        assert_eq!(write_csv_string(&ds).unwrap(), "name,age\nAda,\n");
    }
}
