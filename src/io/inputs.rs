use std::io::Read;
use std::path::Path;

use crate::design::aircraft::{AircraftSpec, LayoutKind, INPUT_FIELDS};
use crate::error::DesignError;

/// Read the value column of a `label,value` sheet.
///
/// The first row is a header and is skipped. Extra columns are ignored.
pub fn read_inputs<R: Read>(reader: R) -> Result<Vec<f64>, DesignError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = Vec::with_capacity(INPUT_FIELDS);
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let label = record.get(0).unwrap_or("");
        let Some(raw) = record.get(1) else {
            return Err(DesignError::invalid(
                label,
                format!("line {line}: missing value column"),
            ));
        };
        let value: f64 = raw.parse().map_err(|_| {
            DesignError::invalid(label, format!("line {line}: `{raw}` is not a number"))
        })?;
        values.push(value);
    }

    if values.len() != INPUT_FIELDS {
        return Err(DesignError::invalid(
            "inputs",
            format!("expected {} value rows, got {}", INPUT_FIELDS, values.len()),
        ));
    }
    Ok(values)
}

/// Read an input sheet from disk.
pub fn load_inputs(path: impl AsRef<Path>) -> Result<Vec<f64>, DesignError> {
    let file = std::fs::File::open(path)?;
    read_inputs(file)
}

/// Read an input sheet and build the aircraft from it.
pub fn load_aircraft(path: impl AsRef<Path>, kind: LayoutKind) -> Result<AircraftSpec, DesignError> {
    let values = load_inputs(path)?;
    AircraftSpec::from_inputs(&values, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
parameter,value
mass,30
overall_span,1.85
cl_max,1.4725
cl_cruise,1.1
cd0,0.02
cm,0.03
tc,0.14
";

    #[test]
    fn reads_value_column_in_order() {
        let values = read_inputs(SHEET.as_bytes()).unwrap();
        assert_eq!(values, vec![30.0, 1.85, 1.4725, 1.1, 0.02, 0.03, 0.14]);
    }

    #[test]
    fn extra_columns_and_whitespace_are_tolerated() {
        let sheet = "name,value,unit\nmass, 16 ,kg\nspan,1.85,m\na,1\nb,1\nc,0.02\nd,0.03\ne,0.14\n";
        let values = read_inputs(sheet.as_bytes()).unwrap();
        assert_eq!(values[0], 16.0);
        assert_eq!(values.len(), INPUT_FIELDS);
    }

    #[test]
    fn non_numeric_value_names_the_row() {
        let sheet = SHEET.replace("cd0,0.02", "cd0,low");
        let err = read_inputs(sheet.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("`cd0`"), "{msg}");
        assert!(msg.contains("line 6"), "{msg}");
    }

    #[test]
    fn short_sheet_is_rejected() {
        let sheet: String = SHEET.lines().take(5).map(|l| format!("{l}\n")).collect();
        let err = read_inputs(sheet.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("expected 7"));
    }

    #[test]
    fn missing_value_column_is_rejected() {
        let sheet = SHEET.replace("cm,0.03", "cm");
        assert!(read_inputs(sheet.as_bytes()).is_err());
    }
}
