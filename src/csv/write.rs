//! CSV writing helpers used for maintaining the site's data files.
//!
//! Writing goes through the `csv` crate so that quoting matches what spreadsheet tools
//! and the parser in this crate expect.

use csv::{QuoteStyle, ReaderBuilder, Terminator, Writer, WriterBuilder};

use crate::csv::CsvConfig;
use crate::{Result, SiteError};

/// Encodes a single value as a CSV field.
///
/// The value is quoted when it contains the delimiter, a quote or a line break, or
/// when it has leading or trailing whitespace that [`CsvParser`](crate::csv::CsvParser)
/// would otherwise trim. Internal quotes are doubled.
///
/// # Examples
///
/// ```
/// use labsite::csv::{encode_field, CsvConfig};
///
/// let config = CsvConfig::new();
/// assert_eq!(encode_field("Kim, J.", &config).unwrap(), "\"Kim, J.\"");
/// assert_eq!(encode_field("plain", &config).unwrap(), "plain");
/// ```
pub fn encode_field(value: &str, config: &CsvConfig) -> Result<String> {
    let style = if value.trim() != value {
        QuoteStyle::Always
    } else {
        QuoteStyle::Necessary
    };
    let mut writer = writer_for(config, style)?;
    // the closing quote is only written together with the record terminator
    writer.write_record([value])?;
    let mut encoded = into_string(writer)?;
    if encoded.ends_with('\n') {
        encoded.pop();
    }
    Ok(encoded)
}

/// Appends `column` to the header row when it is missing and pads every data row
/// with empty fields up to the header width.
///
/// Existing values are written back unchanged (re-quoted where needed). Empty input
/// yields empty output.
///
/// # Errors
///
/// Returns [`SiteError::Csv`] when the input cannot be read by the `csv` crate, and
/// [`SiteError::InvalidDelimiter`] when the configured delimiter is not ASCII.
pub fn add_column(csv_text: &str, column: &str, config: &CsvConfig) -> Result<String> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter_byte(config)?)
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_text.as_bytes());
    let mut records = reader.records();

    let Some(header) = records.next().transpose()? else {
        return Ok(String::new());
    };
    let mut header: Vec<String> = header.iter().map(String::from).collect();
    if !header.iter().any(|name| name.trim() == column) {
        header.push(column.to_string());
    }

    let mut writer = writer_for(config, QuoteStyle::Necessary)?;
    writer.write_record(&header)?;
    for record in records {
        let record = record?;
        let mut fields: Vec<&str> = record.iter().collect();
        if fields.len() < header.len() {
            fields.resize(header.len(), "");
        }
        writer.write_record(&fields)?;
    }

    into_string(writer)
}

fn delimiter_byte(config: &CsvConfig) -> Result<u8> {
    u8::try_from(config.delimiter())
        .ok()
        .filter(u8::is_ascii)
        .ok_or(SiteError::InvalidDelimiter(config.delimiter()))
}

fn writer_for(config: &CsvConfig, style: QuoteStyle) -> Result<Writer<Vec<u8>>> {
    Ok(WriterBuilder::new()
        .delimiter(delimiter_byte(config)?)
        .quote_style(style)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new()))
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| SiteError::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("plain", "plain")]
    #[case("a,b", "\"a,b\"")]
    #[case("He said \"hi\"", "\"He said \"\"hi\"\"\"")]
    #[case("two\nlines", "\"two\nlines\"")]
    #[case(" padded ", "\" padded \"")]
    #[case("Kim, J.", "\"Kim, J.\"")]
    fn test_encode_field(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(encode_field(value, &CsvConfig::new()).unwrap(), expected);
    }

    #[test]
    fn test_encoded_field_is_closed() {
        let config = CsvConfig::new();
        let line = [
            encode_field("a,b", &config).unwrap(),
            encode_field("c", &config).unwrap(),
        ]
        .join(",");
        assert_eq!(line, "\"a,b\",c");
    }

    #[test]
    fn test_add_column_pads_rows() {
        let input = "title,year\nA,2021\nB\n";
        let output = add_column(input, "thumbnail", &CsvConfig::new()).unwrap();
        assert_eq!(output, "title,year,thumbnail\nA,2021,\nB,,\n");
    }

    #[test]
    fn test_add_column_keeps_existing_column() {
        let input = "title,thumbnail\nA,a.png\n";
        let output = add_column(input, "thumbnail", &CsvConfig::new()).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_add_column_preserves_quoted_values() {
        let input = "title,authors\n\"A, B\",\"**K. Kim**, \"\"J\"\"\"\n";
        let output = add_column(input, "thumbnail", &CsvConfig::new()).unwrap();
        assert_eq!(
            output,
            "title,authors,thumbnail\n\"A, B\",\"**K. Kim**, \"\"J\"\"\",\n"
        );
    }

    #[test]
    fn test_add_column_empty_input() {
        assert_eq!(add_column("", "thumbnail", &CsvConfig::new()).unwrap(), "");
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let mut config = CsvConfig::new();
        config.set_delimiter('·');
        assert!(matches!(
            add_column("a", "b", &config),
            Err(SiteError::InvalidDelimiter('·'))
        ));
    }
}
