//! Line tokenizing shared by the document parser and the geometry resolver.
//!
//! LDraw lines are whitespace (or tab) separated records whose first field is
//! the command code. Line numbers reported in errors are 1-based.

use ldx_math::{from_ldraw_fields, DMat4, DVec3, LDRAW_TRANSFORM_FIELDS};

use super::error::{LdrawError, LdrawResult};
use super::types::{normalize_filename, ColorCode};

/// A type-1 line needs the code, a color, 12 placement fields and a filename.
pub const MIN_REFERENCE_FIELDS: usize = 15;

/// Index of the first filename field on a type-1 line.
const FILENAME_FIELD: usize = 14;

/// A non-blank line split into fields.
#[derive(Debug)]
pub struct Record<'a> {
    /// 1-based line number
    pub line: usize,

    /// The line with surrounding whitespace removed
    pub text: &'a str,

    /// Whitespace separated fields; never empty
    pub fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    /// Command code (first field).
    pub fn command(&self) -> &'a str {
        self.fields[0]
    }
}

/// Iterate over the non-blank lines of `content`.
///
/// A line that is not blank but still yields no fields is a format error.
pub fn records<'a>(content: &'a str, file: &'a str) -> impl Iterator<Item = LdrawResult<Record<'a>>> + 'a {
    content.lines().enumerate().filter_map(move |(i, raw)| {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.is_empty() {
            return Some(Err(LdrawError::format(file, i + 1, format!("{:?}", text))));
        }

        Some(Ok(Record {
            line: i + 1,
            text,
            fields,
        }))
    })
}

/// Referenced filename of a type-1 record, normalized for library lookup.
///
/// The filename is the remainder of the line and may contain spaces.
/// Returns `None` for records too short to carry a reference.
pub fn reference_filename(record: &Record) -> Option<String> {
    if record.fields.len() < MIN_REFERENCE_FIELDS {
        return None;
    }
    Some(normalize_filename(&record.fields[FILENAME_FIELD..].join(" ")))
}

/// Parse a single floating point field.
pub fn parse_number(file: &str, line: usize, field: &str) -> LdrawResult<f64> {
    field
        .parse::<f64>()
        .map_err(|_| LdrawError::format(file, line, format!("invalid number {:?}", field)))
}

/// Parse a color code, accepting decimal codes and `0x`-prefixed direct colors.
pub fn parse_color(file: &str, line: usize, field: &str) -> LdrawResult<ColorCode> {
    let parsed = match field.strip_prefix("0x").or_else(|| field.strip_prefix("0X")) {
        Some(hex) => ColorCode::from_str_radix(hex, 16),
        None => field.parse::<ColorCode>(),
    };
    parsed.map_err(|_| LdrawError::format(file, line, format!("invalid color {:?}", field)))
}

/// Placement transform of a type-1 record.
pub fn parse_transform(file: &str, record: &Record) -> LdrawResult<DMat4> {
    if record.fields.len() < 2 + LDRAW_TRANSFORM_FIELDS {
        return Err(LdrawError::format(file, record.line, "truncated sub file reference"));
    }

    let mut values = [0.0; LDRAW_TRANSFORM_FIELDS];
    for (value, field) in values.iter_mut().zip(&record.fields[2..2 + LDRAW_TRANSFORM_FIELDS]) {
        *value = parse_number(file, record.line, field)?;
    }
    Ok(from_ldraw_fields(values))
}

/// The `count` vertices of a type-2/3/4 record.
pub fn parse_vertices(file: &str, record: &Record, count: usize) -> LdrawResult<Vec<DVec3>> {
    let needed = 2 + 3 * count;
    if record.fields.len() < needed {
        return Err(LdrawError::format(
            file,
            record.line,
            format!("expected {} vertices in {:?}", count, record.text),
        ));
    }

    record.fields[2..needed]
        .chunks(3)
        .map(|xyz| {
            Ok(DVec3::new(
                parse_number(file, record.line, xyz[0])?,
                parse_number(file, record.line, xyz[1])?,
                parse_number(file, record.line, xyz[2])?,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(content: &str) -> Record<'_> {
        records(content, "test.dat").next().unwrap().unwrap()
    }

    #[test]
    fn test_records_skip_blank_lines_and_count_from_one() {
        let content = "\n0 header\r\n\n\t\n2 24 0 0 0 1 1 1";
        let all: Vec<_> = records(content, "test.dat").map(|r| r.unwrap()).collect();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].line, 2);
        assert_eq!(all[0].fields, vec!["0", "header"]);
        assert_eq!(all[1].line, 5);
        assert_eq!(all[1].command(), "2");
    }

    #[test]
    fn test_tabs_are_separators() {
        let record = single("1\t4\t0 0 0");
        assert_eq!(record.fields, vec!["1", "4", "0", "0", "0"]);
    }

    #[test]
    fn test_reference_filename_with_spaces() {
        let record = single("1 16 0 0 0 1 0 0 0 1 0 0 0 1 My Sub Model.LDR");
        assert_eq!(reference_filename(&record).as_deref(), Some("my sub model.ldr"));
    }

    #[test]
    fn test_short_reference_has_no_filename() {
        let record = single("1 16 0 0 0 1 0 0 0 1 0 0 0");
        assert_eq!(reference_filename(&record), None);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("f", 1, "16").unwrap(), 16);
        assert_eq!(parse_color("f", 1, "0x2FF0000").unwrap(), 0x2FF0000);
        assert!(matches!(
            parse_color("f", 3, "red"),
            Err(LdrawError::Format { line: 3, .. })
        ));
    }

    #[test]
    fn test_parse_vertices() {
        let record = single("3 16 0 0 0 10 0 0 0 10 0");
        let vertices = parse_vertices("f", &record, 3).unwrap();
        assert_eq!(vertices, vec![DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0), DVec3::new(0.0, 10.0, 0.0)]);
    }

    #[test]
    fn test_truncated_vertices_are_fatal() {
        let record = single("4 16 0 0 0 1 1 1");
        assert!(matches!(
            parse_vertices("quad.dat", &record, 4),
            Err(LdrawError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn test_bad_number_is_fatal() {
        let record = single("2 24 0 0 zero 1 1 1");
        assert!(parse_vertices("line.dat", &record, 2).is_err());
    }

    #[test]
    fn test_parse_transform_translation() {
        let record = single("1 4 10 -24 30 1 0 0 0 1 0 0 0 1 3001.dat");
        let m = parse_transform("f", &record).unwrap();
        assert_eq!(m.transform_point3(DVec3::ZERO), DVec3::new(10.0, -24.0, 30.0));
    }
}
