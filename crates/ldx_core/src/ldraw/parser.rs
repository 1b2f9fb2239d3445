//! LDraw model document parser.
//!
//! Reads a single-model `.ldr` file or a multi-part `.mpd` document into a
//! tree of [`ModelNode`]s: the main model at the root and every inline
//! sub-model in `root.children`.
//!
//! # Document layout
//!
//! ```text
//! 0 FILE main.ldr          <- header: names the main model
//! 1 4 0 0 0 1 0 0 0 1 0 0 0 1 wing.ldr
//! 0 NOFILE                 <- section ends, a new header must follow
//! 0 FILE wing.ldr          <- header: opens an inline model
//! 1 16 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
//! 0 FILE tail.ldr          <- body FILE marker: opens the next inline model
//! ```
//!
//! Only type-1 lines contribute to the usage tables; references to
//! primitives are dropped since they never appear in a bill of materials.

use std::path::Path;

use super::database::ReferenceDatabase;
use super::error::{LdrawError, LdrawResult};
use super::library::read_lossy;
use super::tokens::{parse_color, records, reference_filename, Record};
use super::types::{normalize_filename, strip_extension, ModelNode};

/// Byte order mark some editors put in front of the first line.
const BOM: char = '\u{feff}';

/// Where part lines currently go.
enum Target {
    Main,
    Child(String),
}

/// Parser state for one document.
struct DocumentParser<'a> {
    file: &'a str,
    database: &'a ReferenceDatabase,
    root: ModelNode,
    target: Target,
    /// Waiting for the line that names the next model
    expecting_header: bool,
    /// No model has been named yet
    first_model: bool,
}

impl<'a> DocumentParser<'a> {
    fn new(file: &'a str, database: &'a ReferenceDatabase) -> Self {
        Self {
            file,
            database,
            root: ModelNode::default(),
            target: Target::Main,
            expecting_header: true,
            first_model: true,
        }
    }

    fn parse(mut self, content: &str) -> LdrawResult<ModelNode> {
        let content = content.strip_prefix(BOM).unwrap_or(content);

        for record in records(content, self.file) {
            let record = record?;

            if self.expecting_header {
                self.header(&record)?;
            } else {
                self.body(&record)?;
            }
        }

        log::debug!(
            "Parsed {}: main model {:?} with {} placements, {} inline models",
            self.file,
            self.root.name,
            self.root.placement_count(),
            self.root.children.len()
        );
        Ok(self.root)
    }

    /// A header line names a model: `0 FILE <name>` or `0 <name>`.
    fn header(&mut self, record: &Record) -> LdrawResult<()> {
        if record.command() != "0" || record.fields.len() < 2 {
            return Err(LdrawError::HeaderExpected {
                file: self.file.to_string(),
                line: record.line,
            });
        }

        let name = if record.fields[1] == "FILE" && record.fields.len() >= 3 {
            record.fields[2..].join(" ")
        } else {
            record.fields[1..].join(" ")
        };
        self.open_model(&name);
        self.expecting_header = false;
        Ok(())
    }

    fn body(&mut self, record: &Record) -> LdrawResult<()> {
        match record.command() {
            "0" => match record.fields.get(1).copied() {
                Some("NOFILE") => {
                    self.expecting_header = true;
                }
                Some("FILE") if record.fields.len() >= 3 => {
                    self.open_model(&record.fields[2..].join(" "));
                }
                _ => {}
            },
            "1" => self.part_line(record)?,
            _ => {}
        }
        Ok(())
    }

    /// Model names are normalized like reference filenames so usages find
    /// their inline model.
    fn open_model(&mut self, name: &str) {
        let name = normalize_filename(name);
        if self.first_model {
            self.first_model = false;
            self.root.name = name;
            self.target = Target::Main;
        } else {
            self.root
                .children
                .entry(name.clone())
                .or_insert_with(|| ModelNode::new(name.clone()));
            self.target = Target::Child(name);
        }
    }

    /// Fold a type-1 line into the current model's usage table.
    fn part_line(&mut self, record: &Record) -> LdrawResult<()> {
        let Some(filename) = reference_filename(record) else {
            return Ok(());
        };

        if self.database.is_primitive(&filename) {
            return Ok(());
        }

        let id = if self.database.is_part(&filename) {
            strip_extension(&filename)
        } else {
            // Inline sub-model or custom part
            filename.as_str()
        };
        let color = parse_color(self.file, record.line, record.fields[1])?;

        let model = match &self.target {
            Target::Main => &mut self.root,
            Target::Child(name) => self
                .root
                .children
                .entry(name.clone())
                .or_insert_with(|| ModelNode::new(name.clone())),
        };
        model.add_part(id, color);
        Ok(())
    }
}

/// Parse an LDraw document held in memory. `file` names it in errors.
pub fn parse_document(content: &str, file: &str, database: &ReferenceDatabase) -> LdrawResult<ModelNode> {
    DocumentParser::new(file, database).parse(content)
}

/// Read and parse an LDraw document from disk.
pub fn parse_document_file<P: AsRef<Path>>(path: P, database: &ReferenceDatabase) -> LdrawResult<ModelNode> {
    let path = path.as_ref();
    let content = read_lossy(path)?;
    parse_document(&content, &path.to_string_lossy(), database)
}
