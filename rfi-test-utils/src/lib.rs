//! RFI Test Utilities
//!
//! Shared builders for object-literal data files and proptest strategies used
//! across the RFI crates' tests and benchmarks.

pub mod strategies;

/// How a record's entries are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One entry per line, indented by `indent` spaces
    Multiline {
        /// Indentation of each entry
        indent: usize,
    },
    /// All entries on the record's line: `{ a: 1, b: 2 }`
    Inline,
}

/// Builder for a single object-literal record
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    entries: Vec<(String, String)>,
    layout: Layout,
    trailing_comma: bool,
}

impl RecordBuilder {
    /// Create a new multi-line record builder
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            layout: Layout::Multiline { indent: 2 },
            trailing_comma: true,
        }
    }

    /// Use the given layout
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Whether the last entry ends with a comma
    pub fn trailing_comma(mut self, trailing_comma: bool) -> Self {
        self.trailing_comma = trailing_comma;
        self
    }

    /// Add an entry with a string value
    pub fn string(self, key: &str, value: &str) -> Self {
        let literal = serde_json::to_string(value).expect("string literal");
        self.raw(key, &literal)
    }

    /// Add an entry with an integer value
    pub fn int(self, key: &str, value: i64) -> Self {
        self.raw(key, &value.to_string())
    }

    /// Add an entry with an array of strings
    pub fn strings(self, key: &str, values: &[&str]) -> Self {
        let items: Vec<String> = values
            .iter()
            .map(|v| serde_json::to_string(v).expect("string literal"))
            .collect();
        self.raw(key, &format!("[{}]", items.join(", ")))
    }

    /// Add an entry whose value is literal source text
    pub fn raw(mut self, key: &str, literal: &str) -> Self {
        self.entries.push((key.to_string(), literal.to_string()));
        self
    }

    /// Render the record, with `base_indent` spaces before its braces
    pub fn render(&self, base_indent: usize) -> String {
        let pad = " ".repeat(base_indent);
        let last = self.entries.len().saturating_sub(1);
        let comma = |i: usize| if i < last || self.trailing_comma { "," } else { "" };

        match self.layout {
            Layout::Multiline { indent } => {
                let inner = " ".repeat(base_indent + indent);
                let mut out = format!("{}{{\n", pad);
                for (i, (key, value)) in self.entries.iter().enumerate() {
                    out.push_str(&format!("{}{}: {}{}\n", inner, key, value, comma(i)));
                }
                out.push_str(&format!("{}}}", pad));
                out
            }
            Layout::Inline => {
                let body: Vec<String> = self
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(i, (key, value))| format!("{}: {}{}", key, value, comma(i)))
                    .collect();
                if body.is_empty() {
                    format!("{}{{}}", pad)
                } else {
                    format!("{}{{ {} }}", pad, body.join(" "))
                }
            }
        }
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a TypeScript data module holding an exported record array
#[derive(Debug, Clone)]
pub struct DataFile {
    name: String,
    records: Vec<RecordBuilder>,
    crlf: bool,
}

impl DataFile {
    /// Create a data file exporting `name`
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            records: Vec::new(),
            crlf: false,
        }
    }

    /// Add a record
    pub fn record(mut self, record: RecordBuilder) -> Self {
        self.records.push(record);
        self
    }

    /// Use CRLF line endings
    pub fn crlf(mut self, crlf: bool) -> Self {
        self.crlf = crlf;
        self
    }

    /// Render the module source
    pub fn render(&self) -> String {
        let mut out = format!("export const {} = [\n", self.name);
        for record in &self.records {
            out.push_str(&record.render(2));
            out.push_str(",\n");
        }
        out.push_str("];\n");
        if self.crlf {
            out.replace('\n', "\r\n")
        } else {
            out
        }
    }
}

/// Canned data files modelled on the personalities data module
pub struct TestDataGenerator;

impl TestDataGenerator {
    /// Module with an interface, two anchored records and one without anchor
    pub fn personalities() -> String {
        let records = DataFile::new("personalities")
            .record(
                RecordBuilder::new()
                    .string("id", "kalam")
                    .string("name", "A. P. J. Abdul Kalam")
                    .string("authorName", "Old Author")
                    .strings("achievements", &["Bharat Ratna", "Missile Man of India"])
                    .string("quote", "Dream, dream, dream."),
            )
            .record(
                RecordBuilder::new()
                    .string("id", "chawla")
                    .string("name", "Kalpana Chawla")
                    .raw("achievements", "[\n      \"First Indian woman in space\",\n      [\"STS-87\", \"STS-107\"],\n    ]"),
            )
            .record(
                RecordBuilder::new()
                    .string("id", "tagore")
                    .string("name", "Rabindranath Tagore")
                    .string("authorName", "Keep Me"),
            )
            .render();

        format!(
            "export interface Personality {{\n  id: string;\n  name: string;\n  achievements?: string[];\n  authorName?: string;\n  authorLinkedin?: string;\n}}\n\n{}",
            records
        )
    }

    /// Large module for benchmarks: `count` multi-line records
    pub fn large_module(count: usize) -> String {
        let mut file = DataFile::new("people");
        for i in 0..count {
            let mut record = RecordBuilder::new()
                .string("id", &format!("person-{}", i))
                .string("name", &format!("Person {}", i));
            if i % 10 != 0 {
                record = record.raw(
                    "achievements",
                    &format!("[\"award {}\", [\"nested\", \"{}\"]]", i, i % 7),
                );
            }
            if i % 3 == 0 {
                record = record.string("authorName", "Stale");
            }
            file = file.record(record);
        }
        file.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiline_record_renders_one_entry_per_line() {
        let rendered = RecordBuilder::new()
            .string("name", "X")
            .strings("achievements", &["a", "b"])
            .render(2);
        assert_eq!(
            rendered,
            "  {\n    name: \"X\",\n    achievements: [\"a\", \"b\"],\n  }"
        );
    }

    #[test]
    fn inline_record_without_trailing_comma() {
        let rendered = RecordBuilder::new()
            .layout(Layout::Inline)
            .trailing_comma(false)
            .string("name", "X")
            .int("rank", 1)
            .render(0);
        assert_eq!(rendered, "{ name: \"X\", rank: 1 }");
    }

    #[test]
    fn crlf_files_use_crlf_throughout() {
        let rendered = DataFile::new("xs")
            .crlf(true)
            .record(RecordBuilder::new().int("id", 1))
            .render();
        assert!(!rendered.replace("\r\n", "").contains('\n'));
    }
}
