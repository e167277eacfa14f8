// ============================================================
// CSV PARSER
// ============================================================
// Parse FAQ spreadsheets: question,answer,category,keywords

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::error::AppError;

const QUESTION_COLUMN: &str = "question";
const ANSWER_COLUMN: &str = "answer";
const CATEGORY_COLUMN: &str = "category";
const KEYWORDS_COLUMN: &str = "keywords";

/// One data row, columns resolved but not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqCsvRow {
    /// Row index (0-based, header excluded)
    pub index: usize,
    pub question: String,
    pub answer: String,
    pub category: String,
    /// Raw keyword cell, still `;`-delimited
    pub keywords: String,
}

/// Column positions for the four known fields.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    question: usize,
    answer: usize,
    category: usize,
    keywords: usize,
}

impl ColumnMap {
    /// Known header names win; without them the columns are positional.
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };

        match (find(QUESTION_COLUMN), find(ANSWER_COLUMN)) {
            (Some(question), Some(answer)) => Self {
                question,
                answer,
                category: find(CATEGORY_COLUMN).unwrap_or(usize::MAX),
                keywords: find(KEYWORDS_COLUMN).unwrap_or(usize::MAX),
            },
            _ => Self {
                question: 0,
                answer: 1,
                category: 2,
                keywords: 3,
            },
        }
    }
}

/// CSV parser for FAQ imports
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse CSV content. The first line is always the header row.
    pub fn parse_content(&self, content: &str) -> Result<Vec<FaqCsvRow>, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Short rows are dropped later, not rejected here
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();
        let columns = ColumnMap::from_headers(&headers);

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::parse_row(index, columns, &record));
        }

        Ok(rows)
    }

    fn parse_row(index: usize, columns: ColumnMap, record: &StringRecord) -> FaqCsvRow {
        let cell = |position: usize| record.get(position).unwrap_or("").trim().to_string();

        FaqCsvRow {
            index,
            question: cell(columns.question),
            answer: cell(columns.answer),
            category: cell(columns.category),
            keywords: cell(columns.keywords),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_columns() {
        let content = "question,answer,category,keywords\n\
                       Do you ship?,Yes,shipping,ship;delivery\n";
        let rows = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question, "Do you ship?");
        assert_eq!(rows[0].answer, "Yes");
        assert_eq!(rows[0].category, "shipping");
        assert_eq!(rows[0].keywords, "ship;delivery");
    }

    #[test]
    fn test_columns_resolved_by_header_name() {
        let content = "Keywords,Answer,Question\nrefund,Thirty days,Returns?\n";
        let rows = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(rows[0].question, "Returns?");
        assert_eq!(rows[0].answer, "Thirty days");
        assert_eq!(rows[0].keywords, "refund");
        assert_eq!(rows[0].category, "");
    }

    #[test]
    fn test_unknown_headers_fall_back_to_positions() {
        let content = "q,a,c,k\nHi?,Hello,general,greet\n";
        let rows = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(rows[0].question, "Hi?");
        assert_eq!(rows[0].keywords, "greet");
    }

    #[test]
    fn test_short_rows_yield_empty_cells() {
        let content = "question,answer,category,keywords\nOnly a question\n";
        let rows = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].answer, "");
    }

    #[test]
    fn test_quoted_cells_keep_commas() {
        let content = "question,answer\n\"Hours, please?\",\"9, to 6\"\n";
        let rows = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(rows[0].question, "Hours, please?");
        assert_eq!(rows[0].answer, "9, to 6");
    }

    #[test]
    fn test_custom_delimiter() {
        let content = "question|answer\nA?|B\n";
        let rows = CsvParser::new()
            .with_delimiter(b'|')
            .parse_content(content)
            .unwrap();
        assert_eq!(rows[0].answer, "B");
    }
}
