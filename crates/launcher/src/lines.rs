//! Tab-separated candidate lines: `score, url, [tags], id`.

/// One ranked link as offered to the selector.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub score: f64,
    pub url: &'a str,
    pub tags: &'a [String],
    pub id: &'a str,
}

impl Candidate<'_> {
    pub fn to_line(&self) -> String {
        let tags: Vec<String> = self.tags.iter().map(|t| clean(t)).collect();
        format!(
            "{:.2}\t{}\t[{}]\t{}",
            self.score,
            clean(self.url),
            tags.join(","),
            clean(self.id)
        )
    }
}

/// What the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub url: String,
    /// Missing when the line did not come from [`Candidate::to_line`].
    pub id: Option<String>,
}

pub fn parse_selection(line: &str) -> Option<Selection> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields = line.split('\t');
    let _score = fields.next()?;
    let url = fields.next()?.trim();
    if url.is_empty() {
        return None;
    }
    let _tags = fields.next();
    let id = fields
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Some(Selection {
        url: url.to_string(),
        id,
    })
}

// Tabs and newlines would break the line format.
fn clean(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}
