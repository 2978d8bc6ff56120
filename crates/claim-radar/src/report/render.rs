use serde::Serialize;

use super::document::ReportDocument;

const DEFAULT_LINES_PER_PAGE: usize = 56;
const DEFAULT_WIDTH: usize = 78;
const MIN_LINES_PER_PAGE: usize = 12;
const MIN_WIDTH: usize = 20;
const PAGE_BREAK: &str = "\u{c}";

/// Fixed page geometry for the text report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    lines_per_page: usize,
    width: usize,
}

impl PageLayout {
    /// Out-of-range dimensions fall back to the defaults.
    pub fn new(lines_per_page: usize, width: usize) -> Self {
        Self {
            lines_per_page: if lines_per_page < MIN_LINES_PER_PAGE {
                DEFAULT_LINES_PER_PAGE
            } else {
                lines_per_page
            },
            width: if width < MIN_WIDTH {
                DEFAULT_WIDTH
            } else {
                width
            },
        }
    }

    pub fn lines_per_page(&self) -> usize {
        self.lines_per_page
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new(DEFAULT_LINES_PER_PAGE, DEFAULT_WIDTH)
    }
}

/// Report laid out as equally tall pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedReport {
    pub pages: Vec<String>,
}

impl RenderedReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages joined by form feeds, ready to print or save.
    pub fn to_text(&self) -> String {
        self.pages.join(PAGE_BREAK)
    }
}

pub fn render(document: &ReportDocument, layout: PageLayout) -> RenderedReport {
    let width = layout.width();
    let body: Vec<String> = document
        .body_lines()
        .iter()
        .flat_map(|line| wrap(line, width))
        .collect();

    let mut footer_text = vec!["-".repeat(width)];
    footer_text.extend(wrap(&document.footer.tagline, width));
    footer_text.extend(wrap(&document.footer.contact, width));
    footer_text.extend(wrap(document.footer.disclaimer, width));
    let footer_height = footer_text.len() + 1;
    let body_height = layout
        .lines_per_page()
        .saturating_sub(footer_height)
        .max(1);

    let chunks: Vec<&[String]> = body.chunks(body_height).collect();
    let total = chunks.len().max(1);
    let pages = (0..total)
        .map(|index| {
            let chunk = chunks.get(index).copied().unwrap_or(&[]);
            let mut page = String::new();
            for line in chunk {
                push_line(&mut page, line);
            }
            for _ in chunk.len()..body_height {
                page.push('\n');
            }
            for line in &footer_text {
                push_line(&mut page, line);
            }
            push_line(&mut page, &format!("Page {} of {}", index + 1, total));
            page
        })
        .collect();

    RenderedReport { pages }
}

fn push_line(page: &mut String, line: &str) {
    page.push_str(line);
    page.push('\n');
}

/// Greedy word wrap that keeps the line's leading indentation on continuation lines.
fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }

    let indent: String = line.chars().take_while(|c| *c == ' ').collect();
    let room = width.saturating_sub(indent.len()).max(1);
    let mut wrapped = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > room {
            if !current.is_empty() {
                wrapped.push(format!("{indent}{current}"));
                current.clear();
            }
            let head: String = word.chars().take(room).collect();
            word = word.chars().skip(room).collect();
            wrapped.push(format!("{indent}{head}"));
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > room {
            wrapped.push(format!("{indent}{current}"));
            current = word;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
    }
    if !current.is_empty() {
        wrapped.push(format!("{indent}{current}"));
    }
    wrapped
}
