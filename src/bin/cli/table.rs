use bookgrid::{
    config::{Config, Styleable},
    grid::{Column, RenderedRow},
    types::{
        book::Book,
        date::{format_long, parse_date},
    },
};

const MAX_CELL_WIDTH: usize = 36;

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        cell.to_string()
    } else {
        let mut s: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
        s.push('…');
        s
    }
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
}

/// Lays out a page as aligned columns, styling each cell by its column.
pub fn render_table(columns: &[Column], rows: &[RenderedRow], config: &Config) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.cells.iter().map(|c| truncate(c)).collect())
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(c.title.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| pad(&c.title, *w))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&config.output_header.format(header));
    out.push('\n');
    for (row, cells) in rows.iter().zip(&cells) {
        let line = columns
            .iter()
            .zip(&widths)
            .zip(cells)
            .map(|((c, w), cell)| pad(cell, *w).style(config.column_style(&c.data)))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(&line);
        if let Some(id) = &row.id {
            out.push_str("  ");
            out.push_str(&config.output_row_id.format(id));
        }
        out.push('\n');
    }
    out
}

/// Every field of one record, one per line.
pub fn render_book(book: &Book, config: &Config) -> String {
    let published = book
        .publisher_info
        .date
        .as_deref()
        .map(|d| match parse_date(d) {
            Some(date) => format_long(date),
            None => d.to_string(),
        })
        .unwrap_or_default();
    let lines = [
        ("Title", book.title.style(&config.style_title)),
        ("Author", book.author.style(&config.style_author)),
        ("Published", published.style(&config.style_date)),
        (
            "Pages",
            book.pages
                .map(|p| p.to_string())
                .unwrap_or_default()
                .style(&config.style_pages),
        ),
        ("Themes", book.themes.join(", ").style(&config.style_themes)),
        (
            "Rating",
            book.rating
                .map(|r| r.label())
                .unwrap_or_default()
                .style(&config.style_rating),
        ),
        (
            "Description",
            book.description.clone().unwrap_or_default(),
        ),
    ];
    let mut out = String::new();
    for (label, value) in lines {
        out.push_str(&format!("{label:>12}: {value}\n"));
    }
    if let Some(id) = &book.row_id {
        out.push_str(&config.output_row_id.format(id));
        out.push('\n');
    }
    out
}
