use std::io::Write;

use crate::{
    grid::{GridSession, RenderedRow},
    traits::Transport,
};

/// The current page as the export buttons see it: column titles and rendered cells.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Export {
    headers: Vec<String>,
    rows:    Vec<Vec<String>>,
}

impl Export {
    pub fn new<T: Transport>(session: &GridSession<T>) -> Self {
        Self {
            headers: session
                .config()
                .columns
                .iter()
                .map(|c| c.title.clone())
                .collect(),
            rows:    session
                .rendered_rows()
                .into_iter()
                .map(|RenderedRow { cells, .. }| cells)
                .collect(),
        }
    }

    pub fn from_parts(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)?;
        for record in &self.rows {
            wtr.write_record(record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Tab separated, one line per row, the way a copy to clipboard lays it out.
    pub fn to_copy_text(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|r| r.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
