//! Server-side processing protocol: what the grid asks for and what comes back.

use serde::{Deserialize, Serialize};

use crate::{error::GridError, grid::config::Column, types::row::Row};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Search {
    pub value: String,
    pub regex: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub column: usize,
    pub dir:    SortDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRequest {
    pub data:       String,
    pub name:       String,
    pub searchable: bool,
    pub orderable:  bool,
    pub search:     Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRequest {
    pub draw:    u64,
    pub columns: Vec<ColumnRequest>,
    pub order:   Vec<Order>,
    pub start:   u64,
    pub length:  u64,
    pub search:  Search,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerResponse {
    #[serde(default)]
    pub draw:             u64,
    #[serde(rename = "recordsTotal", default)]
    pub records_total:    u64,
    #[serde(rename = "recordsFiltered", default)]
    pub records_filtered: u64,
    #[serde(default)]
    pub data:             Vec<Row>,
    #[serde(default)]
    pub error:            Option<String>,
}

/// Paging, ordering and filtering the grid currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    pub draw:   u64,
    pub start:  u64,
    pub length: u64,
    pub search: String,
    pub order:  Vec<Order>,
}

impl GridState {
    pub fn new(length: u64) -> Self {
        Self {
            draw: 0,
            start: 0,
            length,
            search: String::new(),
            order: vec![Order {
                column: 0,
                dir:    SortDir::Asc,
            }],
        }
    }

    /// Zero-based index of the page `start` falls on.
    pub fn page_index(&self) -> u64 {
        if self.length == 0 {
            0
        } else {
            self.start / self.length
        }
    }

    /// Moves `start` to the zero-based page `index`.
    pub fn seek(&mut self, index: u64) -> Result<(), GridError> {
        self.start = index
            .checked_mul(self.length)
            .ok_or(GridError::PageOutOfRange(index))?;
        Ok(())
    }

    pub fn to_request(&self, columns: &[Column]) -> ServerRequest {
        ServerRequest {
            draw:    self.draw,
            columns: columns
                .iter()
                .map(|c| ColumnRequest {
                    data:       c.data.clone(),
                    name:       String::new(),
                    searchable: true,
                    orderable:  true,
                    search:     Search::default(),
                })
                .collect(),
            order:   self.order.clone(),
            start:   self.start,
            length:  self.length,
            search:  Search {
                value: self.search.clone(),
                regex: false,
            },
        }
    }
}

/// One page as returned by the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub draw:             u64,
    pub records_total:    u64,
    pub records_filtered: u64,
    pub rows:             Vec<Row>,
}

impl Page {
    pub fn page_count(&self, length: u64) -> u64 {
        if length == 0 {
            return 1;
        }
        self.records_filtered.div_ceil(length).max(1)
    }
}
