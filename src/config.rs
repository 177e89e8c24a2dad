use std::path::PathBuf;

use anyhow::Result;
use const_format::concatcp;
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::default_colors::*;

pub const API_PREFIX: &str = "/api";
pub const BOOKS_PATH: &str = concatcp!(API_PREFIX, "/books");
pub const EDITOR_BOOKS_PATH: &str = concatcp!(API_PREFIX, "/editor/books");

const USER_CONFIG: &str = "~/.config/bookgrid/config.toml";
const LOCAL_CONFIG: &str = "bookgrid.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    bold:   bool,
    italic: bool,
    color:  crossterm::style::Color,
}

impl StyleConfig {
    fn style(&self, s: impl ToString) -> String {
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }

    fn colored(color: crossterm::style::Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

pub trait Styleable {
    fn style(&self, c: &StyleConfig) -> String;
}

impl<T> Styleable for T
where
    T: ToString + std::fmt::Display,
{
    fn style(&self, c: &StyleConfig) -> String {
        c.style(self)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

/// Decoration around a single line of output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub style_description: StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    pub fn format(&self, content: impl ToString) -> String {
        let description = self.description.style(&self.style_description);
        let content = content.to_string().style(&self.style_content);
        if self.description.is_empty() {
            format!("{}{content}{}", self.prefix, self.suffix)
        } else {
            format!("{}{description} {content}{}", self.prefix, self.suffix)
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix:            "".into(),
            suffix:            "".into(),
            description:       "".into(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_content:     StyleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Scheme, host and port of the catalog service.
    pub base_url:      String,
    pub books_path:    String,
    pub editor_path:   String,
    pub page_length:   u32,
    /// Disables create/edit/remove when false, as if no editor were installed.
    pub editing:       bool,
    pub history_file:  String,
    pub output_header: OutputConfig,
    pub output_row_id: OutputConfig,
    pub output_notice: OutputConfig,
    pub output_error:  OutputConfig,
    pub output_status: OutputConfig,
    pub style_title:   StyleConfig,
    pub style_author:  StyleConfig,
    pub style_date:    StyleConfig,
    pub style_themes:  StyleConfig,
    pub style_pages:   StyleConfig,
    pub style_rating:  StyleConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    pub fn read_config() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(shellexpand::tilde(USER_CONFIG).as_ref()))
            .merge(Toml::file(LOCAL_CONFIG))
            .merge(Env::prefixed("BOOKGRID_"))
    }

    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.history_file).as_ref())
    }

    /// Cell style of a grid column, keyed by the column's data path.
    pub fn column_style(&self, data: &str) -> &StyleConfig {
        match data {
            "Title" => &self.style_title,
            "Author" => &self.style_author,
            "PublisherInfo.Date" => &self.style_date,
            "Themes" => &self.style_themes,
            "Pages" => &self.style_pages,
            "Rating" => &self.style_rating,
            _ => &self.output_header.style_content,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url:      "http://localhost:5000".into(),
            books_path:    BOOKS_PATH.into(),
            editor_path:   EDITOR_BOOKS_PATH.into(),
            page_length:   10,
            editing:       true,
            history_file:  "~/.local/share/bookgrid/history.txt".into(),
            output_header: OutputConfig {
                style_content: StyleConfig {
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_row_id: OutputConfig {
                prefix: "(".into(),
                suffix: ")".into(),
                style_content: StyleConfig::colored(COLOR_DIMMED),
                ..OutputConfig::default()
            },
            output_notice: OutputConfig {
                prefix: "[".into(),
                suffix: "]".into(),
                description: "Notice:".into(),
                style_content: StyleConfig::colored(COLOR_NOTICE),
                ..OutputConfig::default()
            },
            output_error:  OutputConfig {
                description: "Error:".into(),
                style_content: StyleConfig::colored(COLOR_ERROR),
                ..OutputConfig::default()
            },
            output_status: OutputConfig {
                style_content: StyleConfig::colored(COLOR_DIMMED),
                ..OutputConfig::default()
            },
            style_title:   StyleConfig {
                bold: true,
                ..StyleConfig::colored(COLOR_TITLE)
            },
            style_author:  StyleConfig::colored(COLOR_AUTHOR),
            style_date:    StyleConfig::colored(COLOR_DATE),
            style_themes:  StyleConfig::colored(COLOR_THEMES),
            style_pages:   StyleConfig::colored(COLOR_PAGES),
            style_rating:  StyleConfig::colored(COLOR_RATING),
        }
    }
}
