use std::borrow::Cow;

use reedline::{
    Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, PromptViMode,
};

/// Shows where in the catalog the session is, e.g. `page 2/6` or `read-only`.
#[derive(Default)]
pub struct BookgridPrompt {
    pub position: String,
}

impl Prompt for BookgridPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed("Bookgrid ")
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed(&self.position)
    }

    fn render_prompt_indicator(&self, prompt_mode: PromptEditMode) -> Cow<str> {
        match prompt_mode {
            PromptEditMode::Default | PromptEditMode::Emacs => "> ".into(),
            PromptEditMode::Vi(PromptViMode::Normal) => "> ".into(),
            PromptEditMode::Vi(PromptViMode::Insert) => ": ".into(),
            PromptEditMode::Custom(str) => format!("({str})").into(),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed(":> ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({prefix}reverse-search: {}) ", history_search.term))
    }
}
