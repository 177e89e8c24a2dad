use anyhow::Result;
use bookgrid::{
    editor::{
        fields::{FieldKind, FieldSpec, SelectOption},
        EditForm,
    },
    types::{
        date::parse_date,
        row::value_as_text,
    },
};
use inquire::{validator::Validation, CustomUserError};
use serde_json::{json, Value};

fn validate_pages(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().is_empty() || input.trim().parse::<u32>().is_ok() {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid(
            inquire::validator::ErrorMessage::Custom("Input isn't a valid number".to_string()),
        ))
    }
}

/// Walks every field of the form, prompting with the current value preselected.
pub fn fill_form(form: &mut EditForm, fields: &[FieldSpec]) -> Result<()> {
    for field in fields {
        let current = form.get(field.name).cloned().unwrap_or(Value::Null);
        let value = prompt_field(field, &current)?;
        form.set(field.name, value);
    }
    Ok(())
}

fn prompt_field(field: &FieldSpec, current: &Value) -> Result<Value> {
    let text = value_as_text(current);
    Ok(match &field.kind {
        FieldKind::Text => json!(inquire::Text::new(field.label)
            .with_initial_value(&text)
            .prompt()?),
        FieldKind::Number => json!(inquire::Text::new(field.label)
            .with_initial_value(&text)
            .with_validator(validate_pages)
            .prompt()?
            .trim()),
        FieldKind::Datetime { format } => {
            let mut prompt = inquire::DateSelect::new(field.label);
            if let Some(date) = parse_date(&text) {
                prompt = prompt.with_starting_date(date);
            }
            match prompt.prompt_skippable()? {
                Some(date) => json!(date.format(format).to_string()),
                None => json!(text),
            }
        }
        FieldKind::Select {
            options,
            multiple: true,
        } => {
            let selected = selected_values(current);
            let defaults: Vec<usize> = options
                .iter()
                .enumerate()
                .filter(|(_, o)| selected.contains(&o.value))
                .map(|(i, _)| i)
                .collect();
            let chosen = inquire::MultiSelect::new(field.label, labels(options))
                .with_default(&defaults)
                .prompt()?;
            json!(values_for(options, &chosen))
        }
        FieldKind::Select {
            options,
            multiple: false,
        } => {
            let cursor = options
                .iter()
                .position(|o| o.value == text || o.label == text)
                .unwrap_or(0);
            let chosen = inquire::Select::new(field.label, labels(options))
                .with_starting_cursor(cursor)
                .prompt()?;
            json!(values_for(options, &[chosen]).pop().unwrap_or_default())
        }
        FieldKind::Textarea => json!(inquire::Editor::new(field.label)
            .with_predefined_text(&text)
            .prompt()?
            .trim_end()),
    })
}

fn labels(options: &[SelectOption]) -> Vec<String> {
    options.iter().map(|o| o.label.clone()).collect()
}

fn values_for(options: &[SelectOption], labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .filter_map(|l| options.iter().find(|o| &o.label == l))
        .map(|o| o.value.clone())
        .collect()
}

fn selected_values(current: &Value) -> Vec<String> {
    match current {
        Value::Array(items) => items.iter().map(value_as_text).collect(),
        Value::String(s) if !s.is_empty() => s.split(',').map(|s| s.trim().to_string()).collect(),
        _ => vec![],
    }
}
