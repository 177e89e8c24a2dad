use std::{env, process::exit};

use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use reedline::Signal;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bookgrid::{
    config::Config,
    editor::{EditForm, EditorResponse},
    error::{EditorError, TransportError},
    export::Export,
    grid::{request::Order, GridSession, SortDir},
    traits::EditorEvents,
    transport::HttpTransport,
    types::book::Book,
};

mod command_parser;
mod form;
mod prompt;
mod repl;
mod table;

/// Reports editor outcomes on the terminal.
struct TerminalEvents<'a> {
    config: &'a Config,
}

impl EditorEvents for TerminalEvents<'_> {
    fn on_init_edit(&mut self, form: &mut EditForm) {
        debug!(row_id = ?form.row_id, "edit form opened");
    }

    fn on_submit_success(&mut self, response: &EditorResponse) {
        match response.rejection() {
            Some(message) => println!("{}", self.config.output_error.format(message)),
            None => println!(
                "{}",
                self.config
                    .output_status
                    .format(format!("Saved, {} row(s) returned", response.data.len()))
            ),
        }
    }

    fn on_submit_error(&mut self, error: &EditorError) {
        let message = match error {
            EditorError::Transport(TransportError::Status { status, body }) => {
                format!("{status} {body}")
            }
            other => other.to_string(),
        };
        println!("{}", self.config.output_error.format(message));
    }
}

struct App {
    config:  Config,
    session: GridSession<HttpTransport>,
}

impl App {
    fn new(config: Config) -> Self {
        let transport = HttpTransport::new(config.base_url.clone());
        let session = GridSession::from_config(transport, &config);
        Self { config, session }
    }

    async fn ensure_loaded(&mut self) -> Result<()> {
        if self.session.page().is_none() {
            self.session.reload().await?;
        }
        Ok(())
    }

    fn print_page(&self) {
        let rows = self.session.rendered_rows();
        print!(
            "{}",
            table::render_table(&self.session.config().columns, &rows, &self.config)
        );
        println!("{}", self.config.output_status.format(self.session.summary()));
        self.print_notices();
    }

    fn position(&self) -> String {
        let mut parts = vec![];
        if let Some(page) = self.session.page() {
            let state = self.session.state();
            parts.push(format!(
                "page {}/{}",
                state.page_index() + 1,
                page.page_count(state.length)
            ));
        }
        if !self.session.notices().is_empty() {
            parts.push("read-only".to_string());
        }
        parts.join(" ")
    }

    fn print_notices(&self) {
        for notice in self.session.notices() {
            println!("{}", self.config.output_notice.format(notice));
        }
    }

    async fn submit(&mut self, request: bookgrid::editor::EditorRequest) {
        let mut events = TerminalEvents {
            config: &self.config,
        };
        // Failures are already reported through the events.
        if self.session.submit(request, &mut events).await.is_ok() {
            self.print_page();
        }
    }

    async fn handle_command(&mut self, command: Vec<String>) -> Result<()> {
        let matches = command_parser::arg_parser().try_get_matches_from(command)?;
        match matches.subcommand() {
            Some(("list", matches)) => {
                let search = matches.get_one::<String>("search");
                let sort = matches.get_one::<String>("sort");
                let page = matches.get_one::<u64>("page");
                let state = self.session.state_mut();
                if let Some(search) = search {
                    state.search = search.clone();
                    state.start = 0;
                }
                if let Some(sort) = sort {
                    let column = self
                        .session
                        .config()
                        .column_index(sort)
                        .ok_or_else(|| anyhow!("No column named {sort}"))?;
                    let dir = if matches.get_flag("desc") {
                        SortDir::Desc
                    } else {
                        SortDir::Asc
                    };
                    let state = self.session.state_mut();
                    state.order = vec![Order { column, dir }];
                    state.start = 0;
                }
                if let Some(page) = page {
                    self.session.state_mut().seek(page - 1)?;
                }
                self.session.reload().await?;
                self.print_page();
            }
            Some(("next", _)) => {
                self.ensure_loaded().await?;
                self.session.next_page().await?;
                self.print_page();
            }
            Some(("prev", _)) => {
                self.ensure_loaded().await?;
                self.session.previous_page().await?;
                self.print_page();
            }
            Some(("show", matches)) => {
                self.ensure_loaded().await?;
                let id = matches
                    .get_one::<String>("id")
                    .ok_or_else(|| anyhow!("id is required"))?;
                let row = self
                    .session
                    .find_row(id)
                    .ok_or_else(|| EditorError::UnknownRow(id.clone()))?;
                print!("{}", table::render_book(&Book::from_row(row)?, &self.config));
            }
            Some(("add", _)) => {
                let mut form = match self.session.open_create() {
                    Ok(form) => form,
                    Err(e) => {
                        self.print_notices();
                        return Err(e.into());
                    }
                };
                let fields = self.session.editor().map(|e| e.fields().to_vec()).unwrap_or_default();
                form::fill_form(&mut form, &fields)?;
                self.submit(form.into_request()).await;
            }
            Some(("edit", matches)) => {
                self.ensure_loaded().await?;
                let id = matches
                    .get_one::<String>("id")
                    .ok_or_else(|| anyhow!("id is required"))?;
                let mut events = TerminalEvents {
                    config: &self.config,
                };
                let mut form = match self.session.open_edit(id, &mut events) {
                    Ok(form) => form,
                    Err(e) => {
                        self.print_notices();
                        return Err(e.into());
                    }
                };
                let fields = self.session.editor().map(|e| e.fields().to_vec()).unwrap_or_default();
                form::fill_form(&mut form, &fields)?;
                self.submit(form.into_request()).await;
            }
            Some(("remove", matches)) => {
                let ids: Vec<String> = matches
                    .get_many::<String>("id")
                    .map(|ids| ids.cloned().collect())
                    .unwrap_or_default();
                let confirmed = inquire::Confirm::new(&format!("Remove {} row(s)?", ids.len()))
                    .with_default(false)
                    .prompt()?;
                if confirmed {
                    let mut events = TerminalEvents {
                        config: &self.config,
                    };
                    if self.session.remove_rows(&ids, &mut events).await.is_ok() {
                        self.print_page();
                    }
                }
            }
            Some(("export", matches)) => {
                self.ensure_loaded().await?;
                let export = Export::new(&self.session);
                match matches.get_one::<String>("format").map(String::as_str) {
                    Some("copy") => println!("{}", export.to_copy_text()),
                    _ => export.write_csv(std::io::stdout())?,
                }
            }
            Some(("config", _)) => {
                let editor = self.session.editor().map(|e| {
                    json!({
                        "ajax": e.endpoint(),
                        "fields": e.fields().iter().map(|f| f.widget_options()).collect::<Vec<_>>(),
                    })
                });
                let declaration = json!({
                    "grid": self.session.config(),
                    "editor": editor,
                    "notices": self.session.notices().iter().map(ToString::to_string).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&declaration)?);
            }
            Some(("exit", _)) => {
                exit(0);
            }
            Some((name, _)) => anyhow::bail!("Unknown command {name}"),
            None => unreachable!("subcommand required"),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = env::args_os()
        .skip(1)
        .map(|x| x.into_string().map_err(|_| anyhow!("Invalid unicode in arguments")))
        .collect::<Result<Vec<String>>>()?;
    let args_parsed = command_parser::arg_parser_cli().get_matches_from(args.clone());

    if let Some(("default-config", _)) = args_parsed.subcommand() {
        print!("{}", Config::default_as_string()?);
        return Ok(());
    }

    let config = Config::read_config()?;
    let history = config.history_path();
    let mut app = App::new(config);

    if let Some(("repl", _)) = args_parsed.subcommand() {
        let mut repl = repl::Repl::new(command_parser::generate_completions(), history)?;
        app.print_notices();
        loop {
            repl.set_position(app.position());
            match repl.read_line() {
                Ok(Signal::Success(buffer)) => {
                    let command = match shlex::split(&buffer) {
                        Some(command) if !command.is_empty() => command,
                        Some(_) => continue,
                        None => {
                            println!("{}", app.config.output_error.format("Invalid command"));
                            continue;
                        }
                    };
                    if let Err(e) = app.handle_command(command).await {
                        println!("{}", app.config.output_error.format(e));
                    }
                }
                Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                    println!("\nAborted!");
                    break;
                }
                Err(e) => {
                    println!("{}", app.config.output_error.format(e));
                    break;
                }
            }
        }
    } else {
        app.handle_command(args).await?;
    }

    Ok(())
}
