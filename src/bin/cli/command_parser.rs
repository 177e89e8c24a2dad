use clap::{value_parser, Arg, ArgAction, Command};

pub fn arg_parser() -> Command {
    Command::new("bookgrid")
        .about("Browse and edit the book catalog")
        .multicall(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("Show a page of the catalog")
                .arg(
                    Arg::new("page")
                        .long("page")
                        .short('p')
                        .help("Page number, starting at 1")
                        .value_parser(value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("search")
                        .long("search")
                        .short('s')
                        .help("Global search text"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .help("Column to order by (title or data path)"),
                )
                .arg(
                    Arg::new("desc")
                        .long("desc")
                        .action(ArgAction::SetTrue)
                        .requires("sort"),
                ),
        )
        .subcommand(Command::new("next").about("Show the next page"))
        .subcommand(Command::new("prev").about("Show the previous page"))
        .subcommand(
            Command::new("show")
                .about("Show every field of a row on the current page")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(Command::new("add").about("Create a book"))
        .subcommand(
            Command::new("edit")
                .about("Edit a row on the current page")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove rows by identifier")
                .arg(Arg::new("id").required(true).num_args(1..)),
        )
        .subcommand(
            Command::new("export")
                .about("Export the current page")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["csv", "copy"])
                        .default_value("csv"),
                ),
        )
        .subcommand(Command::new("config").about("Print the grid and editor declaration as JSON"))
        .subcommand(Command::new("exit").about("Leave the read eval print loop"))
}

pub fn arg_parser_cli() -> Command {
    arg_parser()
        .subcommand(Command::new("repl").about("Launch a read eval print loop"))
        .subcommand(Command::new("default-config").about("Print the default configuration"))
}

pub fn generate_completions() -> Vec<String> {
    let cmd = arg_parser();
    fn add_command(parent_fn_name: &str, cmd: &Command, subcmds: &mut Vec<String>) {
        let fn_name = format!("{parent_fn_name} {}", cmd.get_name())
            .trim()
            .to_string();
        subcmds.push(fn_name.clone());
        for subcmd in cmd.get_subcommands() {
            add_command(&fn_name, subcmd, subcmds);
        }
    }
    let mut subcmds = vec![];
    for subcmd in cmd.get_subcommands() {
        add_command("", subcmd, &mut subcmds);
    }
    subcmds.sort();
    subcmds
}
