//! CLI command definitions using `clap`

use clap::{Arg, ArgAction, Command as ClapCommand};

pub fn after_help_text(examples: &[&str]) -> String {
    let mut text = String::from("EXAMPLES:\n");
    for example in examples {
        text.push_str("  ");
        text.push_str(example);
        text.push('\n');
    }
    text
}

pub fn cmd_run() -> ClapCommand {
    ClapCommand::new("run")
        .about("Dispatch one command line and print what the sender receives")
        .arg(
            Arg::new("line")
                .required(true)
                .num_args(1..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .help("Command label followed by its arguments"),
        )
        .after_help(after_help_text(&[
            "colonel run eco give 10              Run /eco give 10 as the configured sender",
            "colonel --as player run eco          Run the default executor as a player",
        ]))
}

pub fn cmd_shell() -> ClapCommand {
    ClapCommand::new("shell")
        .about("Read command lines from stdin and dispatch each one")
        .after_help(after_help_text(&[
            "colonel shell                        Interactive command prompt",
            "printf 'eco\\neco give 1\\n' | colonel shell",
        ]))
}

pub fn cmd_list() -> ClapCommand {
    ClapCommand::new("list")
        .about("List registered commands with aliases and sub-executors")
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
}

pub fn cmd_check() -> ClapCommand {
    ClapCommand::new("check").about("Load and discover every declared command")
}

pub fn build_cli() -> ClapCommand {
    ClapCommand::new("colonel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Declarative command routing: dispatch TOML-declared commands")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("PATH")
                .help("Config file to use instead of ./colonel.toml"),
        )
        .arg(
            Arg::new("as")
                .long("as")
                .global(true)
                .value_name("KIND")
                .help("Sender kind: any, player, console, rcon, block, proxied"),
        )
        .arg(
            Arg::new("sender")
                .long("sender")
                .global(true)
                .value_name("NAME")
                .help("Sender name"),
        )
        .arg(
            Arg::new("permission")
                .long("permission")
                .short('p')
                .global(true)
                .action(ArgAction::Append)
                .value_name("PERMISSION")
                .help("Grant a permission to the sender (repeatable)"),
        )
        .arg(
            Arg::new("op")
                .long("op")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Make the sender an operator holding every permission"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .global(true)
                .value_name("MODE")
                .value_parser(["auto", "always", "never"])
                .help("When to color output"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log routing decisions to stderr"),
        )
        .subcommand(cmd_run())
        .subcommand(cmd_shell())
        .subcommand(cmd_list())
        .subcommand(cmd_check())
}
