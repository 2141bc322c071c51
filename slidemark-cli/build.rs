use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs.
// Build scripts can't reach src/ modules, so the shape is repeated here.
const ORIGINS: &[&str] = &["preview", "contents", "properties"];
const FORMATS: &[&str] = &["markdown", "html", "json"];

fn path_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn target_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("slide").long("slide").required(true))
        .arg(Arg::new("trace").long("trace").required(true))
        .arg(
            Arg::new("origin")
                .long("origin")
                .value_parser(clap::builder::PossibleValuesParser::new(ORIGINS)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_hint(ValueHint::FilePath),
        )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("slidemark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and patch markdown slide decks")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .arg(path_arg("path"))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("html")
                .arg(path_arg("path"))
                .arg(Arg::new("slide").long("slide")),
        )
        .subcommand(target_args(
            Command::new("style")
                .arg(path_arg("path"))
                .arg(Arg::new("style").long("style").required(true)),
        ))
        .subcommand(target_args(Command::new("unstyle").arg(path_arg("path"))))
        .subcommand(
            Command::new("scope-css")
                .arg(path_arg("path"))
                .arg(Arg::new("selector").long("selector").required(true)),
        )
        .subcommand(
            Command::new("convert")
                .arg(path_arg("input"))
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_hint(ValueHint::FilePath),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "slidemark", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "slidemark", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "slidemark", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
