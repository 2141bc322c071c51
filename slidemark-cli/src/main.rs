// Command-line interface for slidemark
//
// This binary drives the patch engine over markdown files on disk, the way the
// editor drives it over its buffer: it parses a deck, selects an element by
// slide index and trace, and prints the patched markdown.
//
// Usage:
//  slidemark inspect <path> [--json]                         - Outline slides, element traces and spans
//  slidemark html <path> [--slide N]                         - Render slides as <section> elements
//  slidemark style <path> --slide N --trace T --style CSS    - Style an element
//  slidemark unstyle <path> --slide N --trace T              - Remove a style wrapper
//  slidemark scope-css <path> --selector SEL                 - Prefix every rule of a stylesheet
//  slidemark convert <input> --to <format> [--from <format>] - Convert between formats
//
// Traces are dot-joined child offsets within a slide (as printed by inspect).
// Patched markdown goes to stdout unless -o is given.

mod outline;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use slidemark_config::{Loader, SlidemarkConfig, PROJECT_CONFIG_FILE};
use slidemark_patch::tree::{format_trace, parse_trace};
use slidemark_patch::{
    formats::prepend_selector, Deck, FormatRegistry, Selection, SelectionOrigin,
};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

const ORIGINS: &[&str] = &["preview", "contents", "properties"];

fn path_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .help("Write the patched markdown to FILE instead of stdout")
        .value_hint(ValueHint::FilePath)
}

/// Arguments shared by the commands that act on one element.
fn target_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("slide")
            .long("slide")
            .value_name("N")
            .help("Zero-based slide index")
            .required(true)
            .value_parser(clap::value_parser!(usize)),
    )
    .arg(
        Arg::new("trace")
            .long("trace")
            .value_name("TRACE")
            .help("Element trace within the slide, e.g. 1.0")
            .required(true),
    )
    .arg(
        Arg::new("origin")
            .long("origin")
            .help("Which view the selection comes from")
            .long_help(
                "Which view the selection comes from. A selection on the only child of an \
                outer wrapper resolves to the wrapper from preview and contents, and to the \
                child itself from properties.",
            )
            .default_value("preview")
            .value_parser(clap::builder::PossibleValuesParser::new(ORIGINS)),
    )
    .arg(output_arg())
}

fn build_cli() -> Command {
    Command::new("slidemark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and patch markdown slide decks")
        .long_about(
            "slidemark works on markdown slide decks the way the slide editor does.\n\n\
            Slides are separated by thematic breaks (---). Styling an element rewrites \
            only the markdown that element came from.\n\n\
            Examples:\n  \
            slidemark inspect deck.md                                 # Slides with element traces\n  \
            slidemark style deck.md --slide 1 --trace 1 --style 'color: red;'\n  \
            slidemark unstyle deck.md --slide 1 --trace 1 -o deck.md  # Undo it in place\n  \
            slidemark deck.md --to html                               # Convert (default command)",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a slidemark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Outline the slides of a deck")
                .arg(path_arg("path", "Path to the markdown file"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the slide trees as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("html")
                .about("Render slides as HTML sections")
                .arg(path_arg("path", "Path to the markdown file"))
                .arg(
                    Arg::new("slide")
                        .long("slide")
                        .value_name("N")
                        .help("Only render slide N")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(target_args(
            Command::new("style")
                .about("Apply an inline style to an element")
                .arg(path_arg("path", "Path to the markdown file"))
                .arg(
                    Arg::new("style")
                        .long("style")
                        .value_name("CSS")
                        .help("Declarations to set, e.g. 'color: red;'")
                        .required(true),
                ),
        ))
        .subcommand(target_args(
            Command::new("unstyle")
                .about("Remove the style wrapper around an element")
                .arg(path_arg("path", "Path to the markdown file")),
        ))
        .subcommand(
            Command::new("scope-css")
                .about("Prefix every rule of a stylesheet with a selector")
                .arg(path_arg("path", "Path to the CSS file"))
                .arg(
                    Arg::new("selector")
                        .long("selector")
                        .value_name("SEL")
                        .help("Selector to prepend, e.g. .slide-index-0")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats")
                .arg(path_arg("input", "Input file"))
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_name("FORMAT")
                        .help("Output format (markdown, html, json)")
                        .required(true),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("FORMAT")
                        .help("Input format, detected from the extension when omitted"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write to FILE instead of stdout")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file argument means convert
            let known = [
                "inspect",
                "html",
                "style",
                "unstyle",
                "scope-css",
                "convert",
                "help",
            ];
            if args.len() > 1 && !args[1].starts_with('-') && !known.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    init_logging(&config);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            handle_inspect_command(path, sub_matches.get_flag("json"), &config);
        }
        Some(("html", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let slide = sub_matches.get_one::<usize>("slide").copied();
            handle_html_command(path, slide, &config);
        }
        Some(("style", sub_matches)) => {
            let style = sub_matches
                .get_one::<String>("style")
                .expect("style is required");
            let target = Target::from_matches(sub_matches);
            handle_style_command(&target, Some(style), &config);
        }
        Some(("unstyle", sub_matches)) => {
            let target = Target::from_matches(sub_matches);
            handle_style_command(&target, None, &config);
        }
        Some(("scope-css", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let selector = sub_matches
                .get_one::<String>("selector")
                .expect("selector is required");
            handle_scope_css_command(path, selector);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let registry = FormatRegistry::default();

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// The element a style or unstyle command acts on.
struct Target {
    path: String,
    slide: usize,
    trace: Vec<usize>,
    origin: SelectionOrigin,
    output: Option<String>,
}

impl Target {
    fn from_matches(matches: &ArgMatches) -> Self {
        let path = matches
            .get_one::<String>("path")
            .expect("path is required")
            .clone();
        let slide = *matches.get_one::<usize>("slide").expect("slide is required");
        let raw_trace = matches
            .get_one::<String>("trace")
            .expect("trace is required");
        let trace = parse_trace(raw_trace).unwrap_or_else(|| {
            eprintln!("Error: '{raw_trace}' is not a trace (expected e.g. 1.0.2)");
            std::process::exit(1);
        });
        let origin = matches
            .get_one::<String>("origin")
            .map(|s| s.as_str())
            .unwrap_or("preview")
            .parse::<SelectionOrigin>()
            .unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(1);
            });
        let output = matches.get_one::<String>("output").cloned();

        Self {
            path,
            slide,
            trace,
            origin,
            output,
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, json: bool, config: &SlidemarkConfig) {
    let deck = load_deck(path, config);

    if json {
        let value = outline::outline_json(deck.slides()).unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });
        let text = serde_json::to_string_pretty(&value).unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });
        println!("{text}");
    } else {
        print!("{}", outline::outline(deck.slides()));
    }
}

/// Handle the html command
fn handle_html_command(path: &str, slide: Option<usize>, config: &SlidemarkConfig) {
    let deck = load_deck(path, config);

    let slides = match slide {
        Some(index) => match deck.slide(index) {
            Some(slide) => std::slice::from_ref(slide),
            None => slide_out_of_range(index, &deck),
        },
        None => deck.slides(),
    };

    for slide in slides {
        println!("<section class=\"{}\">", slide.class_name);
        if !slide.html.is_empty() {
            println!("{}", slide.html);
        }
        println!("</section>");
    }
}

/// Handle the style and unstyle commands. `style` of `None` removes the wrapper.
fn handle_style_command(target: &Target, style: Option<&str>, config: &SlidemarkConfig) {
    let mut deck = load_deck(&target.path, config);

    if deck.slide(target.slide).is_none() {
        slide_out_of_range(target.slide, &deck);
    }
    deck.select(Selection::node(
        target.slide,
        target.trace.clone(),
        target.origin,
        now_millis(),
    ));
    if deck.selected_node().and_then(|n| n.as_element()).is_none() {
        eprintln!(
            "Error: No element at trace {} on slide {}",
            format_trace(&target.trace),
            target.slide
        );
        std::process::exit(1);
    }

    let changed = match style {
        Some(style) => deck.apply_style_to_selection(style),
        None => deck.remove_style_from_selection().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }),
    };
    if !changed {
        eprintln!(
            "Error: Element at trace {} on slide {} could not be patched",
            format_trace(&target.trace),
            target.slide
        );
        std::process::exit(1);
    }

    write_output(target.output.as_deref(), deck.markdown());
}

/// Handle the scope-css command
fn handle_scope_css_command(path: &str, selector: &str) {
    let css = read_source(path);
    let scoped = prepend_selector(&css, selector).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    println!("{scoped}");
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
) {
    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_source(input);

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    let result = registry.serialize(&doc, to).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    write_output(output, &result);
}

fn load_deck(path: &str, config: &SlidemarkConfig) -> Deck {
    Deck::new(read_source(path), config.deck_options())
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => fs::write(path, text).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => print!("{text}"),
    }
}

fn slide_out_of_range(index: usize, deck: &Deck) -> ! {
    eprintln!(
        "Error: Slide {index} is out of range (the deck has {} slides)",
        deck.slides().len()
    );
    std::process::exit(1);
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

fn load_cli_config(explicit_path: Option<&str>) -> SlidemarkConfig {
    let loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// `RUST_LOG` wins over the configured filter.
fn init_logging(config: &SlidemarkConfig) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.filter.as_str()),
    )
    .init();
    log::debug!("logging initialised with default filter '{}'", config.logging.filter);
}
