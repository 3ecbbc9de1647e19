use clap::{ArgGroup, Parser};
use color_eyre::eyre::{Context, Result, eyre};
use logmark_lib::entry::{format_short_time, group_by_day, parse_search_result};
use logmark_lib::markup::Markup;
use logmark_lib::markup::image::ImageOptions;
use logmark_lib::markup::output::HtmlOptions;
use logmark_lib::search::SearchCriteria;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "logmark", about = "Logbook Markup Tool", version)]
#[command(group = ArgGroup::new("output-mode")
    .args(["html", "remove_image", "group", "query"])
    .multiple(false))]
struct Cli {
    /// Input file path (reads from stdin if not provided, use "-" for explicit stdin)
    input: Option<PathBuf>,

    /// Render markup as HTML (the default)
    #[arg(long, group = "output-mode")]
    html: bool,

    /// Prefix prepended to every rendered image src
    #[arg(long, value_name = "PREFIX")]
    url_prefix: Option<String>,

    /// Remove the embedded image referencing the given attachment id
    #[arg(long, value_name = "ID", group = "output-mode")]
    remove_image: Option<String>,

    /// Write the removal result back to the input file instead of stdout
    #[arg(long, requires = "remove_image")]
    save: bool,

    /// Treat input as a JSON search result and print a day-grouped listing
    #[arg(long, group = "output-mode")]
    group: bool,

    /// Print the service query string for the given search-criteria JSON
    #[arg(long, value_name = "JSON", group = "output-mode")]
    query: Option<String>,

    /// Increase verbosity (-v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing subscriber based on verbosity level.
///
/// Silent by default; `RUST_LOG` wins over the verbosity flag when set.
fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "info,logmark=info,logmark_lib=info".to_string(),
            2 => "info,logmark=debug,logmark_lib=debug".to_string(),
            _ => "debug,logmark=trace,logmark_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Handle --query first (no input needed)
    if let Some(ref json) = cli.query {
        let criteria: SearchCriteria =
            serde_json::from_str(json).wrap_err("Invalid JSON in --query argument")?;
        println!("{}", criteria.to_query_string());
        return Ok(());
    }

    let content = load_input(cli.input.as_ref())?;

    if cli.html {
        render_html(content, cli.url_prefix);
        return Ok(());
    }

    if cli.group {
        print_grouped(&content)?;
        return Ok(());
    }

    if let Some(ref id) = cli.remove_image {
        let mut markup = Markup::new(content);
        if !markup.remove_embedded_image(id) {
            eprintln!("No embedded image found for attachment id {id:?}");
        }
        if cli.save {
            let path = match cli.input {
                Some(p) if p.to_str() != Some("-") => p,
                _ => return Err(eyre!("--save requires a file path, not stdin")),
            };
            std::fs::write(&path, markup.content())
                .wrap_err_with(|| format!("Failed to write to {path:?}"))?;
            eprintln!("Saved cleaned markup to {path:?}");
        } else {
            println!("{}", markup.content());
        }
        return Ok(());
    }

    // Default: render to HTML
    render_html(content, cli.url_prefix);

    Ok(())
}

/// Renders markup content to HTML on stdout.
fn render_html(content: String, url_prefix: Option<String>) {
    let options = HtmlOptions {
        image: ImageOptions {
            url_prefix: url_prefix.unwrap_or_default(),
        },
    };
    let markup = Markup::new(content);
    print!("{}", markup.to_html(&options));
}

/// Prints a day-grouped listing for a JSON search result.
fn print_grouped(json: &str) -> Result<()> {
    let entries = parse_search_result(json).wrap_err("Failed to parse search result")?;
    for group in group_by_day(entries) {
        println!("{}", group.date.format("%Y-%m-%d"));
        for entry in &group.entries {
            match entry.owner.as_deref() {
                Some(owner) => println!(
                    "  {}  {}  [{}]",
                    format_short_time(&entry.created_date),
                    entry.title,
                    owner
                ),
                None => println!(
                    "  {}  {}",
                    format_short_time(&entry.created_date),
                    entry.title
                ),
            }
        }
    }
    Ok(())
}

/// Loads input from a file path or stdin.
fn load_input(path: Option<&PathBuf>) -> Result<String> {
    if let Some(p) = path {
        if p.to_str() == Some("-") {
            read_from_stdin()
        } else {
            std::fs::read_to_string(p).wrap_err_with(|| format!("Failed to read file: {p:?}"))
        }
    } else if atty::is(atty::Stream::Stdin) {
        // Interactive terminal - no input available
        Err(eyre!("No input file provided. Use `logmark --help` for usage."))
    } else {
        // Piped input available
        read_from_stdin()
    }
}

/// Reads input from stdin.
fn read_from_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .wrap_err("Failed to read from stdin")?;
    Ok(buffer)
}
