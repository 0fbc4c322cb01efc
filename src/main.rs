use std::io::{self, BufRead, BufWriter, Write};
use std::process::ExitCode;

use clap::{ArgGroup, Parser, Subcommand};
use lumolog::{Colorizer, FormatDetector, PaintCtx, SearchConfig, Theme};

#[derive(Parser, Debug)]
#[command(
    name = "lumolog",
    version,
    about = "A streaming log colorizer that understands your logs"
)]
#[command(group(ArgGroup::new("search").args(["search", "regexp"])))]
#[command(group(ArgGroup::new("palette").args(["light", "dark"])))]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Highlight every occurrence of this literal string.
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Highlight every match of this regular expression.
    #[arg(short = 'r', long = "regexp")]
    regexp: Option<String>,

    /// Force the light-background palette.
    #[arg(long)]
    light: bool,

    /// Force the dark-background palette.
    #[arg(long)]
    dark: bool,

    /// Disable all coloring; pass input through unchanged.
    #[arg(long = "no-color")]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print version information and exit.
    Version,
}

fn build_theme(cli: &Cli) -> (Theme, bool) {
    if cli.light {
        (Theme::light(), false)
    } else if cli.dark {
        (Theme::dark(), true)
    } else {
        let dark_background = lumolog::style::detect_dark_background();
        (Theme::adaptive(), dark_background)
    }
}

fn build_search(cli: &Cli) -> Result<SearchConfig, lumolog::SearchError> {
    if let Some(pattern) = &cli.regexp {
        SearchConfig::regex(pattern)
    } else if let Some(literal) = &cli.search {
        Ok(SearchConfig::literal(literal.clone()))
    } else {
        Ok(SearchConfig::None)
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let (theme, dark_background) = build_theme(cli);
    let ctx = PaintCtx::new(!cli.no_color, dark_background);

    let search = build_search(cli)?;
    let mut colorizer = Colorizer::new(theme, ctx);
    colorizer.set_search(search);

    let mut detector = FormatDetector::new();
    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout());

    let mut line = String::new();
    loop {
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
            Err(e) => return Err(e.into()),
        }

        let trimmed = line.trim_end_matches(['\n', '\r']);
        let format = detector.classify(trimmed);
        let rendered = colorizer.render(trimmed, format);

        if let Err(e) = writeln!(out, "{rendered}") {
            if e.kind() == io::ErrorKind::BrokenPipe {
                return Ok(());
            }
            return Err(e.into());
        }
        if let Err(e) = out.flush() {
            if e.kind() == io::ErrorKind::BrokenPipe {
                return Ok(());
            }
            return Err(e.into());
        }
    }

    if let Err(e) = out.flush() {
        if e.kind() != io::ErrorKind::BrokenPipe {
            return Err(e.into());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env().init();
    let cli = Cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        println!("lumolog {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("lumolog: {e}");
            ExitCode::FAILURE
        }
    }
}
