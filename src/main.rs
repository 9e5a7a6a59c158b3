//! speedread - EPUB text extraction and terminal speed reading

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use env_logger::Env;

use speedread::session::bionic::{self, Segment};
use speedread::session::rsvp::reading_time_secs;
use speedread::{ParsedEpub, ReaderConfig, ReadingMode, read_epub};

#[derive(Parser)]
#[command(name = "speedread")]
#[command(version, about = "Extract and speed-read the text of an EPUB", long_about = None)]
#[command(after_help = "EXAMPLES:
    speedread book.epub                  Print the book's text
    speedread -i book.epub               Show title, word count and reading time
    speedread --play --wpm 450 book.epub Read word by word in the terminal
    speedread --bionic book.epub         Print with bolded word prefixes")]
struct Cli {
    /// Input EPUB file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Show title, word count and reading time instead of the text
    #[arg(short, long)]
    info: bool,

    /// Print title and content as JSON
    #[arg(long, conflicts_with_all = ["bionic", "play"])]
    json: bool,

    /// Print the text with bolded word prefixes
    #[arg(long, conflicts_with = "play")]
    bionic: bool,

    /// Present the text one word at a time
    #[arg(long)]
    play: bool,

    /// Reading speed in words per minute (200-1000)
    #[arg(long, default_value_t = ReaderConfig::default().wpm)]
    wpm: u32,

    /// Share of each word to emphasize in bionic mode, in percent (30-70)
    #[arg(long, default_value_t = ReaderConfig::default().fixation_percent)]
    fixation: u8,

    /// Word index to start playback at
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Log more detail (repeat for trace output)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = read_epub(&cli.input)
        .map_err(|e| e.to_string())
        .and_then(|book| run(&cli, &book));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(cli: &Cli, book: &ParsedEpub) -> Result<(), String> {
    let mode = if cli.bionic {
        ReadingMode::Bionic
    } else {
        ReadingMode::Rsvp
    };
    let config = ReaderConfig::default()
        .with_mode(mode)
        .with_wpm(cli.wpm)
        .with_fixation_percent(cli.fixation);

    if cli.info {
        show_info(&cli.input, book, &config);
        Ok(())
    } else if cli.json {
        let json = serde_json::to_string_pretty(book).map_err(|e| e.to_string())?;
        println!("{json}");
        Ok(())
    } else if cli.play {
        play(book, &config, cli.start).map_err(|e| e.to_string())
    } else if config.mode == ReadingMode::Bionic {
        print_bionic(book, &config).map_err(|e| e.to_string())
    } else {
        println!("{}", book.content);
        Ok(())
    }
}

fn show_info(path: &str, book: &ParsedEpub, config: &ReaderConfig) {
    let words = book.words().count();
    let secs = reading_time_secs(words, config.wpm);

    println!("File: {path}");
    println!("Title: {}", book.title);
    println!("Chapters: {}", book.chapters().count());
    println!("Words: {words}");
    println!(
        "Reading time: {}m {:02}s at {} wpm",
        secs / 60,
        secs % 60,
        config.wpm
    );
}

fn play(book: &ParsedEpub, config: &ReaderConfig, start: usize) -> io::Result<()> {
    let mut session = config.session();
    session.load_text(&book.content, start);
    log::info!(
        "playing {} words at {} wpm from word {}",
        session.word_count(),
        session.wpm(),
        session.current_index()
    );

    let mut out = io::stdout().lock();
    let mut tick = session.play();
    while let Some(current) = tick {
        write!(out, "\r\x1b[2K{}", current.word())?;
        out.flush()?;
        std::thread::sleep(current.delay());
        tick = session.advance(&current);
    }
    writeln!(out)?;

    Ok(())
}

fn print_bionic(book: &ParsedEpub, config: &ReaderConfig) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for paragraph in bionic::paragraphs(&book.content, config.fixation_percent) {
        for segment in paragraph {
            match segment {
                Segment::Word(word) => write!(out, "\x1b[1m{}\x1b[0m{}", word.bold, word.normal)?,
                Segment::Space => write!(out, " ")?,
            }
        }
        writeln!(out)?;
        writeln!(out)?;
    }
    Ok(())
}
