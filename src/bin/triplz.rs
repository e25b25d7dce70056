use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use triplz::{
    compress_file, decompress_file, file_size, files_equal, CodecStats, CompressConfig,
    EncoderConfig, DEFAULT_WINDOW_SIZE, MAX_MATCH_LENGTH,
};

#[derive(Parser, Debug)]
#[command(name = "triplz")]
#[command(about = "LZ77 triple compressor with a fixed 6-byte token format")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    options: Options,
}

#[derive(clap::Args, Debug, Clone)]
struct Options {
    /// How far back matches are searched (1-65535)
    #[arg(short, long, global = true, default_value_t = DEFAULT_WINDOW_SIZE)]
    window_size: usize,

    /// Longest run a single token may copy (1-65535)
    #[arg(long, global = true, default_value_t = MAX_MATCH_LENGTH)]
    max_match: usize,

    /// Show verbose statistics
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Commands accepted on the command line and in the interactive loop.
/// Missing file names are prompted for.
#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into an archive
    Comp { source: Option<PathBuf>, archive: Option<PathBuf> },
    /// Restore a file from an archive
    Decomp { archive: Option<PathBuf>, output: Option<PathBuf> },
    /// Print the size of a file in bytes
    Size { file: Option<PathBuf> },
    /// Compare two files byte for byte
    Equal { first: Option<PathBuf>, second: Option<PathBuf> },
    /// Print program information
    About,
    /// Leave the interactive loop
    Exit,
}

/// One line typed into the interactive loop
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

enum Flow {
    Continue,
    Exit,
}

const EXIT_OK: u8 = 0;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.options.verbose);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let result = match args.command {
        Some(command) => execute(command, &args.options, &mut input).map(|_| ()),
        None => run_interactive(&args.options, &mut input),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Read commands until `exit` or end of input. Command failures are
/// reported and the loop keeps going.
fn run_interactive<R: BufRead>(
    options: &Options,
    input: &mut R,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let command = match Line::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                e.print()?;
                continue;
            }
        };

        match execute(command, options, input) {
            Ok(Flow::Exit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

fn execute<R: BufRead>(
    command: Command,
    options: &Options,
    input: &mut R,
) -> Result<Flow, Box<dyn std::error::Error>> {
    match command {
        Command::Comp { source, archive } => {
            let source = resolve(source, "source file name: ", input)?;
            let archive = resolve(archive, "archive name: ", input)?;
            let config = compress_config(options);

            let start = std::time::Instant::now();
            let stats = compress_file(&source, &archive, &config)?;
            if options.verbose {
                print_stats("Compression complete:", &stats, start.elapsed());
            }
        }
        Command::Decomp { archive, output } => {
            let archive = resolve(archive, "archive name: ", input)?;
            let output = resolve(output, "file name: ", input)?;
            let config = compress_config(options);

            let start = std::time::Instant::now();
            let stats = decompress_file(&archive, &output, &config)?;
            if options.verbose {
                print_stats("Decompression complete:", &stats, start.elapsed());
            }
        }
        Command::Size { file } => {
            let file = resolve(file, "file name: ", input)?;
            println!("size: {}", file_size(&file)?);
        }
        Command::Equal { first, second } => {
            let first = resolve(first, "first file name: ", input)?;
            let second = resolve(second, "second file name: ", input)?;
            println!("{}", files_equal(&first, &second)?);
        }
        Command::About => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            println!("{}", env!("CARGO_PKG_DESCRIPTION"));
        }
        Command::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

fn compress_config(options: &Options) -> CompressConfig {
    CompressConfig {
        encoder: EncoderConfig {
            window_size: options.window_size,
            max_match_length: options.max_match,
        },
        ..Default::default()
    }
}

/// Use the given path or prompt for one on stdin
fn resolve<R: BufRead>(path: Option<PathBuf>, prompt: &str, input: &mut R) -> io::Result<PathBuf> {
    if let Some(path) = path {
        return Ok(path);
    }

    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let name = line.trim();
    if name.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "no file name given"));
    }
    Ok(PathBuf::from(name))
}

fn print_stats(title: &str, stats: &CodecStats, elapsed: std::time::Duration) {
    eprintln!("{}", title);
    eprintln!("  Input bytes:      {}", stats.input_bytes);
    eprintln!("  Output bytes:     {}", stats.output_bytes);
    eprintln!("  Tokens:           {}", stats.tokens);
    eprintln!("  Matches:          {}", stats.matches);
    eprintln!("  Literals:         {}", stats.literals);
    eprintln!("  Ratio:            {:.3}", stats.ratio());
    eprintln!("  Time:             {:.2?}", elapsed);
}
