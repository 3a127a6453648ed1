//! MapBuffer Inspector
//!
//! Command-line tool for examining MapBuffer files.

use clap::{Parser, Subcommand, ValueEnum};
use mapbuffer::{Config, KeyLookup, MapBuffer, Result, Utf8Mode};
use tracing_subscriber::{fmt, EnvFilter};

/// MapBuffer Inspector
#[derive(Parser, Debug)]
#[command(name = "mapbuffer-inspect")]
#[command(about = "Inspect MapBuffer binary files")]
#[command(version)]
struct Args {
    /// MapBuffer file to read
    file: String,

    /// Key lookup strategy
    #[arg(short, long, value_enum, default_value = "auto")]
    lookup: Lookup,

    /// Replace invalid UTF-8 in strings instead of failing
    #[arg(long)]
    lossy: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Lookup {
    Auto,
    Positional,
    Scan,
}

impl From<Lookup> for KeyLookup {
    fn from(lookup: Lookup) -> Self {
        match lookup {
            Lookup::Auto => KeyLookup::Auto,
            Lookup::Positional => KeyLookup::Positional,
            Lookup::Scan => KeyLookup::Scan,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print entry count and size
    Summary,

    /// Print every bucket with its slot read as int, double and null flag
    Dump,

    /// Read a key as an i32
    GetInt { key: u16 },

    /// Read a key as a bool
    GetBool { key: u16 },

    /// Read a key as an f64
    GetDouble { key: u16 },

    /// Read a key as a UTF-8 string
    GetString { key: u16 },

    /// Summarize the nested MapBuffer stored at a key
    Nested { key: u16 },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mapbuffer=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("MapBuffer Inspector v{}", mapbuffer::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .key_lookup(args.lookup.into())
        .utf8(if args.lossy { Utf8Mode::Lossy } else { Utf8Mode::Strict })
        .build();

    let map = MapBuffer::open_with_config(&args.file, config)?;

    match args.command {
        Commands::Summary => print_summary(&map),
        Commands::Dump => {
            print_summary(&map);
            for bucket in map.buckets() {
                let bucket = bucket?;
                let slot: String = bucket.slot().iter().map(|b| format!("{:02x}", b)).collect();
                println!(
                    "key={:<5} slot={} int={:<11} double={:<24e} null={}",
                    bucket.key(),
                    slot,
                    bucket.as_int(),
                    bucket.as_double(),
                    bucket.is_null()
                );
            }
        }
        Commands::GetInt { key } => println!("{}", map.get_int(key)?),
        Commands::GetBool { key } => println!("{}", map.get_bool(key)?),
        Commands::GetDouble { key } => println!("{}", map.get_double(key)?),
        Commands::GetString { key } => println!("{}", map.get_string(key)?),
        Commands::Nested { key } => print_summary(&map.get_map_buffer(key)?),
    }

    Ok(())
}

fn print_summary(map: &MapBuffer) {
    println!("count: {}", map.count());
    println!("size:  {} bytes", map.size());
}
