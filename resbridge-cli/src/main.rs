use std::path::PathBuf;

use clap::{Parser, Subcommand};
use resbridge::{convert_file, convert_tree, normalize_value};
use resbridge_cli::{OptionArgs, OutputFormat, load_options, render_conversion, render_summary};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert every values* directory of an Android res tree into .lproj folders.
    Convert {
        /// The Android `res` directory
        #[arg(long)]
        res_dir: PathBuf,

        /// Directory that receives the `<locale>.lproj` folders
        #[arg(long)]
        output_dir: PathBuf,

        #[command(flatten)]
        options: OptionArgs,

        /// Output format for the run summary
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Convert a single strings.xml file.
    ConvertFile {
        /// The Android strings.xml to read
        #[arg(short, long)]
        input: PathBuf,

        /// The .strings file to write (a .stringsdict is written next to it)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        options: OptionArgs,

        /// Output format for the report
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the Apple locale for Android language qualifiers.
    Locale {
        /// Qualifiers without the `values-` prefix (e.g. zh-rTW, b+sr+Latn)
        #[arg(required = true)]
        tags: Vec<String>,

        /// TOML configuration file with locale overrides
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print a string value as it would appear in a .strings file.
    Normalize {
        /// The raw Android value
        value: String,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "resbridge=debug,resbridge_cli=debug"
    } else {
        "resbridge=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(commands: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match commands {
        Commands::Convert {
            res_dir,
            output_dir,
            options,
            format,
        } => {
            let options = options.resolve()?;
            debug!(?options, "resolved options");
            let summary = convert_tree(&res_dir, &output_dir, &options)?;
            print!("{}", render_summary(&summary, format)?);
        }
        Commands::ConvertFile {
            input,
            output,
            options,
            format,
        } => {
            let options = options.resolve()?;
            debug!(?options, "resolved options");
            let report = convert_file(&input, &output, &options)?;
            print!("{}", render_conversion(&report, format)?);
        }
        Commands::Locale { tags, config } => {
            let mapper = load_options(config.as_deref())?.locale_mapper();
            for tag in tags {
                println!("{} -> {}", tag, mapper.normalize(&tag));
            }
        }
        Commands::Normalize { value } => {
            println!("{}", normalize_value(&value));
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args.commands) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
