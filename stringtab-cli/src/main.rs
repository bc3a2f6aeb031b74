use std::{io, path::PathBuf, process};

use clap::{Parser, Subcommand};
use indoc::indoc;
use stringtab::{Error, converter, images, licenses};
use stringtab_cli::{load_config, logging, with_license_dir};

const AFTER_HELP: &str = indoc! {"
    Examples:
      stringtab properties-to-json localization strings button
      stringtab xml-to-i18n flash/localization html5/strings
      stringtab create-img-tags assets/images > images.html
      stringtab generate-license-header licenses > LICENSES.txt

    Set RUST_LOG to override the log level chosen by -v/-q.
"};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert `*-strings*.properties` files into module-loader JSON files.
    PropertiesToJson {
        /// Directory holding the `.properties` files
        source_dir: PathBuf,
        /// Directory the JSON files are written to (created if missing)
        dest_dir: PathBuf,
        /// Only write keys containing this text
        key_filter: Option<String>,
    },

    /// Convert XML string tables into `.properties` files.
    XmlToProperties {
        /// Directory holding the `.xml` files
        source_dir: PathBuf,
        /// Directory the `.properties` files are written to (created if missing)
        dest_dir: PathBuf,
    },

    /// Convert XML string tables straight into module-loader JSON files.
    XmlToI18n {
        /// Directory holding the `.xml` files
        source_dir: PathBuf,
        /// Directory the JSON files are written to (created if missing)
        dest_dir: PathBuf,
    },

    /// Print an `<img>` tag for every image in a directory.
    CreateImgTags {
        /// Directory holding the images
        dir: PathBuf,
    },

    /// Print the combined third-party license header.
    GenerateLicenseHeader {
        /// License repository; falls back to `licenses.repository` from the config
        license_dir: Option<PathBuf>,
    },
}

fn run(args: Args) -> Result<(), Error> {
    let config = load_config(args.config.as_deref())?;

    match args.commands {
        Commands::PropertiesToJson {
            source_dir,
            dest_dir,
            key_filter,
        } => {
            converter::properties_to_json(source_dir, dest_dir, key_filter.as_deref())?;
        }
        Commands::XmlToProperties {
            source_dir,
            dest_dir,
        } => {
            converter::xml_to_properties(source_dir, dest_dir)?;
        }
        Commands::XmlToI18n {
            source_dir,
            dest_dir,
        } => {
            converter::xml_to_i18n(source_dir, dest_dir)?;
        }
        Commands::CreateImgTags { dir } => {
            images::write_image_tags(dir, &config.images, io::stdout().lock())?;
        }
        Commands::GenerateLicenseHeader { license_dir } => {
            let config = with_license_dir(config, license_dir);
            let header = licenses::generate_license_header(&config.licenses)?;
            println!("{header}");
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose, args.quiet);

    if let Err(e) = run(args) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
