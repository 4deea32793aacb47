//! memegen CLI: command-line interface for uploading and captioning memes.
//!
//! Usage:
//!   memegen upload <FILE>        Upload an image and print a signed URL
//!   memegen sign <CID>           Mint a fresh signed URL
//!   memegen render <IMAGE>       Caption a local image without uploading
//!   memegen make <FILE>          Upload, sign, caption, and download
//!   memegen session <FILE>       Interactive editing session
//!   memegen fonts                List font presets and how they resolve
//!   memegen config               Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::TextArgs;

#[derive(Parser)]
#[command(
    name = "memegen",
    about = "Upload an image and caption it with outlined meme text",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image and request its first signed URL
    Upload {
        /// Image file to upload
        file: PathBuf,
    },

    /// Mint a signed URL for an uploaded file
    Sign {
        /// Content identifier returned by upload
        cid: String,

        /// URL lifetime in seconds (defaults to the configured expiry)
        #[arg(long)]
        expires: Option<u64>,
    },

    /// Caption a local image and export it, without the asset store
    Render {
        /// Image file to caption
        image: PathBuf,

        #[command(flatten)]
        text: TextArgs,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload, sign, caption, and export in one go
    Make {
        /// Image file to upload
        file: PathBuf,

        #[command(flatten)]
        text: TextArgs,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive session: edit text on stdin while the URL is kept fresh
    Session {
        /// Image file to upload
        file: PathBuf,

        /// Output directory for downloads
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List font presets and the font each resolves to
    Fonts,

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = commands::load_config(cli.config.as_deref());

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    memegen_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Upload { file } => commands::upload::run(&config, file).await,
        Commands::Sign { cid, expires } => commands::sign::run(&config, cid, expires).await,
        Commands::Render {
            image,
            text,
            output,
        } => commands::render::run(&config, image, text, output),
        Commands::Make { file, text, output } => {
            commands::make::run(&config, file, text, output).await
        }
        Commands::Session { file, output } => commands::session::run(&config, file, output).await,
        Commands::Fonts => commands::fonts::run(&config),
        Commands::Config => commands::config::run(&config, cli.config.as_deref()),
    }
}
