use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod camera;
mod config;
mod database;
mod error;
mod filesystem;
mod services;

use camera::platform_camera;
use config::AppConfig;
use error::AppError;
use photo_gallery::Photo;
use services::open_gallery;

/// Take photos and keep a local photo gallery
#[derive(Parser, Debug)]
#[command(name = "photo-snap", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./photo-snap.toml)
    #[arg(long, short = 'c', global = true, env = "PHOTO_SNAP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the gallery, newest photo first
    List {
        /// Print the manifest entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Take a photo and add it to the gallery
    Capture {
        /// Use an existing image instead of the device camera
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Print the stored image of a photo as a data URL
    Show {
        /// Position in the list (0 is the newest photo)
        index: usize,
    },
}

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Info),
    );

    #[cfg(not(target_os = "android"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE_NAME));
    let config = AppConfig::load(&config_path)?;

    match cli.command {
        Command::List { json } => {
            let camera = platform_camera(None, &config.local_file_prefix);
            let mut gallery = open_gallery(&config, camera)?;
            gallery.initialize().await?;
            log::debug!("Listing gallery on {:?} runtime", gallery.runtime());
            print_photos(gallery.photos(), json)?;
        }
        Command::Capture { from } => {
            let camera = platform_camera(from, &config.local_file_prefix);
            let mut gallery = open_gallery(&config, camera)?;
            gallery.subscribe(|photos| log::info!("Gallery now holds {} photos", photos.len()));
            gallery.initialize().await?;

            let photo = gallery.capture().await?;
            println!("{}", photo.filepath);
        }
        Command::Show { index } => {
            let camera = platform_camera(None, &config.local_file_prefix);
            let mut gallery = open_gallery(&config, camera)?;
            gallery.initialize().await?;
            println!("{}", gallery.read_photo(index).await?);
        }
    }

    Ok(())
}

fn print_photos(photos: &[Photo], json: bool) -> Result<(), AppError> {
    if json {
        let out = serde_json::to_string_pretty(photos).map_err(|e| AppError::Other(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if photos.is_empty() {
        println!("No photos yet.");
    }
    for (i, photo) in photos.iter().enumerate() {
        let display = photo.display_path.as_deref().unwrap_or("-");
        println!("{:>3}  {}  {}", i, photo.filepath, abbreviate(display, 48));
    }
    Ok(())
}

/// Shortens long values (data URIs) for terminal output
fn abbreviate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let head: String = value.chars().take(max_chars).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("blob://xyz", 48), "blob://xyz");
        assert_eq!(abbreviate("data:image/jpeg;base64,AAAA", 10), "data:image...");
    }

    #[test]
    fn test_cli_parses_capture() {
        let cli = Cli::try_parse_from(["photo-snap", "capture", "--from", "shot.jpeg"]).unwrap();
        match cli.command {
            Command::Capture { from } => assert_eq!(from, Some(PathBuf::from("shot.jpeg"))),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
