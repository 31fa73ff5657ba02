use clap::{Parser, Subcommand};
use image_resizer_core::{logging, Config, Preset, RasterBackend, Session};
use log::{info, LevelFilter};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "image-resizer")]
#[command(about = "Batch-resize images to fixed widths")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resize files and folders to the selected widths
    Resize {
        /// Image files or folders to resize
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Preset target width (repeatable)
        #[arg(short, long = "width", value_parser = parse_preset)]
        widths: Vec<Preset>,

        /// Additional custom target width
        #[arg(long)]
        custom: Option<String>,

        /// Allow scaling images up to a wider target
        #[arg(long)]
        upscale: bool,

        /// Verbosity level
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write diagnostics to a rotating log file in this directory
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },

    /// List the files a resize run would touch
    Scan {
        /// Image files or folders to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn parse_preset(value: &str) -> Result<Preset, String> {
    value
        .parse::<u32>()
        .ok()
        .and_then(Preset::from_width)
        .ok_or_else(|| format!("{} is not one of 64, 128, 256, 512", value))
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resize {
            paths,
            widths,
            custom,
            upscale,
            verbose,
            config,
            log_dir,
        } => {
            let config = load_config(config)?;

            // Diagnostics go to a file when asked, stderr otherwise
            match log_dir.or_else(|| config.log_dir.clone()) {
                Some(dir) => logging::init_logger(&dir)?,
                None => {
                    let level = match verbose {
                        0 => LevelFilter::Warn,
                        1 => LevelFilter::Info,
                        2 => LevelFilter::Debug,
                        _ => LevelFilter::Trace,
                    };
                    env_logger::Builder::from_default_env()
                        .filter_level(level)
                        .init();
                }
            }

            let mut session = Session::new(config);
            if upscale {
                session.set_upscale(true);
            }
            for preset in widths {
                session.widths_mut().set_preset(preset, true);
            }
            if let Some(text) = custom {
                session.widths_mut().set_custom(true, text);
            }

            session.drop_paths(&paths);
            for line in session.log().entries() {
                println!("{}", line);
            }
            session.clear_log();

            let backend = Arc::new(RasterBackend::from_config(session.config()));
            let run = session.spawn_process(backend)?;

            let cancel = run.cancel_flag();
            ctrlc::set_handler(move || cancel.store(true, Ordering::Relaxed))?;

            while !run.is_finished() {
                for line in session.drain(&run) {
                    println!("{}", line);
                }
                std::thread::sleep(Duration::from_millis(50));
            }

            let seen = session.log().len();
            let summary = session.finish(run)?;
            for line in &session.log().entries()[seen..] {
                println!("{}", line);
            }

            info!("Run finished: {:?}", summary);
            println!(
                "{} resized, {} already existed, {} too small, {} failed{}",
                summary.resized,
                summary.skipped_exists,
                summary.skipped_too_small,
                summary.failed,
                if summary.cancelled { " (cancelled)" } else { "" }
            );

            Ok(())
        }

        Commands::Scan { paths, config } => {
            env_logger::init();

            let mut session = Session::new(load_config(config)?);
            session.drop_paths(&paths);

            for path in session.files().iter() {
                println!("{}", path);
            }
            println!("{} files", session.files().len());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preset() {
        assert_eq!(parse_preset("256"), Ok(Preset::W256));
        assert!(parse_preset("100").is_err());
        assert!(parse_preset("wide").is_err());
    }

    #[test]
    fn test_resize_arguments() {
        let cli = Cli::parse_from([
            "image-resizer",
            "resize",
            "photos",
            "--width",
            "64",
            "-w",
            "512",
            "--custom",
            "300",
            "--upscale",
        ]);

        match cli.command {
            Commands::Resize {
                paths,
                widths,
                custom,
                upscale,
                ..
            } => {
                assert_eq!(paths, vec![PathBuf::from("photos")]);
                assert_eq!(widths, vec![Preset::W64, Preset::W512]);
                assert_eq!(custom.as_deref(), Some("300"));
                assert!(upscale);
            }
            Commands::Scan { .. } => panic!("expected resize"),
        }
    }

    #[test]
    fn test_rejects_unknown_width() {
        assert!(Cli::try_parse_from(["image-resizer", "resize", "x", "--width", "100"]).is_err());
    }
}
