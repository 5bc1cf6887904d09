mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ReportCommand};
use frametally::config::{self, Config};
use frametally::report::{self, ReportQuery};
use frametally::video::{self, VideoOptions};
use frametally::{ingest, output, store};
use frametally_db::pool::{get_conn, init_pool};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "frametally=trace,frametally_parser=trace,frametally_av=debug,frametally_db=debug,frametally_common=debug".to_string()
        } else {
            "frametally=info,frametally_parser=info,frametally_av=info,frametally_db=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Csv {
            xytech,
            files,
            out_dir,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            write_csv(&xytech, &files, out_dir.unwrap_or(config.output.dir))
        }
        Commands::Db { xytech, files } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            store_logs(&config, &xytech, &files)
        }
        Commands::Report { json, query } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            run_report(&config, report_query(query), json)
        }
        Commands::Process { video, out_dir } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            process_video(&config, &video, out_dir)
        }
        Commands::CheckTools => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            check_tools(&config)
        }
        Commands::Validate { file } => validate_config(file.or(cli.config).as_deref()),
        Commands::Version => {
            println!("frametally {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn write_csv(xytech: &Path, files: &[PathBuf], out_dir: PathBuf) -> Result<()> {
    let batch = ingest::load_batch(xytech, files)?;
    let path = output::write_batch_csv(&batch, &out_dir)?;
    println!("{}", path.display());
    Ok(())
}

fn store_logs(config: &Config, xytech: &Path, files: &[PathBuf]) -> Result<()> {
    let batch = ingest::load_batch(xytech, files)?;
    let pool = init_pool(&config.database.path)
        .with_context(|| format!("Failed to open database {:?}", config.database.path))?;

    let summary = store::store_batch(&pool, &batch, &store::script_runner())?;
    println!(
        "Stored {} logs ({} frame ranges) in {}",
        summary.logs,
        summary.frames,
        config.database.path.display()
    );
    Ok(())
}

fn report_query(command: ReportCommand) -> ReportQuery {
    match command {
        ReportCommand::User { user } => ReportQuery::User(user),
        ReportCommand::Before { date, machine } => ReportQuery::Before { date, machine },
        ReportCommand::Location { text, date } => ReportQuery::Location { needle: text, date },
        ReportCommand::Users { machine } => ReportQuery::Users(machine),
        ReportCommand::Logs => ReportQuery::Logs,
    }
}

fn run_report(config: &Config, query: ReportQuery, json: bool) -> Result<()> {
    let pool = init_pool(&config.database.path)
        .with_context(|| format!("Failed to open database {:?}", config.database.path))?;
    let conn = get_conn(&pool)?;

    let result = report::run_report(&conn, &query)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.is_empty() {
        println!("No matching work found.");
    } else {
        print!("{}", report::render_text(&query, &result));
    }
    Ok(())
}

fn process_video(config: &Config, video_path: &Path, out_dir: Option<PathBuf>) -> Result<()> {
    let opts = VideoOptions {
        ffmpeg: config.tools.ffmpeg_path.clone(),
        ffprobe: config.tools.ffprobe_path.clone(),
        default_fps: config.video.frame_rate()?,
        thumbnail_size: config.video.thumbnail_size()?,
        out_dir: out_dir.unwrap_or_else(|| config.output.dir.clone()),
    };

    let pool = init_pool(&config.database.path)
        .with_context(|| format!("Failed to open database {:?}", config.database.path))?;
    let conn = get_conn(&pool)?;

    let path = video::process_video(&conn, video_path, &opts)?;
    println!("{}", path.display());
    Ok(())
}

fn check_tools(config: &Config) -> Result<()> {
    println!("Checking external tools...\n");

    let tools = frametally_av::check_tools(
        config.tools.ffmpeg_path.as_deref(),
        config.tools.ffprobe_path.as_deref(),
    );
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable the process command.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Database: {}", config.database.path.display());
    println!("  Output dir: {}", config.output.dir.display());
    println!("  Default fps: {}", config.video.default_fps);
    println!("  Thumbnail size: {}", config.video.thumbnail_size);
    Ok(())
}
