use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use swath_track::config::{parse_duration, Config};
use swath_track::coverage::{analyze_revisit, RevisitQuery, DEFAULT_DURATION_HOURS};
use swath_track::propagation::{Sgp4Propagator, TleLoader};
use swath_track::swath::{OrbitPayload, SwathGenerator};

#[derive(Parser)]
#[command(name = "swath-track")]
#[command(about = "Satellite ground tracks and sensor swaths")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a TLE source and check every satellite's elements
    Validate {
        #[arg(long)]
        tle: Option<PathBuf>,
    },
    /// Compute ground tracks and swath edges as JSON
    Orbits {
        #[arg(long)]
        tle: Option<PathBuf>,
        #[arg(long, allow_hyphen_values = true)]
        side_angle: Option<f64>,
        #[arg(long)]
        samples: Option<usize>,
        /// Sample spacing, e.g. 5m
        #[arg(long)]
        cadence: Option<String>,
        /// First sample time (RFC3339), defaults to now
        #[arg(long)]
        start: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Revisit statistics of a ground point as JSON
    Revisit {
        #[arg(long)]
        tle: Option<PathBuf>,
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
        /// Analysis window, e.g. 48h, defaults to one day
        #[arg(long)]
        duration: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        side_angle: Option<f64>,
        #[arg(long)]
        start: Option<String>,
    },
    /// Run the HTTP server
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    match cli.command {
        Commands::Validate { tle } => validate(&config, tle),
        Commands::Orbits {
            tle,
            side_angle,
            samples,
            cadence,
            start,
            output,
        } => orbits(config, tle, side_angle, samples, cadence, start, output),
        Commands::Revisit {
            tle,
            latitude,
            longitude,
            duration,
            side_angle,
            start,
        } => revisit(config, tle, latitude, longitude, duration, side_angle, start),
        Commands::Serve { bind } => serve(config, bind),
    }
}

fn load_satellites(config: &Config, tle: Option<PathBuf>) -> Option<TleLoader> {
    let mut loader = TleLoader::new(tle.unwrap_or_else(|| config.tle.path.clone()));
    match loader.load_all() {
        Ok(()) => Some(loader),
        Err(e) => {
            eprintln!("Error loading TLEs: {}", e);
            None
        }
    }
}

fn parse_start(start: Option<String>) -> Result<DateTime<Utc>, String> {
    match start {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| format!("Invalid start time {}: {}", s, e)),
    }
}

fn validate(config: &Config, tle: Option<PathBuf>) -> ExitCode {
    let Some(loader) = load_satellites(config, tle) else {
        return ExitCode::FAILURE;
    };

    let mut invalid = 0;
    println!(
        "{} satellites in {}",
        loader.satellites().len(),
        loader.source().display()
    );
    for (i, sat) in loader.satellites().iter().enumerate() {
        match Sgp4Propagator::check(sat) {
            Ok(()) => println!("  {}: {}", i + 1, sat.name),
            Err(e) => {
                invalid += 1;
                println!("  {}: {} (invalid: {})", i + 1, sat.name, e);
            }
        }
    }

    if invalid == 0 {
        ExitCode::SUCCESS
    } else {
        eprintln!("{} satellites have invalid elements", invalid);
        ExitCode::FAILURE
    }
}

fn orbits(
    config: Config,
    tle: Option<PathBuf>,
    side_angle: Option<f64>,
    samples: Option<usize>,
    cadence: Option<String>,
    start: Option<String>,
    output: Option<PathBuf>,
) -> ExitCode {
    let Some(loader) = load_satellites(&config, tle) else {
        return ExitCode::FAILURE;
    };

    let mut swath = config.swath;
    if let Some(angle) = side_angle {
        swath.side_angle_deg = angle;
    }
    if let Some(n) = samples {
        swath.sample_count = n;
    }
    if let Some(cadence) = cadence {
        match parse_duration(&cadence) {
            Ok(d) => swath.cadence = d,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    if let Err(e) = swath.validate() {
        eprintln!("Invalid swath settings: {}", e);
        return ExitCode::FAILURE;
    }
    let start = match parse_start(start) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let generator = SwathGenerator::new(swath);
    let results = match generator.generate(loader.satellites(), &Sgp4Propagator, start) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid swath settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let payload = OrbitPayload::from_results(&results);

    let json = match serde_json::to_string(&payload) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    write_output(output, &json)
}

fn revisit(
    config: Config,
    tle: Option<PathBuf>,
    latitude: f64,
    longitude: f64,
    duration: Option<String>,
    side_angle: Option<f64>,
    start: Option<String>,
) -> ExitCode {
    let Some(loader) = load_satellites(&config, tle) else {
        return ExitCode::FAILURE;
    };
    let duration = match duration.as_deref().map(parse_duration) {
        None => chrono::Duration::hours(DEFAULT_DURATION_HOURS),
        Some(Ok(d)) => d,
        Some(Err(e)) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let start = match parse_start(start) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let query = RevisitQuery {
        duration,
        side_angle_deg: side_angle.unwrap_or(config.swath.side_angle_deg),
        radius_km: config.coverage.radius_km,
        max_events: config.coverage.max_events,
        ..RevisitQuery::new(latitude, longitude)
    };

    match analyze_revisit(
        loader.satellites(),
        &Sgp4Propagator,
        &config.swath,
        &query,
        start,
    ) {
        Ok(stats) => match serde_json::to_string_pretty(&stats) {
            Ok(json) => write_output(None, &json),
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("Revisit analysis failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn serve(mut config: Config, bind: Option<String>) -> ExitCode {
    if let Some(bind) = bind {
        config.web.bind = bind;
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(swath_track::web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn write_output(output: Option<PathBuf>, json: &str) -> ExitCode {
    match output {
        Some(path) => match fs::write(&path, json) {
            Ok(()) => {
                log::info!("Wrote {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error writing {}: {}", path.display(), e);
                ExitCode::FAILURE
            }
        },
        None => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
    }
}
