use std::env;
use std::process;
use log::{error, info, warn};
use crate::config::load_config;
use crate::initialization::{init, setup_logger, Mgr};
use crate::manager_warehouse::Warehouse;

mod check;
mod config;
mod errors;
mod initialization;
mod manager_mail;
mod manager_warehouse;
mod manager_weather_api;
mod mapping;
mod models;
mod pipeline;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config_path = args.get(1).map(String::as_str).unwrap_or("skyfeed.toml");
    let mode = args.get(2).map(String::as_str).unwrap_or("run");

    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    match mode {
        "run" => run_pipeline(&config),

        "check" => {
            if let Err(e) = check::run(&config) {
                eprintln!("Check failed: {}", e);
                process::exit(1);
            }
        }

        "seed" => seed_cities(&config),

        _ => {
            eprintln!("Unknown mode '{}', expected run, check or seed", mode);
            process::exit(2);
        }
    }
}

fn run_pipeline(config: &config::Config) {
    if let Err(e) = setup_logger(&config.general) {
        eprintln!("Error setting up logging: {}", e);
        process::exit(1);
    }

    info!("skyfeed version: {}", env!("CARGO_PKG_VERSION"));

    let mgr = match init(config) {
        Ok(m) => m,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    let Mgr { api, mut warehouse, mail } = mgr;

    let summary = match pipeline::run(&mut warehouse, |city| api.fetch_forecast(city)) {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if summary.failed > 0 {
        if let Some(mail) = &mail {
            let result = mail.send_mail(
                "skyfeed: pipeline run finished with failures".to_string(),
                summary.to_string(),
            );
            if let Err(e) = result {
                warn!("Error sending failure report: {}", e);
            }
        }
    }
}

fn seed_cities(config: &config::Config) {
    let result = Warehouse::open(&config.database.path)
        .and_then(|mut warehouse| warehouse.seed_cities(&config.cities.names));

    match result {
        Ok(inserted) => println!("Seeded {} new cities", inserted),
        Err(e) => {
            eprintln!("Error seeding cities: {}", e);
            process::exit(1);
        }
    }
}
