// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{LevelFilter, info};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use portico::app_state::AppState;
use portico::config::{ValidatedConfig, load_config};
use portico::content::ContentStore;
use portico::public;

const DEFAULT_CONFIG_PATH: &str = "portico.toml";

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let config_path = match parse_args() {
        Ok(path) => path,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <path> to set the configuration file.");
            return 1;
        }
    };

    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("❌ Failed to load {}: {}", config_path.display(), error);
            return 1;
        }
    };

    init_logging(&config);

    let store = match ContentStore::load(&config.content.path) {
        Ok(store) => store,
        Err(error) => {
            eprintln!(
                "❌ Failed to load content database {}: {}",
                config.content.path.display(),
                error
            );
            return 1;
        }
    };

    match System::new().block_on(run_server(config, store)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server error: {}", error);
            1
        }
    }
}

fn parse_args() -> Result<PathBuf, String> {
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-C" => match args.next() {
                Some(path) => config_path = PathBuf::from(path),
                None => return Err("-C requires a path argument".to_string()),
            },
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    Ok(config_path)
}

fn init_logging(config: &ValidatedConfig) {
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

async fn run_server(config: ValidatedConfig, store: ContentStore) -> std::io::Result<()> {
    let config = Arc::new(config);
    let store = Arc::new(store);
    let app_state = Arc::new(AppState::new(&config, store.clone()));

    info!("✅ Loaded {} slugs from the content database", store.slugs().len());
    info!(
        "✅ {} listening on {}:{}",
        config.app.name, config.server.bind_address, config.server.port
    );

    let bind_address = config.server.bind_address.clone();
    let port = config.server.port;
    let workers = config.server.workers;

    let factory = {
        let config = config.clone();
        let store = store.clone();
        let app_state = app_state.clone();

        move || {
            App::new()
                .app_data(web::Data::from(config.clone()))
                .app_data(web::Data::from(store.clone()))
                .app_data(web::Data::from(app_state.clone()))
                .wrap(Logger::new(
                    r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#,
                ))
                .configure(public::configure)
        }
    };

    let mut server = HttpServer::new(factory);
    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    server.bind((bind_address.as_str(), port))?.run().await
}
