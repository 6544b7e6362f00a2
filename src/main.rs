use anyhow::{ensure, Result};
use std::time::{Duration, Instant};
use swapi_to_csv::{
    cli::{Cli, Commands},
    fetch::{ApiConfig, SwapiClient},
    pipeline::sync,
    schema::ALL_TABLES,
    ui::{LogUi, UiApp},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Sync {
            output_dir,
            sqlite,
            base_url,
            first_id,
            last_id,
            timeout,
            tui,
        } => {
            ensure!(
                0 <= first_id && first_id <= last_id,
                "Invalid id range {}..={}",
                first_id,
                last_id
            );

            let config = ApiConfig {
                base_url,
                people_ids: first_id..=last_id,
                timeout: Duration::from_secs(timeout),
            };
            let client = SwapiClient::new(&config)?;
            let start = Instant::now();

            let (extraction, paths) = if tui {
                let mut ui = UiApp::new()?;
                match sync(&client, config.people_ids.clone(), &output_dir, sqlite.as_deref(), &mut ui) {
                    Ok(done) => {
                        ui.finish(&done.0.report.summary())?;
                        done
                    }
                    Err(e) => {
                        ui.restore()?;
                        return Err(e);
                    }
                }
            } else {
                init_tracing();
                let mut ui = LogUi::new();
                sync(&client, config.people_ids.clone(), &output_dir, sqlite.as_deref(), &mut ui)?
            };

            print!("\n{}", extraction.report.summary());
            println!(
                "Wrote {} files to {:?} in {:.1}s",
                paths.len(),
                output_dir,
                start.elapsed().as_secs_f64()
            );
            if let Some(db_path) = sqlite {
                println!("Wrote {:?}", db_path);
            }
        }

        Commands::ListTables => {
            println!("Output tables:\n");
            for table in ALL_TABLES {
                println!("  {} ({})", table.name, table.file_name);
                println!("    {}", table.column_names().join(", "));
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
