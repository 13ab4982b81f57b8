use actix_web::{App, HttpServer};
use rusty_golf_games::args;
use rusty_golf_games::args::validation::load_snapshot;
use rusty_golf_games::controller::game::routes;
use rusty_golf_games::game::{compute_settlements, compute_status};
use rusty_golf_games::logging::init_logging;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::args_checks();
    init_logging(args.log_level)?;

    if let Some(path) = &args.snapshot {
        let snapshot = load_snapshot(path)?;
        let output = if args.settle {
            serde_json::to_string_pretty(&compute_settlements(&snapshot)?)?
        } else {
            serde_json::to_string_pretty(&compute_status(&snapshot)?)?
        };
        println!("{output}");
        return Ok(());
    }

    log::info!("listening on {}:{}", args.bind, args.port);
    HttpServer::new(|| App::new().configure(routes))
        .bind((args.bind.as_str(), args.port))?
        .run()
        .await?;
    Ok(())
}
