use spa_preview_server::{logger, AppState, Config, Server, ServerError};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ServerError> {
    // Optional first argument: config file path (extension optional)
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    logger::init(&cfg).map_err(ServerError::Logger)?;

    // Fail fast on a missing root before any socket is opened
    let state = AppState::new(cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = state.config.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(ServerError::Runtime)?;

    runtime.block_on(async_main(state))
}

async fn async_main(state: AppState) -> Result<(), ServerError> {
    let server = Server::bind(state)?;
    let addr = server.local_addr();

    logger::log_server_start(&addr, server.state().root(), &server.state().config);
    println!("Serving at http://{addr}");

    server.run().await;
    Ok(())
}
