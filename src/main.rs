use log::info;
use tokio::net::TcpListener;

use flatwiki::logger::Logger;
use flatwiki::{app, AppState, Config, PageStore, TemplateSet, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env();
    std::fs::create_dir_all(&config.data_dir)?;
    let templates = TemplateSet::load(&config.template_dir)?;
    let state = AppState::new(PageStore::new(config.data_dir.clone()), templates);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Wiki listening on http://{}, pages in {:?}", addr, config.data_dir);
    axum::serve(listener, app(state)).await.map_err(WikiError::from)
}
