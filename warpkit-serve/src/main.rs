use warpkit_serve::{app, ServeConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    log::info!("🚀 Starting the server");
    log::info!("🔥 Listening on: http://0.0.0.0:3000");
    log::info!("🔧 Press Ctrl+C to stop the server");

    let app = app(ServeConfig::default())?;

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    axum::serve(listener, app).await?;

    Ok(())
}
