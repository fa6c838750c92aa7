use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let mut app = vantage::ViewerApp::new();
    if let Some(path) = std::env::args().nth(1) {
        app.load_scene(&path)?;
    }
    app.run();
    Ok(())
}
