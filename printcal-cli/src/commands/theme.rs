use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::config::GlobalConfig;
use crate::render::create_spinner;

pub async fn run(config: &GlobalConfig, image: &Path) -> Result<()> {
    let site = config.require_site()?;
    config.require_nonce()?;
    let client = Client::new(site, config.rest_nonce.clone());

    let spinner = create_spinner("Uploading background".to_string());
    let result = client.upload_background(image).await;
    spinner.finish_and_clear();
    let path = result?;

    println!("Uploaded {}", path.green());
    println!(
        "{}",
        "Set bg_image in your config file (or pass --bg to export) to use it.".dimmed()
    );
    Ok(())
}
