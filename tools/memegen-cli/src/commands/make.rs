//! Full flow through a session: upload, sign, caption, download.

use std::path::PathBuf;

use memegen_common::config::AppConfig;

use super::TextArgs;
use memegen_session::Event;

pub async fn run(
    config: &AppConfig,
    file: PathBuf,
    text: TextArgs,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut driver = super::remote_driver(config, output)?;

    driver.select_file(&file);
    // Style and text first, so the only render happens once the URL exists.
    for event in text.events() {
        driver.dispatch(event);
    }
    if let Some(error) = driver.state().error() {
        anyhow::bail!("{}", error.message);
    }

    println!("Uploading {}...", file.display());
    driver.dispatch(Event::Submit);
    driver.settle().await;
    if let Some(error) = driver.state().error() {
        anyhow::bail!("{}", error.message);
    }

    if let (Some(cid), Some(url)) = (driver.state().cid(), driver.state().url()) {
        println!("CID:        {cid}");
        println!("Signed URL: {url}");
    }

    driver.dispatch(Event::Download);
    match driver.last_export() {
        Some(path) => {
            let (width, height) = driver.surface().dimensions();
            println!("Wrote {} ({width}x{height})", path.display());
            Ok(())
        }
        None => anyhow::bail!("Nothing was exported"),
    }
}
