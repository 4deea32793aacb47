//! Interactive editing session on stdin.

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};

use memegen_common::config::AppConfig;
use memegen_meme_model::{OverlaySlot, Position};
use memegen_session::{Event, SessionDriver, UserError};

const HELP: &str = "\
Commands:
  top <text>             set the top line
  bottom <text>          set the bottom line
  pos top|bottom <x> <y> move a line's anchor
  size <px>              font size, clamped to 10-100
  font <family>          font family
  color <#rrggbb>        fill colour
  redraw                 render again
  refresh                request a new signed URL now
  download               write meme_with_text.png
  status                 show the session state
  quit                   leave the session";

/// One parsed line of input.
#[derive(Debug)]
enum Input {
    Event(Event),
    Status,
    Help,
    Quit,
}

pub async fn run(config: &AppConfig, file: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let mut driver = super::remote_driver(config, output)?;

    driver.select_file(&file);
    driver.dispatch(Event::Submit);
    println!("Uploading {}... type 'help' for commands.", file.display());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut shown: Option<UserError> = None;
    let mut last_size = None;

    loop {
        report(&driver, &mut shown, &mut last_size);
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Ok(Some(Input::Event(event))) => {
                        let download = matches!(event, Event::Download)
                            .then(|| driver.state().url().is_some());
                        driver.dispatch(event);
                        match (download, driver.last_export()) {
                            (Some(true), Some(path)) => println!("Saved {}", path.display()),
                            (Some(_), _) => println!("Nothing to save yet."),
                            (None, _) => {}
                        }
                    }
                    Ok(Some(Input::Status)) => print_status(&driver),
                    Ok(Some(Input::Help)) => println!("{HELP}"),
                    Ok(Some(Input::Quit)) => break,
                    Ok(None) => {}
                    Err(message) => println!("{message}"),
                }
            }
            _ = driver.pump() => {}
        }
    }

    tracing::info!("Session ended");
    Ok(())
}

/// Print errors and render results that appeared since the last call.
fn report(
    driver: &SessionDriver,
    shown: &mut Option<UserError>,
    last_size: &mut Option<(u32, u32)>,
) {
    let current = driver.state().error().cloned();
    if current != *shown {
        if let Some(error) = &current {
            match error.action {
                Some(action) => println!(
                    "Error: {} [type 'refresh' to {}]",
                    error.message,
                    action.label()
                ),
                None => println!("Error: {}", error.message),
            }
        }
        *shown = current;
    }

    if driver.state().url().is_some() {
        let size = driver.surface().dimensions();
        if *last_size != Some(size) {
            println!("Rendered {}x{}", size.0, size.1);
            *last_size = Some(size);
        }
    }
}

fn print_status(driver: &SessionDriver) {
    let state = driver.state();
    let overlays = state.overlays();
    println!(
        "File:    {}",
        state.selected().map(|a| a.file_name.as_str()).unwrap_or("-")
    );
    println!(
        "CID:     {}",
        state.cid().map(|c| c.as_str()).unwrap_or("-")
    );
    match state.url() {
        Some(url) => println!("URL:     {url} (expires {})", url.expires_at()),
        None => println!("URL:     -"),
    }
    println!("Busy:    {}", state.is_busy());
    println!("Refresh: {}", if driver.is_refreshing() { "running" } else { "stopped" });
    println!("Font:    {} {}", state.style().font_shorthand(), state.style().fill);
    println!(
        "Top:     {:?} at ({}, {})",
        overlays.top.text, overlays.top.position.x, overlays.top.position.y
    );
    println!(
        "Bottom:  {:?} at ({}, {})",
        overlays.bottom.text, overlays.bottom.position.x, overlays.bottom.position.y
    );
    let (width, height) = driver.surface().dimensions();
    println!("Canvas:  {width}x{height}");
}

fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "top" => Input::Event(Event::SetText(OverlaySlot::Top, rest.to_string())),
        "bottom" => Input::Event(Event::SetText(OverlaySlot::Bottom, rest.to_string())),
        "pos" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            let [slot, x, y] = parts.as_slice() else {
                return Err("usage: pos top|bottom <x> <y>".to_string());
            };
            let slot: OverlaySlot = slot.parse()?;
            let x = x.parse::<i32>().map_err(|e| format!("invalid x: {e}"))?;
            let y = y.parse::<i32>().map_err(|e| format!("invalid y: {e}"))?;
            Input::Event(Event::SetPosition(slot, Position::new(x, y)))
        }
        "size" => {
            let size = rest
                .parse::<u32>()
                .map_err(|_| format!("invalid size '{rest}'"))?;
            Input::Event(Event::SetFontSize(size))
        }
        "font" => Input::Event(Event::SetFontFamily(rest.to_string())),
        "color" | "colour" => Input::Event(Event::SetFillColor(rest.to_string())),
        "redraw" => Input::Event(Event::Redraw),
        "refresh" => Input::Event(Event::RetryUrl),
        "download" => Input::Event(Event::Download),
        "status" => Input::Status,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(Some(input))
}
