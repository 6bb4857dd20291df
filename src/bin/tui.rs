//! wapanel TUI (Terminal User Interface)
//!
//! A terminal control panel for a WhatsApp HTTP gateway.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::io;
use std::time::Duration;
use tracing::{error, info};
use wapanel::config::Settings;
use wapanel::tui::{App, ui::ui};

const SETTINGS_PATH: &str = "wapanel.json";

fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| SETTINGS_PATH.to_string());

    let mut settings = Settings::load(&settings_path)?;
    settings.apply_env();
    settings.validate()?;
    wapanel::init_logging(&settings)?;
    info!(
        "Starting wapanel: gateway={}, backend={}, session={}",
        settings.gateway_url, settings.backend_url, settings.session
    );

    // Background HTTP work runs here; the UI loop stays on the main thread
    let runtime = tokio::runtime::Runtime::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings, runtime.handle().clone());

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("UI loop failed: {}", err);
        println!("Error: {:?}", err);
    }

    drop(app);
    runtime.shutdown_timeout(Duration::from_secs(1));
    info!("wapanel stopped");

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
