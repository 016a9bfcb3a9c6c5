mod app;
mod editor;
mod logging;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use resto_core::settings::{self, Settings};

use app::{App, Paths};

fn main() -> Result<()> {
    logging::init_logging(&settings::log_path()?)?;

    let paths = Paths {
        settings: settings::settings_path()?,
        body: settings::body_path()?,
    };
    let settings = Settings::load_or_create(&paths.settings)?;
    let mouse = settings.rs_settings.enable_mouse;
    info!(version = app::VERSION, mouse, "starting resto");

    let mut app = App::new(settings, paths);
    app.startup_update_check();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = ?err, "resto exited with an error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(50);

    loop {
        let mut hits = ui::HitMap::default();
        terminal.draw(|frame| {
            hits = ui::render(frame, app);
        })?;
        app.set_hit_map(hits);

        if app.should_quit {
            return Ok(());
        }

        // Poll with timeout so executor results and the spinner keep flowing
        if event::poll(TICK_RATE)? {
            let ev = event::read()?;
            app.handle_event(ev);
        }

        if let Some(path) = app.take_pending_editor() {
            let result = editor::edit_file(terminal, &path);
            app.editor_finished(&path, result);
        }

        app.tick();
    }
}
