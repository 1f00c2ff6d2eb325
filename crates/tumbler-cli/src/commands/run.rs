use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use tumbler_core::AppConfig;
use tumbler_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    load_theme,
    ticker::spawn_ticker,
    widgets::{CounterWidget, PopupWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, value: Option<f64>, start_ticker: bool) -> Result<()> {
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), theme)?;
    app.set_value(value.unwrap_or(0.0), Instant::now());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Tumbler"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, start_ticker).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    start_ticker: bool,
) -> Result<()> {
    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(app.config.ui.tick_rate_ms, app.config.scroll.animation_fps);

    // Ticker steps arrive here; the sender is cloned into every ticker task
    let (ticker_tx, mut ticker_rx) = mpsc::unbounded_channel::<f64>();
    let mut ticker: Option<JoinHandle<()>> = None;
    if start_ticker {
        toggle_ticker(app, &mut ticker, &ticker_tx);
    }

    loop {
        // Apply pending ticker steps (non-blocking)
        while let Ok(step) = ticker_rx.try_recv() {
            if app.ticker_enabled {
                app.adjust(step, Instant::now());
            }
        }

        app.tick(Instant::now());

        // Draw UI
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            CounterWidget::render(frame, layout[0], &app.counter, &app.theme);
            StatusBarWidget::render(frame, layout[1], app);

            match &app.mode {
                Mode::Input(buffer) => PopupWidget::render_input(frame, buffer, &app.theme),
                Mode::Help => PopupWidget::render_help(frame, &app.theme),
                Mode::Normal => {}
            }
        })?;

        // Poll at frame rate while digits are moving
        let event = if app.is_animating() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(AppEvent::Key(key)) = event {
            let action = handle_key_event(key, app);
            handle_action(app, action, &mut ticker, &ticker_tx);
        }

        if app.should_quit {
            break;
        }
    }

    if let Some(handle) = ticker.take() {
        handle.abort();
    }
    Ok(())
}

fn handle_action(
    app: &mut App,
    action: Action,
    ticker: &mut Option<JoinHandle<()>>,
    ticker_tx: &mpsc::UnboundedSender<f64>,
) {
    let now = Instant::now();
    if action != Action::None {
        app.clear_status();
    }

    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::Adjust(delta) => {
            app.adjust(delta, now);
        }
        Action::RandomValue => {
            app.random_value(now);
        }
        Action::StartInput => app.start_input(),
        Action::ToggleAnimation => app.toggle_animation(),
        Action::ToggleTicker => toggle_ticker(app, ticker, ticker_tx),
        Action::StopScroll => app.stop(now),
        Action::ShowHelp => app.show_help(),
        Action::ExitMode | Action::Cancel => app.exit_mode(),
        Action::Confirm => {
            app.confirm_input(now);
        }
        Action::InputChar(c) => app.input_char(c),
        Action::Backspace => app.backspace(),
        Action::None => {}
    }
}

fn toggle_ticker(
    app: &mut App,
    ticker: &mut Option<JoinHandle<()>>,
    ticker_tx: &mpsc::UnboundedSender<f64>,
) {
    app.toggle_ticker();
    if let Some(handle) = ticker.take() {
        handle.abort();
    }
    if app.ticker_enabled {
        tracing::info!(
            "Ticker every {}ms (max step {})",
            app.config.ticker.interval_ms,
            app.config.ticker.max_step
        );
        *ticker = Some(spawn_ticker(&app.config.ticker, ticker_tx.clone()));
    }
}
