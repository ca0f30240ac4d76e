use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::audio::TerminalBell;
use flappy::input::map_key;
use flappy::utils::build_info::version_line;
use flappy::utils::persistence::{JsonFileStore, ScoreStore};
use flappy::utils::settings::{parse_args, Command, Settings, USAGE};
use flappy::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Redraw roughly every animation frame.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let overrides = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Play(overrides)) => overrides,
        Ok(Command::Version) => {
            println!("{}", version_line());
            return Ok(());
        }
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(Command::ResetScore) => {
            let mut store = open_store()?;
            store
                .remove(flappy::core::HIGH_SCORE_KEY)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            println!("High score cleared.");
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'flappy --help' for usage.");
            std::process::exit(1);
        }
    };

    let stored = Settings::load();
    let mut settings = stored.clone();
    settings.apply(&overrides);
    let mut app = App::new(settings, open_store()?, TerminalBell);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = stored.with_session_changes(&app.settings).save() {
        log::warn!("could not save settings: {}", e);
    }
    result
}

fn open_store() -> io::Result<JsonFileStore> {
    JsonFileStore::open_default().map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

fn run<S: ScoreStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S, TerminalBell>,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal.draw(|frame| flappy::draw(frame, app))?;

        let timeout = FRAME_BUDGET.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_input(map_key(key));
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= FRAME_BUDGET {
            app.tick(elapsed.as_millis() as u64);
            last_tick = Instant::now();
        }
    }

    Ok(())
}
