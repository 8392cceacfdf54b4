mod ui;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::ThreadRng;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use slither::build_info;
use slither::cli::{self, CliAction, USAGE};
use slither::core::constants::{CONFIG_FILE, MAX_PLAYERS, REALTIME_FRAME_MS};
use slither::core::{ConfigError, GameConfig};
use slither::input::{RawKey, ScreenPoint, ScreenSize};
use slither::session::{SessionController, SessionPhase};
use slither::utils::{logging, persistence};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use ui::arena_scene::{board_for_area, render_arena_scene, ArenaHud};
use ui::menu_scene::MenuScreen;
use ui::scoreboard_scene::render_scoreboard;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Round,
    Scoreboard,
}

/// Mouse pointer id used for the swipe tracker.
const MOUSE_POINTER: u64 = 0;

fn main() -> io::Result<()> {
    let options = match cli::parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'slither --help' for usage.");
            std::process::exit(1);
        }
    };

    match options.action {
        CliAction::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliAction::Version => {
            println!("{}", build_info::version_string());
            return Ok(());
        }
        CliAction::InitConfig => {
            let path = persistence::data_path(CONFIG_FILE)?;
            if persistence::read_optional(CONFIG_FILE)?.is_some() {
                eprintln!("{} already exists; not overwriting.", path.display());
                std::process::exit(1);
            }
            if let Err(e) = GameConfig::default().save() {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            println!("Wrote default config to {}", path.display());
            return Ok(());
        }
        CliAction::Play | CliAction::PrintConfig => {}
    }

    let config = match load_config(options.players) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if options.action == CliAction::PrintConfig {
        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        println!("{}", json);
        return Ok(());
    }

    if let Err(e) = logging::init() {
        eprintln!("Logging disabled: {}", e);
    }
    info!(version = %build_info::version_string(), players = config.players, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn load_config(players: Option<usize>) -> Result<GameConfig, ConfigError> {
    let mut config = GameConfig::load()?;
    if let Some(players) = players {
        config.players = players;
        config.validate()?;
    }
    Ok(config)
}

fn raw_key(code: KeyCode) -> Option<RawKey> {
    match code {
        KeyCode::Up => Some(RawKey::Up),
        KeyCode::Down => Some(RawKey::Down),
        KeyCode::Left => Some(RawKey::Left),
        KeyCode::Right => Some(RawKey::Right),
        KeyCode::Char(c) => Some(RawKey::Char(c)),
        _ => None,
    }
}

/// Terminal rows are about twice as tall as columns are wide, so rows are
/// doubled to keep swipe axes comparable.
fn screen_point(mouse: &MouseEvent) -> ScreenPoint {
    ScreenPoint::new(mouse.column as i32, mouse.row as i32 * 2)
}

fn screen_size(area: Rect) -> ScreenSize {
    ScreenSize::new(area.width as i32, area.height as i32 * 2)
}

fn start_round(session: &mut SessionController, area: Rect, now: u64, rng: &mut ThreadRng) {
    let board = board_for_area(area, session.config().cell_size());
    session.start_round(board, now, rng);
}

fn run(terminal: &mut Tui, config: GameConfig) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let clock = Instant::now();
    let max_players = config.player_colors.len().min(MAX_PLAYERS);
    let mut menu = MenuScreen::new(config.players, max_players);
    let mut session = SessionController::new(config);
    let mut screen = Screen::Menu;
    let mut quit_pending = false;

    'main: loop {
        let now = clock.elapsed().as_millis() as u64;

        if screen == Screen::Menu {
            terminal.draw(|f| {
                let area = f.size();
                menu.draw(f, area, session.config());
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Up | KeyCode::Right => menu.increase(),
                        KeyCode::Down | KeyCode::Left => menu.decrease(),
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            session.set_players(menu.players);
                            start_round(&mut session, terminal.size()?, now, &mut rng);
                            quit_pending = false;
                            screen = Screen::Round;
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                        _ => {}
                    }
                }
            }
            continue;
        }

        // Round and scoreboard share the arena view; the board is re-read
        // from the terminal size every frame.
        let area = terminal.size()?;
        let board = board_for_area(area, session.config().cell_size());

        if screen == Screen::Round {
            session.update(board, now, &mut rng);
            if session.phase() == SessionPhase::Summary {
                debug!("showing scoreboard");
                quit_pending = false;
                screen = Screen::Scoreboard;
            }
        }

        terminal.draw(|f| {
            let area = f.size();
            if let Some(snapshot) = session.snapshot(now, board) {
                let hud = ArenaHud {
                    countdown_ms: session.countdown_remaining(now),
                    message: session.message(now),
                    quit_pending,
                    tick_interval_ms: session.tick_interval_ms(),
                    background: session.config().background_color,
                    cell_size: session.config().cell_size(),
                };
                render_arena_scene(f, area, &snapshot, &hud);
            }
            if screen == Screen::Scoreboard {
                if let Some(summary) = session.summary() {
                    render_scoreboard(f, area, summary);
                }
            }
        })?;

        // Wait up to one frame for input, then drain whatever else is queued
        // so simultaneous players are all heard before the next tick.
        if !event::poll(Duration::from_millis(REALTIME_FRAME_MS))? {
            continue;
        }
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match screen {
                    Screen::Round => {
                        if key.code == KeyCode::Esc {
                            if quit_pending {
                                session.abandon();
                                screen = Screen::Menu;
                                continue 'main;
                            }
                            quit_pending = true;
                        } else if quit_pending {
                            quit_pending = false;
                        } else if let Some(raw) = raw_key(key.code) {
                            session.handle_key(raw);
                        }
                    }
                    Screen::Scoreboard => match key.code {
                        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                            start_round(&mut session, area, now, &mut rng);
                            screen = Screen::Round;
                            continue 'main;
                        }
                        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => {
                            session.abandon();
                            screen = Screen::Menu;
                            continue 'main;
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break 'main,
                        _ => {}
                    },
                    Screen::Menu => {}
                },
                Event::Mouse(mouse) if screen == Screen::Round => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        session.touch_start(MOUSE_POINTER, screen_point(&mouse));
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        session.touch_end(MOUSE_POINTER, screen_point(&mouse), screen_size(area));
                    }
                    _ => {}
                },
                _ => {}
            }

            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
    }

    Ok(())
}
