mod ai;
mod commentary;
mod config;
mod debug;
mod game;
mod menu;
mod session;
mod ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use commentary::Commentator;
use config::Config;
use menu::{MenuAction, MenuState};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage(&args[0]);
        return Ok(());
    }

    let debug_enabled = args.iter().any(|arg| arg == "--debug");
    debug::init(debug_enabled)?;
    debug::log("SESSION", "Purrpong starting");

    let config = config::load_config()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    debug::log("SESSION", "Purrpong exiting");
    Ok(result?)
}

fn print_usage(program: &str) {
    println!("Purrpong - terminal pong against a talking cat opponent");
    println!();
    println!("Usage:");
    println!("  {}            # Play", program);
    println!("  {} --debug    # Play with diagnostic logging to a temp file", program);
    println!();
    println!("Controls: mouse moves your paddle, W/S nudge it, Q quits.");
    println!("Difficulty and speed live in the menu; the config file has the rest.");
}

/// Menu loop: hand off to a match session on start, come back on exit
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut config: Config,
) -> Result<(), io::Error> {
    let mut menu_state = MenuState::from_config(&config);

    loop {
        terminal.draw(|frame| menu::render_menu(frame, &menu_state))?;

        match menu::handle_menu_input(&mut menu_state)? {
            MenuAction::None => {}
            MenuAction::StartMatch => {
                // Menu adjustments become the live settings for this match
                config.game.skill_tier = menu_state.skill_tier;
                config.game.speed_multiplier = menu_state.speed_multiplier;

                let mut sink = Commentator::new(&config.commentary);
                session::run_match(terminal, &config, &mut sink)?;
            }
            MenuAction::Quit => return Ok(()),
        }
    }
}
