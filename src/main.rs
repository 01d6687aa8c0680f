//! obesity-tui - a terminal dashboard for obesity analysis
//!
//! Explores the relationship between carbohydrate intake and obesity
//! rates across countries and years. Uses the Component Architecture
//! pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::time::Duration;

fn main() -> Result<()> {
    // An optional data file path on the command line wins over the config
    let data_path = Config::resolve_data_path(std::env::args().nth(1));

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Create app state; the dataset loads once, before any filtering
    let mut app = App::new(data_path);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                eprintln!("Draw error: {}", e);
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Process the action
            if let Some(action) = action {
                // Action might produce a follow-up action
                let mut current_action = Some(action);
                while let Some(a) = current_action {
                    current_action = app.update(a)?;
                }
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
