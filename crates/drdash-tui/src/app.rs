//! Application core — event loop and state plumbing.
//!
//! The app owns the controller subscription and the terminal event
//! reader, mapping terminal signals onto the engine: focus transitions
//! become visibility changes, `r` becomes a manual refresh trigger,
//! and every render tick redraws from the latest published state.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::watch;
use tracing::{debug, info};

use drdash_config::Config;
use drdash_core::{Controller, DashboardState, Titles};

use crate::dashboard::{self, RenderContext};
use crate::event::{Event, EventReader};
use crate::i18n::Translations;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    controller: Controller,
    state_rx: watch::Receiver<DashboardState>,
    translations: Translations,
    config: Config,
    /// Header titles; mock-mode polls may override these per cycle.
    titles: Titles,
    clock: String,
    running: bool,
}

impl App {
    pub fn new(controller: Controller, translations: Translations, config: Config) -> Self {
        let state_rx = controller.subscribe();
        let titles = Titles {
            main_title: "Oracle DR Monitoring Dashboard".into(),
            prod_data_center: "Production Data Center".into(),
            dr_data_center: "Disaster Recovery Data Center".into(),
        };
        Self {
            controller,
            state_rx,
            translations,
            config,
            titles,
            clock: format_clock(),
            running: true,
        }
    }

    /// Run the main event loop.
    pub async fn run(mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::new(
            Duration::from_secs(1),      // clock tick
            Duration::from_millis(100),  // 10 FPS render
        );

        // Initial fetch plus the adaptive refresh schedule.
        self.controller.start();

        info!("dashboard event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => self.handle_key(&key),
                Event::Resize(w, h) => {
                    // Nothing to recompute here: the next render derives
                    // layout from the new frame area and the current view.
                    debug!(w, h, "terminal resized");
                }
                Event::FocusGained => self.controller.visibility(false),
                Event::FocusLost => self.controller.visibility(true),
                Event::Tick => self.clock = format_clock(),
                Event::Render => {
                    let state = self.state_rx.borrow().clone();
                    if let DashboardState::Ready(view) = &state {
                        if let Some(titles) = &view.titles {
                            self.titles = titles.clone();
                        }
                    }
                    let ctx = RenderContext {
                        translations: &self.translations,
                        lb_ip: self.lb_ip(),
                        layout: &self.config.layout,
                        titles: &self.titles,
                        clock: &self.clock,
                    };
                    tui.draw(|frame| dashboard::render(frame, &state, &ctx))?;
                }
            }
        }

        self.controller.shutdown();
        events.stop();
        tui.exit()?;
        info!("dashboard event loop ended");
        Ok(())
    }

    fn lb_ip(&self) -> &str {
        let ip = self.config.frontend.load_balancer_ip.as_str();
        if ip.is_empty() { "N/A" } else { ip }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('r') => {
                // Manual out-of-band refresh; coalesced by the
                // controller if one is already in flight.
                let controller = self.controller.clone();
                tokio::spawn(async move { controller.refresh().await });
            }
            _ => {}
        }
    }
}

fn format_clock() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
