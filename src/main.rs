use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod app;
mod core;
mod engine;
mod game;

use app::{App, Flow};
use game::GameConfig;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Demon Slayer...");

    let config = GameConfig::from_env();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.arena.width,
                config.arena.height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut app = App::new(window.clone(), config)?;

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => match app.redraw() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    info!("Quitting...");
                    elwt.exit();
                }
                Err(e) => {
                    error!("Render failed: {:#}", e);
                    elwt.exit();
                }
            },
            Event::WindowEvent { event, .. } => app.handle_window_event(&event),
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
