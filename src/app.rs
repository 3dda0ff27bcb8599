// Windowed host: feeds winit events to the match and draws it with wgpu

use std::sync::Arc;

use anyhow::Result;
use glam::{Vec2, Vec4};
use log::{debug, info, warn};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::core::Rect;
use crate::engine::assets::{AssetManager, TextureHandle, BACKGROUND_PATH};
use crate::engine::game_loop::GameLoop;
use crate::engine::input::{Action, InputManager, PlayerInput};
use crate::engine::renderer::{Renderer, Sprite, SpriteRenderer};
use crate::game::characters::{
    Adventurer, Combatant, Demon, EnemyAction, PlayerAction, ADVENTURER_STATS, DEMON_STATS,
};
use crate::game::config::TICK_RATE;
use crate::game::hud::{HealthBar, BAR_BACKGROUND, BAR_FILL};
use crate::game::{
    AudioSink, CharacterSprites, GameConfig, LogAudioSink, MatchState, Outcome, TickInput,
};

const HITBOX_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
const HITBOX_STROKE: f32 = 2.0;
const GAME_OVER_DIM: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.5);
/// Frames between frame-rate log lines
const FPS_LOG_INTERVAL: u64 = 600;

/// What the event loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct App {
    window: Arc<Window>,
    config: GameConfig,
    renderer: Renderer,
    assets: AssetManager,
    background: Option<TextureHandle>,
    adventurer_sprites: CharacterSprites<PlayerAction>,
    demon_sprites: CharacterSprites<EnemyAction>,
    state: MatchState,
    input: InputManager,
    game_loop: GameLoop,
    audio: LogAudioSink,
    show_hitboxes: bool,
    /// Outcome currently shown in the window title
    shown_outcome: Option<Outcome>,
}

impl App {
    /// Set up the renderer, load every sprite and start the first round
    pub fn new(window: Arc<Window>, config: GameConfig) -> Result<Self> {
        let arena = config.arena;
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            arena.width as f32,
            arena.height as f32,
        ))?;

        info!("Loading assets from {}", config.asset_root.display());
        let mut assets = AssetManager::new(&config.asset_root);

        let background = match assets.load_texture(
            renderer.device(),
            renderer.queue(),
            BACKGROUND_PATH,
        ) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Background unavailable, drawing without it: {}", e);
                None
            }
        };

        let adventurer_sprites: CharacterSprites<PlayerAction> = CharacterSprites::load(
            ADVENTURER_STATS,
            renderer.device(),
            renderer.queue(),
            &mut assets,
        )?;
        let demon_sprites: CharacterSprites<EnemyAction> =
            CharacterSprites::load(DEMON_STATS, renderer.device(), renderer.queue(), &mut assets)?;
        info!("{} textures loaded", assets.stats().texture_count);

        let mut game_loop = GameLoop::new(TICK_RATE);
        let now_ms = game_loop.tick_time_ms();
        let adventurer = Adventurer::new(
            ADVENTURER_STATS,
            adventurer_sprites.frame_counts(),
            adventurer_sprites.body(),
            &arena,
            now_ms,
        );
        let demon = Demon::new(
            DEMON_STATS,
            demon_sprites.frame_counts(),
            demon_sprites.body(),
            &arena,
            now_ms,
        );
        // Discard the time spent loading
        game_loop.begin_frame();

        Ok(Self {
            window,
            show_hitboxes: config.show_hitboxes,
            config,
            renderer,
            assets,
            background,
            adventurer_sprites,
            demon_sprites,
            state: MatchState::new(adventurer, demon, arena),
            input: InputManager::default(),
            game_loop,
            audio: LogAudioSink::new(),
            shown_outcome: None,
        })
    }

    /// Handle every window event except close and redraw
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.input.process_keyboard_event(event);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(*button, *state);
            }
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    info!("Window minimized, pausing");
                    self.game_loop.pause();
                } else {
                    if self.game_loop.is_paused() {
                        info!("Window restored, resuming");
                        self.game_loop.resume();
                    }
                    self.renderer.resize(*size);
                }
            }
            WindowEvent::Focused(false) => {
                self.input.reset();
            }
            _ => {}
        }
    }

    /// Run the ticks due since the last frame, then draw
    pub fn redraw(&mut self) -> Result<Flow> {
        let steps = self.game_loop.begin_frame();
        for _ in 0..steps {
            let now_ms = self.game_loop.next_tick_ms();
            let report = self.state.tick(&tick_input(self.input.player()), now_ms);
            self.audio.play_all(&report.cues);

            if report.quit {
                return Ok(Flow::Exit);
            }
        }

        if self.input.player().just_pressed(Action::ToggleHitboxes) {
            self.show_hitboxes = !self.show_hitboxes;
            info!("Hitbox overlay {}", if self.show_hitboxes { "on" } else { "off" });
        }
        self.input.update();

        if self.game_loop.frame_count() % FPS_LOG_INTERVAL == 0 {
            debug!("{:.1} fps", self.game_loop.fps());
        }

        self.update_title();
        self.draw()?;
        Ok(Flow::Continue)
    }

    fn update_title(&mut self) {
        let outcome = self.state.outcome();
        if outcome != self.shown_outcome {
            self.window
                .set_title(&window_title(&self.config.window_title, outcome));
            self.shown_outcome = outcome;
        }
    }

    fn draw(&mut self) -> Result<()> {
        let arena = *self.state.arena();
        let screen = Rect::new(0, 0, arena.width, arena.height);
        let sprites = self.renderer.sprite_renderer_mut();

        if let Some(background) = self.background {
            sprites.add_sprite(Sprite::with_texture(screen.center(), screen.size(), background));
        }

        let adventurer = self.state.adventurer().sprite_frame();
        sprites.add_sprite(self.adventurer_sprites.sprite(&adventurer, &self.assets));
        let demon = self.state.demon().sprite_frame();
        sprites.add_sprite(self.demon_sprites.sprite(&demon, &self.assets));

        let (adventurer_bar, demon_bar) = self.state.health_bars();
        for bar in [adventurer_bar, demon_bar] {
            add_health_bar(sprites, bar);
        }

        if self.show_hitboxes {
            for hitbox in self.state.debug_hitboxes() {
                let top_left = Vec2::new(hitbox.left() as f32, hitbox.top() as f32);
                sprites.add_outline(top_left, hitbox.size(), HITBOX_STROKE, HITBOX_COLOR);
            }
        }

        if self.state.outcome().is_some() {
            sprites.add_sprite(Sprite::new(screen.center(), screen.size()).tinted(GAME_OVER_DIM));
        }

        self.renderer.render(&self.assets)
    }
}

fn add_health_bar(sprites: &mut SpriteRenderer, bar: HealthBar) {
    sprites.add_sprite(
        Sprite::new(bar.background.center(), bar.background.size())
            .tinted(Vec4::from_array(BAR_BACKGROUND)),
    );
    if bar.fill.width > 0 {
        sprites.add_sprite(
            Sprite::new(bar.fill.center(), bar.fill.size()).tinted(Vec4::from_array(BAR_FILL)),
        );
    }
}

/// Controls for one tick, read from the held actions
fn tick_input(player: &PlayerInput) -> TickInput {
    TickInput {
        move_left: player.is_pressed(Action::MoveLeft),
        move_right: player.is_pressed(Action::MoveRight),
        jump: player.is_pressed(Action::Jump),
        attack: player.is_pressed(Action::Attack),
        restart: player.is_pressed(Action::Restart),
        quit: player.is_pressed(Action::Quit),
    }
}

fn window_title(base: &str, outcome: Option<Outcome>) -> String {
    match outcome {
        Some(outcome) => format!("{} - {}", base, outcome.message()),
        None => base.to_string(),
    }
}
