use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::audio::AudioSink;
use crate::clock::TickAccumulator;
use crate::config::GameConfig;
use crate::food::Food;
use crate::input::Action;
use crate::particles::Particles;
use crate::render::PARTICLE_COLOR;
use crate::snake::{Direction::Right, MoveResult::*, Snake};
use crate::synth::Cue;
use crate::Coords;

/// Which screen is up, and whatever that screen owns.
pub enum GameState {
    Boot { frames: u32 },
    Menu { frames: u32 },
    Playing(Round),
    GameOver { score: u32, won: bool },
}

/// Whether the main loop should keep going after an input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One life of the snake, from pressing start to dying.
pub struct Round {
    pub snake: Snake,
    pub food: Food,
    pub particles: Particles,
    pub frames: u64,
    clock: TickAccumulator,
}

enum RoundEnd {
    Died(u32),
    Won(u32),
}

impl Round {
    fn new(config: &GameConfig, rng: &mut StdRng) -> Result<Round, u32> {
        let bounds = (config.grid_width, config.grid_height);
        let snake = Snake::new(config.spawn_point(), config.initial_length, Right, bounds);

        let food = Food::spawn(bounds, &occupied(&snake), rng).ok_or(snake.score())?;
        Ok(Round {
            snake,
            food,
            particles: Particles::new(),
            frames: 0,
            clock: TickAccumulator::new(config.fps, config.move_interval),
        })
    }

    fn update(
        &mut self,
        config: &GameConfig,
        rng: &mut StdRng,
        audio: &dyn AudioSink,
    ) -> Option<RoundEnd> {
        self.frames += 1;
        if !self.particles.is_empty() {
            self.particles.update();
        }
        self.food.tick();

        for _ in 0..self.clock.frame() {
            match self.snake.advance() {
                Crashed(collision) => {
                    info!(
                        ?collision,
                        heading = ?self.snake.direction(),
                        score = self.snake.score(),
                        "snake crashed"
                    );
                    audio.play(Cue::Die);
                    return Some(RoundEnd::Died(self.snake.score()));
                }
                Moved { new_head, .. } if new_head == self.food.cell => {
                    audio.play(Cue::Eat);
                    self.snake.eat(config.food_reward);
                    let eaten = self.food.cell;

                    let bounds = (config.grid_width, config.grid_height);
                    if !self.food.respawn(bounds, &occupied(&self.snake), rng) {
                        info!(score = self.snake.score(), "no room left for food");
                        return Some(RoundEnd::Won(self.snake.score()));
                    }

                    let centre = (eaten.0 as f32 + 0.5, eaten.1 as f32 + 0.5);
                    self.particles.burst(centre, config.particle_burst, PARTICLE_COLOR, rng);
                    debug!(
                        ?eaten,
                        next = ?self.food.cell,
                        length = self.snake.len(),
                        growth = self.snake.pending_growth(),
                        particles = self.particles.len(),
                        score = self.snake.score(),
                        "food eaten"
                    );
                }
                Moved { .. } => {}
            }
        }

        None
    }
}

fn occupied(snake: &Snake) -> Vec<Coords> {
    snake.body().iter().copied().collect()
}

pub struct SnakeGame {
    config: GameConfig,
    state: GameState,
    audio: Box<dyn AudioSink>,
    rng: StdRng,
}

impl SnakeGame {
    /// Starts on the boot screen, jingle and all.
    pub fn new(config: GameConfig, audio: Box<dyn AudioSink>, rng: StdRng) -> Self {
        audio.play(Cue::Boot);
        SnakeGame { config, state: GameState::Boot { frames: 0 }, audio, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn handle_action(&mut self, action: Action) -> Flow {
        if action == Action::Quit {
            info!("quit requested");
            return Flow::Exit;
        }

        match self.state {
            GameState::Boot { .. } => self.enter_menu(),
            GameState::Menu { .. } => match action {
                Action::Confirm => {
                    self.audio.play(Cue::Select);
                    self.start_round();
                }
                Action::Cancel => return Flow::Exit,
                _ => {}
            },
            GameState::Playing(ref mut round) => {
                if let Action::Move(dir) = action {
                    // Pressing the way it is already headed is not a turn
                    if dir != round.snake.queued_direction() && round.snake.set_direction(dir) {
                        debug!(?dir, "turn queued");
                        self.audio.play(Cue::Move);
                    }
                }
            }
            GameState::GameOver { .. } => match action {
                Action::Restart => {
                    self.audio.play(Cue::Select);
                    self.enter_menu();
                }
                Action::Cancel => return Flow::Exit,
                _ => {}
            },
        }

        Flow::Continue
    }

    /// Advances one frame of simulated time.
    pub fn update(&mut self) {
        let next = match &mut self.state {
            GameState::Boot { frames } => {
                *frames += 1;
                (*frames >= self.config.boot_frames()).then(|| GameState::Menu { frames: 0 })
            }
            GameState::Menu { frames } => {
                *frames += 1;
                None
            }
            GameState::Playing(round) => {
                match round.update(&self.config, &mut self.rng, self.audio.as_ref()) {
                    Some(RoundEnd::Died(score)) => Some(GameState::GameOver { score, won: false }),
                    Some(RoundEnd::Won(score)) => Some(GameState::GameOver { score, won: true }),
                    None => None,
                }
            }
            GameState::GameOver { .. } => None,
        };

        if let Some(state) = next {
            self.transition(state);
        }
    }

    fn enter_menu(&mut self) {
        self.transition(GameState::Menu { frames: 0 });
    }

    fn start_round(&mut self) {
        let state = match Round::new(&self.config, &mut self.rng) {
            Ok(round) => GameState::Playing(round),
            Err(score) => GameState::GameOver { score, won: true },
        };
        self.transition(state);
    }

    fn transition(&mut self, state: GameState) {
        info!(from = self.state.name(), to = state.name(), "state change");
        self.state = state;
    }
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::Boot { .. } => "boot",
            GameState::Menu { .. } => "menu",
            GameState::Playing(_) => "playing",
            GameState::GameOver { .. } => "game over",
        }
    }
}
