use std::{thread::sleep, time::{Duration, Instant}};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::food::Food;
use crate::grid::Grid;
use crate::input::{InputEvent, InputSource};
use crate::render::{Drawable, Surface, BACKGROUND_COLOR};
use crate::snake::{Snake, MoveResult};

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, trace};

#[derive(Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

pub struct SnakeGame<S: Surface> {
    grid: Grid,
    tick_rate: u32,
    surface: S,
    rng: StdRng,
    snake: Snake,
    food: Food,
    ticks: u64,
}

impl<S: Surface> SnakeGame<S> {
    pub fn new(config: &Config, surface: S) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = config.grid();
        let mut snake = Snake::new(grid);
        let food = place_food(&grid, &mut snake, &mut rng)?;

        Ok(SnakeGame { grid, tick_rate: config.tick_rate, surface, rng, snake, food, ticks: 0 })
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn food(&self) -> &Food {
        &self.food
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Ticks until a quit event arrives.
    pub fn run<I: InputSource>(&mut self, input: &mut I) -> Result<()> {
        info!(
            cells_wide = self.grid.cells_wide(),
            cells_high = self.grid.cells_high(),
            tick_rate = self.tick_rate,
            "starting game"
        );

        let mut ticker = Ticker::new(self.tick_rate);
        self.render()?;

        loop {
            let events = input.drain()?;
            if self.step(&events)? == TickOutcome::Quit {
                info!(ticks = self.ticks, length = self.snake.positions().len(), "quit requested");
                return Ok(());
            }

            self.render()?;
            ticker.wait();
        }
    }

    /// One game update: input, movement, eating. Does not draw.
    pub fn step(&mut self, events: &[InputEvent]) -> Result<TickOutcome> {
        for ev in events {
            match ev {
                InputEvent::Quit => return Ok(TickOutcome::Quit),
                InputEvent::Turn(dir) => self.snake.set_pending_direction(*dir),
            }
        }

        self.ticks += 1;
        if let Some(dir) = self.snake.pending_direction() {
            debug!(tick = self.ticks, from = ?self.snake.direction(), to = ?dir, "turning");
        }
        self.snake.update_direction();

        if let MoveResult::Moved { new_head, old_tail } = self.snake.move_step() {
            trace!(tick = self.ticks, ?new_head, ?old_tail, "moved");
        }

        if self.snake.head() == self.food.position() {
            self.snake.grow();
            debug!(target_length = self.snake.target_length(), "ate food");

            if self.food.relocate(&self.grid, self.snake.positions(), &mut self.rng).is_none() {
                info!(length = self.snake.positions().len(), "board is full, starting over");
                self.food = place_food(&self.grid, &mut self.snake, &mut self.rng)?;
            }
        }

        Ok(TickOutcome::Continue)
    }

    pub fn render(&mut self) -> Result<()> {
        self.surface.clear(BACKGROUND_COLOR)?;
        self.snake.draw(&mut self.surface, &self.grid)?;
        self.food.draw(&mut self.surface, &self.grid)?;
        self.surface.present()
    }
}

/// Places food away from `snake`, resetting the snake first if it leaves no room.
fn place_food(grid: &Grid, snake: &mut Snake, rng: &mut StdRng) -> Result<Food> {
    if let Some(food) = Food::new(grid, snake.positions(), rng) {
        return Ok(food);
    }

    snake.reset();
    Food::new(grid, snake.positions(), rng).ok_or(Error::NoRoomForFood)
}

/// Fixed-rate tick source.
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(ticks_per_second: u32) -> Self {
        let interval = tick_interval(ticks_per_second);
        Ticker { interval, next: Instant::now() + interval }
    }

    /// Blocks until the next tick boundary. A late caller starts a fresh
    /// schedule rather than firing a burst of catch-up ticks.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            sleep(self.next - now);
            self.next += self.interval;
        } else {
            self.next = now + self.interval;
        }
    }
}

pub fn tick_interval(ticks_per_second: u32) -> Duration {
    Duration::from_secs(1) / ticks_per_second.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction::*;
    use crate::render::{FOOD_COLOR, SNAKE_COLOR, testing::{Op, RecordingSurface}};
    use crate::Coords;

    fn game(seed: u64) -> SnakeGame<RecordingSurface> {
        let config = Config { seed: Some(seed), ..Config::default() };
        SnakeGame::new(&config, RecordingSurface::default()).unwrap()
    }

    fn put_food(game: &mut SnakeGame<RecordingSurface>, pos: Coords) {
        game.food = Food::at(pos);
    }

    #[test]
    fn test_initial_food_avoids_snake() {
        for seed in 0..50 {
            let game = game(seed);
            assert!(!game.snake().positions().contains(&game.food().position()));
        }
    }

    #[test]
    fn test_quit_stops_before_moving() {
        let mut game = game(1);
        let head = game.snake().head();

        assert_eq!(game.step(&[InputEvent::Turn(Up), InputEvent::Quit]).unwrap(), TickOutcome::Quit);
        assert_eq!(game.snake().head(), head);
    }

    #[test]
    fn test_turn_applies_same_tick() {
        let mut game = game(2);
        put_food(&mut game, (0, 0));

        game.step(&[InputEvent::Turn(Up)]).unwrap();
        assert_eq!(game.snake().head(), (320, 220));
        assert_eq!(game.snake().direction(), Up);
    }

    #[test]
    fn test_eating_grows_and_moves_food() {
        let mut game = game(3);
        put_food(&mut game, (340, 240));

        assert_eq!(game.step(&[]).unwrap(), TickOutcome::Continue);
        assert_eq!(game.snake().target_length(), 2);
        assert_ne!(game.food().position(), (340, 240));
        assert!(!game.snake().positions().contains(&game.food().position()));

        // The extra segment shows up on the following move
        game.step(&[]).unwrap();
        assert_eq!(game.snake().positions(), &[(360, 240), (340, 240)]);
    }

    #[test]
    fn test_full_board_starts_over() {
        let config = Config { width: 40, height: 20, seed: Some(9), ..Config::default() };
        let mut game = SnakeGame::new(&config, RecordingSurface::default()).unwrap();
        // Two cells: the snake starts on (20, 0), so the food can only go on the other
        assert_eq!(game.snake().head(), (20, 0));
        assert_eq!(game.food().position(), (0, 0));

        game.step(&[]).unwrap();
        assert_eq!(game.snake().positions(), &[(0, 0)]);
        assert_eq!(game.snake().target_length(), 2);
        assert_eq!(game.food().position(), (20, 0));

        // Eating the last free cell fills the board
        game.step(&[]).unwrap();
        assert_eq!(game.snake().positions(), &[(20, 0)]);
        assert_eq!(game.snake().target_length(), 1);
        assert_eq!(game.food().position(), (0, 0));
    }

    #[test]
    fn test_render_order() {
        let mut game = game(4);
        put_food(&mut game, (0, 0));
        game.render().unwrap();

        let ops = &game.surface().ops;
        assert_eq!(ops.first(), Some(&Op::Clear(BACKGROUND_COLOR)));
        assert_eq!(ops.last(), Some(&Op::Present));
        assert_eq!(game.surface().fills_with(SNAKE_COLOR), vec![(320, 240)]);
        assert_eq!(game.surface().fills_with(FOOD_COLOR), vec![(0, 0)]);
    }

    struct Scripted(Vec<Vec<InputEvent>>);

    impl InputSource for Scripted {
        fn drain(&mut self) -> Result<Vec<InputEvent>> {
            Ok(if self.0.is_empty() { vec![] } else { self.0.remove(0) })
        }
    }

    #[test]
    fn test_run_until_quit() {
        let config = Config { seed: Some(5), tick_rate: 100, ..Config::default() };
        let mut game = SnakeGame::new(&config, RecordingSurface::default()).unwrap();
        put_food(&mut game, (0, 0));

        let mut input = Scripted(vec![vec![InputEvent::Turn(Down)], vec![], vec![InputEvent::Quit]]);
        game.run(&mut input).unwrap();

        assert_eq!(game.snake().head(), (320, 280));
        // Initial frame plus one per completed tick
        let frames = game.surface().ops.iter().filter(|op| **op == Op::Present).count();
        assert_eq!(frames, 3);
    }

    #[test]
    fn test_single_cell_board_is_rejected() {
        let config = Config { width: 20, height: 20, ..Config::default() };
        assert!(SnakeGame::new(&config, RecordingSurface::default()).is_err());
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval(10), Duration::from_millis(100));
        assert_eq!(tick_interval(0), Duration::from_secs(1));
    }

    #[test]
    fn test_late_ticker_restarts_schedule() {
        let interval = tick_interval(100);
        let mut ticker = Ticker::new(100);
        sleep(interval * 3);

        let before = Instant::now();
        ticker.wait();
        let after = Instant::now();

        // No sleeping off the missed ticks
        assert!(after - before < interval);
        assert!(ticker.next >= before + interval);
        assert!(ticker.next <= after + interval);
    }

    #[test]
    fn test_ticker_waits_for_boundary() {
        let mut ticker = Ticker::new(100);
        let start = Instant::now();
        ticker.wait();
        ticker.wait();
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
