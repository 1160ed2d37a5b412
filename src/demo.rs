//! Headless demo run
//!
//! Drives the player controller through a few small built-in stages with a
//! scripted pilot, standing in for the stage manager, HUD, camera, mixer and
//! fireball entity that a full game would provide.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use stomp_audio::TimedMixer;
use stomp_core::{Clock, FrameTimer, ManualClock, Rect, TimeConfig};
use stomp_game::{
    Direction, Enemy, FrameContext, GameStats, Hud, InputAction, InputSnapshot, LifecycleState,
    Platform, PlatformTag, PlayerController, PlayerEvent, Projectile, ProjectileSpawner,
    StageManager, Viewport,
};
use tracing::{debug, info};

use crate::settings::GameSettings;

/// Tile size of the stage maps, in pixels
const TILE: i32 = 16;

/// Stage maps, one character per tile.
///
/// `#` ground, `B` brick, `?` mushroom, `F` flower, `*` star, `|` goal pole,
/// `g` 100-point enemy, `k` 200-point enemy.
const STAGES: [&[&str]; 3] = [
    &[
        "................................................................",
        "................................................................",
        "...........................................................|....",
        "...........................................................|....",
        "...........................................................|....",
        "...........................................................|....",
        "...........................................................|....",
        "...........................................................|....",
        "..........BBBB.............................................|....",
        "...........................................................|....",
        "...........................................................|....",
        "..............................##...........##..............|....",
        ".......?.....F.....*....g.....##....g..k...##.......g......|....",
        "################################################################",
        "################################################################",
    ],
    &[
        "................................................................",
        "................................................................",
        "...........................................................|....",
        "...........................................................|....",
        "...........................................................|....",
        "...........................................................|....",
        "...........................................................|....",
        "...........................................................|....",
        "........BB?BB..................BBBB........................|....",
        "...........................................................|....",
        "...........................................................|....",
        "......................................##...................|....",
        "..............g.........k.......g.....##.......g...g.......|....",
        "#####################...########################...#############",
        "#####################...########################...#############",
    ],
    &[
        "................................................................",
        "................................................................",
        "...........................................................|....",
        "...........................................................|....",
        "...........................................................|....",
        "..................g........................k...............|....",
        "...........................................................|....",
        "..........####.........................####................|....",
        "...........................................................|....",
        "........................*..................................|....",
        "...........................................................|....",
        "...................................g.......................|....",
        "..........g................................................|....",
        "################################################################",
        "################################################################",
    ],
];

/// Platforms and enemies of the stage in play
#[derive(Debug, Clone, Default)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
}

impl Level {
    /// Build a stage from its map. Indices past the last map wrap around.
    pub fn build(index: usize) -> Self {
        let rows = STAGES[index % STAGES.len()];
        let mut level = Self::default();
        let mut poles: BTreeMap<i32, (i32, i32)> = BTreeMap::new();

        for (row, line) in (0..).zip(rows.iter()) {
            for (col, tile) in (0..).zip(line.chars()) {
                let rect = Rect::new(col * TILE, row * TILE, TILE, TILE);
                let tag = match tile {
                    '#' => PlatformTag::Normal,
                    'B' => PlatformTag::Brick,
                    '?' => PlatformTag::Item,
                    'F' => PlatformTag::Flower,
                    '*' => PlatformTag::Star,
                    '|' => {
                        let span = poles.entry(col).or_insert((row, row));
                        span.1 = span.1.max(row);
                        continue;
                    }
                    'g' => {
                        level.enemies.push(Enemy::new(rect, 100));
                        continue;
                    }
                    'k' => {
                        level.enemies.push(Enemy::new(rect, 200));
                        continue;
                    }
                    _ => continue,
                };
                level.platforms.push(Platform::new(rect, tag));
            }
        }

        // Each goal pole is one tall platform
        for (col, (top, bottom)) in poles {
            let rect = Rect::new(col * TILE, top * TILE, TILE, (bottom - top + 1) * TILE);
            level.platforms.push(Platform::new(rect, PlatformTag::Win));
        }

        level
    }

    /// Drop destroyed platforms and defeated enemies
    pub fn prune(&mut self) {
        self.platforms.retain(Platform::is_alive);
        self.enemies.retain(Enemy::is_alive);
    }
}

/// Stage manager that records load requests for the host to apply after the
/// frame, so the current frame keeps a stable snapshot.
pub struct DemoStage {
    clock: Arc<dyn Clock>,
    index: usize,
    started_at: u64,
    time_limit_ms: u64,
    music_playing: bool,
    pending: Option<usize>,
}

impl DemoStage {
    pub fn new(clock: Arc<dyn Clock>, time_limit_ms: u64) -> Self {
        let started_at = clock.now_ms();
        Self {
            clock,
            index: 0,
            started_at,
            time_limit_ms,
            music_playing: true,
            pending: None,
        }
    }

    /// Stage to rebuild, if one was requested since the last call
    pub fn take_pending(&mut self) -> Option<usize> {
        self.pending.take()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }
}

impl StageManager for DemoStage {
    fn load_stage(&mut self, index: usize) {
        info!(stage = index, "Loading stage");
        self.index = index;
        self.started_at = self.clock.now_ms();
        self.music_playing = true;
        self.pending = Some(index);
    }

    fn reset_current_stage(&mut self) {
        self.load_stage(self.index);
    }

    fn time_limit_ms(&self) -> u64 {
        self.time_limit_ms
    }

    fn time_elapsed_ms(&self) -> u64 {
        self.clock.now_ms().saturating_sub(self.started_at)
    }

    fn play_music(&mut self) {
        debug!(stage = self.index, "Stage music on");
        self.music_playing = true;
    }

    fn stop_music(&mut self) {
        debug!(stage = self.index, "Stage music off");
        self.music_playing = false;
    }
}

/// HUD that logs instead of drawing
#[derive(Debug, Default)]
pub struct DemoHud {
    pub score: u64,
    pub lives: u32,
}

impl Hud for DemoHud {
    fn notify_score_changed(&mut self, score: u64) {
        debug!(score, "HUD score");
        self.score = score;
    }

    fn notify_lives_changed(&mut self, lives: u32) {
        debug!(lives, "HUD lives");
        self.lives = lives;
    }
}

/// Side-scrolling camera that only ever moves right
#[derive(Debug, Clone)]
pub struct DemoViewport {
    pub camera_x: i32,
    pub width: i32,
    pub height: i32,
}

impl DemoViewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            camera_x: 0,
            width,
            height,
        }
    }

    /// Scroll so the target stays left of the middle of the screen
    pub fn follow(&mut self, target: &Rect) {
        let center = target.x + target.w / 2;
        self.camera_x = self.camera_x.max(center - self.width / 2);
    }
}

impl Viewport for DemoViewport {
    fn is_past_boundary(&self, rect: &Rect) -> bool {
        rect.left() < self.camera_x
    }

    fn boundary_x(&self) -> f32 {
        self.camera_x as f32
    }

    fn is_below_screen(&self, rect: &Rect) -> bool {
        rect.top() > self.height
    }

    fn reset(&mut self) {
        self.camera_x = 0;
    }
}

/// A fireball flying in a straight line
#[derive(Debug, Clone)]
pub struct Fireball {
    rect: Rect,
    direction: Direction,
    speed: i32,
    frames_left: u32,
    expired: bool,
}

impl Projectile for Fireball {
    fn update(&mut self, platforms: &mut [Platform], enemies: &mut [Enemy]) {
        if self.expired {
            return;
        }

        self.rect.x += self.direction.sign() * self.speed;
        self.frames_left = self.frames_left.saturating_sub(1);

        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.is_alive() && e.rect.intersects(&self.rect))
        {
            debug!(enemy = ?enemy.id, "Fireball hit");
            enemy.die();
            self.expired = true;
            return;
        }

        let blocked = platforms
            .iter()
            .any(|p| p.is_alive() && p.tag.is_solid() && p.rect.intersects(&self.rect));
        if blocked || self.frames_left == 0 {
            self.expired = true;
        }
    }

    fn is_expired(&self) -> bool {
        self.expired
    }

    fn rect(&self) -> Rect {
        self.rect
    }
}

/// Spawns [`Fireball`]s
#[derive(Debug, Clone)]
pub struct FireballSpawner {
    pub size: i32,
    pub speed: i32,
    pub lifetime_frames: u32,
}

impl Default for FireballSpawner {
    fn default() -> Self {
        Self {
            size: 8,
            speed: 5,
            lifetime_frames: 90,
        }
    }
}

impl ProjectileSpawner for FireballSpawner {
    fn spawn(&mut self, direction: Direction, x: i32, y: i32) -> Box<dyn Projectile> {
        let left = match direction {
            Direction::Right => x,
            Direction::Left => x - self.size,
        };
        Box::new(Fireball {
            rect: Rect::new(left, y - self.size / 2, self.size, self.size),
            direction,
            speed: self.speed,
            frames_left: self.lifetime_frames,
            expired: false,
        })
    }
}

/// Scripted input: always run right, jump and fire on a fixed beat
#[derive(Debug, Default)]
struct Pilot {
    frame: u64,
    previous: InputSnapshot,
}

impl Pilot {
    const JUMP_EVERY: u64 = 50;
    const FIRE_EVERY: u64 = 20;

    /// Input for the next frame, together with the one before it
    fn next(&mut self) -> (InputSnapshot, InputSnapshot) {
        self.frame += 1;
        let mut input = InputSnapshot::holding([InputAction::Right]);
        if self.frame % Self::JUMP_EVERY == 0 {
            input.press(InputAction::Jump);
        }
        if self.frame % Self::FIRE_EVERY == 0 {
            input.press(InputAction::Fire);
        }
        let previous = std::mem::replace(&mut self.previous, input.clone());
        (input, previous)
    }
}

/// What happened during a demo run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoSummary {
    pub frames: u64,
    pub score: u64,
    pub lives_left: u32,
    pub stage: usize,
    pub deaths: u32,
    pub stages_cleared: u32,
    pub enemies_defeated: u32,
    pub game_over: bool,
}

impl DemoSummary {
    fn record(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::Died => self.deaths += 1,
            PlayerEvent::StageCleared { .. } => self.stages_cleared += 1,
            PlayerEvent::EnemyDefeated { .. } => self.enemies_defeated += 1,
            PlayerEvent::GameOver => self.game_over = true,
            _ => {}
        }
    }
}

fn log_event(frame: u64, event: &PlayerEvent) {
    match event {
        PlayerEvent::EnemyDefeated { .. }
        | PlayerEvent::ItemCollected { .. }
        | PlayerEvent::FireballThrown { .. } => debug!(frame, ?event, "Player event"),
        _ => info!(frame, ?event, "Player event"),
    }
}

/// Run the demo for the configured amount of simulated time
pub fn run(settings: &GameSettings) -> Result<DemoSummary> {
    let time = TimeConfig::default();
    let step_ms = f64::from(time.fixed_timestep) * 1000.0;
    let total_frames = (settings.demo.seconds / time.fixed_timestep).round().max(0.0) as u64;

    // Game time advances with the simulation, not the wall clock
    let clock = Arc::new(ManualClock::new(0));
    let audio = TimedMixer::new(clock.clone(), settings.audio.clone());
    let mut player = PlayerController::new(
        settings.player.clone(),
        clock.clone(),
        Box::new(audio),
        Box::new(FireballSpawner::default()),
    );
    let mut stage = DemoStage::new(clock.clone(), settings.demo.time_limit_ms);
    let mut level = Level::build(stage.index());
    let mut hud = DemoHud::default();
    let mut viewport = DemoViewport::new(settings.demo.screen_width, settings.demo.screen_height);
    let mut stats = GameStats::default();
    let mut timer = FrameTimer::new(time);
    let mut pilot = Pilot::default();
    let mut summary = DemoSummary::default();
    let mut last_frame = Instant::now();

    info!(
        frames = total_frames,
        realtime = settings.demo.realtime,
        "Starting demo run"
    );

    'run: while summary.frames < total_frames {
        let delta = if settings.demo.realtime {
            let now = Instant::now();
            let delta = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;
            delta
        } else {
            timer.config.fixed_timestep
        };
        timer.update(delta);

        for _ in 0..timer.fixed_steps() {
            if summary.frames >= total_frames {
                break 'run;
            }
            summary.frames += 1;
            clock.set((summary.frames as f64 * step_ms) as u64);

            let (input, previous) = pilot.next();
            player.handle_presses(&input, &previous, &stats);

            let mut ctx = FrameContext {
                stage: &mut stage,
                hud: &mut hud,
                viewport: &mut viewport,
                stats: &mut stats,
            };
            let events = player.update(&input, &mut level.platforms, &mut level.enemies, &mut ctx);
            for event in &events {
                log_event(summary.frames, event);
                summary.record(event);
            }

            match stage.take_pending() {
                Some(index) => level = Level::build(index),
                None => level.prune(),
            }
            viewport.follow(&player.rect());

            if player.lifecycle() == LifecycleState::GameOver {
                break 'run;
            }
        }

        if settings.demo.realtime {
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    debug!(
        hud_score = hud.score,
        hud_lives = hud.lives,
        music_playing = stage.music_playing(),
        "Final collaborator state"
    );
    summary.score = stats.score;
    summary.lives_left = stats.lives_left;
    summary.stage = stats.current_stage;
    Ok(summary)
}
