//! Game state and core simulation types
//!
//! Everything the per-frame step reads and writes lives here. There are no
//! process-wide registries: the whole simulation is one `GameState` owned by
//! the shell and passed into `tick` by reference.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::camera::Camera;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen: marquee decoration plus the welcome message
    Start,
    /// Active gameplay
    Playing,
    /// Terminal; nothing leaves this state but a process restart
    GameOver,
}

/// Brick scoring class, in tone-code order (0 hazard, 1 blue, 2 red,
/// 3 bonus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Hazard,
    Blue,
    Red,
    Bonus,
}

/// Which of the two catch buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketId {
    One,
    Two,
}

/// Axis-aligned sprite footprint: center position plus fixed extents.
///
/// `radius` is the half-diagonal, precomputed at creation and never updated
/// (sprites never resize).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
            radius: (width * width + height * height).sqrt() / 2.0,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }

    /// Strict bounding-box containment, used for pointer picking
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x - self.half_width()
            && point.x < self.pos.x + self.half_width()
            && point.y > self.pos.y - self.half_height()
            && point.y < self.pos.y + self.half_height()
    }
}

/// The player's cannon: a small barrel that rotates and a big mount that
/// does not. Both share y; moving one moves the other (rigid attachment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cannon {
    pub small: Body,
    pub big: Body,
    /// Barrel facing in degrees, clamped to [-60, 60]
    pub angle_deg: f32,
}

impl Default for Cannon {
    fn default() -> Self {
        Self {
            small: Body::new(-360.0, 0.0, 30.0, 10.0),
            big: Body::new(-380.0, 0.0, 40.0, 30.0),
            angle_deg: 0.0,
        }
    }
}

/// A catch bucket. Bucket one catches blue bricks, bucket two red.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bucket {
    pub id: BucketId,
    pub tone: Tone,
    pub body: Body,
}

/// A falling brick. Idle bricks sit parked on the spawn row until the spawn
/// cadence picks them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub tone: Tone,
    pub body: Body,
    pub falling: bool,
}

impl Brick {
    fn new(tone: Tone, x: f32) -> Self {
        Self {
            tone,
            body: Body::new(x, BRICK_SPAWN_Y, 20.0, 20.0),
            falling: false,
        }
    }
}

/// A laser slot. Slots are reused: a retired laser is idle, not destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub body: Body,
    /// Flight direction in degrees; rewritten by mirror deflection
    pub angle_deg: f32,
    pub in_flight: bool,
}

impl Default for Laser {
    fn default() -> Self {
        Self {
            body: Body::new(-360.0, 0.0, 40.0, 5.0),
            angle_deg: 0.0,
            in_flight: false,
        }
    }
}

/// A fixed mirror that deflects lasers crossing its axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mirror {
    pub body: Body,
    pub angle_deg: f32,
}

impl Mirror {
    fn new(x: f32, y: f32, angle_deg: f32) -> Self {
        Self {
            body: Body::new(x, y, 60.0, 3.0),
            angle_deg,
        }
    }
}

/// Start-screen marquee: the decorative laser sweeps across the screen and
/// wraps back to the cannon mock-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marquee {
    pub laser_x: f32,
}

impl Default for Marquee {
    fn default() -> Self {
        Self {
            laser_x: MARQUEE_RESET_X,
        }
    }
}

/// Things the shell may want to report or play a sound for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started,
    LaserFired { slot: usize },
    BrickShot { tone: Tone, score: i32 },
    BrickCaught { bucket: BucketId, tone: Tone, score: i32 },
    WrongBucket { bucket: BucketId, tone: Tone, score: i32 },
    SpeedChanged { speed: u8 },
    GameOver { score: i32 },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub phase: GamePhase,
    pub score: i32,
    /// Fall-speed level in [1, 5]; also drives the spawn cadence
    pub bricks_speed: u8,
    /// Spawn-cadence counter; increments every tick and resets to 1 when a
    /// brick is released
    pub frame: u64,
    /// Clock reading of the last shot, in seconds
    pub last_shot: f64,
    pub cannon: Cannon,
    pub buckets: [Bucket; 2],
    pub bricks: Vec<Brick>,
    pub lasers: Vec<Laser>,
    pub mirrors: Vec<Mirror>,
    pub camera: Camera,
    pub marquee: Marquee,
    /// Events since the last drain (not part of the persistent state)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    rng: Option<Pcg32>,
}

impl GameState {
    /// Create a new game with the full starting layout
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            phase: GamePhase::Start,
            score: 0,
            bricks_speed: BRICKS_SPEED_MIN,
            frame: 1,
            last_shot: 0.0,
            cannon: Cannon::default(),
            buckets: [
                Bucket {
                    id: BucketId::One,
                    tone: Tone::Blue,
                    body: Body::new(-200.0, -280.0, BUCKET_WIDTH, BUCKET_HEIGHT),
                },
                Bucket {
                    id: BucketId::Two,
                    tone: Tone::Red,
                    body: Body::new(200.0, -280.0, BUCKET_WIDTH, BUCKET_HEIGHT),
                },
            ],
            bricks: starting_bricks(),
            lasers: vec![Laser::default(); 5],
            mirrors: vec![
                Mirror::new(-150.0, 200.0, -20.0),
                Mirror::new(-150.0, -50.0, 50.0),
                Mirror::new(200.0, 100.0, -40.0),
                Mirror::new(200.0, -100.0, 30.0),
            ],
            camera: Camera::default(),
            marquee: Marquee::default(),
            events: Vec::new(),
            rng: None,
        }
    }

    /// First idle laser slot in creation order, if any
    pub fn idle_laser_slot(&self) -> Option<usize> {
        self.lasers.iter().position(|l| !l.in_flight)
    }

    /// Draw this frame's spawn slot. Deliberately one short of the brick
    /// count; see `consts::SPAWN_SLOTS`.
    pub fn draw_spawn_slot(&mut self) -> usize {
        let rng_state = self.rng_state.clone();
        let rng = self.rng.get_or_insert_with(|| rng_state.to_rng());
        rng.random_range(0..SPAWN_SLOTS) as usize
    }

    /// Decompose the score into four decimal places, ones place first
    pub fn score_digits(&self) -> [u8; 4] {
        let s = self.score.max(0) as u32;
        [
            (s % 10) as u8,
            (s / 10 % 10) as u8,
            (s / 100 % 10) as u8,
            (s / 1000 % 10) as u8,
        ]
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// The nineteen bricks in creation order. The order matters: the spawn slot
/// indexes into it, and collision tie-breaks walk it front to back.
fn starting_bricks() -> Vec<Brick> {
    vec![
        Brick::new(Tone::Red, -250.0),
        Brick::new(Tone::Red, -200.0),
        Brick::new(Tone::Red, -50.0),
        Brick::new(Tone::Red, 150.0),
        Brick::new(Tone::Red, 260.0),
        Brick::new(Tone::Red, 350.0),
        Brick::new(Tone::Blue, -260.0),
        Brick::new(Tone::Blue, -210.0),
        Brick::new(Tone::Blue, -30.0),
        Brick::new(Tone::Bonus, 90.0),
        Brick::new(Tone::Blue, 70.0),
        Brick::new(Tone::Blue, 280.0),
        Brick::new(Tone::Blue, 370.0),
        Brick::new(Tone::Hazard, -270.0),
        Brick::new(Tone::Hazard, -220.0),
        Brick::new(Tone::Hazard, -70.0),
        Brick::new(Tone::Hazard, 50.0),
        Brick::new(Tone::Hazard, 240.0),
        Brick::new(Tone::Hazard, 330.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_layout() {
        let state = GameState::new(7);
        assert_eq!(state.bricks.len(), 19);
        assert_eq!(state.lasers.len(), 5);
        assert_eq!(state.mirrors.len(), 4);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.bricks_speed, 1);

        let hazards = state
            .bricks
            .iter()
            .filter(|b| b.tone == Tone::Hazard)
            .count();
        let bonus = state.bricks.iter().filter(|b| b.tone == Tone::Bonus).count();
        assert_eq!(hazards, 6);
        assert_eq!(bonus, 1);
        assert!(state.bricks.iter().all(|b| !b.falling));
        assert!(state.bricks.iter().all(|b| b.body.pos.y == BRICK_SPAWN_Y));
    }

    #[test]
    fn test_body_radius_is_half_diagonal() {
        let body = Body::new(0.0, 0.0, 6.0, 8.0);
        assert!((body.radius - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_body_contains_is_strict() {
        let body = Body::new(0.0, 0.0, 20.0, 10.0);
        assert!(body.contains(Vec2::new(9.0, 4.0)));
        assert!(!body.contains(Vec2::new(10.0, 0.0)));
        assert!(!body.contains(Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn test_idle_laser_slot_order() {
        let mut state = GameState::new(1);
        assert_eq!(state.idle_laser_slot(), Some(0));
        state.lasers[0].in_flight = true;
        state.lasers[1].in_flight = true;
        assert_eq!(state.idle_laser_slot(), Some(2));
        for laser in &mut state.lasers {
            laser.in_flight = true;
        }
        assert_eq!(state.idle_laser_slot(), None);
    }

    #[test]
    fn test_score_digits() {
        let mut state = GameState::new(1);
        state.score = 4073;
        assert_eq!(state.score_digits(), [3, 7, 0, 4]);
        state.score = 50;
        assert_eq!(state.score_digits(), [0, 5, 0, 0]);
    }

    #[test]
    fn test_spawn_slot_is_deterministic() {
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);
        let slots_a: Vec<usize> = (0..32).map(|_| a.draw_spawn_slot()).collect();
        let slots_b: Vec<usize> = (0..32).map(|_| b.draw_spawn_slot()).collect();
        assert_eq!(slots_a, slots_b);
        assert!(slots_a.iter().all(|&s| s < 18));
    }
}
