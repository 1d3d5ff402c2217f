//! Input state
//!
//! The shell translates window events into calls on `InputState`; the
//! simulation only ever sees the `FrameInput` drained from it once per tick.
//! Held keys are latched flags, edge-triggered actions (fire, start, zoom
//! steps, pointer release) accumulate between frames.

use glam::Vec2;

/// The fixed named key set the game understands. Anything else is a no-op
/// in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Start,
    RaiseCannon,
    LowerCannon,
    TurnLeft,
    TurnRight,
    SpeedUp,
    SpeedDown,
    /// Grip for bucket one (direction keys move that bucket while held)
    ModifierOne,
    /// Grip for bucket two
    ModifierTwo,
    MoveLeft,
    MoveRight,
    ZoomIn,
    ZoomOut,
    Fire,
}

/// A primary-button release, with the press position that started it.
/// Both are window-space pixels; control projects them into the world.
#[derive(Debug, Clone, Copy)]
pub struct PointerRelease {
    pub anchor: Vec2,
    pub at: Vec2,
}

/// Latched input state fed by discrete events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub raise_cannon: bool,
    pub lower_cannon: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub modifier_one: bool,
    pub modifier_two: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub secondary_held: bool,
    /// Current pointer position, window pixels
    pub pointer: Vec2,

    // Accumulated edges, drained once per frame
    start: bool,
    fire: bool,
    speed_up: bool,
    speed_down: bool,
    zoom_steps: i32,
    pan_steps: i32,
    drag_delta: Vec2,
    press_anchor: Option<Vec2>,
    release: Option<PointerRelease>,
}

/// One frame's worth of input, consumed by `tick`
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub raise_cannon: bool,
    pub lower_cannon: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub modifier_one: bool,
    pub modifier_two: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub start: bool,
    pub fire: bool,
    pub speed_up: bool,
    pub speed_down: bool,
    /// Net zoom ticks (scroll plus zoom keys), positive zooms in
    pub zoom_steps: i32,
    /// Net arrow-key pan presses, positive pans right
    pub pan_steps: i32,
    /// Pointer drag while the secondary button was held, screen pixels
    pub drag_delta: Vec2,
    pub release: Option<PointerRelease>,
}

impl InputState {
    pub fn key_down(&mut self, key: GameKey) {
        match key {
            GameKey::Start => self.start = true,
            GameKey::RaiseCannon => self.raise_cannon = true,
            GameKey::LowerCannon => self.lower_cannon = true,
            GameKey::TurnLeft => self.turn_left = true,
            GameKey::TurnRight => self.turn_right = true,
            GameKey::SpeedUp => self.speed_up = true,
            GameKey::SpeedDown => self.speed_down = true,
            GameKey::ModifierOne => self.modifier_one = true,
            GameKey::ModifierTwo => self.modifier_two = true,
            GameKey::MoveLeft => {
                self.move_left = true;
                // Without a bucket grip the arrow key pans the camera instead
                if !self.modifier_one && !self.modifier_two {
                    self.pan_steps -= 1;
                }
            }
            GameKey::MoveRight => {
                self.move_right = true;
                if !self.modifier_one && !self.modifier_two {
                    self.pan_steps += 1;
                }
            }
            GameKey::ZoomIn => self.zoom_steps += 1,
            GameKey::ZoomOut => self.zoom_steps -= 1,
            GameKey::Fire => self.fire = true,
        }
    }

    pub fn key_up(&mut self, key: GameKey) {
        match key {
            GameKey::RaiseCannon => self.raise_cannon = false,
            GameKey::LowerCannon => self.lower_cannon = false,
            GameKey::TurnLeft => self.turn_left = false,
            GameKey::TurnRight => self.turn_right = false,
            GameKey::ModifierOne => self.modifier_one = false,
            GameKey::ModifierTwo => self.modifier_two = false,
            GameKey::MoveLeft => self.move_left = false,
            GameKey::MoveRight => self.move_right = false,
            _ => {}
        }
    }

    /// Scroll wheel: positive y zooms in, negative zooms out
    pub fn scroll(&mut self, y_offset: f32) {
        if y_offset > 0.0 {
            self.zoom_steps += 1;
        } else if y_offset < 0.0 {
            self.zoom_steps -= 1;
        }
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        if self.secondary_held {
            self.drag_delta += pos - self.pointer;
        }
        self.pointer = pos;
    }

    pub fn primary_down(&mut self) {
        self.press_anchor = Some(self.pointer);
    }

    pub fn primary_up(&mut self) {
        let anchor = self.press_anchor.take().unwrap_or(self.pointer);
        self.release = Some(PointerRelease {
            anchor,
            at: self.pointer,
        });
    }

    pub fn secondary_down(&mut self) {
        self.secondary_held = true;
    }

    pub fn secondary_up(&mut self) {
        self.secondary_held = false;
    }

    /// Snapshot held flags and drain all accumulated edges
    pub fn frame_input(&mut self) -> FrameInput {
        FrameInput {
            raise_cannon: self.raise_cannon,
            lower_cannon: self.lower_cannon,
            turn_left: self.turn_left,
            turn_right: self.turn_right,
            modifier_one: self.modifier_one,
            modifier_two: self.modifier_two,
            move_left: self.move_left,
            move_right: self.move_right,
            start: std::mem::take(&mut self.start),
            fire: std::mem::take(&mut self.fire),
            speed_up: std::mem::take(&mut self.speed_up),
            speed_down: std::mem::take(&mut self.speed_down),
            zoom_steps: std::mem::take(&mut self.zoom_steps),
            pan_steps: std::mem::take(&mut self.pan_steps),
            drag_delta: std::mem::take(&mut self.drag_delta),
            release: self.release.take(),
        }
    }
}
