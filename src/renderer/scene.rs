//! Scene: owns the drawable handles and issues the per-frame draw calls
//!
//! Drawables are created once at startup; per frame the scene walks the
//! game state and draws exactly what the current phase shows. Glyph
//! strokes are drawn by consulting the stroke tables, one bar per lit
//! stroke.

use glam::Vec2;

use super::shapes::{quad, solid_quad};
use super::vertex::colors;
use super::{DrawableId, Primitive, RenderBackend, Transform};
use crate::sim::glyphs::{
    GAME_OVER_MESSAGE, START_MESSAGE, Stroke, digit_char, digit_lit, stroke_angle, text_lit,
};
use crate::sim::state::{GamePhase, GameState, Tone};

/// Score stroke bars: (stroke, base x, y, vertical). Places step left by 15
/// from the ones place.
const DIGIT_POSES: [(Stroke, f32, f32, bool); 9] = [
    (Stroke::Top, 375.0, 286.0, false),
    (Stroke::Middle, 375.0, 276.0, false),
    (Stroke::Bottom, 375.0, 264.0, false),
    (Stroke::Left1, 370.0, 280.0, true),
    (Stroke::Left2, 370.0, 269.0, true),
    (Stroke::Right1, 380.0, 280.0, true),
    (Stroke::Right2, 380.0, 269.0, true),
    (Stroke::Middle1, 375.0, 280.0, true),
    (Stroke::Middle2, 375.0, 269.0, true),
];

const DIGIT_PLACE_STEP: f32 = -15.0;

/// Message cell bars: (stroke, x, y, width, height), centered at the cell
/// origin. Diagonal bar lengths are 23, 10*sqrt(5) and 20*sqrt(2).
const TEXT_POSES: [(Stroke, f32, f32, f32, f32); 16] = [
    (Stroke::Top, 0.0, 20.0, 20.0, 2.0),
    (Stroke::Middle, 0.0, 0.0, 20.0, 2.0),
    (Stroke::Bottom, 0.0, -20.0, 20.0, 2.0),
    (Stroke::Left1, -10.0, 10.0, 2.0, 20.0),
    (Stroke::Left2, -10.0, -10.0, 2.0, 20.0),
    (Stroke::Right1, 10.0, 10.0, 2.0, 20.0),
    (Stroke::Right2, 10.0, -10.0, 2.0, 20.0),
    (Stroke::Middle1, 0.0, 10.0, 2.0, 20.0),
    (Stroke::Middle2, 0.0, -10.0, 2.0, 20.0),
    (Stroke::Diagonal1, -5.0, 10.0, 2.0, 23.0),
    (Stroke::Diagonal2, 5.0, 10.0, 2.0, 23.0),
    (Stroke::Diagonal3, -5.0, -10.0, 2.0, 23.0),
    (Stroke::Diagonal4, 5.0, -10.0, 2.0, 23.0),
    (Stroke::Diagonal5, -2.0, -10.0, 2.0, 22.3607),
    (Stroke::Diagonal6, 2.0, -10.0, 2.0, 22.3607),
    (Stroke::Diagonal7, 0.0, -10.0, 2.0, 28.2843),
];

pub struct Scene {
    // Start-screen decoration
    decor_barrel: DrawableId,
    decor_mount: DrawableId,
    decor_laser: DrawableId,
    // Gameplay sprites
    cannon_small: DrawableId,
    cannon_big: DrawableId,
    bucket_one: DrawableId,
    bucket_two: DrawableId,
    boundary: DrawableId,
    laser: DrawableId,
    mirror: DrawableId,
    /// One drawable per brick tone, in tone order
    bricks: [DrawableId; 4],
    // Glyph bars
    digit_bar_v: DrawableId,
    digit_bar_h: DrawableId,
    text_bars: Vec<(Stroke, DrawableId, Vec2)>,
}

impl Scene {
    pub fn new(backend: &mut impl RenderBackend) -> Self {
        let mut make = |vertices: &[super::Vertex]| {
            backend.create_drawable(Primitive::Triangles, vertices)
        };

        let decor_barrel = make(&quad(
            40.0,
            20.0,
            [colors::GOLD, colors::GOLD, colors::LIGHT_GREEN, colors::LIGHT_GREEN],
        ));
        let decor_mount = make(&quad(
            80.0,
            60.0,
            [colors::BLACK, colors::RED, colors::BLUE, colors::BLACK],
        ));
        let decor_laser = make(&solid_quad(30.0, 10.0, colors::RED));

        let cannon_small = make(&solid_quad(30.0, 10.0, colors::CRATE_BROWN));
        let cannon_big = make(&quad(
            40.0,
            30.0,
            [colors::BLUE, colors::BLUE, colors::RED, colors::RED],
        ));
        let bucket_one = make(&solid_quad(60.0, 40.0, colors::BLUE));
        let bucket_two = make(&solid_quad(60.0, 40.0, colors::RED));
        let boundary = make(&solid_quad(800.0, 1.0, colors::BLACK));
        let laser = make(&solid_quad(40.0, 5.0, colors::RED));
        let mirror = make(&solid_quad(60.0, 3.0, colors::BLACK));

        let bricks = [
            make(&solid_quad(20.0, 20.0, colors::BLACK)),
            make(&solid_quad(20.0, 20.0, colors::BLUE)),
            make(&solid_quad(20.0, 20.0, colors::RED)),
            make(&solid_quad(20.0, 20.0, colors::GOLD)),
        ];

        let digit_bar_v = make(&solid_quad(2.0, 10.0, colors::BLACK));
        let digit_bar_h = make(&solid_quad(10.0, 2.0, colors::BLACK));

        let text_bars = TEXT_POSES
            .iter()
            .map(|&(stroke, x, y, w, h)| {
                (stroke, make(&solid_quad(w, h, colors::BLACK)), Vec2::new(x, y))
            })
            .collect();

        Self {
            decor_barrel,
            decor_mount,
            decor_laser,
            cannon_small,
            cannon_big,
            bucket_one,
            bucket_two,
            boundary,
            laser,
            mirror,
            bricks,
            digit_bar_v,
            digit_bar_h,
            text_bars,
        }
    }

    /// Draw the current frame
    pub fn render(&self, state: &GameState, backend: &mut impl RenderBackend) {
        match state.phase {
            GamePhase::Start => self.render_start(state, backend),
            GamePhase::Playing => self.render_playing(state, backend),
            GamePhase::GameOver => self.render_message(&GAME_OVER_MESSAGE, backend),
        }
    }

    fn render_start(&self, state: &GameState, backend: &mut impl RenderBackend) {
        backend.draw(self.decor_barrel, Transform::at(Vec2::new(-300.0, 0.0)));
        backend.draw(self.decor_mount, Transform::at(Vec2::new(-360.0, 0.0)));
        backend.draw(
            self.decor_laser,
            Transform::at(Vec2::new(state.marquee.laser_x, 0.0)),
        );
        self.render_message(&START_MESSAGE, backend);
    }

    fn render_playing(&self, state: &GameState, backend: &mut impl RenderBackend) {
        backend.draw(
            self.cannon_small,
            Transform::rotated(state.cannon.small.pos, state.cannon.angle_deg),
        );
        backend.draw(self.cannon_big, Transform::at(state.cannon.big.pos));

        backend.draw(self.bucket_one, Transform::at(state.buckets[0].body.pos));
        backend.draw(self.bucket_two, Transform::at(state.buckets[1].body.pos));
        backend.draw(self.boundary, Transform::at(Vec2::new(0.0, -250.0)));

        for laser in &state.lasers {
            if laser.in_flight {
                backend.draw(
                    self.laser,
                    Transform::rotated(laser.body.pos, laser.angle_deg),
                );
            }
        }

        for brick in &state.bricks {
            if brick.falling {
                backend.draw(self.brick_for(brick.tone), Transform::at(brick.body.pos));
            }
        }

        for mirror in &state.mirrors {
            backend.draw(
                self.mirror,
                Transform::rotated(mirror.body.pos, mirror.angle_deg),
            );
        }

        self.render_score(state, backend);
    }

    fn render_score(&self, state: &GameState, backend: &mut impl RenderBackend) {
        for (place, digit) in state.score_digits().into_iter().enumerate() {
            let ch = digit_char(digit);
            let offset = DIGIT_PLACE_STEP * place as f32;
            for &(stroke, base_x, y, vertical) in &DIGIT_POSES {
                if !digit_lit(stroke, ch) {
                    continue;
                }
                let bar = if vertical {
                    self.digit_bar_v
                } else {
                    self.digit_bar_h
                };
                backend.draw(bar, Transform::at(Vec2::new(base_x + offset, y)));
            }
        }
    }

    fn render_message(&self, message: &[(char, f32)], backend: &mut impl RenderBackend) {
        for &(ch, dx) in message {
            for &(stroke, bar, pos) in &self.text_bars {
                if text_lit(stroke, ch) {
                    backend.draw(
                        bar,
                        Transform::rotated(pos + Vec2::new(dx, 0.0), stroke_angle(stroke)),
                    );
                }
            }
        }
    }

    fn brick_for(&self, tone: Tone) -> DrawableId {
        match tone {
            Tone::Hazard => self.bricks[0],
            Tone::Blue => self.bricks[1],
            Tone::Red => self.bricks[2],
            Tone::Bonus => self.bricks[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingBackend;
    use crate::sim::glyphs::TEXT_STROKES;

    fn lit_text_count(message: &[(char, f32)]) -> usize {
        message
            .iter()
            .map(|&(ch, _)| TEXT_STROKES.iter().filter(|&&s| text_lit(s, ch)).count())
            .sum()
    }

    #[test]
    fn test_start_frame_draws_decor_and_welcome() {
        let mut backend = RecordingBackend::default();
        let scene = Scene::new(&mut backend);
        let state = GameState::new(3);
        scene.render(&state, &mut backend);
        assert_eq!(backend.draw_count(), 3 + lit_text_count(&START_MESSAGE));
    }

    #[test]
    fn test_playing_frame_draws_zero_score() {
        let mut backend = RecordingBackend::default();
        let scene = Scene::new(&mut backend);
        let mut state = GameState::new(3);
        state.phase = GamePhase::Playing;
        scene.render(&state, &mut backend);
        // Cannon (2) + buckets (2) + boundary + mirrors (4), no lasers or
        // bricks airborne, and '0' lights six bars in each of four places
        assert_eq!(backend.draw_count(), 2 + 2 + 1 + 4 + 4 * 6);
    }

    #[test]
    fn test_airborne_entities_add_draws() {
        let mut backend = RecordingBackend::default();
        let scene = Scene::new(&mut backend);
        let mut state = GameState::new(3);
        state.phase = GamePhase::Playing;
        scene.render(&state, &mut backend);
        let base = backend.draw_count();
        backend.clear_frame();

        state.lasers[0].in_flight = true;
        state.bricks[0].falling = true;
        scene.render(&state, &mut backend);
        assert_eq!(backend.draw_count(), base + 2);
    }

    #[test]
    fn test_game_over_frame_draws_only_message() {
        let mut backend = RecordingBackend::default();
        let scene = Scene::new(&mut backend);
        let mut state = GameState::new(3);
        state.phase = GamePhase::GameOver;
        scene.render(&state, &mut backend);
        assert_eq!(backend.draw_count(), lit_text_count(&GAME_OVER_MESSAGE));
    }

    #[test]
    fn test_cannon_barrel_rotates_with_angle() {
        let mut backend = RecordingBackend::default();
        let scene = Scene::new(&mut backend);
        let mut state = GameState::new(3);
        state.phase = GamePhase::Playing;
        state.cannon.angle_deg = 35.0;
        scene.render(&state, &mut backend);
        let barrel = backend
            .calls
            .iter()
            .find(|(id, _)| *id == scene.cannon_small)
            .expect("barrel drawn");
        assert_eq!(barrel.1.rotation_deg, 35.0);
    }
}
