//! Game session: a cube, a score, and the event-driven state machine that
//! serializes rotations and match resolution.
//!
//! A rotation goes through these phases:
//!
//! 1. **Idle.** [`Game::request_rotation()`] validates the request and returns
//!    a [`RotationPlan`] for the renderer to animate.
//! 2. **Rotating.** The renderer animates the plan, then calls
//!    [`Game::complete_rotation()`].
//! 3. **Settling** and **match checking.** The rotation is committed and
//!    matching lines are detected, each receiving a [`ResolutionTicket`].
//! 4. **Resolving.** The renderer highlights each match, then calls
//!    [`Game::resolve_after_delay()`] for each ticket. Once none are left,
//!    the game is idle again.
//!
//! Every mutating call fails with [`CubeError::Busy`] outside of the phase
//! that expects it.

use cgmath::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::Serialize;

use crate::{
    Color, Cube, CubeError, GridCoord, MatchResolver, Palette, RenderBridge, ResolutionTicket,
    ResolvedMatch, RotationPlan, RotationRequest, Score, detect_matches,
};

/// Parameters for a new game session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameParams {
    /// Side length of the cube.
    pub size: usize,
    /// Spacing between neighboring blocks in world space.
    pub gap: f64,
    /// Points awarded per matched line.
    pub match_reward: u64,
    /// Colors used to paint the cube and to replace matched lines.
    pub active_colors: Vec<Color>,
    /// RNG seed. If `None`, a random seed is chosen.
    pub seed: Option<u64>,
}
impl Default for GameParams {
    fn default() -> Self {
        Self {
            size: 3,
            gap: crate::DEFAULT_GAP,
            match_reward: crate::DEFAULT_MATCH_REWARD,
            active_colors: Palette::default().active_colors(4),
            seed: None,
        }
    }
}

/// Phase of a game session.
#[derive(strum::Display, Debug, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Waiting for a rotation request.
    Idle,
    /// Waiting for the renderer to finish animating a rotation.
    Rotating(RotationPlan),
    /// Committing a finished rotation.
    Settling,
    /// Scanning for matching lines.
    MatchChecking,
    /// Waiting for the renderer to resolve detected matches.
    Resolving,
}

/// Everything that happened during one rotation, for headless play.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Rotation that was applied.
    pub request: RotationRequest,
    /// Matches found and resolved after the rotation.
    pub resolved: Vec<ResolvedMatch>,
    /// Score after the turn.
    pub score: Score,
}

/// Game session.
#[derive(Debug)]
pub struct Game<B = ()> {
    params: GameParams,
    seed: u64,
    rng: ChaCha12Rng,
    cube: Cube,
    resolver: MatchResolver,
    score: Score,
    phase: Phase,
    bridge: B,
}
impl<B: RenderBridge> Game<B> {
    /// Builds a cube and paints every exposed face with a random active
    /// color. With a fixed seed the cube is always the same.
    pub fn new(params: GameParams, bridge: B) -> Result<Self, CubeError> {
        let seed = params.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let cube = Self::painted_cube(&params, &mut rng)?;
        let resolver_rng = ChaCha12Rng::seed_from_u64(rng.random());
        let resolver =
            MatchResolver::new(params.active_colors.clone(), params.match_reward, resolver_rng)?;
        log::debug!("started game with seed {seed}");
        Ok(Self {
            params,
            seed,
            rng,
            cube,
            resolver,
            score: Score::ZERO,
            phase: Phase::Idle,
            bridge,
        })
    }

    fn painted_cube(params: &GameParams, rng: &mut ChaCha12Rng) -> Result<Cube, CubeError> {
        let mut cube = Cube::build_with_gap(params.size, params.gap)?;
        cube.paint_shell(&params.active_colors, rng)?;
        Ok(cube)
    }

    /// Returns the parameters the game was created with.
    pub fn params(&self) -> &GameParams {
        &self.params
    }
    /// Returns the RNG seed, which is useful for reproducing a game.
    pub fn seed(&self) -> u64 {
        self.seed
    }
    /// Returns the cube.
    pub fn cube(&self) -> &Cube {
        &self.cube
    }
    /// Returns the current score.
    pub fn score(&self) -> Score {
        self.score
    }
    /// Returns the current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }
    /// Returns the render bridge.
    pub fn bridge(&self) -> &B {
        &self.bridge
    }
    /// Returns the render bridge mutably.
    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }
    /// Returns the match resolver, which lists pending matches.
    pub fn resolver(&self) -> &MatchResolver {
        &self.resolver
    }

    /// Returns whether a rotation or its match resolution is in flight.
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    fn ensure_idle(&self) -> Result<(), CubeError> {
        if self.is_busy() {
            return Err(CubeError::Busy);
        }
        Ok(())
    }

    fn set_phase(&mut self, phase: Phase) {
        log::trace!("phase {} -> {phase}", self.phase);
        self.phase = phase;
    }

    /// Accepts a rotation and returns the plan for the renderer to animate.
    /// The cube is not modified until [`Game::complete_rotation()`].
    pub fn request_rotation(&mut self, request: RotationRequest) -> Result<RotationPlan, CubeError> {
        self.ensure_idle()?;
        let plan = RotationPlan::new(&self.cube, request)?;
        log::debug!("accepted rotation {request}");
        self.set_phase(Phase::Rotating(plan.clone()));
        Ok(plan)
    }

    /// Commits the rotation in flight, then detects matching lines and
    /// schedules each for resolution.
    ///
    /// Returns the tickets of the detected matches. If there are none, the
    /// game is idle again.
    pub fn complete_rotation(&mut self) -> Result<Vec<ResolutionTicket>, CubeError> {
        let Phase::Rotating(plan) = &self.phase else {
            return Err(CubeError::NotRotating);
        };
        let plan = plan.clone();
        plan.apply(&mut self.cube)?;
        self.set_phase(Phase::Settling);
        self.bridge.on_rotation_settled(&plan);

        self.set_phase(Phase::MatchChecking);
        let mut tickets = vec![];
        for found in detect_matches(&self.cube) {
            let ticket = self.resolver.mark_for_resolution(found.clone());
            self.bridge.on_match_found(ticket, &found);
            tickets.push(ticket);
        }

        if tickets.is_empty() {
            self.set_phase(Phase::Idle);
        } else {
            self.set_phase(Phase::Resolving);
        }
        Ok(tickets)
    }

    /// Resolves one detected match, once the renderer has finished
    /// highlighting it.
    pub fn resolve_after_delay(
        &mut self,
        ticket: ResolutionTicket,
    ) -> Result<ResolvedMatch, CubeError> {
        let resolved = self
            .resolver
            .apply_resolution(&mut self.cube, ticket, &mut self.score)?;
        self.bridge.on_match_resolved(&resolved);
        self.bridge.on_score_changed(self.score);
        if !self.resolver.has_pending() {
            self.set_phase(Phase::Idle);
        }
        Ok(resolved)
    }

    /// Requests, completes, and resolves a rotation in one call, without
    /// waiting on a renderer.
    pub fn play_turn(&mut self, request: RotationRequest) -> Result<TurnOutcome, CubeError> {
        self.request_rotation(request)?;
        let tickets = self.complete_rotation()?;
        let resolved = tickets
            .into_iter()
            .map(|ticket| self.resolve_after_delay(ticket))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TurnOutcome {
            request,
            resolved,
            score: self.score,
        })
    }

    /// Sets the color of the face of a block selected by a direction vector
    /// with exactly one nonzero component.
    pub fn set_face_color(
        &mut self,
        coord: GridCoord,
        direction: Vector3<i32>,
        color: Color,
    ) -> Result<(), CubeError> {
        self.ensure_idle()?;
        self.cube.block_at_mut(coord)?.set_face_color_at(direction, color)
    }

    /// Replaces the cube with a freshly built and painted one. The score is
    /// kept.
    pub fn rebuild(&mut self) -> Result<(), CubeError> {
        self.ensure_idle()?;
        self.cube = Self::painted_cube(&self.params, &mut self.rng)?;
        log::debug!("rebuilt cube");
        Ok(())
    }

    /// Applies `turns` random quarter turns without animation or matching.
    pub fn scramble(&mut self, turns: usize) -> Result<Vec<RotationRequest>, CubeError> {
        self.ensure_idle()?;
        self.cube.scramble(turns, &mut self.rng)
    }
}
