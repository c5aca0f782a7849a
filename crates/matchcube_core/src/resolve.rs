//! Replacement of matched colors.
//!
//! Resolution happens in two steps so that a renderer can highlight a match
//! before it disappears: [`MatchResolver::mark_for_resolution()`] hands out a
//! [`ResolutionTicket`], and [`MatchResolver::apply_resolution()`] later
//! repaints the line and awards points.

use std::fmt;

use indexmap::IndexMap;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha12Rng;
use serde::Serialize;

use crate::{Color, Cube, CubeError, Match, Score};

/// Handle for a match that has been detected but not yet resolved.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ResolutionTicket(u64);
impl fmt::Display for ResolutionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "match #{}", self.0)
    }
}

/// Match that has been resolved.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMatch {
    /// Ticket that was resolved.
    pub ticket: ResolutionTicket,
    /// Line that was repainted.
    #[serde(rename = "match")]
    pub found: Match,
    /// New exposed color of each block, in the same order as the line.
    pub new_colors: Vec<Color>,
    /// Points awarded.
    pub reward: u64,
}

/// Repaints matched lines with random colors and awards points.
#[derive(Debug, Clone)]
pub struct MatchResolver {
    active_colors: Vec<Color>,
    reward: u64,
    rng: ChaCha12Rng,
    next_ticket: u64,
    pending: IndexMap<ResolutionTicket, Match>,
}
impl MatchResolver {
    /// Constructs a resolver that paints with `active_colors` and awards
    /// `reward` points per line.
    pub fn new(active_colors: Vec<Color>, reward: u64, rng: ChaCha12Rng) -> Result<Self, CubeError> {
        if active_colors.is_empty() {
            return Err(CubeError::EmptyPalette);
        }
        Ok(Self {
            active_colors,
            reward,
            rng,
            next_ticket: 0,
            pending: IndexMap::new(),
        })
    }

    /// Returns the colors that new faces are drawn from.
    pub fn active_colors(&self) -> &[Color] {
        &self.active_colors
    }
    /// Returns the points awarded per line.
    pub fn reward(&self) -> u64 {
        self.reward
    }

    /// Schedules a match for resolution.
    pub fn mark_for_resolution(&mut self, m: Match) -> ResolutionTicket {
        let ticket = ResolutionTicket(self.next_ticket);
        self.next_ticket += 1;
        log::debug!("marked {} {} {} on {ticket}", m.face, m.kind, m.index);
        self.pending.insert(ticket, m);
        ticket
    }

    /// Returns the matches awaiting resolution, in the order they were marked.
    pub fn pending(&self) -> impl Iterator<Item = (ResolutionTicket, &Match)> {
        self.pending.iter().map(|(&t, m)| (t, m))
    }
    /// Returns whether any match is awaiting resolution.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Draws `n` colors uniformly at random from the active colors.
    pub fn generate_colors(&mut self, n: usize) -> Vec<Color> {
        (0..n)
            .filter_map(|_| self.active_colors.choose(&mut self.rng).copied())
            .collect()
    }

    /// Resolves a pending match: gives each block in the line a new random
    /// color on the matched face and adds the reward to `score`.
    ///
    /// Only the matched face of each block is repainted. The blocks are
    /// looked up by identity, so a match stays attached to the same blocks
    /// even if it is resolved late.
    ///
    /// If any block of the match is not part of `cube`, nothing is changed
    /// and the match stays pending.
    pub fn apply_resolution(
        &mut self,
        cube: &mut Cube,
        ticket: ResolutionTicket,
        score: &mut Score,
    ) -> Result<ResolvedMatch, CubeError> {
        let pending = self
            .pending
            .get(&ticket)
            .ok_or(CubeError::UnknownResolution(ticket))?;
        let coords = pending
            .blocks
            .iter()
            .map(|&id| {
                cube.block(id)
                    .map(|block| block.coord())
                    .ok_or(CubeError::UnknownBlock(id))
            })
            .collect::<Result<Vec<_>, CubeError>>()?;

        let found = self
            .pending
            .shift_remove(&ticket)
            .ok_or(CubeError::UnknownResolution(ticket))?;
        let new_colors = self.generate_colors(found.blocks.len());
        for (coord, &color) in coords.into_iter().zip(&new_colors) {
            cube.block_at_mut(coord)?.set_face_color(found.face, color);
        }
        score.add(self.reward);
        log::debug!("resolved {ticket} for {} points (score {score})", self.reward);
        Ok(ResolvedMatch {
            ticket,
            found,
            new_colors,
            reward: self.reward,
        })
    }
}
