use crate::{Match, ResolutionTicket, ResolvedMatch, RotationPlan, Score};

/// Observer of a [`crate::Game`], typically a renderer.
///
/// Every method has an empty default implementation. The game calls these
/// synchronously while handling an event; they must not call back into the
/// game.
pub trait RenderBridge {
    /// Called after a rotation has been committed to the cube.
    fn on_rotation_settled(&mut self, plan: &RotationPlan) {
        let _ = plan;
    }
    /// Called for each match detected after a rotation. The renderer should
    /// highlight it and later call [`crate::Game::resolve_after_delay()`] with
    /// the ticket.
    fn on_match_found(&mut self, ticket: ResolutionTicket, found: &Match) {
        let _ = (ticket, found);
    }
    /// Called after a match has been repainted.
    fn on_match_resolved(&mut self, resolved: &ResolvedMatch) {
        let _ = resolved;
    }
    /// Called when the score changes.
    fn on_score_changed(&mut self, score: Score) {
        let _ = score;
    }
}

impl RenderBridge for () {}
