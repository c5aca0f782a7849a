use matchcube_core::{
    Match, Palette, RenderBridge, ResolutionTicket, ResolvedMatch, RotationPlan, Score,
};

/// Render bridge for headless play that logs every event.
#[derive(Debug, Clone)]
pub(crate) struct LoggingBridge {
    palette: Palette,
    /// How long a renderer would highlight each match.
    resolve_delay_ms: u64,
}
impl LoggingBridge {
    pub(crate) fn new(palette: Palette, resolve_delay_ms: u64) -> Self {
        Self {
            palette,
            resolve_delay_ms,
        }
    }
}
impl RenderBridge for LoggingBridge {
    fn on_rotation_settled(&mut self, plan: &RotationPlan) {
        log::info!("rotated {} ({} blocks moved)", plan.request, plan.moves.len());
    }

    fn on_match_found(&mut self, ticket: ResolutionTicket, found: &Match) {
        log::info!(
            "{ticket}: {} {} {} is all {}; highlighting for {}ms",
            found.face,
            found.kind,
            found.index,
            self.palette.color_name(found.color),
            self.resolve_delay_ms,
        );
    }

    fn on_match_resolved(&mut self, resolved: &ResolvedMatch) {
        log::info!(
            "{}: repainted with {}",
            resolved.ticket,
            self.palette.describe(&resolved.new_colors),
        );
    }

    fn on_score_changed(&mut self, score: Score) {
        log::info!("score: {score}");
    }
}
