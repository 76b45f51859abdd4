/// Anchor selection for new creases
pub mod anchor;
/// Generation pipeline orchestration
pub mod executor;
/// Fold simulation state machine
pub mod fold;
/// Pairwise crease intersection
pub mod intersection;
/// Seeded paper, weight range, breathing cycle and relationship bias
pub mod paper;
/// Fold strategy variants and seeded selection
pub mod strategy;
/// Terminus selection for new creases
pub mod terminus;
