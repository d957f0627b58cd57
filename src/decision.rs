/// Drag distance required before a release commits a decision.
pub const COMMIT_THRESHOLD: f64 = 120.0;

/// What the user decided about a product by completing a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Like,
    Pass,
    AddToCart,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Like => "Liked",
            Self::Pass => "Passed",
            Self::AddToCart => "Added to cart",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwipeConfig {
    pub commit_threshold: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            commit_threshold: COMMIT_THRESHOLD,
        }
    }
}

/// Classifies a release offset into a committed decision, or `None` for a
/// spring-back. Horizontal rules win only when the horizontal travel strictly
/// dominates the vertical travel and vice versa, so an exact diagonal tie
/// commits nothing. Downward swipes never commit.
pub fn decide(dx: f64, dy: f64, config: &SwipeConfig) -> Option<Decision> {
    let threshold = config.commit_threshold;
    if dx > threshold && dx.abs() > dy.abs() {
        Some(Decision::Like)
    } else if dx < -threshold && dx.abs() > dy.abs() {
        Some(Decision::Pass)
    } else if dy < -threshold && dy.abs() > dx.abs() {
        Some(Decision::AddToCart)
    } else {
        None
    }
}
