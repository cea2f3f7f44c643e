use rand::seq::SliceRandom;
use rand::Rng;

pub const QUOTES: [&str; 5] = [
    "Success is not final, failure is not fatal – it is the courage to continue that counts.",
    "Every rejection brings you one step closer to the right opportunity.",
    "Your resume gets you interviews. Your persistence gets you offers.",
    "Don’t tailor yourself to rejection – tailor your resume to success.",
    "The right job will value the skills you’re building today.",
];

/// One quote, chosen uniformly with `rng`.
pub fn pick_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}

pub fn random_quote() -> &'static str {
    pick_quote(&mut rand::thread_rng())
}
