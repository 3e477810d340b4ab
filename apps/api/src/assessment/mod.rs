// Skills verification: question bank, quiz scoring, scripted terminal,
// attempt storage and the verified-flag writer.

pub mod attempts;
pub mod bank;
pub mod flow;
pub mod handlers;
pub mod scoring;
pub mod terminal;
pub mod verification;
