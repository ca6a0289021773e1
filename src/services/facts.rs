use rand::seq::SliceRandom;

/// Rotating copy for the waiting card on the results page. Presentation
/// only, deliberately kept out of the fetch state machine.
pub const FUN_FACTS: [&str; 10] = [
    "Did you know? AI can score leads automatically, helping you focus only on high-quality prospects.",
    "Fact: Using AI for follow-up reminders increases the chances of closing deals by 42%.",
    "Insight: AI-powered sentiment analysis can detect prospect interest levels from their replies.",
    "Tip: Scheduling outreach at optimal times with AI can double your message open rates.",
    "Stat: Businesses using AI-driven LinkedIn campaigns report a 35% faster sales cycle.",
    "Did you know? AI can personalize connection requests at scale without sounding generic.",
    "Fact: AI-driven A/B testing for LinkedIn messages improves conversion rates by up to 60%.",
    "Insight: Companies that leverage AI in sales prospecting reduce manual research time by 70%.",
    "Tip: AI can identify job changes or promotions instantly, giving you the perfect moment to reach out.",
    "Stat: Sales teams using AI-assisted outreach see 2.3x higher pipeline growth than traditional methods.",
];

pub fn random_fun_fact() -> &'static str {
    FUN_FACTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FUN_FACTS[0])
}
