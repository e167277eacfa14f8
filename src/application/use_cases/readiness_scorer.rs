use crate::domain::bot_config::BotConfig;

const PROFILE_FIELD_POINTS: u32 = 10;
const FAQ_POINTS_EACH: u32 = 6;
const FAQ_POINTS_CAP: u32 = 30;
const TEMPLATE_POINTS_EACH: u32 = 3;
const TEMPLATE_POINTS_CAP: u32 = 10;
const API_POINTS: u32 = 20;
const TEST_POINTS: u32 = 10;
const MAX_SCORE: u32 = 100;

/// Deployment readiness as a 0-100 percentage.
///
/// Profile fields: 10 each. FAQs: 6 each up to 30. Templates: 3 each up to
/// 10. Mock API connection: 20. At least one simulated test: 10.
pub fn readiness_score(
    config: &BotConfig,
    faq_count: usize,
    template_count: usize,
    api_connected: bool,
    test_ran: bool,
) -> u8 {
    let mut score = 0u32;

    for present in [
        config.has_name(),
        config.has_business_name(),
        config.has_phone_number(),
    ] {
        if present {
            score += PROFILE_FIELD_POINTS;
        }
    }

    score += capped(faq_count, FAQ_POINTS_EACH, FAQ_POINTS_CAP);
    score += capped(template_count, TEMPLATE_POINTS_EACH, TEMPLATE_POINTS_CAP);

    if api_connected {
        score += API_POINTS;
    }
    if test_ran {
        score += TEST_POINTS;
    }

    score.min(MAX_SCORE) as u8
}

fn capped(count: usize, each: u32, cap: u32) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    count.saturating_mul(each).min(cap)
}
