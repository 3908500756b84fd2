use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MarketError, Result};
use crate::models::{FilteredMarket, RawEvent, RawMarket, TokenPair, GOAL_LINE};

/// Gamma groups the alternate-line markets of a fixture under this event slug suffix
pub const EVENT_SLUG_SUFFIX: &str = "more-markets";

/// Market slug suffix of the 4.5 total-goals line
pub const MARKET_SLUG_SUFFIX: &str = "4pt5";

/// Other goal lines a strict 4.5 question must not mention
const FORBIDDEN_LINES: [&str; 7] = ["2.5", "3.5", "5.5", "6.5", "7.5", "8.5", "9.5"];

// "4.5" not glued to another number: rejects "14.5", "4.51", "4.5.1", accepts "4.5?" and "4.5."
static RE_LINE_45: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9.])4\.5(?:$|[^0-9.]|\.(?:$|[^0-9]))").expect("valid 4.5 pattern")
});

/// Select the 4.5 goal-line markets from a Gamma event list.
///
/// A market qualifies when its event slug ends with `more-markets` and its own
/// slug ends with `4pt5`. Output keeps event order, then market order within
/// each event. A qualifying market whose prices or token ids cannot be parsed
/// fails the whole call.
pub fn filter_45_goal_line_markets(events: &[RawEvent]) -> Result<Vec<FilteredMarket>> {
    let mut filtered = Vec::new();

    for event in events {
        if !event.slug.ends_with(EVENT_SLUG_SUFFIX) {
            continue;
        }

        for market in &event.markets {
            if market.slug.ends_with(MARKET_SLUG_SUFFIX) {
                filtered.push(to_filtered_market(event, market)?);
            }
        }
    }

    Ok(filtered)
}

/// Question-text fallback for events whose slugs do not follow the
/// `more-markets` / `4pt5` layout
pub fn filter_45_over_under_by_question(event: &RawEvent) -> Result<Vec<FilteredMarket>> {
    event
        .markets
        .iter()
        .filter(|m| is_45_over_under_market(&m.question))
        .map(|m| to_filtered_market(event, m))
        .collect()
}

/// Whether a question reads as a 4.5 total-goals over/under market
pub fn is_45_over_under_market(question: &str) -> bool {
    let lower = question.to_lowercase();

    let has_total_goals = lower.contains("total goals") || lower.contains("o/u");

    has_total_goals && has_45_line(question) && is_over_under(&lower)
}

/// Like `is_45_over_under_market` but requires the "total goals" wording
pub fn validate_45_goal_line_market(question: &str) -> bool {
    let lower = question.to_lowercase();

    lower.contains("total goals") && has_45_line(question) && is_over_under(&lower)
}

/// Strictest check: a 4.5 over/under question that mentions no other goal line.
///
/// A question that cites another x.5 number for an unrelated reason (a corner
/// line, say) is rejected too.
pub fn validate_market_filtering(question: &str) -> bool {
    if !is_45_over_under_market(question) {
        return false;
    }

    let lower = question.to_lowercase();
    !FORBIDDEN_LINES.iter().any(|line| lower.contains(line))
}

/// Lenient token extraction; None when `clobTokenIds` is malformed or short
pub fn extract_token_ids(market: &RawMarket) -> Option<TokenPair> {
    let ids: Vec<String> = serde_json::from_str(&market.clob_token_ids).ok()?;
    let mut ids = ids.into_iter();

    Some(TokenPair {
        over_token_id: ids.next()?,
        under_token_id: ids.next()?,
    })
}

fn has_45_line(question: &str) -> bool {
    RE_LINE_45.is_match(question)
}

fn is_over_under(lower: &str) -> bool {
    lower.contains("over") && lower.contains("under")
}

fn to_filtered_market(event: &RawEvent, market: &RawMarket) -> Result<FilteredMarket> {
    let [over_price, under_price] =
        parse_pair(&market.outcome_prices, "outcomePrices", &market.slug)?;
    let [over_token_id, under_token_id] =
        parse_pair(&market.clob_token_ids, "clobTokenIds", &market.slug)?;

    // Index 0 is Over, index 1 is Under
    Ok(FilteredMarket {
        event_id: event.id.clone(),
        event_slug: event.slug.clone(),
        event_title: event.title.clone(),
        event_start_date: event.start_date.clone(),
        event_creation_date: event.creation_date.clone(),
        market_id: market.id.clone(),
        market_question: market.question.clone(),
        market_slug: market.slug.clone(),
        over_token_id,
        under_token_id,
        current_over_price: parse_price(&over_price, &market.slug)?,
        current_under_price: parse_price(&under_price, &market.slug)?,
        best_ask_over_price: None,
        best_ask_under_price: None,
        best_ask_over_volume: None,
        best_ask_under_volume: None,
        line: GOAL_LINE,
        game_start_time: market.game_start_time.clone(),
    })
}

fn parse_pair(raw: &str, field: &'static str, market_slug: &str) -> Result<[String; 2]> {
    let values: Vec<String> =
        serde_json::from_str(raw).map_err(|source| MarketError::MalformedField {
            market_slug: market_slug.to_string(),
            field,
            source,
        })?;

    <[String; 2]>::try_from(values).map_err(|values| MarketError::WrongArity {
        market_slug: market_slug.to_string(),
        field,
        len: values.len(),
    })
}

/// Outcome price as a probability in [0, 1]
fn parse_price(value: &str, market_slug: &str) -> Result<f64> {
    let invalid = || MarketError::InvalidPrice {
        market_slug: market_slug.to_string(),
        value: value.to_string(),
    };

    let price: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !price.is_finite() || !(0.0..=1.0).contains(&price) {
        return Err(invalid());
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIV_NEW_45: &str = "EPL: Will the total goals in the match between Liverpool FC and Newcastle United FC be over or under 4.5?";

    fn question_with_line(line: &str) -> String {
        format!(
            "EPL: Will the total goals in the match between Liverpool FC and Newcastle United FC be over or under {}?",
            line
        )
    }

    fn market(slug: &str, question: &str) -> RawMarket {
        RawMarket {
            id: "558934".to_string(),
            slug: slug.to_string(),
            question: question.to_string(),
            outcome_prices: r#"["0.185", "0.815"]"#.to_string(),
            clob_token_ids: r#"["7400665153", "6649119683"]"#.to_string(),
            game_start_time: "2026-01-31 17:30:00+00".to_string(),
        }
    }

    fn event(slug: &str, markets: Vec<RawMarket>) -> RawEvent {
        RawEvent {
            id: "112233".to_string(),
            slug: slug.to_string(),
            title: "Liverpool FC vs. Newcastle United FC".to_string(),
            start_date: "2026-01-24T10:00:00Z".to_string(),
            creation_date: "2026-01-24T09:00:00Z".to_string(),
            markets,
        }
    }

    #[test]
    fn test_question_validators_accept_45_line() {
        assert!(is_45_over_under_market(LIV_NEW_45));
        assert!(validate_45_goal_line_market(LIV_NEW_45));
        assert!(validate_market_filtering(LIV_NEW_45));
    }

    #[test]
    fn test_question_validators_reject_other_lines() {
        for line in ["2.5", "3.5", "5.5", "14.5", "4.51"] {
            let question = question_with_line(line);
            assert!(!is_45_over_under_market(&question), "{}", line);
            assert!(!validate_45_goal_line_market(&question), "{}", line);
            assert!(!validate_market_filtering(&question), "{}", line);
        }
    }

    #[test]
    fn test_question_requires_over_and_under() {
        let margin = "EPL: Will Liverpool FC beat Newcastle United FC by more than 4.5 goals?";
        assert!(!is_45_over_under_market(margin));
        assert!(!validate_market_filtering(margin));

        let over_only = "EPL: Will the total goals in the match be over 4.5?";
        assert!(!is_45_over_under_market(over_only));

        assert!(!is_45_over_under_market("EPL: Will Liverpool FC beat Newcastle United FC?"));
    }

    #[test]
    fn test_ou_wording() {
        let question = "Liverpool FC vs. Newcastle United FC: Over/Under O/U 4.5";
        assert!(is_45_over_under_market(question));
        assert!(!validate_45_goal_line_market(question));
    }

    #[test]
    fn test_line_boundaries() {
        assert!(has_45_line("4.5"));
        assert!(has_45_line("over or under 4.5."));
        assert!(has_45_line("(4.5)"));
        assert!(!has_45_line("4.5.1"));
        assert!(!has_45_line("1.4.5"));
        assert!(!has_45_line("24.5 corners"));
    }

    #[test]
    fn test_strict_rejects_mixed_lines() {
        let question = "Total goals over or under 4.5? (corners line 9.5 settled separately)";
        assert!(is_45_over_under_market(question));
        assert!(!validate_market_filtering(question));
    }

    #[test]
    fn test_filter_matching_slugs() {
        let events = vec![event(
            "epl-liv-new-2026-01-31-more-markets",
            vec![market(
                "epl-liv-new-2026-01-31-total-4pt5",
                "Liverpool FC vs. Newcastle United FC: O/U 4.5",
            )],
        )];

        let filtered = filter_45_goal_line_markets(&events).unwrap();
        assert_eq!(filtered.len(), 1);

        let m = &filtered[0];
        assert_eq!(m.market_slug, "epl-liv-new-2026-01-31-total-4pt5");
        assert_eq!(m.event_slug, "epl-liv-new-2026-01-31-more-markets");
        assert_eq!(m.event_title, "Liverpool FC vs. Newcastle United FC");
        assert_eq!(m.over_token_id, "7400665153");
        assert_eq!(m.under_token_id, "6649119683");
        assert_eq!(m.current_over_price, 0.185);
        assert_eq!(m.current_under_price, 0.815);
        assert_eq!(m.line, 4.5);
        assert!(m.best_ask_over_price.is_none());
        assert!(m.best_ask_under_volume.is_none());
    }

    #[test]
    fn test_filter_rejects_wrong_event_slug() {
        let events = vec![event(
            "epl-liv-new-2026-01-31-normal-event",
            vec![market("epl-liv-new-2026-01-31-total-4pt5", LIV_NEW_45)],
        )];

        assert!(filter_45_goal_line_markets(&events).unwrap().is_empty());
    }

    #[test]
    fn test_filter_rejects_wrong_market_slug() {
        let events = vec![event(
            "epl-liv-new-2026-01-31-more-markets",
            vec![market(
                "epl-liv-new-2026-01-31-total-2pt5",
                "Liverpool FC vs. Newcastle United FC: O/U 2.5",
            )],
        )];

        assert!(filter_45_goal_line_markets(&events).unwrap().is_empty());
    }

    #[test]
    fn test_filter_keeps_encounter_order() {
        let events = vec![
            event(
                "epl-ars-che-more-markets",
                vec![
                    market("epl-ars-che-total-4pt5", LIV_NEW_45),
                    market("epl-ars-che-total-3pt5", LIV_NEW_45),
                    market("epl-ars-che-spread-4pt5", LIV_NEW_45),
                ],
            ),
            event(
                "epl-eve-ful-more-markets",
                vec![market("epl-eve-ful-total-4pt5", LIV_NEW_45)],
            ),
        ];

        let slugs: Vec<String> = filter_45_goal_line_markets(&events)
            .unwrap()
            .into_iter()
            .map(|m| m.market_slug)
            .collect();

        assert_eq!(
            slugs,
            vec![
                "epl-ars-che-total-4pt5",
                "epl-ars-che-spread-4pt5",
                "epl-eve-ful-total-4pt5"
            ]
        );
    }

    #[test]
    fn test_malformed_fields_fail() {
        let mut bad_prices = market("x-total-4pt5", LIV_NEW_45);
        bad_prices.outcome_prices = "not json".to_string();
        let err = filter_45_goal_line_markets(&[event("x-more-markets", vec![bad_prices])])
            .unwrap_err();
        assert!(matches!(
            err,
            MarketError::MalformedField { field: "outcomePrices", .. }
        ));

        let mut short_ids = market("x-total-4pt5", LIV_NEW_45);
        short_ids.clob_token_ids = r#"["only-one"]"#.to_string();
        let err = filter_45_goal_line_markets(&[event("x-more-markets", vec![short_ids])])
            .unwrap_err();
        assert!(matches!(err, MarketError::WrongArity { len: 1, .. }));

        let mut bad_price = market("x-total-4pt5", LIV_NEW_45);
        bad_price.outcome_prices = r#"["abc", "0.5"]"#.to_string();
        let err = filter_45_goal_line_markets(&[event("x-more-markets", vec![bad_price])])
            .unwrap_err();
        assert!(matches!(err, MarketError::InvalidPrice { .. }));

        let out_of_range_prices = [
            r#"["NaN", "0.5"]"#,
            r#"["0.5", "1.7"]"#,
            r#"["inf", "0.5"]"#,
            r#"["-0.1", "0.5"]"#,
        ];
        for prices in out_of_range_prices {
            let mut out_of_range = market("x-total-4pt5", LIV_NEW_45);
            out_of_range.outcome_prices = prices.to_string();
            let err = filter_45_goal_line_markets(&[event("x-more-markets", vec![out_of_range])])
                .unwrap_err();
            assert!(matches!(err, MarketError::InvalidPrice { .. }), "{}", prices);
        }
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let mut certain = market("x-total-4pt5", LIV_NEW_45);
        certain.outcome_prices = r#"["0", "1"]"#.to_string();

        let filtered = filter_45_goal_line_markets(&[event("x-more-markets", vec![certain])])
            .unwrap();
        assert_eq!(filtered[0].current_over_price, 0.0);
        assert_eq!(filtered[0].current_under_price, 1.0);
    }

    #[test]
    fn test_malformed_market_outside_filter_is_ignored() {
        let mut other = market("x-total-2pt5", LIV_NEW_45);
        other.outcome_prices = "garbage".to_string();

        let events = vec![event(
            "x-more-markets",
            vec![other, market("x-total-4pt5", LIV_NEW_45)],
        )];

        assert_eq!(filter_45_goal_line_markets(&events).unwrap().len(), 1);
    }

    #[test]
    fn test_filter_by_question() {
        let e = event(
            "epl-liv-new-2026-01-31",
            vec![
                market("a", LIV_NEW_45),
                market("b", &question_with_line("2.5")),
            ],
        );

        let filtered = filter_45_over_under_by_question(&e).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].market_slug, "a");
        assert_eq!(filtered[0].event_id, "112233");
    }

    #[test]
    fn test_extract_token_ids() {
        let pair = extract_token_ids(&market("a", LIV_NEW_45)).unwrap();
        assert_eq!(pair.over_token_id, "7400665153");
        assert_eq!(pair.under_token_id, "6649119683");

        let mut broken = market("a", LIV_NEW_45);
        broken.clob_token_ids = "[".to_string();
        assert!(extract_token_ids(&broken).is_none());
    }

    #[test]
    fn test_filter_is_repeatable() {
        let events = vec![event(
            "epl-liv-new-more-markets",
            vec![market("epl-liv-new-total-4pt5", LIV_NEW_45)],
        )];

        assert_eq!(
            filter_45_goal_line_markets(&events).unwrap(),
            filter_45_goal_line_markets(&events).unwrap()
        );
    }
}
