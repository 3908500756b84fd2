use crate::models::{BestAsk, OrderLevel};

/// Lowest-priced ask level, first one on ties. Levels whose price or size
/// does not parse are skipped; None when nothing usable remains.
pub fn best_ask(levels: &[OrderLevel]) -> Option<BestAsk> {
    levels
        .iter()
        .filter_map(parse_level)
        .fold(None, |best: Option<BestAsk>, level| match best {
            Some(b) if b.price <= level.price => Some(b),
            _ => Some(level),
        })
}

fn parse_level(level: &OrderLevel) -> Option<BestAsk> {
    let price: f64 = level.price.trim().parse().ok()?;
    let size: f64 = level.size.trim().parse().ok()?;

    if price.is_nan() {
        return None;
    }

    Some(BestAsk { price, size })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(price: &str, size: &str) -> OrderLevel {
        OrderLevel {
            price: price.to_string(),
            size: size.to_string(),
        }
    }

    #[test]
    fn test_best_ask_is_lowest_price() {
        let levels = vec![level("0.99", "10"), level("0.21", "150.5"), level("0.35", "40")];

        assert_eq!(
            best_ask(&levels),
            Some(BestAsk {
                price: 0.21,
                size: 150.5
            })
        );
    }

    #[test]
    fn test_best_ask_ties_keep_first() {
        let levels = vec![level("0.4", "1"), level("0.4", "2")];
        assert_eq!(best_ask(&levels).unwrap().size, 1.0);
    }

    #[test]
    fn test_best_ask_empty() {
        assert_eq!(best_ask(&[]), None);
        assert_eq!(best_ask(&[level("n/a", "5")]), None);
    }

    #[test]
    fn test_best_ask_skips_unparseable() {
        let levels = vec![level("", "3"), level("0.6", "7")];
        assert_eq!(best_ask(&levels).unwrap().price, 0.6);
    }
}
