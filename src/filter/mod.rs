pub mod goal_line;
pub mod order_book;
pub mod price_history;

pub use goal_line::{
    extract_token_ids, filter_45_goal_line_markets, filter_45_over_under_by_question,
    is_45_over_under_market, validate_45_goal_line_market, validate_market_filtering,
};
pub use order_book::best_ask;
pub use price_history::{has_price_history, iso_date_to_unix_timestamp, merge_price_history};
