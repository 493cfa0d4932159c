pub mod archive;
pub mod commentary;
pub mod market_data;
pub mod mover_selector;
pub mod news_ranker;
pub mod report_builder;
