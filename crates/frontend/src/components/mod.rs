pub mod bottom_sheet;
pub mod chart_view;
pub mod comment_box;
pub mod map_view;
pub mod mode_bar;
pub mod range_selector;
pub mod welcome_overlay;
