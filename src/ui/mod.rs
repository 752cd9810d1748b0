pub mod theme;
pub mod month_view;
