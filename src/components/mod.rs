//! UI Components
//!
//! Page-level and reusable Leptos components.

mod back_button;
mod builder;
mod catalog;
mod context_menu;
mod delete_confirm_button;
mod question_list;
mod quiz_page;
mod statistics;

pub use back_button::BackButton;
pub use builder::BuilderPage;
pub use catalog::CatalogPage;
pub use context_menu::ContextMenu;
pub use delete_confirm_button::DeleteConfirmButton;
pub use question_list::QuestionList;
pub use quiz_page::QuizPage;
pub use statistics::StatisticsPage;
