pub mod create_tab;
pub mod delete_tab;
pub mod get_tabs;
pub mod update_tabs;

pub use create_tab::create_tab;
pub use delete_tab::delete_tab;
pub use get_tabs::get_all_tabs;
pub use update_tabs::update_tab;
