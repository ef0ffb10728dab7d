pub mod daybook;
pub mod history;
pub mod session;
pub mod templates;

pub use daybook::{Day, DayBook};
pub use session::Session;
pub use templates::TemplateStore;
