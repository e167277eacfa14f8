pub mod use_cases;

pub use use_cases::bot_console::{BotConsole, FaqQuery};
pub use use_cases::console_service::{ConsoleService, ExportKind, SuiteStep};
