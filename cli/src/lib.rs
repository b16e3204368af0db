mod faq_cmd;

pub use faq_cmd::AskArgs;
pub use faq_cmd::ChatArgs;
pub use faq_cmd::CheckArgs;
pub use faq_cmd::FaqCli;
pub use faq_cmd::FaqCommand;
pub use faq_cmd::GlobalArgs;
pub use faq_cmd::SAMPLE_QUESTIONS;
pub use faq_cmd::load_config;
