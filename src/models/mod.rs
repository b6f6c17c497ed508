pub mod covid;
pub mod questionnaire;

pub use covid::*;
pub use questionnaire::*;
