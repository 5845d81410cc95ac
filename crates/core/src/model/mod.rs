mod level;
mod question;
mod result;
mod score;
mod settings;

pub use level::{Level, LevelError};
pub use question::Question;
pub use result::GameResult;
pub use score::{ProgressSnapshot, Score};
pub use settings::{GameSettings, MIN_SUM_VALUE, SettingsError};
