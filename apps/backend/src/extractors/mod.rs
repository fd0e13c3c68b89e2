pub mod app_state;
pub mod auth_token;
pub mod current_user;
pub mod game_id;
pub mod validated_json;

pub use auth_token::AuthToken;
pub use current_user::{CurrentUser, MaybeUser};
pub use game_id::GameHandle;
pub use validated_json::{Validate, ValidatedJson};
