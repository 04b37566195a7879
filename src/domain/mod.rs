pub mod cooldown;
pub mod event;
pub mod policy;
pub mod prompt_state;
pub mod record_key;
pub mod types;

pub use cooldown::*;
pub use event::*;
pub use policy::*;
pub use prompt_state::*;
pub use record_key::*;
pub use types::*;
