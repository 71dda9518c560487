pub mod store;
pub mod token;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_store;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_store::LocalStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

pub use store::{CredentialStore, KeyValueStore, RolePolicy, ROLE_KEY, TOKEN_KEY};
pub use token::{decode, is_live, unix_now, Claims, Role, TokenError};
