pub mod remote;
pub mod source;
pub mod table;
pub mod types;

pub use remote::{ADVICE_UNAVAILABLE, RemoteAdviceSource};
pub use source::{AdviceSource, LookupError, load_catalog};
pub use table::{LocalAdviceSource, NO_ADVICE_AVAILABLE, default_catalog};
pub use types::{AdviceResponse, Catalog, Language, Symptom};
