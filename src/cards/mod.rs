//! Cards, their data records and the effect interpreter.
//!
//! - `card`: the `Card` instance with upgrade state
//! - `record`: `CardRecord` and `EffectDescriptor` data schema
//! - `library`: `CardLibrary` lookup and the in-memory `CardRegistry`
//! - `interpreter`: play validation and effect resolution

mod card;
mod interpreter;
mod library;
mod record;

pub use card::{Card, CardRarity, CardTarget, CardType, CardUpgrade, ANY_CLASS};
pub use interpreter::{can_play, play, EffectReport, PlayOutcome, PlayRejection};
pub use library::{CardLibrary, CardRegistry};
pub use record::{CardRecord, EffectDescriptor, EffectKind};
