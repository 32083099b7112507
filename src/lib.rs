//! field-mask: keystroke-level formatting for structured text fields
//!
//! Turns raw keystrokes into a display string, a canonical stored value and a
//! caret position, for phone numbers, card numbers, currency amounts, Turkish
//! national and tax IDs, IBANs, dates and usernames. Pure and synchronous:
//! the UI layer owns the input element and calls the engine once per edit.
//!
//! - Character filtering ([`filter`])
//! - Mask application and stripping ([`mask`])
//! - Currency formatting with caret remapping ([`currency`])
//! - Card issuer classification ([`card`])
//! - Slug generation ([`slug`])
//! - Checksum and format validators ([`validators`])
//! - Presets, schemas and the schema loader ([`config`])
//! - The per-edit orchestrator ([`processor`])

pub mod card;
pub mod config;
pub mod currency;
pub mod error;
pub mod filter;
pub mod mask;
pub mod processor;
pub mod slug;
pub mod validators;

// Re-export commonly used types
pub use card::{classify, CardIssuer};
pub use config::{
    CaseTransform, FieldConfig, FieldOptions, FieldSpec, FieldValues, MaskResolver, Preset,
    Schema, SchemaLoader,
};
pub use currency::{CurrencyConfig, SymbolPosition};
pub use error::{FieldError, ValidationFailure};
pub use filter::CharClass;
pub use processor::{backspace_at_end, process_input, render_stored, ProcessingResult};
pub use validators::{validate_field, DateOrder, Validator, ValidatorKind};
