//! A streaming ASC X12 005010 healthcare EDI parser.
//!
//! Delimiters are discovered from the interchange's `ISA` segment, segments
//! are tokenized from the remaining bytes, and loop membership — which is
//! never marked on the wire — is inferred from a per-transaction dispatch
//! table as each segment is folded into the in-progress record. A two-tier
//! validator (field/segment shape, then segment/loop/transaction semantics)
//! runs once a transaction's `SE` is reached, producing a model that carries
//! its own diagnostics rather than aborting on the first problem.
//!
//! ## Quick start
//!
//! ```rust
//! use x12_healthcare::Parser;
//!
//! let edi = "ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *230101*1253*^*00501*000000907*1*T*:~GS*HS*SENDER*RECEIVER*20230101*1253*1*X*005010X279A1~ST*270*0001*005010X279A1~BHT*0022*13*10001234*20230101*1319~HL*1**20*1~NM1*PR*2*ABC INSURANCE*****PI*12345~SE*5*0001~GE*1*1~IEA*1*000000907~";
//!
//! let parser = Parser::new();
//! let interchange = parser.parse(edi).unwrap();
//! let transaction = &interchange.functional_groups[0].transactions[0];
//! assert!(transaction.is_valid());
//! ```
//!
//! ## Tokenizing without validating
//!
//! ```rust
//! use x12_healthcare::Parser;
//!
//! # let edi = "ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *230101*1253*^*00501*000000907*1*T*:~GS*HS*SENDER*RECEIVER*20230101*1253*1*X*005010X279A1~ST*270*0001~SE*2*0001~GE*1*1~IEA*1*000000907~";
//! let parser = Parser::new();
//! for segment in parser.segments(edi).unwrap() {
//!     println!("{} ({} fields)", segment.id, segment.elements.len());
//! }
//! ```

pub mod binder;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod parser;
pub mod render;
pub mod schema;
pub mod tokenizer;
pub mod utils;
pub mod validators;

pub use config::{ParserConfig, ParserConfigBuilder};
pub use diagnostics::{Diagnostic, DiagnosticKind, Location, Severity};
pub use error::EdiError;
pub use models::*;
pub use parser::Parser;
pub use render::render;
