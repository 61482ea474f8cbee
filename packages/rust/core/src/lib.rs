//! Display logic for ContactBook.
//!
//! Turns an address-book snapshot into letter-grouped, searchable contact
//! lists (`pipeline`), builds jump-index anchors (`index`) and dialer intents
//! (`dialer`), and runs the one-time startup fetch (`session`).

pub mod dialer;
pub mod index;
pub mod name;
pub mod pipeline;
pub mod session;

pub use dialer::{Dialer, MessageIntent, digits_only, primary_number};
pub use index::{LetterIndexEntry, RowLayout, anchor_for, build_letter_index, letter_at_offset};
pub use pipeline::{DisplayGroup, contact_count, group_for_letter, letters, render};
pub use session::{AccessStatus, AddressBook, LOADING_MESSAGE, Session, Snapshot, load_session};
