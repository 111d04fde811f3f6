//! Well-known action parameter keys.
//!
//! Attachments talk back to the engine only by writing these keys onto an
//! action before it is dispatched.

/// Item chosen in a shop attachment.
pub const ITEM_ID: &str = "itemId";

/// Set on actions created by an interstitial, naming the interstitial.
pub const INTERSTITIAL: &str = "interstitial";
