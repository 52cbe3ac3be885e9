//! Read-only views over owned collections.
//!
//! A component that owns mutable state (configuration, peer lists, routing
//! tables) often has to hand parts of it to code that must not change it.
//! The types in this crate wrap a shared borrow of that state and expose
//! only accessors, so handing out a view costs nothing and never copies.
//!
//! - [`Slice`]: a sequence.
//! - [`SliceOfViews`]: a sequence whose elements are handed out as their
//!   own views (see [`ViewCloner`]).
//! - [`Map`]: a key/value map.
//! - [`MapFn`]: a map whose values are converted on every read.
//! - [`PrefixSlice`]: a sequence of network prefixes with route queries.
//!
//! Views distinguish a missing collection ("nil") from an empty one and
//! serialize exactly like the collection they wrap. Decoding into a view is
//! a one-time initialization, see [`Populate`].
//!
//! ```
//! use warden_views::Slice;
//!
//! let owned = vec![1, 2, 3];
//! let view = Slice::of(&owned);
//! assert_eq!(view.len(), 3);
//! assert_eq!(view.index_func(|&x| x == 2), Some(1));
//! assert!(!view.is_nil());
//! assert!(Slice::<u8>::nil().is_nil());
//! ```

mod backing;
/// Decode-once support shared by every view.
pub mod codec;
/// View error type.
pub mod error;
/// Map views.
pub mod map;
/// Network prefix sequence view.
pub mod prefix;
/// Sequence view.
pub mod slice;
/// Sequence view over elements with their own views.
pub mod slice_of_views;
/// Clone/view capability traits.
pub mod struct_view;

pub use codec::Populate;
pub use error::{Result, ViewError};
pub use map::{Map, MapFn};
pub use prefix::PrefixSlice;
pub use slice::Slice;
pub use slice_of_views::SliceOfViews;
pub use struct_view::{StructView, ViewCloner};
