//! Configuration section definitions.
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[site]`     | Channel metadata and permalink base            |
//! | `[store]`    | Where markdown posts are listed and fetched    |
//! | `[naming]`   | Title and slug derivation from object keys     |
//! | `[feed]`     | Output format, path and minification           |
//! | `[markdown]` | Optional CommonMark extensions                 |
//! | `[publish]`  | Command run after the feed is written          |

mod feed;
mod markdown;
mod naming;
mod publish;
mod site;
mod store;

pub use feed::{FeedConfig, FeedFormat};
pub use markdown::MarkdownConfig;
pub use naming::NamingConfig;
pub use publish::PublishConfig;
pub use site::SiteInfoConfig;
pub use store::{StoreConfig, StoreProvider};
